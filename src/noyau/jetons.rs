// src/noyau/jetons.rs
//
// Normalisation + tokenisation.
// - normaliser : retire les espaces, remplace les symboles unicode (√ Σ ∑ × ÷),
//                passe en majuscules, puis vérifie l’alphabet autorisé
// - tokenize   : découpe la chaîne normalisée en jetons (chiffres groupés)

use super::erreur::ErreurNoyau;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tok {
    /// Suite de chiffres décimaux (jamais vide).
    Chiffres(String),
    Point,

    Plus,
    Moins,
    Star,
    Slash,
    Caret, // ^
    Bang,  // !

    Somme,  // S
    Racine, // R

    LPar,
    RPar,
}

impl Tok {
    /// Symbole ASCII du jeton (forme normalisée).
    pub fn symbole(&self) -> &str {
        match self {
            Tok::Chiffres(c) => c,
            Tok::Point => ".",
            Tok::Plus => "+",
            Tok::Moins => "-",
            Tok::Star => "*",
            Tok::Slash => "/",
            Tok::Caret => "^",
            Tok::Bang => "!",
            Tok::Somme => "S",
            Tok::Racine => "R",
            Tok::LPar => "(",
            Tok::RPar => ")",
        }
    }
}

/// Table fixe de substitution unicode -> ASCII.
fn substituer(c: char) -> char {
    match c {
        '√' => 'R',
        'Σ' | '∑' => 'S',
        '×' => '*',
        '÷' => '/',
        _ => c,
    }
}

fn est_autorise(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '+' | '-' | '*' | '/' | '(' | ')' | '!' | '^' | 'S' | 'R' | '.')
}

/// Normalise une saisie brute.
///
/// Ordre : espaces retirés, substitution unicode, majuscules, contrôle de l’alphabet.
pub fn normaliser(brut: &str) -> Result<String, ErreurNoyau> {
    let mut out = String::with_capacity(brut.len());

    for c in brut.chars().filter(|c| !c.is_whitespace()) {
        for m in substituer(c).to_uppercase() {
            out.push(m);
        }
    }

    if let Some(c) = out.chars().find(|c| !est_autorise(*c)) {
        return Err(ErreurNoyau::syntaxe(format!(
            "invalid character '{c}' in expression"
        )));
    }

    Ok(out)
}

/// Tokenize une chaîne déjà normalisée.
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurNoyau> {
    let chars: Vec<char> = s.chars().collect();
    let mut out = Vec::with_capacity(chars.len());
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_ascii_digit() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            out.push(Tok::Chiffres(chars[start..i].iter().collect()));
            continue;
        }

        let tok = match c {
            '.' => Tok::Point,
            '+' => Tok::Plus,
            '-' => Tok::Moins,
            '*' => Tok::Star,
            '/' => Tok::Slash,
            '^' => Tok::Caret,
            '!' => Tok::Bang,
            'S' => Tok::Somme,
            'R' => Tok::Racine,
            '(' => Tok::LPar,
            ')' => Tok::RPar,
            _ => {
                return Err(ErreurNoyau::syntaxe(format!(
                    "invalid character '{c}' in expression"
                )))
            }
        };
        out.push(tok);
        i += 1;
    }

    Ok(out)
}

/// Format utilitaire (journal) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    tokens
        .iter()
        .map(Tok::symbole)
        .collect::<Vec<_>>()
        .join(" ")
}
