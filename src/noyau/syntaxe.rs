// src/noyau/syntaxe.rs
//
// Analyse descendante récursive : jetons -> Expr
//
// Priorités (de la plus faible à la plus forte) :
//   1. additif        : a + b - c       => Add[a, b, Oppose(c)]
//   2. multiplicatif  : a * b / c * d   => Div[Mul[a, b, d], c]
//   3. puissance      : a ^ b ^ c       => Pow[a, Pow[b, c]] (associatif à droite)
//   4. préfixes       : S x, R x, -x    (le - unaire seulement en début de groupe)
//   5. suffixe        : x!
//   6. atomes         : (…), entier, décimal, décimal périodique
//
// Règles :
// - un "groupe" commence au début de l’entrée ou juste après '(' ;
//   le '-' unaire et le '+' devant un littéral n’y sont permis qu’en première position
// - aucune valeur n’est calculée ici (validation purement structurelle)

use num_bigint::BigInt;

use super::erreur::ErreurNoyau;
use super::expr::{Binaire, Decimal, Expr, Unaire};
use super::jetons::{tokenize, Tok};

/// Garde-fou anti-pile : imbrication maximale (parenthèses + préfixes + exposants).
const PROFONDEUR_MAX: usize = 256;

/// Analyse une chaîne normalisée.
pub fn parse(normalise: &str) -> Result<Expr, ErreurNoyau> {
    if normalise.is_empty() {
        return Err(ErreurNoyau::syntaxe("empty expression"));
    }
    let jetons = tokenize(normalise)?;
    parse_jetons(&jetons)
}

/// Analyse une suite de jetons.
pub fn parse_jetons(jetons: &[Tok]) -> Result<Expr, ErreurNoyau> {
    if jetons.is_empty() {
        return Err(ErreurNoyau::syntaxe("empty expression"));
    }
    verifier_parentheses(jetons)?;

    let mut a = Analyseur {
        jetons,
        pos: 0,
        debut_groupe: 0,
        profondeur: 0,
    };

    let e = a.additif()?;
    if a.pos < jetons.len() {
        return Err(a.invalide(0, jetons.len()));
    }
    Ok(e)
}

/// Équilibre global des parenthèses (avant toute analyse).
fn verifier_parentheses(jetons: &[Tok]) -> Result<(), ErreurNoyau> {
    let mut nid: i64 = 0;
    for t in jetons {
        match t {
            Tok::LPar => nid += 1,
            Tok::RPar => {
                nid -= 1;
                if nid < 0 {
                    return Err(ErreurNoyau::syntaxe("unmatched bracket"));
                }
            }
            _ => {}
        }
    }
    if nid > 0 {
        return Err(ErreurNoyau::syntaxe("unmatched bracket"));
    }
    Ok(())
}

struct Analyseur<'a> {
    jetons: &'a [Tok],
    pos: usize,
    debut_groupe: usize,
    profondeur: usize,
}

impl<'a> Analyseur<'a> {
    fn peek(&self) -> Option<&'a Tok> {
        self.jetons.get(self.pos)
    }

    fn peek_a(&self, decalage: usize) -> Option<&'a Tok> {
        self.jetons.get(self.pos + decalage)
    }

    fn en_debut_de_groupe(&self) -> bool {
        self.pos == self.debut_groupe
    }

    /// Texte des jetons [debut, fin) pour les messages.
    fn fragment(&self, debut: usize, fin: usize) -> String {
        let fin = fin.min(self.jetons.len());
        self.jetons[debut.min(fin)..fin]
            .iter()
            .map(Tok::symbole)
            .collect()
    }

    fn invalide(&self, debut: usize, fin: usize) -> ErreurNoyau {
        ErreurNoyau::syntaxe(format!(
            "invalid expression: {}",
            self.fragment(debut, fin)
        ))
    }

    /// Vérifie qu’un opérande commence bien ici (sinon : opérande manquant de `op`).
    fn exiger_operande(&self, message: impl FnOnce() -> String) -> Result<(), ErreurNoyau> {
        match self.peek() {
            None
            | Some(Tok::Plus)
            | Some(Tok::Moins)
            | Some(Tok::Star)
            | Some(Tok::Slash)
            | Some(Tok::Caret)
            | Some(Tok::Bang)
            | Some(Tok::RPar) => Err(ErreurNoyau::syntaxe(message())),
            _ => Ok(()),
        }
    }

    fn exiger_operande_droit(&self, op: &str) -> Result<(), ErreurNoyau> {
        self.exiger_operande(|| format!("missing right operand of {op} operator"))
    }

    /* ------------------------ 1. additif ------------------------ */

    fn additif(&mut self) -> Result<Expr, ErreurNoyau> {
        let premier = self.multiplicatif()?;
        let mut termes = vec![premier];

        while let Some(op @ (Tok::Plus | Tok::Moins)) = self.peek() {
            self.pos += 1;
            self.exiger_operande_droit(op.symbole())?;
            let t = self.multiplicatif()?;
            if matches!(op, Tok::Moins) {
                termes.push(Expr::oppose(t));
            } else {
                termes.push(t);
            }
        }

        if termes.len() == 1 {
            if let Some(t) = termes.pop() {
                return Ok(t);
            }
        }
        Ok(Expr::Binaire(Binaire::Add, termes))
    }

    /* ------------------------ 2. multiplicatif ------------------------ */

    fn multiplicatif(&mut self) -> Result<Expr, ErreurNoyau> {
        let mut numerateurs = vec![self.puissance()?];
        let mut diviseurs = Vec::new();

        while let Some(op @ (Tok::Star | Tok::Slash)) = self.peek() {
            self.pos += 1;
            self.exiger_operande_droit(op.symbole())?;
            let f = self.puissance()?;
            if matches!(op, Tok::Slash) {
                diviseurs.push(f);
            } else {
                numerateurs.push(f);
            }
        }

        let num = Expr::produit(numerateurs);
        if diviseurs.is_empty() {
            return Ok(num);
        }
        Ok(Expr::quotient(num, Expr::produit(diviseurs)))
    }

    /* ------------------------ 3. puissance ------------------------ */

    fn puissance(&mut self) -> Result<Expr, ErreurNoyau> {
        let base = self.unaire()?;

        if let Some(Tok::Caret) = self.peek() {
            self.pos += 1;
            self.exiger_operande_droit("^")?;
            self.entrer()?;
            let exposant = self.puissance()?;
            self.sortir();
            return Ok(Expr::puissance(base, exposant));
        }
        Ok(base)
    }

    /* ------------------------ 4. préfixes ------------------------ */

    fn unaire(&mut self) -> Result<Expr, ErreurNoyau> {
        let op = match self.peek() {
            Some(Tok::Moins) if self.en_debut_de_groupe() => Unaire::Oppose,
            Some(Tok::Somme) => Unaire::Somme,
            Some(Tok::Racine) => Unaire::Racine,
            _ => return self.postfixe(),
        };
        self.pos += 1;

        match op {
            Unaire::Oppose => self.exiger_operande_droit("-")?,
            Unaire::Somme => self.exiger_operande(|| "missing operand of S operator".into())?,
            _ => self.exiger_operande(|| "missing operand of R operator".into())?,
        }

        self.entrer()?;
        let x = self.unaire()?;
        self.sortir();
        Ok(Expr::unaire(op, x))
    }

    /* ------------------------ 5. suffixe ------------------------ */

    fn postfixe(&mut self) -> Result<Expr, ErreurNoyau> {
        let mut x = self.atome()?;
        let mut empiles = 0usize;
        while let Some(Tok::Bang) = self.peek() {
            self.pos += 1;
            // chaque ! ajoute un niveau à l’arbre
            self.entrer()?;
            empiles += 1;
            x = Expr::unaire(Unaire::Factorielle, x);
        }
        for _ in 0..empiles {
            self.sortir();
        }
        Ok(x)
    }

    /* ------------------------ 6. atomes ------------------------ */

    fn atome(&mut self) -> Result<Expr, ErreurNoyau> {
        match self.peek() {
            None => Err(ErreurNoyau::syntaxe("empty expression")),

            Some(Tok::LPar) => self.groupe(),

            Some(Tok::Chiffres(_)) | Some(Tok::Point) => self.litteral(),

            // "+4" : identité, seulement devant un littéral en début de groupe
            Some(Tok::Plus)
                if self.en_debut_de_groupe()
                    && matches!(self.peek_a(1), Some(Tok::Chiffres(_)) | Some(Tok::Point)) =>
            {
                self.pos += 1;
                self.litteral()
            }

            Some(
                t @ (Tok::Plus | Tok::Moins | Tok::Star | Tok::Slash | Tok::Caret | Tok::Bang),
            ) => Err(ErreurNoyau::syntaxe(format!(
                "missing left operand of {} operator",
                t.symbole()
            ))),

            Some(_) => Err(self.invalide(self.pos, self.pos + 1)),
        }
    }

    fn groupe(&mut self) -> Result<Expr, ErreurNoyau> {
        let ouverture = self.pos;
        self.pos += 1;

        if let Some(Tok::RPar) = self.peek() {
            return Err(ErreurNoyau::syntaxe("empty bracket"));
        }

        self.entrer()?;
        let ancien_debut = self.debut_groupe;
        self.debut_groupe = self.pos;

        let x = self.additif()?;

        match self.peek() {
            Some(Tok::RPar) => self.pos += 1,
            Some(_) => {
                let fin = self.fermeture(ouverture);
                return Err(self.invalide(ouverture + 1, fin));
            }
            None => return Err(ErreurNoyau::syntaxe("unmatched bracket")),
        }

        self.debut_groupe = ancien_debut;
        self.sortir();
        Ok(x)
    }

    /// Position de la parenthèse fermante associée à `ouverture`.
    fn fermeture(&self, ouverture: usize) -> usize {
        let mut nid = 0usize;
        for (i, t) in self.jetons.iter().enumerate().skip(ouverture) {
            match t {
                Tok::LPar => nid += 1,
                Tok::RPar => {
                    nid -= 1;
                    if nid == 0 {
                        return i;
                    }
                }
                _ => {}
            }
        }
        self.jetons.len()
    }

    /// chiffres | chiffres? . chiffres | chiffres? . ( chiffres )
    fn litteral(&mut self) -> Result<Expr, ErreurNoyau> {
        let debut = self.pos;

        let entier = match self.peek() {
            Some(Tok::Chiffres(c)) => {
                self.pos += 1;
                Some(c)
            }
            _ => None,
        };

        if !matches!(self.peek(), Some(Tok::Point)) {
            return match entier {
                Some(c) => Ok(Expr::Entier(entier_depuis(c)?)),
                None => Err(self.invalide(debut, self.pos + 1)),
            };
        }
        self.pos += 1;

        let entier = entier.map(|c| entier_depuis(c)).transpose()?;

        match (self.peek(), self.peek_a(1), self.peek_a(2)) {
            (Some(Tok::Chiffres(f)), _, _) => {
                self.pos += 1;
                Ok(Expr::Decimal(Decimal {
                    entier,
                    fraction: f.clone(),
                    periodique: false,
                }))
            }
            (Some(Tok::LPar), Some(Tok::Chiffres(f)), Some(Tok::RPar)) => {
                self.pos += 3;
                Ok(Expr::Decimal(Decimal {
                    entier,
                    fraction: f.clone(),
                    periodique: true,
                }))
            }
            _ => Err(self.invalide(debut, self.pos + 1)),
        }
    }

    fn entrer(&mut self) -> Result<(), ErreurNoyau> {
        self.profondeur += 1;
        if self.profondeur > PROFONDEUR_MAX {
            return Err(ErreurNoyau::syntaxe("expression is too deeply nested"));
        }
        Ok(())
    }

    fn sortir(&mut self) {
        self.profondeur = self.profondeur.saturating_sub(1);
    }
}

fn entier_depuis(chiffres: &str) -> Result<BigInt, ErreurNoyau> {
    chiffres
        .parse::<BigInt>()
        .map_err(|_| ErreurNoyau::interne(format!("invalid integer literal: {chiffres}")))
}
