//! Ligne de commande + commandes du mode interactif.
//!
//! Usage :
//!   quatre_quatres [--chiffres N] [--latex] [--detail] [--reponse N]... [--cible N] [--] [EXPR ...]
//!
//! Sans EXPR (ni --reponse), les expressions sont lues ligne à ligne sur l’entrée standard.

use crate::noyau::{analyser, evaluer_detail, vers_latex, ErreurNoyau, Reglages};

pub const USAGE: &str = "\
usage: quatre_quatres [--chiffres N] [--latex] [--detail] [--reponse N]... [--cible N] [--] [EXPR ...]

  --chiffres N   decimal digits shown for non-terminating results (0..=200, default 20)
  --latex        print the display markup instead of the value
  --detail       print normalised text, tokens, tree and exact value
  --reponse N    print the known four-fours expression for N (0..=3000)
  --cible N      interactive mode: target number to reach
  -h, --help     this message

interactive commands: :cible N, :libre, :reponse, :quitter";

/// Options analysées.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Options {
    pub chiffres: Option<usize>,
    pub latex: bool,
    pub detail: bool,
    pub reponses: Vec<i64>,
    pub cible: Option<i64>,
    pub aide: bool,
    pub expressions: Vec<String>,
}

/// Analyse `std::env::args()`.
pub fn lire_options() -> Result<Options, String> {
    let brut: Vec<String> = std::env::args().collect();
    lire_argv(brut.get(1..).unwrap_or_default())
}

/// Analyse une liste d’arguments (exposée pour les tests).
pub fn lire_argv(argv: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    let mut i = 0;

    while i < argv.len() {
        let arg = argv[i].as_str();

        // `--` termine les options (utile pour "-4+4").
        if arg == "--" {
            options.expressions.extend(argv[i + 1..].iter().cloned());
            break;
        }

        if !arg.starts_with("--") && arg != "-h" {
            options.expressions.push(arg.to_owned());
            i += 1;
            continue;
        }

        // --nom=valeur ou --nom valeur
        let (nom, valeur_jointe) = match arg.split_once('=') {
            Some((n, v)) => (n, Some(v.to_owned())),
            None => (arg, None),
        };

        let mut valeur = |nom: &str| -> Result<String, String> {
            if let Some(v) = valeur_jointe.clone() {
                return Ok(v);
            }
            i += 1;
            argv.get(i)
                .cloned()
                .ok_or_else(|| format!("{nom} requires a value"))
        };

        match nom {
            "-h" | "--help" => options.aide = true,
            "--latex" => options.latex = true,
            "--detail" => options.detail = true,
            "--chiffres" => {
                let v = valeur(nom)?;
                let n = v
                    .parse::<usize>()
                    .map_err(|_| format!("invalid number of digits: {v}"))?;
                options.chiffres = Some(n);
            }
            "--reponse" => {
                let v = valeur(nom)?;
                let n = v
                    .parse::<i64>()
                    .map_err(|_| format!("invalid target: {v}"))?;
                options.reponses.push(n);
            }
            "--cible" => {
                let v = valeur(nom)?;
                let n = v
                    .parse::<i64>()
                    .map_err(|_| format!("invalid target: {v}"))?;
                options.cible = Some(n);
            }
            _ => return Err(format!("unknown option: {arg}")),
        }
        i += 1;
    }

    if options.latex && options.detail {
        return Err("--latex and --detail are exclusive".to_owned());
    }

    Ok(options)
}

/* ------------------------ Sortie d’une expression ------------------------ */

/// Texte affiché pour une expression en argument.
///
/// `--latex` ne dépend que de l’analyse : une expression bien formée dont le calcul
/// échoue (ex: "4/0") a tout de même son balisage.
pub fn rendre(expr: &str, options: &Options, reglages: &Reglages) -> Result<String, ErreurNoyau> {
    if options.latex {
        let latex = vers_latex(expr);
        if latex.is_empty() {
            // vide seulement sur entrée invalide : on remonte l’erreur d’analyse
            analyser(expr)?;
        }
        return Ok(latex);
    }

    let d = evaluer_detail(expr, reglages)?;
    if options.detail {
        return Ok(format!(
            "entrée   : {expr}\nnormalisé: {}\njetons   : {}\narbre    : {}\nexact    : {}\nvaleur   : {}",
            d.normalise, d.jetons, d.arbre, d.exact, d.lecture
        ));
    }
    Ok(format!("{expr} = {}", d.lecture))
}

/* ------------------------ Mode interactif ------------------------ */

#[derive(Debug, PartialEq, Eq)]
pub enum Ligne {
    Vide,
    Expression(String),
    Cible(Option<i64>),
    Reponse,
    Quitter,
}

/// Une ligne lue en mode interactif : commande `:…` ou expression.
pub fn lire_ligne(ligne: &str) -> Result<Ligne, String> {
    let ligne = ligne.trim();
    if ligne.is_empty() {
        return Ok(Ligne::Vide);
    }
    let Some(commande) = ligne.strip_prefix(':') else {
        return Ok(Ligne::Expression(ligne.to_owned()));
    };

    let mut mots = commande.split_whitespace();
    match (mots.next(), mots.next(), mots.next()) {
        (Some("cible"), Some(n), None) => n
            .parse::<i64>()
            .map(|n| Ligne::Cible(Some(n)))
            .map_err(|_| format!("invalid target: {n}")),
        (Some("libre"), None, None) => Ok(Ligne::Cible(None)),
        (Some("reponse"), None, None) => Ok(Ligne::Reponse),
        (Some("quitter") | Some("q"), None, None) => Ok(Ligne::Quitter),
        _ => Err(format!("unknown command: {ligne}")),
    }
}
