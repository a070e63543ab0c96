// src/main.rs
//
// Quatre 4 : point d’entrée en ligne de commande
// ----------------------------------------------
// - EXPR ...      : évalue chaque expression ("EXPR = valeur")
// - --latex       : affiche le balisage LaTeX
// - --detail      : affiche la démarche (jetons, arbre, forme exacte)
// - --reponse N   : réponse précalculée
// - sans EXPR     : mode interactif (une partie, ligne à ligne)
//
// Journal : RUST_LOG=debug (ou trace) via env_logger.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use quatre_quatres::app::commande::{lire_ligne, lire_options, rendre, Ligne, Options, USAGE};
use quatre_quatres::app::Partie;
use quatre_quatres::noyau::{reponse, Reglages};

fn main() -> ExitCode {
    env_logger::init();

    let options = match lire_options() {
        Ok(o) => o,
        Err(e) => {
            eprintln!("{e}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };
    if options.aide {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    let mut reglages = Reglages::default();
    if let Some(n) = options.chiffres {
        reglages = reglages.avec_chiffres_lecture(n);
    }

    if options.expressions.is_empty() && options.reponses.is_empty() {
        return match interactif(&options, reglages) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("{e}");
                ExitCode::FAILURE
            }
        };
    }

    let mut echec = false;

    for n in &options.reponses {
        let r = reponse(*n);
        if r.is_empty() {
            eprintln!("{n}: no known answer");
            echec = true;
        } else {
            println!("{n} = {r}");
        }
    }

    for expr in &options.expressions {
        if !afficher(expr, &options, &reglages) {
            echec = true;
        }
    }

    if echec {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Une expression en argument. false si l’analyse ou le calcul échoue.
fn afficher(expr: &str, options: &Options, reglages: &Reglages) -> bool {
    match rendre(expr, options, reglages) {
        Ok(texte) => {
            println!("{texte}");
            true
        }
        Err(e) => {
            eprintln!("{expr}: {e}");
            false
        }
    }
}

/* ------------------------ Mode interactif ------------------------ */

fn interactif(options: &Options, reglages: Reglages) -> io::Result<()> {
    let mut partie = Partie {
        question: options.cible,
        reglages,
        ..Partie::default()
    };

    let stdin = io::stdin();
    let mut sortie = io::stdout().lock();

    invite(&mut sortie, &partie)?;
    for ligne in stdin.lock().lines() {
        let ligne = ligne?;
        match lire_ligne(&ligne) {
            Ok(Ligne::Vide) => {}
            Ok(Ligne::Quitter) => break,
            Ok(Ligne::Cible(q)) => partie.changer_question(q),
            Ok(Ligne::Reponse) => match partie.question {
                Some(q) => {
                    let r = reponse(q);
                    if r.is_empty() {
                        writeln!(sortie, "no known answer for {q}")?;
                    } else {
                        writeln!(sortie, "{r}")?;
                    }
                }
                None => writeln!(sortie, "no target (use :cible N)")?,
            },
            Ok(Ligne::Expression(e)) => {
                partie.saisir(&e);
                if let Some(r) = &partie.resultat {
                    writeln!(sortie, "= {r}")?;
                }
                if let Some(m) = partie.message() {
                    writeln!(sortie, "{m}")?;
                }
            }
            Err(e) => writeln!(sortie, "{e}")?,
        }
        invite(&mut sortie, &partie)?;
    }
    Ok(())
}

fn invite(sortie: &mut impl Write, partie: &Partie) -> io::Result<()> {
    match partie.question {
        Some(q) => write!(sortie, "[{q}] > ")?,
        None => write!(sortie, "> ")?,
    }
    sortie.flush()
}
