// src/noyau/format.rs
//
// Affichage LaTeX (KaTeX) d’un arbre d’expression.
// Projection purement structurelle : aucune valeur n’est calculée.
//
// Parenthèses : décidées par le couple (parent, enfant), jamais par la valeur.
//   parent       enfant entouré
//   !            tout sauf entier, décimal, !, √
//   - unaire     Add, - unaire
//   S            Add, Mul, Pow, - unaire
//   Add          (terme soustrait) Add
//   Mul          Add ; - unaire hors premier facteur
//   Pow (base)   Add, Mul, Div, Pow, - unaire, S, !

use super::eval::analyser;
use super::expr::{Binaire, Expr, Unaire};

/// Entrée brute -> LaTeX. Ne panique jamais : "" si l’entrée n’est pas valide.
pub fn vers_latex(entree: &str) -> String {
    match analyser(entree) {
        Ok(e) => format_latex(&e),
        Err(err) => {
            log::trace!("pas d’affichage pour {entree:?}: {err}");
            String::new()
        }
    }
}

pub fn format_latex(e: &Expr) -> String {
    match e {
        Expr::Entier(n) => n.to_string(),

        Expr::Decimal(d) => {
            let entier = d.entier.as_ref().map(|n| n.to_string()).unwrap_or_default();
            if d.periodique {
                format!("{entier}.\\overline{{{}}}", d.fraction)
            } else {
                format!("{entier}.{}", d.fraction)
            }
        }

        Expr::Unaire(op, x) => {
            let sx = format_latex(x);
            match op {
                Unaire::Racine => format!("\\sqrt{{{sx}}}"),
                Unaire::Somme => {
                    if entourer_sous_somme(x) {
                        format!("\\Sigma{}", entourer(&sx))
                    } else {
                        format!("\\Sigma {sx}")
                    }
                }
                Unaire::Factorielle => {
                    if entourer_sous_factorielle(x) {
                        format!("{}!", entourer(&sx))
                    } else {
                        format!("{sx}!")
                    }
                }
                Unaire::Oppose => {
                    if entourer_sous_oppose(x) {
                        format!("-{}", entourer(&sx))
                    } else {
                        format!("-{sx}")
                    }
                }
            }
        }

        Expr::Binaire(Binaire::Add, xs) => {
            let mut out = String::new();
            for (i, x) in xs.iter().enumerate() {
                match (i, x) {
                    (0, _) => out.push_str(&format_latex(x)),
                    (_, Expr::Unaire(Unaire::Oppose, y)) => {
                        let sy = format_latex(y);
                        if est_somme(y) {
                            out.push_str(&format!(" - {}", entourer(&sy)));
                        } else {
                            out.push_str(&format!(" - {sy}"));
                        }
                    }
                    _ => out.push_str(&format!(" + {}", format_latex(x))),
                }
            }
            out
        }

        Expr::Binaire(Binaire::Mul, xs) => xs
            .iter()
            .enumerate()
            .map(|(i, x)| {
                let sx = format_latex(x);
                let oppose_interne = i > 0 && matches!(x, Expr::Unaire(Unaire::Oppose, _));
                if est_somme(x) || oppose_interne {
                    entourer(&sx)
                } else {
                    sx
                }
            })
            .collect::<Vec<_>>()
            .join(" \\times "),

        Expr::Binaire(Binaire::Div, xs) => match xs.as_slice() {
            [num, den] => format!("\\frac{{{}}}{{{}}}", format_latex(num), format_latex(den)),
            _ => String::new(),
        },

        Expr::Binaire(Binaire::Pow, xs) => match xs.as_slice() {
            [base, exposant] => {
                let sb = format_latex(base);
                let sb = if entourer_base(base) { entourer(&sb) } else { sb };
                format!("{sb}^{{{}}}", format_latex(exposant))
            }
            _ => String::new(),
        },
    }
}

fn entourer(s: &str) -> String {
    format!("\\left({s}\\right)")
}

fn est_somme(e: &Expr) -> bool {
    matches!(e, Expr::Binaire(Binaire::Add, _))
}

fn entourer_sous_factorielle(e: &Expr) -> bool {
    !matches!(
        e,
        Expr::Entier(_)
            | Expr::Decimal(_)
            | Expr::Unaire(Unaire::Factorielle, _)
            | Expr::Unaire(Unaire::Racine, _)
    )
}

fn entourer_sous_oppose(e: &Expr) -> bool {
    matches!(
        e,
        Expr::Binaire(Binaire::Add, _) | Expr::Unaire(Unaire::Oppose, _)
    )
}

fn entourer_sous_somme(e: &Expr) -> bool {
    matches!(
        e,
        Expr::Binaire(Binaire::Add | Binaire::Mul | Binaire::Pow, _)
            | Expr::Unaire(Unaire::Oppose, _)
    )
}

fn entourer_base(e: &Expr) -> bool {
    matches!(
        e,
        Expr::Binaire(..)
            | Expr::Unaire(Unaire::Oppose | Unaire::Somme | Unaire::Factorielle, _)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn litteraux() {
        assert_eq!(vers_latex("44"), "44");
        assert_eq!(vers_latex("4.4"), "4.4");
        assert_eq!(vers_latex(".4"), ".4");
        assert_eq!(vers_latex(".(4)"), ".\\overline{4}");
        assert_eq!(vers_latex("4.(12)"), "4.\\overline{12}");
    }

    #[test]
    fn additifs() {
        assert_eq!(vers_latex("4+4"), "4 + 4");
        assert_eq!(vers_latex("4-4+4"), "4 - 4 + 4");
        assert_eq!(vers_latex("-4-4"), "-4 - 4");
        assert_eq!(vers_latex("4-(4-4)"), "4 - \\left(4 - 4\\right)");
        assert_eq!(vers_latex("4+(4-4)"), "4 + 4 - 4");
    }

    #[test]
    fn multiplicatifs() {
        assert_eq!(vers_latex("4*4"), "4 \\times 4");
        assert_eq!(vers_latex("(4+4)*4"), "\\left(4 + 4\\right) \\times 4");
        assert_eq!(vers_latex("(-4)*4"), "-4 \\times 4");
        assert_eq!(vers_latex("4*(-4)"), "4 \\times \\left(-4\\right)");
        assert_eq!(vers_latex("4/4"), "\\frac{4}{4}");
        assert_eq!(vers_latex("4/4*4"), "\\frac{4 \\times 4}{4}");
        assert_eq!(vers_latex("4/4/4"), "\\frac{4}{4 \\times 4}");
        assert_eq!(vers_latex("(4+4)/4"), "\\frac{4 + 4}{4}");
    }

    #[test]
    fn prefixes_et_suffixes() {
        assert_eq!(vers_latex("R4"), "\\sqrt{4}");
        assert_eq!(vers_latex("R(4+4)"), "\\sqrt{4 + 4}");
        assert_eq!(vers_latex("S4"), "\\Sigma 4");
        assert_eq!(vers_latex("SS4"), "\\Sigma \\Sigma 4");
        assert_eq!(vers_latex("S(4+4)"), "\\Sigma\\left(4 + 4\\right)");
        assert_eq!(vers_latex("S4!"), "\\Sigma 4!");
        assert_eq!(vers_latex("(S4)!"), "\\left(\\Sigma 4\\right)!");
        assert_eq!(vers_latex("4!!"), "4!!");
        assert_eq!(vers_latex("(R4)!"), "\\sqrt{4}!");
        assert_eq!(vers_latex("(4+4)!"), "\\left(4 + 4\\right)!");
        assert_eq!(vers_latex("-(4+4)"), "-\\left(4 + 4\\right)");
    }

    #[test]
    fn puissances() {
        assert_eq!(vers_latex("4^4"), "4^{4}");
        assert_eq!(vers_latex("-4^4"), "\\left(-4\\right)^{4}");
        assert_eq!(vers_latex("2^3^2"), "2^{3^{2}}");
        assert_eq!(vers_latex("(4+4)^4"), "\\left(4 + 4\\right)^{4}");
        assert_eq!(vers_latex("(4^4)^4"), "\\left(4^{4}\\right)^{4}");
        assert_eq!(vers_latex("R4^4"), "\\sqrt{4}^{4}");
        assert_eq!(vers_latex("4^(4+4)"), "4^{4 + 4}");
    }

    #[test]
    fn entree_invalide_donne_vide() {
        for s in ["", "4*-4", "(4", "4)", "4^^4", "abc", "()", "..", "R", "4++"] {
            assert_eq!(vers_latex(s), "", "entrée {s:?}");
        }
    }

    #[test]
    fn arbre_mal_forme_donne_vide() {
        let e = Expr::Binaire(Binaire::Div, vec![Expr::Entier(4.into())]);
        assert_eq!(format_latex(&e), "");
    }
}
