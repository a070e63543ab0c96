//! Noyau : évaluation (pipeline réel)
//!
//! normaliser -> jetons -> Expr -> valeur exacte (tour de radicaux) -> lecture décimale
//!
//! Chaque appel est une fonction pure de la chaîne d’entrée : aucun état retenu.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::erreur::ErreurNoyau;
use super::expr::{Binaire, Decimal, Expr, Unaire};
use super::jetons::{format_tokens, normaliser, tokenize};
use super::lecture::lire;
use super::reglages::Reglages;
use super::syntaxe::parse_jetons;
use super::valeur::{pow10, Valeur};

#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct Demarche {
    pub normalise: String,
    pub jetons: String,
    pub arbre: String,
    /// Valeur exacte sous forme symbolique (ex: "1+sqrt(2)").
    pub exact: String,
    pub lecture: String,
}

/// API publique : évalue une expression avec les réglages par défaut.
///
/// Retourne un entier ("24") ou un décimal fini ("4.8", "1.4142135623730950488").
pub fn evaluer(entree: &str) -> Result<String, ErreurNoyau> {
    evaluer_avec(entree, &Reglages::default())
}

pub fn evaluer_avec(entree: &str, reglages: &Reglages) -> Result<String, ErreurNoyau> {
    Ok(evaluer_detail(entree, reglages)?.lecture)
}

/// Évaluation complète avec démarche (jetons, arbre, forme exacte, lecture).
pub fn evaluer_detail(entree: &str, reglages: &Reglages) -> Result<Demarche, ErreurNoyau> {
    log::debug!("évaluation de {entree:?}");

    let normalise = normaliser(entree)?;
    if normalise.is_empty() {
        return Err(ErreurNoyau::syntaxe("empty expression"));
    }
    let jetons = tokenize(&normalise)?;
    let jetons_txt = format_tokens(&jetons);
    log::trace!("jetons: {jetons_txt}");

    let expr = parse_jetons(&jetons)?;
    log::trace!("arbre: {expr}");

    let v = valeur(&expr, reglages)?;
    let lecture = lire(&v, reglages)?;
    log::debug!("{entree:?} = {lecture}");

    Ok(Demarche {
        normalise,
        jetons: jetons_txt,
        arbre: expr.to_string(),
        exact: v.to_string(),
        lecture,
    })
}

/// Analyse seule (normalisation + arbre), sans calcul.
pub fn analyser(entree: &str) -> Result<Expr, ErreurNoyau> {
    let normalise = normaliser(entree)?;
    if normalise.is_empty() {
        return Err(ErreurNoyau::syntaxe("empty expression"));
    }
    parse_jetons(&tokenize(&normalise)?)
}

/// Lecture finale d’un arbre déjà construit.
pub fn evaluer_arbre(expr: &Expr, reglages: &Reglages) -> Result<String, ErreurNoyau> {
    lire(&valeur(expr, reglages)?, reglages)
}

/// Réduction exacte, du bas vers le haut.
pub fn valeur(expr: &Expr, reglages: &Reglages) -> Result<Valeur, ErreurNoyau> {
    match expr {
        Expr::Entier(n) => Ok(Valeur::entier(n.clone())),

        Expr::Decimal(d) => Ok(Valeur::rationnel(decimal_exact(d)?)),

        Expr::Unaire(op, x) => {
            let v = valeur(x, reglages)?;
            match op {
                Unaire::Somme => {
                    let n = entier_borne(&v, "S", reglages.chiffres_somme)?;
                    Ok(Valeur::entier(&n * (&n + 1u32) / 2u32))
                }
                Unaire::Factorielle => {
                    let n = entier_borne(&v, "!", reglages.chiffres_factorielle)?;
                    Ok(Valeur::entier(factorielle(&n)?))
                }
                Unaire::Racine => v.racine(),
                Unaire::Oppose => Ok(v.oppose()),
            }
        }

        Expr::Binaire(op, xs) => {
            if xs.is_empty() {
                return Err(ErreurNoyau::interne(format!("{op:?} node without operand")));
            }
            match op {
                Binaire::Add => {
                    let mut acc = Valeur::zero();
                    for x in xs {
                        acc = acc.add(&valeur(x, reglages)?)?;
                    }
                    Ok(acc)
                }
                Binaire::Mul => {
                    let mut acc = Valeur::un();
                    for x in xs {
                        acc = acc.mul(&valeur(x, reglages)?)?;
                    }
                    Ok(acc)
                }
                Binaire::Div => {
                    let [num, den] = deux_enfants(op, xs)?;
                    let a = valeur(num, reglages)?;
                    let b = valeur(den, reglages)?;
                    a.div(&b)
                }
                Binaire::Pow => {
                    let [base, exposant] = deux_enfants(op, xs)?;
                    let b = valeur(base, reglages)?;
                    let e = valeur(exposant, reglages)?;
                    puissance(&b, &e, reglages)
                }
            }
        }
    }
}

fn deux_enfants<'a>(op: &Binaire, xs: &'a [Expr]) -> Result<[&'a Expr; 2], ErreurNoyau> {
    match xs {
        [a, b] => Ok([a, b]),
        _ => Err(ErreurNoyau::interne(format!(
            "{op:?} node expects 2 operands, got {}",
            xs.len()
        ))),
    }
}

/// Opérande entier ≥ 0 d’au plus `max_chiffres` chiffres.
fn entier_borne(v: &Valeur, op: &str, max_chiffres: usize) -> Result<BigInt, ErreurNoyau> {
    let n = match v.en_entier() {
        Some(n) if !n.is_negative() => n,
        _ => {
            return Err(ErreurNoyau::evaluation(format!(
                "operand of {op} must be a non-negative integer"
            )))
        }
    };
    if n.to_string().len() > max_chiffres {
        return Err(ErreurNoyau::evaluation(format!("operand of {op} is too large")));
    }
    Ok(n)
}

fn factorielle(n: &BigInt) -> Result<BigInt, ErreurNoyau> {
    let n = n
        .to_u64()
        .ok_or_else(|| ErreurNoyau::interne(format!("factorial operand out of range: {n}")))?;
    Ok((2..=n).fold(BigInt::one(), |acc, k| acc * k))
}

fn puissance(base: &Valeur, exposant: &Valeur, reglages: &Reglages) -> Result<Valeur, ErreurNoyau> {
    let e = exposant
        .en_entier()
        .ok_or_else(|| ErreurNoyau::evaluation("exponent must be an integer"))?;

    if e.abs().to_string().len() > reglages.chiffres_exposant {
        return Err(ErreurNoyau::evaluation("exponent is too large"));
    }
    let e = e
        .to_i64()
        .ok_or_else(|| ErreurNoyau::evaluation("exponent is too large"))?;

    // garde-fou taille : |base|^|e| (0 et ±1 ne grossissent jamais)
    let trivial = base.est_zero()
        || base
            .en_rationnel()
            .is_some_and(|r| r.is_integer() && r.abs().is_one());
    if !trivial && base.bits().saturating_mul(e.unsigned_abs()) > reglages.bits_max {
        return Err(ErreurNoyau::evaluation("result is too large"));
    }

    base.pow(e)
}

/// Littéral décimal -> fraction exacte.
/// - fini      : d / 10^k
/// - périodique: r / (10^k − 1), puis + partie entière
fn decimal_exact(d: &Decimal) -> Result<BigRational, ErreurNoyau> {
    if d.fraction.is_empty() || !d.fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ErreurNoyau::interne(format!("malformed decimal literal: {d}")));
    }
    let k = d.fraction.len();
    let chiffres: BigInt = d
        .fraction
        .parse()
        .map_err(|_| ErreurNoyau::interne(format!("malformed decimal literal: {d}")))?;

    let fraction = if d.periodique {
        BigRational::new(chiffres, pow10(k) - 1u32)
    } else {
        BigRational::new(chiffres, pow10(k))
    };

    let entier = d.entier.clone().unwrap_or_else(BigInt::zero);
    Ok(fraction + BigRational::from_integer(entier))
}
