// src/noyau/lecture.rs
//
// Lecture décimale d’une valeur exacte (étape finale de l’évaluation).
// - entier                         => "1234"
// - rationnel à développement fini => décimal exact ("4.8", "-0.25")
// - sinon                          => décimal tronqué à `chiffres_lecture` décimales
//
// Jamais de fraction "a/b", jamais de radical non lu.

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use super::erreur::ErreurNoyau;
use super::reglages::Reglages;
use super::valeur::{pow10, Valeur};

/* ------------------------ Décimal (scaled -> texte) ------------------------ */

/// Convertit un entier “scalé” (×10^digits) en texte décimal tronqué.
pub fn scaled_to_decimal(mut scaled: BigInt, digits: usize) -> String {
    let neg = scaled.is_negative();
    if neg {
        scaled = -scaled;
    }

    let scale = pow10(digits);
    let (int_part, frac_part) = scaled.div_rem(&scale);
    let signe = if neg { "-" } else { "" };

    if digits == 0 {
        return format!("{signe}{int_part}");
    }

    let frac = format!("{:0>width$}", frac_part.to_str_radix(10), width = digits);
    format!("{signe}{int_part}.{frac}")
}

/// Retire les zéros finaux (et le point orphelin) ; "-0" devient "0".
fn epurer(s: String) -> String {
    let mut s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    };
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

/// Nombre de décimales du développement de 1/d s’il est fini (d = 2^a·5^b).
fn developpement_fini(d: &BigInt) -> Option<usize> {
    let deux = BigInt::from(2);
    let cinq = BigInt::from(5);

    let mut reste = d.clone();
    let mut a = 0usize;
    while reste.is_multiple_of(&deux) {
        reste /= &deux;
        a += 1;
    }
    let mut b = 0usize;
    while reste.is_multiple_of(&cinq) {
        reste /= &cinq;
        b += 1;
    }

    if reste.is_one() {
        Some(a.max(b))
    } else {
        None
    }
}

/// r -> entier “scalé” = r · 10^digits tronqué vers zéro
fn rational_scaled(r: &BigRational, digits: usize) -> BigInt {
    (r.numer() * pow10(digits)) / r.denom()
}

pub fn lire_rationnel(r: &BigRational, reglages: &Reglages) -> String {
    if r.is_integer() {
        return r.to_integer().to_string();
    }

    if let Some(k) = developpement_fini(r.denom()) {
        if k <= reglages.chiffres_exacts_max {
            return scaled_to_decimal(rational_scaled(r, k), k);
        }
    }

    let k = reglages.chiffres_lecture;
    epurer(scaled_to_decimal(rational_scaled(r, k), k))
}

/// Lecture finale d’une valeur exacte (troncature certifiée pour les radicaux).
pub fn lire(v: &Valeur, reglages: &Reglages) -> Result<String, ErreurNoyau> {
    if let Some(r) = v.en_rationnel() {
        return Ok(lire_rationnel(&r, reglages));
    }

    let k = reglages.chiffres_lecture;
    let scaled = v.tronquer(k)?;
    if scaled.is_zero() {
        return Ok("0".to_string());
    }
    Ok(epurer(scaled_to_decimal(scaled, k)))
}
