//! Propriétés (proptest) du noyau.

use num_bigint::BigInt;
use proptest::prelude::*;

use super::{analyser, evaluer, normaliser, vers_latex};

// Chaînes sur l’alphabet du puzzle (souvent invalides)
fn alphabet_puzzle() -> impl Strategy<Value = String> {
    "[4+*/^!SR.() -]{0,16}"
}

fn petit_entier() -> impl Strategy<Value = i64> {
    1i64..100_000i64
}

proptest! {
    #[test]
    fn latex_ne_panique_jamais(s in "\\PC{0,40}") {
        let _ = vers_latex(&s);
    }

    #[test]
    fn latex_vide_ssi_invalide(s in alphabet_puzzle()) {
        prop_assert_eq!(vers_latex(&s).is_empty(), analyser(&s).is_err());
    }

    #[test]
    fn evaluation_sans_erreur_interne(s in alphabet_puzzle()) {
        if let Err(e) = evaluer(&s) {
            prop_assert!(!e.est_interne(), "{:?} => {}", s, e);
        }
    }

    #[test]
    fn normalisation_idempotente(s in "\\PC{0,30}") {
        if let Ok(n) = normaliser(&s) {
            prop_assert_eq!(normaliser(&n), Ok(n.clone()));
        }
    }

    #[test]
    fn espaces_et_casse_indifferents(s in "[4+*/^!sr.()-]{1,12}") {
        let espace: String = s.chars().flat_map(|c| [c, ' ']).collect();
        prop_assert_eq!(evaluer(&s), evaluer(&espace.to_uppercase()));
    }

    #[test]
    fn quotient_puis_produit_exact(a in petit_entier(), b in petit_entier()) {
        prop_assert_eq!(evaluer(&format!("{a}/{b}*{b}")), Ok(a.to_string()));
    }

    #[test]
    fn somme_triangulaire(n in 0u64..1_000_000_000u64) {
        let attendu: BigInt = BigInt::from(n) * (BigInt::from(n) + 1u32) / 2u32;
        prop_assert_eq!(evaluer(&format!("S{n}")), Ok(attendu.to_string()));
    }

    #[test]
    fn racine_d_un_carre(n in 0u64..1_000_000u64) {
        prop_assert_eq!(evaluer(&format!("R({n}*{n})")), Ok(n.to_string()));
    }

    #[test]
    fn periodique_fois_neuf(d in 0u32..10u32) {
        // .(d) = d/9
        prop_assert_eq!(evaluer(&format!(".({d})*9")), Ok(d.to_string()));
    }
}
