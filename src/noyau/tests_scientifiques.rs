//! Tests scientifiques (campagne) : invariants + exactitude + limites contrôlées.
//!
//! But : vérifier le contrat du noyau de bout en bout sans faire chauffer la machine.
//! - budget temps global (large : les tests tournent aussi en debug)
//! - profondeurs bornées (garde-fou anti-pile du parseur)
//! - table des réponses : aller-retour complet
//!
//! Notes :
//! - aucun calcul intermédiaire n’est approché : les radicaux restent exacts
//!   jusqu’à la lecture décimale finale.
//! - une racine imbriquée reste exacte (nouveau radical), jamais un arrondi.

use std::time::{Duration, Instant};

use super::{evaluer, reponse, simplifier_parentheses, ErreurNoyau};
use super::reponses::{REPONSE_MAX, REPONSE_MIN, SANS_REPONSE};

fn ok(expr: &str) -> String {
    evaluer(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn erreur(expr: &str) -> ErreurNoyau {
    match evaluer(expr) {
        Ok(v) => panic!("expr={expr:?} devrait échouer, obtenu {v}"),
        Err(e) => e,
    }
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Table des réponses ------------------------ */

#[test]
fn sci_table_aller_retour() {
    let t0 = Instant::now();
    let max = Duration::from_secs(60);

    let mut vus = 0usize;
    for n in REPONSE_MIN..=REPONSE_MAX {
        budget(t0, max);
        let r = reponse(n);
        if r.is_empty() {
            assert!(SANS_REPONSE.contains(&n), "cible {n} sans réponse");
            continue;
        }
        assert_eq!(ok(&r), n.to_string(), "cible {n} : {r}");
        vus += 1;
    }
    assert_eq!(vus, (REPONSE_MAX - REPONSE_MIN + 1) as usize - SANS_REPONSE.len());
}

#[test]
fn sci_simplification_sur_la_table() {
    let t0 = Instant::now();
    let max = Duration::from_secs(20);

    for n in (REPONSE_MIN..=REPONSE_MAX).step_by(97) {
        budget(t0, max);
        let r = reponse(n);
        if r.is_empty() {
            continue;
        }
        let entouree = format!("(({r}))");
        let une = simplifier_parentheses(&entouree).unwrap_or_else(|e| panic!("{r}: {e}"));
        let deux = simplifier_parentheses(&une).unwrap_or_else(|e| panic!("{une}: {e}"));
        assert_eq!(une, deux, "idempotence pour {r}");
        assert_eq!(ok(&une), n.to_string());
        assert!(une.len() <= r.len(), "{une} plus long que {r}");
    }
}

/* ------------------------ Priorités ------------------------ */

#[test]
fn sci_priorites() {
    assert_eq!(ok("SSR4/R4*SR4"), "9");
    assert_eq!(ok("4*(4-4)+4"), "4");
    assert_eq!(ok("4+4*4"), "20");
    assert_eq!(ok("4-4-4"), "-4");
    assert_eq!(ok("4/4/4"), "0.25");
    assert_eq!(ok("4^4/4"), "64");
    assert_eq!(ok("4*4^R4"), "64");
    // préfixes plus liants que ^
    assert_eq!(ok("S4^R4"), "100");
    assert_eq!(ok("R4^4"), "16");
    assert_eq!(ok("-4^R4"), "16");
    // suffixe plus liant que les préfixes
    assert_eq!(ok("S4!"), "300");
    assert_eq!(ok("4!^R4"), "576");
    // ^ associatif à droite
    assert_eq!(ok("R4^R4^R4"), "16");
    assert_eq!(ok("(R4^R4)^4"), "256");
}

#[test]
fn sci_priorites_erreurs_structurelles() {
    for s in ["4+-4", "4*-4", "4^-4", "R-4", "S-4", "4!4", "(4)(4)", "4(4)", "4 4.4.4"] {
        assert!(erreur(s).est_syntaxe(), "expr={s:?}");
    }
}

/* ------------------------ Exactitude ------------------------ */

#[test]
fn sci_decimaux_periodiques_exacts() {
    let neuf = vec![".(4)"; 9].join("+");
    assert_eq!(ok(&neuf), "4");
    assert_eq!(ok(".(3)+.(6)"), "1");
    assert_eq!(ok("4.(9)"), "5");
    assert_eq!(ok("R.(1)*3"), "1");
    assert_eq!(ok(".(12)*33"), "4");
    assert_eq!(ok("4.4-.4-4"), "0");
}

#[test]
fn sci_zero_algebrique() {
    assert_eq!(ok("R4!*R4!-4!"), "0");
    assert_eq!(ok("(R2+R3)*(R3-R2)"), "1");
    assert_eq!(ok("R8-2*R2"), "0");
    assert_eq!(ok("1/(R2+R3+R5)*(R2+R3+R5)"), "1");
    assert_eq!(ok("-(R2-R2)"), "0");
    // radicaux imbriqués, tours construites séparément
    assert_eq!(ok("RR4!*RR4!-R4!"), "0");
    assert_eq!(ok("(RRR4)^4-R4"), "0");
    assert_eq!(ok("R(4+2*R3)-R3"), "1");
}

#[test]
fn sci_lecture_tronquee() {
    // troncature, jamais d’arrondi
    assert_eq!(ok("2/3"), "0.66666666666666666666");
    assert_eq!(ok("-2/3"), "-0.66666666666666666666");
    assert_eq!(ok("R4!"), "4.89897948556635619639");
    // développement fini : exact au-delà de 20 décimales
    assert_eq!(
        ok("1/(4^44)"),
        "0.0000000000000000000000000032311742677852643549664402033982923967414535582065582275390625"
    );
    // minuscule non nul : tous les chiffres lus sont nuls
    assert_eq!(ok("1/3^44"), "0");
}

/* ------------------------ Stress contrôlé ------------------------ */

#[test]
fn sci_stress_profondeur() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let ouvert = format!("{}4{}", "(".repeat(200), ")".repeat(200));
    assert_eq!(ok(&ouvert), "4");
    budget(t0, max);

    let trop = format!("{}4{}", "(".repeat(300), ")".repeat(300));
    let e = erreur(&trop);
    assert!(e.est_syntaxe());
    assert_eq!(e.message(), "expression is too deeply nested");

    assert_eq!(ok(&format!("{}1", "R".repeat(100))), "1");
    assert!(erreur(&format!("{}1", "R".repeat(400))).est_syntaxe());
    budget(t0, max);
}

#[test]
fn sci_stress_somme_longue() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let expr = vec!["4/4"; 400].join("+");
    assert_eq!(ok(&expr), "400");
    budget(t0, max);
}

#[test]
fn sci_stress_bigint() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    assert_eq!(ok("99!/98!"), "99");
    assert_eq!(ok("S999999999999-S999999999998"), "999999999999");
    assert_eq!(ok("(4^4444)/(4^4443)"), "4");
    let grand = ok("4444^4444");
    assert_eq!(grand.len(), 16211);
    assert!(grand.starts_with("51036"), "{}", &grand[..10]);
    budget(t0, max);
}
