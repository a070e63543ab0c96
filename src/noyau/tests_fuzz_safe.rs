//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - on accepte les erreurs d’évaluation attendues (division par zéro, opérande trop grand, etc.)
//! - invariant clé : jamais d’erreur interne, et un succès est toujours un décimal fini

use std::time::{Duration, Instant};

use super::{analyser, evaluer, vers_latex, ErreurNoyau};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

fn is_erreur_attendue(e: &ErreurNoyau) -> bool {
    // Liste blanche : erreurs *normales* pour un fuzz,
    // parce que le domaine est volontairement borné.
    let msg = e.message();
    e.est_evaluation()
        && (msg.contains("division by zero")
            || msg.contains("zero to the power of zero")
            || msg.contains("must be a non-negative integer")
            || msg.contains("is too large")
            || msg.contains("square root of a negative number")
            || msg.contains("too many distinct radicals")
            || msg.contains("exponent must be an integer")
            || msg.contains("exponent is too large")
            || msg.contains("result is too large"))
}

fn check_decimal_fini(expr: &str, v: &str) {
    let corps = v.strip_prefix('-').unwrap_or(v);
    assert!(!corps.is_empty(), "expr={expr:?} => vide");
    assert!(
        corps.chars().all(|c| c.is_ascii_digit() || c == '.'),
        "expr={expr:?} => {v}"
    );
    assert!(corps.matches('.').count() <= 1, "expr={expr:?} => {v}");
    assert_ne!(v, "-0", "expr={expr:?}");
    if corps.contains('.') {
        assert!(!corps.ends_with('0'), "zéro final: expr={expr:?} => {v}");
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(7) {
        0 | 1 => "4".to_string(),
        2 => ".4".to_string(),
        3 => ".(4)".to_string(),
        4 => "44".to_string(),
        5 => "4.4".to_string(),
        _ => "4.(4)".to_string(),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    match rng.pick(10) {
        0 => gen_atom(rng),
        1 => format!("({}+{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        2 => format!("({}-{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        3 => format!("({}*{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        4 => format!("({}/{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        // exposant petit pour rester dans les bornes
        5 => format!("({})^{}", gen_expr(rng, depth - 1), rng.pick(5)),
        6 => format!("S({})", gen_expr(rng, depth - 1)),
        7 => format!("R({})", gen_expr(rng, depth - 1)),
        8 => format!("({})!", gen_expr(rng, depth - 1)),
        _ => format!("(-{})", gen_expr(rng, depth - 1)),
    }
}

/// Chaîne quelconque sur l’alphabet du puzzle (souvent invalide).
fn gen_bruit(rng: &mut Rng, longueur: usize) -> String {
    const ALPHABET: &[char] = &[
        '4', '4', '4', '+', '-', '*', '/', '^', '!', 'S', 'R', '.', '(', ')', ' ', '√', 'x',
    ];
    (0..longueur)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_invariants() {
    let t0 = Instant::now();
    let max = Duration::from_secs(10);

    // Même seed => mêmes expressions => mêmes sorties (déterminisme)
    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..150 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);

        let premier = evaluer(&expr);
        assert_eq!(premier, evaluer(&expr), "non déterministe: {expr:?}");

        match premier {
            Ok(v) => {
                check_decimal_fini(&expr, &v);
                seen_ok += 1;
            }
            Err(e) => {
                assert!(
                    is_erreur_attendue(&e),
                    "erreur non attendue: expr={expr:?} err={e}"
                );
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_bruit_jamais_interne() {
    let t0 = Instant::now();
    let max = Duration::from_secs(10);

    let mut rng = Rng::new(0xBADC0DE_u64);

    let mut seen_syntaxe = 0usize;
    for i in 0..400 {
        budget(t0, max);

        let s = gen_bruit(&mut rng, 1 + i % 14);
        match evaluer(&s) {
            Ok(v) => check_decimal_fini(&s, &v),
            Err(e) => {
                assert!(!e.est_interne(), "erreur interne: {s:?} => {e}");
                if e.est_syntaxe() {
                    seen_syntaxe += 1;
                }
            }
        }

        // l’affichage ne panique jamais et suit exactement la validité syntaxique
        let latex = vers_latex(&s);
        assert_eq!(latex.is_empty(), analyser(&s).is_err(), "latex pour {s:?}");
    }
    assert!(seen_syntaxe > 100, "bruit trop “propre”: {seen_syntaxe}");
}

#[test]
fn fuzz_safe_parentheses_profondes() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let mut rng = Rng::new(0x4444_u64);
    for _ in 0..50 {
        budget(t0, max);
        let n = rng.pick(250) as usize + 1;
        let expr = format!("{}4{}", "(".repeat(n), ")".repeat(n));
        assert_eq!(evaluer(&expr).unwrap_or_else(|e| panic!("n={n}: {e}")), "4");
    }
}
