// src/noyau/reglages.rs
//
// Politique numérique du noyau (bornes anti-explosion + précision de lecture).

/// Précision de lecture par défaut (décimales tronquées) pour un résultat non fini.
pub const CHIFFRES_LECTURE_DEFAUT: usize = 20;

/// Garde-fou : on borne la précision demandée.
pub const CHIFFRES_LECTURE_MAX: usize = 200;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reglages {
    /// Nombre max de chiffres de l’opérande de S.
    pub chiffres_somme: usize,
    /// Nombre max de chiffres de l’opérande de ! (2 => n ≤ 99).
    pub chiffres_factorielle: usize,
    /// Nombre max de chiffres d’un exposant (signe exclu).
    pub chiffres_exposant: usize,
    /// Décimales affichées pour un résultat non entier sans développement fini court.
    pub chiffres_lecture: usize,
    /// Au-delà de ce nombre de décimales, un développement fini est lu tronqué.
    pub chiffres_exacts_max: usize,
    /// Taille estimée (en bits) au-delà de laquelle une puissance est refusée.
    pub bits_max: u64,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            chiffres_somme: 12,
            chiffres_factorielle: 2,
            chiffres_exposant: 4,
            chiffres_lecture: CHIFFRES_LECTURE_DEFAUT,
            chiffres_exacts_max: 200,
            bits_max: 1 << 20,
        }
    }
}

impl Reglages {
    /// Précision de lecture bornée.
    pub fn avec_chiffres_lecture(mut self, chiffres: usize) -> Self {
        self.chiffres_lecture = chiffres.min(CHIFFRES_LECTURE_MAX);
        self
    }
}
