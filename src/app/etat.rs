//! src/app/etat.rs
//!
//! État d’une partie (sans vue).
//!
//! Rôle : contenir l’entrée, le résultat affiché, l’erreur et l’avertissement du puzzle,
//! et tout recalculer à chaque saisie.
//!
//! Contrats :
//! - Une saisie = une évaluation complète (le noyau ne garde aucun état).
//! - Le résultat affiché est borné (LONGUEUR_AFFICHAGE caractères + "...").
//! - Sur erreur, on CONSERVE le dernier résultat affiché (pas d’écran vidé sur une faute).

use std::collections::BTreeMap;

use crate::noyau::{evaluer_avec, reponse, Reglages};

/// Longueur maximale du résultat affiché.
pub const LONGUEUR_AFFICHAGE: usize = 16;

pub const QUESTION_MIN: i64 = 1;
pub const QUESTION_MAX: i64 = 3000;

pub const AVERT_VIDE: &str = "Input something above";
pub const AVERT_CHIFFRE: &str = "Only the number 4 is allowed in the expression";
pub const AVERT_QUATRE: &str = "You must use exactly four 4s in the expression";
pub const AVERT_DIFFERENT: &str = "Not match";

pub const ERREUR_NON_ENTIER: &str = "Result is not an integer";
pub const ERREUR_TROP_LONG: &str = "Result is too long";

/// Caractères conservés à la saisie (les autres sont ignorés).
fn est_permis(c: char) -> bool {
    c.is_ascii_digit() || "+-*/()!^.SsRr ".contains(c)
}

fn tronquer(s: &str, longueur: usize) -> String {
    if s.chars().count() <= longueur {
        return s.to_string();
    }
    let debut: String = s.chars().take(longueur).collect();
    format!("{debut}...")
}

#[derive(Clone, Debug)]
pub struct Partie {
    /// Cible à atteindre (None : jeu libre).
    pub question: Option<i64>,

    // --- entrée utilisateur (filtrée, en majuscules) ---
    pub entree: String,

    // --- sorties ---
    pub resultat: Option<String>, // affiché (tronqué)
    pub erreur: Option<String>,
    pub avertissement: Option<&'static str>,

    // --- paramètres ---
    pub reglages: Reglages,
}

impl Default for Partie {
    fn default() -> Self {
        Self {
            question: None,
            entree: String::new(),
            resultat: None,
            erreur: None,
            avertissement: Some(AVERT_VIDE),
            reglages: Reglages::default(),
        }
    }
}

impl Partie {
    pub fn libre() -> Self {
        Self::default()
    }

    pub fn avec_question(question: i64) -> Self {
        Self {
            question: Some(question),
            ..Self::default()
        }
    }

    /// Nouvelle cible : l’entrée est effacée.
    pub fn changer_question(&mut self, question: Option<i64>) {
        self.question = question;
        self.saisir("");
    }

    pub fn effacer(&mut self) {
        self.saisir("");
    }

    /// Saisie complète : filtre, évalue, puis recalcule l’avertissement.
    pub fn saisir(&mut self, texte: &str) {
        self.entree = texte
            .chars()
            .filter(|c| est_permis(*c))
            .collect::<String>()
            .to_uppercase();

        // résultat brut (non tronqué), vide si pas de valeur
        let mut brut = String::new();

        if self.entree.is_empty() {
            self.resultat = None;
            self.erreur = None;
        } else {
            match evaluer_avec(&self.entree, &self.reglages) {
                Ok(v) => {
                    if v.contains('.') {
                        self.resultat = Some(tronquer(&v, LONGUEUR_AFFICHAGE));
                        self.erreur = Some(ERREUR_NON_ENTIER.to_string());
                    } else if v.chars().count() > LONGUEUR_AFFICHAGE {
                        self.resultat = Some(tronquer(&v, LONGUEUR_AFFICHAGE));
                        self.erreur = Some(ERREUR_TROP_LONG.to_string());
                    } else {
                        self.resultat = Some(v.clone());
                        self.erreur = None;
                    }
                    brut = v;
                }
                Err(e) => {
                    log::debug!("saisie {:?} refusée: {e}", self.entree);
                    self.erreur = Some(e.to_string());
                }
            }
        }

        self.avertissement = self.calculer_avertissement(&brut);
    }

    fn calculer_avertissement(&self, brut: &str) -> Option<&'static str> {
        if self.entree.is_empty() {
            return Some(AVERT_VIDE);
        }
        if self.entree.chars().any(|c| c.is_ascii_digit() && c != '4') {
            return Some(AVERT_CHIFFRE);
        }
        if self.entree.matches('4').count() != 4 {
            return Some(AVERT_QUATRE);
        }
        match self.question {
            Some(q) if !brut.is_empty() && brut != q.to_string() => Some(AVERT_DIFFERENT),
            _ => None,
        }
    }

    /// Entrée valide, sans erreur ni avertissement (et égale à la cible s’il y en a une).
    pub fn est_resolue(&self) -> bool {
        if self.entree.is_empty() || self.erreur.is_some() || self.avertissement.is_some() {
            return false;
        }
        match self.question {
            Some(q) => self.resultat.as_deref() == Some(q.to_string().as_str()),
            None => true,
        }
    }

    /// Message à afficher : erreur d’abord, sinon avertissement, sinon "Solved!".
    pub fn message(&self) -> Option<String> {
        if let Some(e) = &self.erreur {
            return Some(e.clone());
        }
        if let Some(a) = self.avertissement {
            return Some(a.to_string());
        }
        if self.est_resolue() {
            return Some("Solved!".to_string());
        }
        None
    }
}

/* ------------------------ Escalier : cibles successives ------------------------ */

/// Parcours des cibles QUESTION_MIN..=QUESTION_MAX, une entrée mémorisée par cible.
#[derive(Clone, Debug)]
pub struct Escalier {
    pub partie: Partie,
    memoire: BTreeMap<i64, String>,
}

impl Default for Escalier {
    fn default() -> Self {
        Self {
            partie: Partie::avec_question(QUESTION_MIN),
            memoire: BTreeMap::new(),
        }
    }
}

impl Escalier {
    pub fn question(&self) -> i64 {
        self.partie.question.unwrap_or(QUESTION_MIN)
    }

    pub fn saisir(&mut self, texte: &str) {
        self.partie.saisir(texte);
        self.memoire
            .insert(self.question(), self.partie.entree.clone());
    }

    /// Déplacement borné (±1, ±30, …) ; l’entrée mémorisée de la nouvelle cible est restaurée.
    pub fn aller(&mut self, pas: i64) {
        let cible = self
            .question()
            .saturating_add(pas)
            .clamp(QUESTION_MIN, QUESTION_MAX);
        if cible == self.question() {
            return;
        }
        self.partie.question = Some(cible);
        let memorisee = self.memoire.get(&cible).cloned().unwrap_or_default();
        self.partie.saisir(&memorisee);
    }

    /// Remplit l’entrée avec la réponse précalculée de la cible courante.
    pub fn voir_reponse(&mut self) {
        let r = reponse(self.question());
        self.saisir(&r);
    }

    /// Nombre de cibles résolues parmi les entrées mémorisées.
    pub fn resolues(&self) -> usize {
        self.memoire
            .iter()
            .filter(|(q, e)| {
                let mut p = Partie::avec_question(**q);
                p.reglages = self.partie.reglages.clone();
                p.saisir(e);
                p.est_resolue()
            })
            .count()
    }
}
