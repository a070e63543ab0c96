//! Noyau exact du puzzle des quatre 4
//!
//! Organisation interne :
//! - erreur.rs    : erreurs typées (syntaxe / évaluation / interne)
//! - reglages.rs  : bornes numériques + précision de lecture
//! - jetons.rs    : normalisation + tokenisation
//! - expr.rs      : arbre d’expression (purement syntaxique)
//! - syntaxe.rs   : analyse descendante récursive
//! - valeur.rs    : arithmétique exacte Σ q·√r
//! - lecture.rs   : lecture décimale finale (exacte ou tronquée)
//! - eval.rs      : pipeline complet
//! - format.rs    : affichage LaTeX
//! - reponses.rs  : réponses précalculées + parenthèses superflues

pub mod erreur;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod lecture;
pub mod reglages;
pub mod reponses;
pub mod syntaxe;
pub mod valeur;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

#[cfg(test)]
mod tests_proprietes;

// API publique
pub use erreur::ErreurNoyau;
pub use eval::{analyser, evaluer, evaluer_avec, evaluer_detail, Demarche};
pub use format::vers_latex;
pub use jetons::normaliser;
pub use reglages::Reglages;
pub use reponses::{reponse, simplifier_parentheses};
pub use syntaxe::parse;
