//! Quatre 4 : noyau exact du puzzle des quatre 4 + état de partie.
//!
//! - `noyau` : normalisation, analyse, évaluation exacte, affichage LaTeX, réponses
//! - `app`   : partie en cours (saisie, avertissements) et ligne de commande

pub mod app;
pub mod noyau;
