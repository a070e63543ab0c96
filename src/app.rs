// src/app.rs
//
// Quatre 4 : module App (racine)
// ------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + commande.rs)
// - Ré-exporter Partie / Escalier (pour main.rs: use quatre_quatres::app::Partie;)
//
// Aucune évaluation ici : tout passe par crate::noyau.

pub mod commande;
pub mod etat;

// Ré-export pratique
pub use etat::{Escalier, Partie};
