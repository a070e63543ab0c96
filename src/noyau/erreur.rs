// src/noyau/erreur.rs
//
// Taxonomie des erreurs du noyau.
// - Syntaxe    : normalisation / analyse (message affiché tel quel)
// - Evaluation : règle numérique violée (division par zéro, opérande trop grand...)
// - Interne    : invariant du noyau cassé (ne doit jamais arriver sur un arbre issu du parseur)

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErreurNoyau {
    #[error("syntax error: {0}")]
    Syntaxe(String),

    #[error("evaluation error: {0}")]
    Evaluation(String),

    #[error("internal error: {0}")]
    Interne(String),
}

impl ErreurNoyau {
    pub fn syntaxe(msg: impl Into<String>) -> Self {
        ErreurNoyau::Syntaxe(msg.into())
    }

    pub fn evaluation(msg: impl Into<String>) -> Self {
        ErreurNoyau::Evaluation(msg.into())
    }

    pub fn interne(msg: impl Into<String>) -> Self {
        ErreurNoyau::Interne(msg.into())
    }

    pub fn est_syntaxe(&self) -> bool {
        matches!(self, ErreurNoyau::Syntaxe(_))
    }

    pub fn est_evaluation(&self) -> bool {
        matches!(self, ErreurNoyau::Evaluation(_))
    }

    pub fn est_interne(&self) -> bool {
        matches!(self, ErreurNoyau::Interne(_))
    }

    /// Message sans le préfixe de catégorie.
    pub fn message(&self) -> &str {
        match self {
            ErreurNoyau::Syntaxe(m) | ErreurNoyau::Evaluation(m) | ErreurNoyau::Interne(m) => m,
        }
    }
}
