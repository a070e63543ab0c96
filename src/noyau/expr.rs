// src/noyau/expr.rs
//
// Arbre d’expression (sans valeur numérique, purement syntaxique).
// - Entier   : littéral entier exact (BigInt, pas de borne machine)
// - Decimal  : littéral décimal fini (4.4, .4) ou périodique (.(4), 4.(12))
// - Unaire   : S, R, !, - (un seul enfant)
// - Binaire  : +, *, /, ^ (enfants ordonnés)
//
// IMPORTANT :
// - la soustraction n’existe pas comme noeud : a-b => Add[a, Oppose(b)]
// - Div a toujours exactement 2 enfants (numérateur, dénominateur)
// - Pow a toujours exactement 2 enfants (base, exposant)

use num_bigint::BigInt;

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unaire {
    Somme,       // S : nombre triangulaire
    Racine,      // R : racine carrée
    Factorielle, // !
    Oppose,      // - unaire
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Binaire {
    Add,
    Mul,
    Div,
    Pow,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decimal {
    /// Partie entière écrite (None pour ".4").
    pub entier: Option<BigInt>,
    /// Chiffres après la virgule, tels qu’écrits (jamais vide).
    pub fraction: String,
    /// true : la fraction se répète indéfiniment (notation .(d)).
    pub periodique: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    Entier(BigInt),
    Decimal(Decimal),
    Unaire(Unaire, Box<Expr>),
    Binaire(Binaire, Vec<Expr>),
}

impl Expr {
    pub fn unaire(op: Unaire, x: Expr) -> Expr {
        Expr::Unaire(op, Box::new(x))
    }

    pub fn oppose(x: Expr) -> Expr {
        Expr::unaire(Unaire::Oppose, x)
    }

    /// Produit de plusieurs facteurs ; un seul facteur reste tel quel.
    pub fn produit(mut facteurs: Vec<Expr>) -> Expr {
        if facteurs.len() == 1 {
            if let Some(f) = facteurs.pop() {
                return f;
            }
        }
        Expr::Binaire(Binaire::Mul, facteurs)
    }

    pub fn quotient(num: Expr, den: Expr) -> Expr {
        Expr::Binaire(Binaire::Div, vec![num, den])
    }

    pub fn puissance(base: Expr, exposant: Expr) -> Expr {
        Expr::Binaire(Binaire::Pow, vec![base, exposant])
    }

    /// Nombre de noeuds (feuilles comprises).
    pub fn taille(&self) -> usize {
        match self {
            Expr::Entier(_) | Expr::Decimal(_) => 1,
            Expr::Unaire(_, x) => 1 + x.taille(),
            Expr::Binaire(_, xs) => 1 + xs.iter().map(Expr::taille).sum::<usize>(),
        }
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(e) = &self.entier {
            write!(f, "{e}")?;
        }
        if self.periodique {
            write!(f, ".({})", self.fraction)
        } else {
            write!(f, ".{}", self.fraction)
        }
    }
}

/* ------------------------ Affichage debug (forme totalement parenthésée) ------------------------ */

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Entier(n) => write!(f, "{n}"),
            Expr::Decimal(d) => write!(f, "{d}"),
            Expr::Unaire(Unaire::Somme, x) => write!(f, "S({x})"),
            Expr::Unaire(Unaire::Racine, x) => write!(f, "R({x})"),
            Expr::Unaire(Unaire::Factorielle, x) => write!(f, "({x})!"),
            Expr::Unaire(Unaire::Oppose, x) => write!(f, "-({x})"),
            Expr::Binaire(op, xs) => {
                let sep = match op {
                    Binaire::Add => "+",
                    Binaire::Mul => "*",
                    Binaire::Div => "/",
                    Binaire::Pow => "^",
                };
                write!(f, "(")?;
                for (i, x) in xs.iter().enumerate() {
                    if i > 0 {
                        write!(f, "{sep}")?;
                    }
                    write!(f, "{x}")?;
                }
                write!(f, ")")
            }
        }
    }
}
