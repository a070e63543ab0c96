// src/noyau/valeur.rs
//
// Backend exact (sans flottants) : tour d’extensions quadratiques
//
//   Q ⊂ Q(g₀) ⊂ Q(g₀, g₁) ⊂ … ,   gᵢ = √dᵢ > 0
//
// - dᵢ : élément > 0 du corps engendré par g₀..gᵢ₋₁, qui N’Y EST PAS un carré
// - une valeur = Σ q_m · Π_{i ∈ m} gᵢ  (m : masque de générateurs, q_m rationnel non nul)
//
// Comme aucun gᵢ n’appartient au corps précédent, les monômes forment une base :
// égalité / "est entier" / "est nul" restent structurels, même pour les radicaux imbriqués.
//
// IMPORTANT (SAFE):
// - aucune approximation n’est jamais réinjectée dans une valeur
// - les encadrements décimaux ne servent qu’à trancher un signe ou à lire le résultat
// - le test "est un carré" est exact (récursif sur la tour), jamais une factorisation

use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use super::erreur::ErreurNoyau;

/// Division d’essai pour embellir les radicandes rationnels (√72 = 6·√2).
/// Le reste n’a pas besoin d’être sans facteur carré : la tour le vérifie.
const CRIBLE_MAX: u64 = 10_000;

/// Précision de base (décimales) pour trancher un signe par encadrement.
const SIGNE_CHIFFRES_MAX: usize = 8192;

/// Radicaux distincts d’une même valeur (2^n monômes au pire).
pub const RADICAUX_MAX: usize = 8;

/// Monôme (masque de générateurs) -> coefficient non nul.
type Termes = BTreeMap<u64, BigRational>;

/// gᵢ = √radicande ; le radicande n’utilise que les générateurs qui précèdent gᵢ.
#[derive(Debug)]
struct Generateur {
    radicande: Termes,
}

type Tour = Vec<Rc<Generateur>>;

#[derive(Clone, Debug, Default)]
pub struct Valeur {
    tour: Tour,
    termes: Termes,
}

impl Valeur {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn un() -> Self {
        Self::rationnel(BigRational::one())
    }

    pub fn rationnel(r: BigRational) -> Self {
        Self {
            tour: Tour::new(),
            termes: constante(r),
        }
    }

    pub fn entier(n: BigInt) -> Self {
        Self::rationnel(BigRational::from_integer(n))
    }

    /// √r pour r rationnel ≥ 0.
    pub fn racine_rationnel(r: &BigRational) -> Result<Self, ErreurNoyau> {
        Self::rationnel(r.clone()).racine()
    }

    /// Retire les générateurs de tête inutilisés (la tour reste la plus courte possible).
    fn nouvelle(mut tour: Tour, termes: Termes) -> Self {
        let utilises = termes.keys().fold(0u64, |acc, m| acc | m);
        while let Some(i) = tour.len().checked_sub(1) {
            if utilises & bit(i) != 0 {
                break;
            }
            tour.pop();
        }
        Self { tour, termes }
    }

    fn corps(&self) -> Corps<'_> {
        Corps { gens: &self.tour }
    }

    /* ------------------------ Lecture structurelle ------------------------ */

    pub fn est_zero(&self) -> bool {
        self.termes.is_empty()
    }

    pub fn est_rationnel(&self) -> bool {
        self.termes.keys().all(|m| *m == 0)
    }

    pub fn en_rationnel(&self) -> Option<BigRational> {
        rationnel_de(&self.termes)
    }

    pub fn en_entier(&self) -> Option<BigInt> {
        let r = self.en_rationnel()?;
        if r.is_integer() {
            Some(r.to_integer())
        } else {
            None
        }
    }

    /// Nombre de radicaux de la tour.
    pub fn radicaux(&self) -> usize {
        self.tour.len()
    }

    /// Taille estimée en bits (plus gros numérateur/dénominateur, radicandes compris).
    pub fn bits(&self) -> u64 {
        self.tour
            .iter()
            .map(|g| bits_termes(&g.radicande))
            .chain(std::iter::once(bits_termes(&self.termes)))
            .max()
            .unwrap_or(0)
    }

    /* ------------------------ Arithmétique ------------------------ */

    pub fn oppose(&self) -> Self {
        Self {
            tour: self.tour.clone(),
            termes: oppose(&self.termes),
        }
    }

    pub fn add(&self, autre: &Self) -> Result<Self, ErreurNoyau> {
        let (tour, a, b) = unifier(self, autre)?;
        Ok(Self::nouvelle(tour, somme(&a, &b)))
    }

    pub fn sub(&self, autre: &Self) -> Result<Self, ErreurNoyau> {
        self.add(&autre.oppose())
    }

    pub fn mul(&self, autre: &Self) -> Result<Self, ErreurNoyau> {
        let (tour, a, b) = unifier(self, autre)?;
        let termes = Corps { gens: &tour }.mul(&a, &b);
        Ok(Self::nouvelle(tour, termes))
    }

    pub fn mul_rationnel(&self, q: &BigRational) -> Self {
        Self::nouvelle(self.tour.clone(), echelle(&self.termes, q))
    }

    /// Inverse exact : (a + b·g)⁻¹ = (a − b·g) / (a² − b²·d), récursivement sur la tour.
    pub fn inverse(&self) -> Result<Self, ErreurNoyau> {
        if self.est_zero() {
            return Err(ErreurNoyau::evaluation("division by zero"));
        }
        let inv = self
            .corps()
            .inverse(&self.termes, self.tour.len())
            .ok_or_else(|| ErreurNoyau::interne(format!("cannot invert {self}")))?;
        Ok(Self::nouvelle(self.tour.clone(), inv))
    }

    pub fn div(&self, autre: &Self) -> Result<Self, ErreurNoyau> {
        if autre.est_zero() {
            return Err(ErreurNoyau::evaluation("division by zero"));
        }
        self.mul(&autre.inverse()?)
    }

    /// Puissance entière (exposant négatif => inverse).
    pub fn pow(&self, exposant: i64) -> Result<Self, ErreurNoyau> {
        if exposant == 0 {
            if self.est_zero() {
                return Err(ErreurNoyau::evaluation(
                    "zero to the power of zero is undefined",
                ));
            }
            return Ok(Self::un());
        }

        let base = if exposant < 0 {
            self.inverse()?
        } else {
            self.clone()
        };

        // rationnel : num_rational directement
        if let Some(r) = base.en_rationnel() {
            let e = exposant.unsigned_abs();
            let n = pow_big(r.numer(), e);
            let d = pow_big(r.denom(), e);
            return Ok(Self::rationnel(BigRational::new(n, d)));
        }

        // même tour tout du long : pas d’unification
        let corps = base.corps();
        let mut e = exposant.unsigned_abs();
        let mut acc = constante(BigRational::one());
        let mut b = base.termes.clone();
        while e > 0 {
            if (e & 1) == 1 {
                acc = corps.mul(&acc, &b);
            }
            e >>= 1;
            if e > 0 {
                b = corps.mul(&b, &b);
            }
        }
        Ok(Self::nouvelle(base.tour.clone(), acc))
    }

    /// Racine carrée exacte (positive).
    /// - carré dans la tour courante => élément de la tour
    /// - sinon                        => nouveau générateur
    pub fn racine(&self) -> Result<Self, ErreurNoyau> {
        match self.signe()? {
            Ordering::Less => {
                return Err(ErreurNoyau::evaluation("square root of a negative number"))
            }
            Ordering::Equal => return Ok(Self::zero()),
            Ordering::Greater => {}
        }

        if let Some(r) = self.corps().racine(&self.termes, self.tour.len()) {
            return positive(self.tour.clone(), r);
        }

        if self.tour.len() >= RADICAUX_MAX {
            return Err(trop_de_radicaux());
        }

        // √(n/d) = k/d · √s   avec n·d = k²·s
        let (coeff, radicande) = match self.en_rationnel() {
            Some(q) => {
                let d = q.denom().clone();
                let (k, s) = extraire_carre(&(q.numer() * &d));
                (BigRational::new(k, d), constante(BigRational::from_integer(s)))
            }
            None => (BigRational::one(), self.termes.clone()),
        };

        let mut tour = self.tour.clone();
        tour.push(Rc::new(Generateur { radicande }));
        let m = bit(tour.len() - 1);
        Ok(Self::nouvelle(tour, Termes::from([(m, coeff)])))
    }

    /* ------------------------ Signe (encadrement) ------------------------ */

    /// Signe exact. Une valeur non nulle en forme canonique l’est vraiment :
    /// on resserre l’encadrement jusqu’à exclure zéro.
    pub fn signe(&self) -> Result<Ordering, ErreurNoyau> {
        signe_dans(&self.tour, &self.termes)
    }

    /// self·10^chiffres tronqué vers zéro (lecture décimale).
    pub fn tronquer(&self, chiffres: usize) -> Result<BigInt, ErreurNoyau> {
        if let Some(r) = self.en_rationnel() {
            return Ok((r.numer() * pow10(chiffres)) / r.denom());
        }

        let negatif = self.signe()? == Ordering::Less;
        let abs = if negatif {
            oppose(&self.termes)
        } else {
            self.termes.clone()
        };

        // irrationnel => |v|·10^chiffres n’est jamais entier : l’encadrement finit par trancher
        let corps = self.corps();
        let max = SIGNE_CHIFFRES_MAX + self.bits() as usize;
        let mut garde = 10usize;
        while garde <= max {
            let p = chiffres + garde;
            let (bas, haut) = encadrer(&abs, &corps.encadrer_generateurs(p), p);
            let e = pow10(garde);
            let (b, h) = (bas.div_floor(&e), haut.div_floor(&e));
            if b == h {
                return Ok(if negatif { -b } else { b });
            }
            garde *= 2;
        }

        Err(ErreurNoyau::interne(format!("cannot read {self}")))
    }
}

/// Égalité de valeurs : la différence est nulle (tours éventuellement différentes).
impl PartialEq for Valeur {
    fn eq(&self, autre: &Self) -> bool {
        self.sub(autre).map(|d| d.est_zero()).unwrap_or(false)
    }
}

impl Eq for Valeur {}

fn trop_de_radicaux() -> ErreurNoyau {
    ErreurNoyau::evaluation("too many distinct radicals")
}

/* ------------------------ Tour commune ------------------------ */

/// Ramène deux valeurs dans une même tour : (tour, termes de a, termes de b).
///
/// Chaque générateur de b est réexprimé : s’il est déjà dans la tour de a
/// (son radicande y est un carré), il devient un élément de cette tour ;
/// sinon il est ajouté en tête.
fn unifier(a: &Valeur, b: &Valeur) -> Result<(Tour, Termes, Termes), ErreurNoyau> {
    if est_prefixe(&b.tour, &a.tour) {
        return Ok((a.tour.clone(), a.termes.clone(), b.termes.clone()));
    }
    if est_prefixe(&a.tour, &b.tour) {
        return Ok((b.tour.clone(), a.termes.clone(), b.termes.clone()));
    }

    let mut tour = a.tour.clone();
    let mut images: Vec<Termes> = Vec::with_capacity(b.tour.len());

    for g in &b.tour {
        let d = substituer(&tour, &images, &g.radicande);
        let trouvee = Corps { gens: &tour }.racine(&d, tour.len());
        match trouvee {
            Some(r) => {
                let r = positive(tour.clone(), r)?;
                // `positive` a pu raccourcir sa tour : les masques restent valides
                images.push(r.termes);
            }
            None => {
                if tour.len() >= RADICAUX_MAX {
                    return Err(trop_de_radicaux());
                }
                tour.push(Rc::new(Generateur { radicande: d }));
                images.push(Termes::from([(bit(tour.len() - 1), BigRational::one())]));
            }
        }
    }

    let tb = substituer(&tour, &images, &b.termes);
    Ok((tour, a.termes.clone(), tb))
}

fn est_prefixe(court: &Tour, long: &Tour) -> bool {
    court.len() <= long.len() && court.iter().zip(long).all(|(x, y)| Rc::ptr_eq(x, y))
}

/// Σ q·Π gᵢ  ->  Σ q·Π images[i], calculé dans `tour`.
fn substituer(tour: &Tour, images: &[Termes], termes: &Termes) -> Termes {
    let corps = Corps { gens: tour };
    let mut out = Termes::new();
    for (m, c) in termes {
        let mut produit = constante(c.clone());
        for (i, image) in images.iter().enumerate() {
            if m & bit(i) != 0 {
                produit = corps.mul(&produit, image);
            }
        }
        for (m2, c2) in produit {
            accumuler(&mut out, m2, c2);
        }
    }
    out
}

/// La racine trouvée peut être l’opposée de la racine positive.
fn positive(tour: Tour, r: Termes) -> Result<Valeur, ErreurNoyau> {
    let r = if signe_dans(&tour, &r)? == Ordering::Less {
        oppose(&r)
    } else {
        r
    };
    Ok(Valeur::nouvelle(tour, r))
}

fn signe_dans(tour: &Tour, termes: &Termes) -> Result<Ordering, ErreurNoyau> {
    if termes.is_empty() {
        return Ok(Ordering::Equal);
    }
    if let Some(r) = rationnel_de(termes) {
        return Ok(if r.is_negative() {
            Ordering::Less
        } else {
            Ordering::Greater
        });
    }

    let corps = Corps { gens: tour };
    let max = SIGNE_CHIFFRES_MAX + bits_termes(termes) as usize;
    let mut chiffres = 16usize;
    while chiffres <= max {
        let (bas, haut) = encadrer(termes, &corps.encadrer_generateurs(chiffres), chiffres);
        if bas.is_positive() {
            return Ok(Ordering::Greater);
        }
        if haut.is_negative() {
            return Ok(Ordering::Less);
        }
        chiffres *= 2;
    }

    Err(ErreurNoyau::interne(format!(
        "cannot decide the sign of {}",
        Affichage { tour, termes }
    )))
}

/* ------------------------ Calcul dans un corps de la tour ------------------------ */

/// Corps Q(g₀..gₙ₋₁) ; `niveau` k désigne le sous-corps Q(g₀..g_{k−1}).
struct Corps<'a> {
    gens: &'a [Rc<Generateur>],
}

impl Corps<'_> {
    fn radicande(&self, i: usize) -> &Termes {
        &self.gens[i].radicande
    }

    /// e · Π_{i ∈ masque} gᵢ   (gᵢ² = dᵢ)
    fn mul_monome(&self, e: &Termes, masque: u64) -> Termes {
        if masque == 0 {
            return e.clone();
        }
        let i = 63 - masque.leading_zeros() as usize;
        let partiel = self.mul_monome(e, masque & !bit(i));

        let mut out = Termes::new();
        for (m, c) in partiel {
            if m & bit(i) == 0 {
                accumuler(&mut out, m | bit(i), c);
            } else {
                let reduit = self.mul_monome(&echelle(self.radicande(i), &c), m & !bit(i));
                for (m2, c2) in reduit {
                    accumuler(&mut out, m2, c2);
                }
            }
        }
        out
    }

    fn mul(&self, a: &Termes, b: &Termes) -> Termes {
        if let Some(q) = rationnel_de(b) {
            return echelle(a, &q);
        }
        if let Some(q) = rationnel_de(a) {
            return echelle(b, &q);
        }
        let mut out = Termes::new();
        for (m, c) in b {
            for (m2, c2) in self.mul_monome(&echelle(a, c), *m) {
                accumuler(&mut out, m2, c2);
            }
        }
        out
    }

    /// e = a + b·g_{niveau−1}, a et b dans le niveau inférieur.
    fn scinder(e: &Termes, i: usize) -> (Termes, Termes) {
        let mut a = Termes::new();
        let mut b = Termes::new();
        for (m, c) in e {
            if m & bit(i) == 0 {
                a.insert(*m, c.clone());
            } else {
                b.insert(m & !bit(i), c.clone());
            }
        }
        (a, b)
    }

    /// a² − b²·dᵢ : la "norme" de a + b·gᵢ, dans le niveau i.
    fn norme(&self, a: &Termes, b: &Termes, i: usize) -> Termes {
        let bb = self.mul(b, b);
        somme(&self.mul(a, a), &oppose(&self.mul(&bb, self.radicande(i))))
    }

    /// Inverse dans le niveau donné (None : e nul).
    fn inverse(&self, e: &Termes, niveau: usize) -> Option<Termes> {
        if niveau == 0 {
            let q = rationnel_de(e)?;
            if q.is_zero() {
                return None;
            }
            return Some(constante(q.recip()));
        }

        let i = niveau - 1;
        let (a, b) = Self::scinder(e, i);
        if b.is_empty() {
            return self.inverse(&a, i);
        }

        let n_inv = self.inverse(&self.norme(&a, &b, i), i)?;
        let conjugue = somme(&a, &oppose(&self.mul_monome(&b, bit(i))));
        Some(self.mul(&conjugue, &n_inv))
    }

    /// Une racine carrée de e dans le niveau donné, si elle existe (signe quelconque).
    ///
    /// (u + v·g)² = a + b·g  <=>  u² + v²·d = a, 2uv = b
    /// - b = 0 : u = 0 ou v = 0, donc √a ou √(a/d)·g
    /// - sinon : u² = (a ± s)/2 avec s² = a² − b²·d, puis v = b/(2u)
    fn racine(&self, e: &Termes, niveau: usize) -> Option<Termes> {
        if e.is_empty() {
            return Some(Termes::new());
        }
        if niveau == 0 {
            let q = rationnel_de(e)?;
            return rationnel_racine_exacte(&q).map(constante);
        }

        let i = niveau - 1;
        let (a, b) = Self::scinder(e, i);
        let demi = BigRational::new(BigInt::one(), BigInt::from(2));

        if b.is_empty() {
            if let Some(r) = self.racine(&a, i) {
                return Some(r);
            }
            let d_inv = self.inverse(self.radicande(i), i)?;
            let c = self.racine(&self.mul(&a, &d_inv), i)?;
            return Some(self.mul_monome(&c, bit(i)));
        }

        let s = self.racine(&self.norme(&a, &b, i), i)?;
        for t in [somme(&a, &s), somme(&a, &oppose(&s))] {
            let Some(u) = self.racine(&echelle(&t, &demi), i) else {
                continue;
            };
            if u.is_empty() {
                continue;
            }
            let u_inv = self.inverse(&u, i)?;
            let v = echelle(&self.mul(&b, &u_inv), &demi);
            return Some(somme(&u, &self.mul_monome(&v, bit(i))));
        }
        None
    }

    /// Encadrements [bas, haut] de gᵢ·10^p, du bas de la tour vers le haut.
    fn encadrer_generateurs(&self, p: usize) -> Vec<(BigInt, BigInt)> {
        let echelle_p = pow10(p);
        let mut out: Vec<(BigInt, BigInt)> = Vec::with_capacity(self.gens.len());
        for g in self.gens {
            let (bas, haut) = encadrer(&g.radicande, &out, p);
            let bas = if bas.is_negative() { BigInt::zero() } else { bas };
            let haut = if haut.is_negative() { BigInt::zero() } else { haut };
            // √(D·10^-p)·10^p = √(D·10^p)
            out.push((
                int_sqrt_floor(&(bas * &echelle_p)),
                int_sqrt_ceil(&(haut * &echelle_p)),
            ));
        }
        out
    }
}

/// Encadrement entier de Σ q·Π gᵢ · 10^p, connaissant ceux des générateurs (tous ≥ 0).
fn encadrer(termes: &Termes, gens: &[(BigInt, BigInt)], p: usize) -> (BigInt, BigInt) {
    let echelle_p = pow10(p);
    let mut bas = BigInt::zero();
    let mut haut = BigInt::zero();

    for (m, c) in termes {
        let mut lo = echelle_p.clone();
        let mut hi = echelle_p.clone();
        for (i, (gb, gh)) in gens.iter().enumerate() {
            if m & bit(i) != 0 {
                lo = (&lo * gb).div_floor(&echelle_p);
                hi = div_ceil(&(&hi * gh), &echelle_p);
            }
        }

        let (n, d) = (c.numer(), c.denom());
        if n.is_negative() {
            bas += (n * &hi).div_floor(d);
            haut += div_ceil(&(n * &lo), d);
        } else {
            bas += (n * &lo).div_floor(d);
            haut += div_ceil(&(n * &hi), d);
        }
    }
    (bas, haut)
}

/* ------------------------ Termes ------------------------ */

fn bit(i: usize) -> u64 {
    1u64 << i
}

fn constante(q: BigRational) -> Termes {
    let mut t = Termes::new();
    accumuler(&mut t, 0, q);
    t
}

fn accumuler(termes: &mut Termes, m: u64, coeff: BigRational) {
    if coeff.is_zero() {
        return;
    }
    let somme = match termes.remove(&m) {
        Some(c) => c + coeff,
        None => coeff,
    };
    if !somme.is_zero() {
        termes.insert(m, somme);
    }
}

fn somme(a: &Termes, b: &Termes) -> Termes {
    let mut out = a.clone();
    for (m, c) in b {
        accumuler(&mut out, *m, c.clone());
    }
    out
}

fn oppose(a: &Termes) -> Termes {
    a.iter().map(|(m, c)| (*m, -c.clone())).collect()
}

fn echelle(a: &Termes, q: &BigRational) -> Termes {
    let mut out = Termes::new();
    if q.is_zero() {
        return out;
    }
    for (m, c) in a {
        out.insert(*m, c * q);
    }
    out
}

fn rationnel_de(termes: &Termes) -> Option<BigRational> {
    match termes.len() {
        0 => Some(BigRational::zero()),
        1 => termes.get(&0).cloned(),
        _ => None,
    }
}

fn bits_termes(termes: &Termes) -> u64 {
    termes
        .values()
        .map(|c| c.numer().bits().max(c.denom().bits()))
        .max()
        .unwrap_or(0)
}

/* ------------------------ Affichage debug (forme symbolique) ------------------------ */

struct Affichage<'a> {
    tour: &'a [Rc<Generateur>],
    termes: &'a Termes,
}

impl fmt::Display for Affichage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.termes.is_empty() {
            return write!(f, "0");
        }
        for (i, (m, c)) in self.termes.iter().enumerate() {
            if c.is_negative() {
                write!(f, "-")?;
            } else if i > 0 {
                write!(f, "+")?;
            }
            let c = c.abs();
            let mut facteurs = Vec::new();
            if *m == 0 || !c.is_one() {
                facteurs.push(if c.denom().is_one() {
                    format!("{}", c.numer())
                } else {
                    format!("{}/{}", c.numer(), c.denom())
                });
            }
            for (j, g) in self.tour.iter().enumerate() {
                if m & bit(j) != 0 {
                    let radicande = Affichage {
                        tour: &self.tour[..j],
                        termes: &g.radicande,
                    };
                    facteurs.push(format!("sqrt({radicande})"));
                }
            }
            write!(f, "{}", facteurs.join("*"))?;
        }
        Ok(())
    }
}

impl fmt::Display for Valeur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Affichage {
            tour: &self.tour,
            termes: &self.termes,
        }
        .fmt(f)
    }
}

/* ------------------------ Outils entiers ------------------------ */

pub(crate) fn pow10(n: usize) -> BigInt {
    BigInt::from(10).pow(n as u32)
}

fn pow_big(x: &BigInt, e: u64) -> BigInt {
    match e.to_u32() {
        Some(e) => x.pow(e),
        None => {
            // hors de portée pratique (bits_max l’empêche en amont)
            let mut acc = BigInt::one();
            for _ in 0..e {
                acc *= x;
            }
            acc
        }
    }
}

fn div_ceil(a: &BigInt, b: &BigInt) -> BigInt {
    -((-a).div_floor(b))
}

/// m = k²·s (s : reste après division d’essai, pas forcément sans facteur carré).
fn extraire_carre(m: &BigInt) -> (BigInt, BigInt) {
    if m.is_zero() {
        return (BigInt::zero(), BigInt::one());
    }
    if let Some(r) = int_sqrt_exact(m) {
        return (r, BigInt::one());
    }

    let mut reste = m.clone();
    let mut k = BigInt::one();
    let mut s = BigInt::one();

    let mut p: u64 = 2;
    while p <= CRIBLE_MAX {
        let bp = BigInt::from(p);
        if &bp * &bp > reste {
            break;
        }
        let mut exposant = 0u32;
        while reste.is_multiple_of(&bp) {
            reste /= &bp;
            exposant += 1;
        }
        if exposant > 0 {
            k *= bp.pow(exposant / 2);
            if exposant % 2 == 1 {
                s *= &bp;
            }
        }
        p += if p == 2 { 1 } else { 2 };
    }

    if !reste.is_one() {
        match int_sqrt_exact(&reste) {
            Some(r) => k *= r,
            None => s *= reste,
        }
    }
    (k, s)
}

fn rationnel_racine_exacte(r: &BigRational) -> Option<BigRational> {
    if r.is_negative() {
        return None;
    }
    let sn = int_sqrt_exact(r.numer())?;
    let sd = int_sqrt_exact(r.denom())?;
    Some(BigRational::new(sn, sd))
}

pub(crate) fn int_sqrt_exact(x: &BigInt) -> Option<BigInt> {
    if x.is_negative() {
        return None;
    }
    let s = int_sqrt_floor(x);
    if &s * &s == *x {
        Some(s)
    } else {
        None
    }
}

fn int_sqrt_ceil(x: &BigInt) -> BigInt {
    let s = int_sqrt_floor(x);
    if &s * &s == *x {
        s
    } else {
        s + 1u32
    }
}

/// ⌊√x⌋ par Newton (x ≥ 0 ; 0 si x < 0).
pub(crate) fn int_sqrt_floor(x: &BigInt) -> BigInt {
    if x.sign() != Sign::Plus {
        return BigInt::zero();
    }

    let mut y = BigInt::one() << x.bits().div_ceil(2);
    loop {
        let y_next = (&y + (x / &y)) >> 1;
        if y_next >= y {
            let mut z = y_next;
            while (&z + 1u32) * (&z + 1u32) <= *x {
                z += 1u32;
            }
            while &z * &z > *x {
                z -= 1u32;
            }
            return z;
        }
        y = y_next;
    }
}
