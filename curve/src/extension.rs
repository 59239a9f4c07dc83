//! Native quadratic extension `F[g] / (g^2 - n)`.
//!
//! These are plain field computations used to produce witnesses and to check
//! the in-circuit gadgets against.

use core::ops::{Add, Neg, Sub};

use p3_field::extension::BinomiallyExtendable;
use p3_field::{Field, PrimeField64};
use serde::{Deserialize, Serialize};

/// Element `c0 + c1 * g` of a quadratic extension.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fp2<F> {
    pub c0: F,
    pub c1: F,
}

impl<F: Field> Fp2<F> {
    pub const fn new(c0: F, c1: F) -> Self {
        Self { c0, c1 }
    }

    pub fn zero() -> Self {
        Self::new(F::ZERO, F::ZERO)
    }

    pub fn one() -> Self {
        Self::new(F::ONE, F::ZERO)
    }

    pub fn is_zero(&self) -> bool {
        self.c0.is_zero() && self.c1.is_zero()
    }

    /// `(c0, -c1)`
    pub fn conjugate(&self) -> Self {
        Self::new(self.c0, -self.c1)
    }

    /// Multiplication by a base-field scalar.
    pub fn mul_by_fp(&self, s: F) -> Self {
        Self::new(self.c0 * s, self.c1 * s)
    }
}

impl<F: Field> Add for Fp2<F> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.c0 + rhs.c0, self.c1 + rhs.c1)
    }
}

impl<F: Field> Sub for Fp2<F> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.c0 - rhs.c0, self.c1 - rhs.c1)
    }
}

impl<F: Field> Neg for Fp2<F> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.c0, -self.c1)
    }
}

/// Parameters of the extension: the constant `n` with `g^2 = n`.
///
/// `n` must be a quadratic non-residue for the result to be a field. Nothing
/// here enforces that; [`Extension::is_field`] checks it on demand.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Extension<F> {
    non_residue: F,
}

impl<F: Field> Extension<F> {
    pub const fn new(non_residue: F) -> Self {
        Self { non_residue }
    }

    /// Extension over the multiplicative generator, which is never a square.
    pub fn over_generator() -> Self {
        Self::new(F::GENERATOR)
    }

    /// The same `W` Plonky3 uses for `BinomialExtensionField<F, 2>`.
    pub fn binomial() -> Self
    where
        F: BinomiallyExtendable<2>,
    {
        Self::new(F::W)
    }

    pub fn non_residue(&self) -> F {
        self.non_residue
    }

    /// Euler's criterion on `n`.
    pub fn is_field(&self) -> bool
    where
        F: PrimeField64,
    {
        let legendre = self.non_residue.exp_u64((F::ORDER_U64 - 1) / 2);
        legendre == F::NEG_ONE
    }

    /// `(a0 b0 + n a1 b1, a0 b1 + a1 b0)`
    pub fn mul(&self, a: &Fp2<F>, b: &Fp2<F>) -> Fp2<F> {
        Fp2::new(
            a.c0 * b.c0 + self.non_residue * a.c1 * b.c1,
            a.c0 * b.c1 + a.c1 * b.c0,
        )
    }

    pub fn square(&self, a: &Fp2<F>) -> Fp2<F> {
        Fp2::new(
            a.c0.square() + self.non_residue * a.c1.square(),
            a.c0 * a.c1.double(),
        )
    }

    /// Multiplication by the generator `g`: `(n a1, a0)`.
    pub fn mul_by_im(&self, a: &Fp2<F>) -> Fp2<F> {
        Fp2::new(self.non_residue * a.c1, a.c0)
    }

    /// `a0^2 - n a1^2`, the product of `a` and its conjugate.
    pub fn norm(&self, a: &Fp2<F>) -> F {
        a.c0.square() - self.non_residue * a.c1.square()
    }

    /// Returns `None` when the norm vanishes, which for a non-residue `n`
    /// happens only at zero.
    pub fn inverse(&self, a: &Fp2<F>) -> Option<Fp2<F>> {
        let norm_inv = self.norm(a).try_inverse()?;
        Some(Fp2::new(a.c0 * norm_inv, -(a.c1 * norm_inv)))
    }
}
