//! MiMC keyed permutation and the Miyaguchi–Preneel hash built on it.
//!
//! Round constants are derived once from a seed by iterating Keccak-256 and
//! reducing each digest modulo the field order. The Sbox follows
//! [`CurveId::sbox`]: `x^5` where that is a permutation, field inversion
//! (with `0 ↦ 0`) otherwise.

use curve::{CurveField, CurveId, Sbox};
use num_bigint::BigUint;
use p3_keccak::Keccak256Hash;
use p3_symmetric::CryptographicHasher;

use crate::builder::{ConstraintSystemBuilder, LinearCombination, Variable};

/// MiMC parameters for one curve variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mimc {
    curve: CurveId,
    round_constants: Vec<BigUint>,
}

impl Mimc {
    /// Derives the round constants for `curve` from `seed`.
    ///
    /// `c_i` is the `(i + 2)`-th iterate of Keccak-256 on `seed`, read big-endian
    /// and reduced modulo the field order.
    pub fn new(seed: &[u8], curve: CurveId) -> Self {
        let hasher = Keccak256Hash {};
        let modulus = curve.modulus();

        let mut digest = hasher.hash_slice(seed);
        let round_constants = (0..curve.mimc_rounds())
            .map(|_| {
                digest = hasher.hash_slice(&digest);
                BigUint::from_bytes_be(&digest) % &modulus
            })
            .collect();

        Self {
            curve,
            round_constants,
        }
    }

    pub fn curve(&self) -> CurveId {
        self.curve
    }

    /// Round constants as integers below the field order.
    pub fn round_constants(&self) -> &[BigUint] {
        &self.round_constants
    }

    /// Number of rounds, [`CurveId::mimc_rounds`] of the curve.
    pub fn num_rounds(&self) -> usize {
        self.round_constants.len()
    }

    /// Round constants as elements of `F`.
    ///
    /// # Panics
    ///
    /// If `F` is not the field these parameters were derived for.
    fn constants<F: CurveField>(&self) -> Vec<F> {
        assert_eq!(
            F::CURVE,
            self.curve,
            "MiMC parameters for {} used over {}",
            self.curve,
            F::CURVE
        );
        self.round_constants
            .iter()
            // Reduced modulo p < 2^64, so at most one digit.
            .map(|c| F::from_u64(c.iter_u64_digits().next().unwrap_or(0)))
            .collect()
    }

    /// Encrypts `m` under key `k` inside the circuit.
    ///
    /// # Panics
    ///
    /// If the builder's field is not the one these parameters were derived for.
    pub fn encrypt<F: CurveField>(
        &self,
        builder: &mut ConstraintSystemBuilder<F>,
        m: Variable,
        k: Variable,
    ) -> Variable {
        let sbox = self.curve.sbox();
        let mut res = m;
        for c in self.constants::<F>() {
            let t = builder.linear(LinearCombination::sum(&[res, k]).with_constant(c));
            res = match sbox {
                Sbox::Pow5 => {
                    let t2 = builder.mul(t, t);
                    let t4 = builder.mul(t2, t2);
                    builder.mul(t4, t)
                }
                Sbox::Inverse => builder.inverse_or_zero(t),
            };
        }
        builder.add(&[res, k])
    }

    /// Evaluates [`Mimc::encrypt`] outside the circuit.
    ///
    /// # Panics
    ///
    /// If `F` is not the field these parameters were derived for.
    pub fn encrypt_native<F: CurveField>(&self, m: F, k: F) -> F {
        let sbox = self.curve.sbox();
        let mut res = m;
        for c in self.constants::<F>() {
            let t = res + k + c;
            res = match sbox {
                Sbox::Pow5 => t.exp_const_u64::<5>(),
                Sbox::Inverse => t.try_inverse().unwrap_or(F::ZERO),
            };
        }
        res + k
    }

    /// Miyaguchi–Preneel over `data`: `h ← E_h(x) + h + x`, from `h = 0`.
    pub fn hash<F: CurveField>(
        &self,
        builder: &mut ConstraintSystemBuilder<F>,
        data: &[Variable],
    ) -> Variable {
        let mut h = builder.constant(F::ZERO);
        for &x in data {
            let e = self.encrypt(builder, x, h);
            h = builder.add(&[e, h, x]);
        }
        h
    }

    /// Evaluates [`Mimc::hash`] outside the circuit.
    pub fn hash_native<F: CurveField>(&self, data: &[F]) -> F {
        data.iter().fold(F::ZERO, |h, &x| self.encrypt_native(x, h) + h + x)
    }
}
