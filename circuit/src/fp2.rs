//! Quadratic extension field arithmetic as constraints.
//!
//! An [`Fp2Var`] is a pair of variables `(c0, c1)` standing for `c0 + c1·g`
//! with `g² = n`, where `n` is carried by an [`Extension`]. Operations append
//! gates to the builder and return a new element; the inputs are untouched.
//!
//! Gate costs:
//!
//! | op          | mul gates | linear gates | inverse gates |
//! |-------------|-----------|--------------|---------------|
//! | `add`/`sub` | 0         | 2            | 0             |
//! | `mul`       | 3         | 4            | 0             |
//! | `square`    | 2         | 4            | 0             |
//! | `mul_by_fp` | 2         | 0            | 0             |
//! | `mul_by_im` | 0         | 1            | 0             |
//! | `conjugate` | 0         | 1            | 0             |
//! | `inverse`   | 4         | 3            | 1             |

use curve::{Extension, Fp2};
use p3_field::Field;

use crate::builder::{ConstraintSystemBuilder, LinearCombination, Variable};
use crate::constraint_system::Solution;

/// An element of `F[g]/(g² − n)` inside a circuit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Fp2Var {
    /// Coefficient of `1`.
    pub c0: Variable,
    /// Coefficient of `g`.
    pub c1: Variable,
}

impl Fp2Var {
    /// Pairs two existing variables; adds no gates.
    pub const fn new(c0: Variable, c1: Variable) -> Self {
        Self { c0, c1 }
    }

    /// Allocates `c0` then `c1` as public inputs.
    pub fn public_input<F: Field>(builder: &mut ConstraintSystemBuilder<F>) -> Self {
        Self::new(builder.public_input(), builder.public_input())
    }

    /// Allocates `c0` then `c1` as secret inputs.
    pub fn secret_input<F: Field>(builder: &mut ConstraintSystemBuilder<F>) -> Self {
        Self::new(builder.secret_input(), builder.secret_input())
    }

    /// Reads the native value out of a solved assignment.
    ///
    /// # Panics
    ///
    /// If `self` was not allocated by the builder that produced `solution`.
    pub fn value<F: Field>(&self, solution: &Solution<F>) -> Fp2<F> {
        Fp2::new(solution.value(self.c0), solution.value(self.c1))
    }

    /// Componentwise sum, one linear gate per coefficient.
    pub fn add<F: Field>(&self, builder: &mut ConstraintSystemBuilder<F>, other: &Self) -> Self {
        Self::new(
            builder.add(&[self.c0, other.c0]),
            builder.add(&[self.c1, other.c1]),
        )
    }

    /// Componentwise difference.
    pub fn sub<F: Field>(&self, builder: &mut ConstraintSystemBuilder<F>, other: &Self) -> Self {
        Self::new(
            builder.sub(self.c0, other.c0),
            builder.sub(self.c1, other.c1),
        )
    }

    /// Karatsuba: `a0·b0`, `a1·b1` and `(a0 + a1)(b0 + b1)` are the only
    /// products.
    pub fn mul<F: Field>(
        &self,
        builder: &mut ConstraintSystemBuilder<F>,
        ext: &Extension<F>,
        other: &Self,
    ) -> Self {
        let v0 = builder.mul(self.c0, other.c0);
        let v1 = builder.mul(self.c1, other.c1);
        let sa = builder.add(&[self.c0, self.c1]);
        let sb = builder.add(&[other.c0, other.c1]);
        let v2 = builder.mul(sa, sb);

        let c0 = builder.linear(LinearCombination::from(v0).with_term(v1, ext.non_residue()));
        let c1 = builder.linear(
            LinearCombination::from(v2)
                .with_term(v0, F::NEG_ONE)
                .with_term(v1, F::NEG_ONE),
        );
        Self::new(c0, c1)
    }

    /// `(a0² + n·a1², 2·a0·a1)` from the two products `a0·a1` and
    /// `(a0 + a1)(a0 + n·a1)`.
    pub fn square<F: Field>(
        &self,
        builder: &mut ConstraintSystemBuilder<F>,
        ext: &Extension<F>,
    ) -> Self {
        let n = ext.non_residue();
        let m = builder.mul(self.c0, self.c1);
        let s0 = builder.add(&[self.c0, self.c1]);
        let s1 = builder.linear(LinearCombination::from(self.c0).with_term(self.c1, n));
        let s = builder.mul(s0, s1);

        let c0 = builder.linear(LinearCombination::from(s).with_term(m, -(F::ONE + n)));
        let c1 = builder.scale(m, F::TWO);
        Self::new(c0, c1)
    }

    /// Multiplication by a base-field variable `s`.
    pub fn mul_by_fp<F: Field>(&self, builder: &mut ConstraintSystemBuilder<F>, s: Variable) -> Self {
        Self::new(builder.mul(self.c0, s), builder.mul(self.c1, s))
    }

    /// Multiplication by `g`: `(n·a1, a0)`.
    pub fn mul_by_im<F: Field>(
        &self,
        builder: &mut ConstraintSystemBuilder<F>,
        ext: &Extension<F>,
    ) -> Self {
        Self::new(builder.scale(self.c1, ext.non_residue()), self.c0)
    }

    /// `(a0, −a1)`.
    pub fn conjugate<F: Field>(&self, builder: &mut ConstraintSystemBuilder<F>) -> Self {
        Self::new(self.c0, builder.neg(self.c1))
    }

    /// `(a0·d⁻¹, −a1·d⁻¹)` with `d = a0² − n·a1²`.
    ///
    /// Always constructible; a zero norm makes the system unsatisfiable and is
    /// reported by the solver.
    pub fn inverse<F: Field>(
        &self,
        builder: &mut ConstraintSystemBuilder<F>,
        ext: &Extension<F>,
    ) -> Self {
        let t0 = builder.mul(self.c0, self.c0);
        let t1 = builder.mul(self.c1, self.c1);
        let nt1 = builder.scale(t1, ext.non_residue());
        let d = builder.sub(t0, nt1);
        let d_inv = builder.inverse(d);

        let c0 = builder.mul(self.c0, d_inv);
        let c1 = builder.mul(self.c1, d_inv);
        Self::new(c0, builder.neg(c1))
    }

    /// Constrains both coefficients to be equal.
    pub fn assert_equal<F: Field>(&self, builder: &mut ConstraintSystemBuilder<F>, other: &Self) {
        builder.assert_equal(self.c0, other.c0);
        builder.assert_equal(self.c1, other.c1);
    }
}
