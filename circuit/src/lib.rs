//! Arithmetic constraint systems and the gadgets built on them.
//!
//! A circuit is assembled with a [`ConstraintSystemBuilder`]: inputs are
//! declared, gadgets append gates, and [`ConstraintSystemBuilder::build`]
//! freezes the result into a [`ConstraintSystem`]. The solver fills in every
//! intermediate variable from a [`Witness`], which is what the prover commits
//! to.
//!
//! ```rust,ignore
//! use circuit::{ConstraintSystemBuilder, Fp2Var, Witness};
//! use curve::{Extension, KoalaBear};
//!
//! let ext = Extension::<KoalaBear>::over_generator();
//! let mut builder = ConstraintSystemBuilder::new();
//! let a = Fp2Var::secret_input(&mut builder);
//! let b = Fp2Var::secret_input(&mut builder);
//! let c = a.mul(&mut builder, &ext, &b);
//! let cs = builder.build();
//!
//! let solution = cs.solve(&Witness::new(vec![], values))?;
//! let product = c.value(&solution);
//! ```
//!
//! Gadgets:
//! - [`Fp2Var`]: quadratic extension arithmetic (Karatsuba multiplication,
//!   norm-based inversion).
//! - [`Mimc`]: the MiMC keyed permutation and a Miyaguchi–Preneel hash, with
//!   the Sbox chosen per curve variant.

mod builder;
mod constraint_system;
mod error;
mod fp2;
mod mimc;

pub use builder::{ConstraintSystemBuilder, Gate, GateKind, LinearCombination, Variable};
pub use constraint_system::{ConstraintSystem, Solution, Witness};
pub use error::{Error, Visibility};
pub use fp2::Fp2Var;
pub use mimc::Mimc;
