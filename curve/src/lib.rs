//! Curve variants and native field arithmetic.
//!
//! This crate names the closed set of fields the backend can prove over
//! ([`CurveId`]), binds each to its Plonky3 field type ([`CurveField`]), and
//! provides the native quadratic extension used to compute and check
//! witnesses for the extension-field gadget.

mod curve_id;
mod error;
mod extension;
mod random;

pub use curve_id::{CurveField, CurveId, Sbox};
pub use error::Error;
pub use extension::{Extension, Fp2};
pub use p3_baby_bear::BabyBear;
pub use p3_goldilocks::Goldilocks;
pub use p3_koala_bear::KoalaBear;
pub use random::RandomField;
