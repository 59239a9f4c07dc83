//! Curve-generic proving backend.
//!
//! Circuits built with the `circuit` crate are proven with a FRI-based STARK
//! over one of the fields in [`CurveId::ALL`]. Callers that know the field at
//! compile time use a per-variant module ([`babybear`], [`koalabear`],
//! [`goldilocks`]) directly. Callers that pick the variant at runtime go
//! through the enums in this crate root and [`setup`], [`prove`] and
//! [`verify`], which dispatch with an exhaustive `match`.
//!
//! # Example
//!
//! ```
//! use backend::{ProverOptions, ReferenceString, prove, setup, verify};
//! use circuit::{ConstraintSystemBuilder, Witness};
//! use curve::{CurveId, KoalaBear};
//! use p3_field::PrimeCharacteristicRing;
//!
//! // x * y == z, z public
//! let mut builder = ConstraintSystemBuilder::<KoalaBear>::new();
//! let z = builder.public_input();
//! let x = builder.secret_input();
//! let y = builder.secret_input();
//! let xy = builder.mul(x, y);
//! builder.assert_equal(xy, z);
//! let cs = builder.build().into();
//!
//! let witness: backend::Witness = Witness::new(
//!     vec![KoalaBear::from_u32(42)],
//!     vec![KoalaBear::from_u32(6), KoalaBear::from_u32(7)],
//! )
//! .into();
//!
//! let srs = ReferenceString::new(CurveId::KoalaBear);
//! let (pk, vk) = setup(&cs, &srs).expect("setup");
//! let proof = prove(&cs, &pk, &witness, &ProverOptions::default()).expect("prove");
//! verify(&proof, &vk, &witness.public_only()).expect("verify");
//! ```
//!
//! # Privacy
//!
//! Proofs are sound but not hiding. The trace commits to the solved
//! assignment without masking, so a proof discloses the secret inputs it was
//! generated from. Do not hand proofs to parties that must not learn them.
//!
//! # Errors
//!
//! Artifacts of different variants never mix: a key and a proof over
//! different fields give [`Error::CurveMismatch`], a public witness over the
//! wrong field or of the wrong length gives [`Error::InvalidWitness`], and a
//! proof the STARK verifier rejects gives [`Error::Verification`].

mod air;
mod artifacts;
mod constants;
mod errors;
mod keys;
mod logging;
mod prover;
mod srs;
mod variants;

#[cfg(test)]
mod tests;

pub use air::CircuitAir;
pub use artifacts::{ConstraintSystem, Proof, ProvingKey, ReferenceString, VerifyingKey, Witness};
pub use constants::{
    DEFAULT_LOG_BLOWUP, DEFAULT_LOG_FINAL_POLY_LEN, DEFAULT_LOG_TRACE_HEIGHT, DEFAULT_NUM_QUERIES,
    DEFAULT_PROOF_OF_WORK_BITS,
};
pub use curve::CurveId;
pub use errors::{Error, InvalidWitness};
pub use logging::init_tracing;
pub use prover::ProverOptions;
pub use srs::FriParams;
pub use variants::{babybear, goldilocks, koalabear};

/// Derives the key pair for `cs`. `srs` must be over the same variant.
pub fn setup(cs: &ConstraintSystem, srs: &ReferenceString) -> Result<(ProvingKey, VerifyingKey), Error> {
    match (cs, srs) {
        (ConstraintSystem::BabyBear(cs), ReferenceString::BabyBear(srs)) => {
            let (pk, vk) = babybear::setup(cs, srs)?;
            Ok((pk.into(), vk.into()))
        }
        (ConstraintSystem::KoalaBear(cs), ReferenceString::KoalaBear(srs)) => {
            let (pk, vk) = koalabear::setup(cs, srs)?;
            Ok((pk.into(), vk.into()))
        }
        (ConstraintSystem::Goldilocks(cs), ReferenceString::Goldilocks(srs)) => {
            let (pk, vk) = goldilocks::setup(cs, srs)?;
            Ok((pk.into(), vk.into()))
        }
        (cs, srs) => Err(Error::CurveMismatch {
            expected: cs.curve(),
            found: srs.curve(),
        }),
    }
}

/// Proves that `witness` satisfies `cs`.
///
/// `cs` must be the circuit `pk` was derived from. An unsatisfying witness is
/// reported as [`Error::Solver`] before any proving work is done.
///
/// The returned proof is not hiding: it reveals the secret part of `witness`.
pub fn prove(
    cs: &ConstraintSystem,
    pk: &ProvingKey,
    witness: &Witness,
    options: &ProverOptions,
) -> Result<Proof, Error> {
    match (cs, pk, witness) {
        (ConstraintSystem::BabyBear(cs), ProvingKey::BabyBear(pk), Witness::BabyBear(w)) => {
            Ok(babybear::prove(cs, pk, w, options)?.into())
        }
        (ConstraintSystem::KoalaBear(cs), ProvingKey::KoalaBear(pk), Witness::KoalaBear(w)) => {
            Ok(koalabear::prove(cs, pk, w, options)?.into())
        }
        (ConstraintSystem::Goldilocks(cs), ProvingKey::Goldilocks(pk), Witness::Goldilocks(w)) => {
            Ok(goldilocks::prove(cs, pk, w, options)?.into())
        }
        (cs, pk, _) if cs.curve() != pk.curve() => Err(Error::CurveMismatch {
            expected: pk.curve(),
            found: cs.curve(),
        }),
        (_, pk, witness) => Err(InvalidWitness::Curve {
            expected: pk.curve(),
            found: witness.curve(),
        }
        .into()),
    }
}

/// Verifies `proof` against `vk` and the public values in `public_witness`.
pub fn verify(proof: &Proof, vk: &VerifyingKey, public_witness: &Witness) -> Result<(), Error> {
    if proof.curve() != vk.curve() {
        return Err(Error::CurveMismatch {
            expected: vk.curve(),
            found: proof.curve(),
        });
    }
    match (proof, vk, public_witness) {
        (Proof::BabyBear(proof), VerifyingKey::BabyBear(vk), Witness::BabyBear(w)) => {
            babybear::verify(proof, vk, w)
        }
        (Proof::KoalaBear(proof), VerifyingKey::KoalaBear(vk), Witness::KoalaBear(w)) => {
            koalabear::verify(proof, vk, w)
        }
        (Proof::Goldilocks(proof), VerifyingKey::Goldilocks(vk), Witness::Goldilocks(w)) => {
            goldilocks::verify(proof, vk, w)
        }
        (_, vk, witness) => Err(InvalidWitness::Curve {
            expected: vk.curve(),
            found: witness.curve(),
        }
        .into()),
    }
}
