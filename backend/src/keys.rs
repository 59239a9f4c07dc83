//! Proving and verifying keys.
//!
//! Keys are generic over the circuit's field. A [`ProvingKey<F>`] owns its
//! [`VerifyingKey<F>`], so the pairing is checked by the type system rather
//! than at runtime.

use std::io::Write;

use circuit::{ConstraintSystem, GateKind};
use curve::{CurveField, CurveId};
use p3_keccak::Keccak256Hash;
use p3_symmetric::CryptographicHasher;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::Error;
use crate::srs::{FriParams, ReferenceString};

/// Public verification data for one circuit.
///
/// Holds the compiled circuit, the FRI parameters fixed at setup, and a
/// Keccak-256 digest of the circuit that seeds the Fiat-Shamir transcript.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyingKey<F> {
    cs: ConstraintSystem<F>,
    fri: FriParams,
    digest: [u8; 32],
}

/// Secret-side key. The backend has no trapdoor, so this is the verifying
/// key plus the guarantee that it came out of [`setup`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvingKey<F> {
    vk: VerifyingKey<F>,
}

impl<F: CurveField> Default for VerifyingKey<F> {
    fn default() -> Self {
        Self {
            cs: ConstraintSystem::default(),
            fri: FriParams::default(),
            digest: [0; 32],
        }
    }
}

impl<F: CurveField> Default for ProvingKey<F> {
    fn default() -> Self {
        Self {
            vk: VerifyingKey::default(),
        }
    }
}

/// Keccak-256 of the bincode encoding of `cs`.
pub(crate) fn circuit_digest<F: CurveField>(cs: &ConstraintSystem<F>) -> Result<[u8; 32], Error> {
    let bytes = bincode::serialize(cs)?;
    Ok(Keccak256Hash {}.hash_slice(&bytes))
}

/// Derives the key pair for `cs` under the parameters in `srs`.
pub fn setup<F: CurveField>(
    cs: &ConstraintSystem<F>,
    srs: &ReferenceString<F>,
) -> Result<(ProvingKey<F>, VerifyingKey<F>), Error> {
    if cs.is_empty() {
        return Err(Error::EmptyConstraintSystem);
    }
    cs.validate()?;
    srs.fri().validate()?;

    let vk = VerifyingKey {
        cs: cs.clone(),
        fri: *srs.fri(),
        digest: circuit_digest(cs)?,
    };
    debug!(
        curve = %F::CURVE,
        variables = cs.num_variables(),
        gates = cs.gates().len(),
        "derived circuit keys"
    );
    Ok((ProvingKey { vk: vk.clone() }, vk))
}

impl<F: CurveField> ProvingKey<F> {
    pub fn verifying_key(&self) -> &VerifyingKey<F> {
        &self.vk
    }

    pub fn curve(&self) -> CurveId {
        F::CURVE
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        self.vk.validate()
    }
}

impl<F: CurveField> VerifyingKey<F> {
    pub fn curve(&self) -> CurveId {
        F::CURVE
    }

    pub fn constraint_system(&self) -> &ConstraintSystem<F> {
        &self.cs
    }

    pub fn fri(&self) -> &FriParams {
        &self.fri
    }

    pub fn digest(&self) -> &[u8; 32] {
        &self.digest
    }

    pub fn nb_public_inputs(&self) -> usize {
        self.cs.num_public_inputs()
    }

    /// Checks a decoded key: the circuit is well formed, the FRI parameters
    /// are usable and the digest matches the circuit.
    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.cs.is_empty() {
            return Err(Error::EmptyConstraintSystem);
        }
        self.cs.validate()?;
        self.fri.validate()?;
        if circuit_digest(&self.cs)? != self.digest {
            return Err(Error::Corrupted(
                "verifying key digest does not match its circuit".to_string(),
            ));
        }
        Ok(())
    }

    /// Writes a plain-text description of everything a verifier needs to pin:
    /// curve, circuit digest, FRI parameters and circuit shape.
    pub fn export_verifier<W: Write>(&self, writer: &mut W) -> Result<(), Error> {
        let digest: String = self.digest.iter().map(|b| format!("{b:02x}")).collect();
        writeln!(writer, "curve: {}", F::CURVE)?;
        writeln!(writer, "modulus: {}", F::CURVE.modulus())?;
        writeln!(writer, "challenge_degree: {}", F::CURVE.challenge_degree())?;
        writeln!(writer, "circuit_digest: {digest}")?;
        writeln!(writer, "fri.log_blowup: {}", self.fri.log_blowup)?;
        writeln!(writer, "fri.log_final_poly_len: {}", self.fri.log_final_poly_len)?;
        writeln!(writer, "fri.num_queries: {}", self.fri.num_queries)?;
        writeln!(writer, "fri.proof_of_work_bits: {}", self.fri.proof_of_work_bits)?;
        writeln!(writer, "public_inputs: {}", self.nb_public_inputs())?;
        writeln!(writer, "variables: {}", self.cs.num_variables())?;
        for (name, kind) in [
            ("linear", GateKind::Linear),
            ("mul", GateKind::Mul),
            ("inverse", GateKind::Inverse),
            ("inverse_or_zero", GateKind::InverseOrZero),
            ("assert_zero", GateKind::AssertZero),
        ] {
            writeln!(writer, "gates.{name}: {}", self.cs.gate_count(kind))?;
        }
        Ok(())
    }
}
