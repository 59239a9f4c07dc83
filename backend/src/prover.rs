//! Witness solving and trace generation.

use circuit::{ConstraintSystem, Witness};
use curve::CurveField;
use p3_matrix::dense::RowMajorMatrix;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{DEFAULT_LOG_TRACE_HEIGHT, MAX_LOG_TRACE_HEIGHT};
use crate::errors::Error;
use crate::keys::ProvingKey;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProverOptions {
    /// The trace has `2^log_trace_height` rows.
    pub log_trace_height: usize,
}

impl Default for ProverOptions {
    fn default() -> Self {
        Self {
            log_trace_height: DEFAULT_LOG_TRACE_HEIGHT,
        }
    }
}

impl ProverOptions {
    pub fn validate(&self) -> Result<(), Error> {
        if !(1..=MAX_LOG_TRACE_HEIGHT).contains(&self.log_trace_height) {
            return Err(Error::InvalidProverOptions(format!(
                "log_trace_height {} outside 1..={MAX_LOG_TRACE_HEIGHT}",
                self.log_trace_height
            )));
        }
        Ok(())
    }
}

/// Solves `witness` against `cs` and lays the assignment out as a trace.
///
/// Every row holds the full assignment, so each column is a constant
/// polynomial and the openings in the proof reveal the secret inputs.
/// Returns the trace together with the public values the proof is bound to.
pub(crate) fn generate_trace<F: CurveField>(
    cs: &ConstraintSystem<F>,
    pk: &ProvingKey<F>,
    witness: &Witness<F>,
    options: &ProverOptions,
) -> Result<(RowMajorMatrix<F>, Vec<F>), Error> {
    options.validate()?;
    if cs != pk.verifying_key().constraint_system() {
        return Err(Error::CircuitMismatch);
    }

    let solution = cs.solve(witness)?;
    cs.check(&solution)?;

    let height = 1usize << options.log_trace_height;
    let trace = RowMajorMatrix::new(solution.values().repeat(height), cs.num_variables());
    debug!(
        curve = %F::CURVE,
        width = cs.num_variables(),
        height,
        "generated trace"
    );
    Ok((trace, cs.public_values(&solution)))
}
