//! Default proving parameters.

/// Rate of the Reed-Solomon code used by FRI, as `log2(1 / rate)`.
///
/// Gates are at most cubic, so the quotient needs a blowup of at least 2.
pub const DEFAULT_LOG_BLOWUP: usize = 3;

/// Number of FRI query rounds.
pub const DEFAULT_NUM_QUERIES: usize = 28;

/// Grinding bits for both the commit and query phases of FRI.
pub const DEFAULT_PROOF_OF_WORK_BITS: usize = 8;

/// Final FRI polynomial length, as a power of two.
pub const DEFAULT_LOG_FINAL_POLY_LEN: usize = 0;

/// The solved assignment is repeated on `2^DEFAULT_LOG_TRACE_HEIGHT` rows.
pub const DEFAULT_LOG_TRACE_HEIGHT: usize = 3;

pub(crate) const MIN_LOG_BLOWUP: usize = 1;
pub(crate) const MAX_LOG_BLOWUP: usize = 8;
pub(crate) const MAX_PROOF_OF_WORK_BITS: usize = 30;
pub(crate) const MAX_LOG_TRACE_HEIGHT: usize = 20;

/// Upper bound on a single serialized artifact payload.
pub(crate) const MAX_ARTIFACT_LEN: u64 = 1 << 32;
