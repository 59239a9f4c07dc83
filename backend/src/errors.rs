//! Error types for setup, proving, verification and artifact I/O.

use curve::CurveId;

/// Why a witness was refused before any cryptography ran.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidWitness {
    #[error("witness is over {found}, key is over {expected}")]
    Curve { expected: CurveId, found: CurveId },
    #[error("expected {expected} public values, got {found}")]
    Length { expected: usize, found: usize },
}

/// Errors that can occur while setting up, proving or verifying.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Two artifacts passed to the same call belong to different curve
    /// variants, or a serialized artifact carries another variant's tag.
    #[error("curve mismatch: expected {expected}, found {found}")]
    CurveMismatch { expected: CurveId, found: CurveId },
    #[error("constraint system does not match the proving key")]
    CircuitMismatch,
    #[error("invalid witness: {0}")]
    InvalidWitness(#[from] InvalidWitness),
    /// The proof was rejected by the STARK verifier.
    #[error("proof verification failed: {0}")]
    Verification(String),
    #[error(transparent)]
    Solver(#[from] circuit::Error),
    #[error("constraint system has no variables")]
    EmptyConstraintSystem,
    #[error("proof artifact holds no proof")]
    MissingProof,
    #[error("invalid reference string: {0}")]
    InvalidReferenceString(String),
    #[error("invalid prover options: {0}")]
    InvalidProverOptions(String),
    #[error("corrupted artifact: {0}")]
    Corrupted(String),
    #[error(transparent)]
    Curve(#[from] curve::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Bincode(#[from] bincode::Error),
    #[error(transparent)]
    Postcard(#[from] postcard::Error),
}
