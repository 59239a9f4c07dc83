//! Error types for the curve registry.

/// Errors raised when a curve variant is not known statically.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A serialized artifact carried a tag outside the registry.
    #[error("unknown curve tag {0}")]
    UnknownCurve(u8),
    #[error("unknown curve name {0:?}")]
    UnknownCurveName(String),
}
