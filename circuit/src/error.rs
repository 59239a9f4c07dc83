//! Errors reported while solving or loading a constraint system.

use core::fmt::{self, Display, Formatter};

use crate::builder::GateKind;

/// Which half of the witness an input belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Secret,
}

impl Display for Visibility {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => f.write_str("public"),
            Visibility::Secret => f.write_str("secret"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("expected {expected} {visibility} inputs, got {found}")]
    WitnessLength {
        visibility: Visibility,
        expected: usize,
        found: usize,
    },
    /// Gate `gate` (in evaluation order) has no satisfying assignment for the
    /// given witness, e.g. an inversion of zero or a failed assertion.
    #[error("gate {gate} ({kind:?}) is not satisfied")]
    Unsatisfied { gate: usize, kind: GateKind },
    #[error("malformed constraint system: {0}")]
    Malformed(String),
}
