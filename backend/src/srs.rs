//! Public setup parameters.
//!
//! The FRI-based backend needs no trusted setup; the reference string is the
//! set of FRI parameters every party must agree on, typed to the field.

use core::marker::PhantomData;

use curve::{CurveField, CurveId};
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_LOG_BLOWUP, DEFAULT_LOG_FINAL_POLY_LEN, DEFAULT_NUM_QUERIES,
    DEFAULT_PROOF_OF_WORK_BITS, MAX_LOG_BLOWUP, MAX_PROOF_OF_WORK_BITS, MIN_LOG_BLOWUP,
};
use crate::errors::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FriParams {
    pub log_blowup: usize,
    pub log_final_poly_len: usize,
    pub num_queries: usize,
    pub proof_of_work_bits: usize,
}

impl Default for FriParams {
    fn default() -> Self {
        Self {
            log_blowup: DEFAULT_LOG_BLOWUP,
            log_final_poly_len: DEFAULT_LOG_FINAL_POLY_LEN,
            num_queries: DEFAULT_NUM_QUERIES,
            proof_of_work_bits: DEFAULT_PROOF_OF_WORK_BITS,
        }
    }
}

impl FriParams {
    pub fn validate(&self) -> Result<(), Error> {
        if !(MIN_LOG_BLOWUP..=MAX_LOG_BLOWUP).contains(&self.log_blowup) {
            return Err(Error::InvalidReferenceString(format!(
                "log_blowup {} outside {MIN_LOG_BLOWUP}..={MAX_LOG_BLOWUP}",
                self.log_blowup
            )));
        }
        if self.num_queries == 0 {
            return Err(Error::InvalidReferenceString(
                "num_queries must be positive".to_string(),
            ));
        }
        if self.proof_of_work_bits > MAX_PROOF_OF_WORK_BITS {
            return Err(Error::InvalidReferenceString(format!(
                "proof_of_work_bits {} exceeds {MAX_PROOF_OF_WORK_BITS}",
                self.proof_of_work_bits
            )));
        }
        Ok(())
    }
}

/// FRI parameters bound to the field `F`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct ReferenceString<F> {
    fri: FriParams,
    #[serde(skip)]
    _field: PhantomData<F>,
}

impl<F> Default for ReferenceString<F> {
    fn default() -> Self {
        Self::new(FriParams::default())
    }
}

impl<F> ReferenceString<F> {
    pub const fn new(fri: FriParams) -> Self {
        Self {
            fri,
            _field: PhantomData,
        }
    }

    pub fn fri(&self) -> &FriParams {
        &self.fri
    }
}

impl<F: CurveField> ReferenceString<F> {
    pub fn curve(&self) -> CurveId {
        F::CURVE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_are_valid() {
        FriParams::default().validate().unwrap();
    }

    #[test]
    fn test_rejects_bad_params() {
        let bad = [
            FriParams {
                log_blowup: 0,
                ..FriParams::default()
            },
            FriParams {
                num_queries: 0,
                ..FriParams::default()
            },
            FriParams {
                proof_of_work_bits: 64,
                ..FriParams::default()
            },
        ];
        for params in bad {
            assert!(matches!(
                params.validate(),
                Err(Error::InvalidReferenceString(_))
            ));
        }
    }
}
