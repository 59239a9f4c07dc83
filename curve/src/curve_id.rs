//! Registry of the curve variants the toolkit can prove over.
//!
//! The set is closed: every dispatch site matches on [`CurveId`] exhaustively,
//! so adding a variant here is a compile error everywhere it is not wired in.

use core::fmt::{self, Display, Formatter};
use core::str::FromStr;

use num_bigint::BigUint;
use p3_baby_bear::BabyBear;
use p3_field::{Field, PrimeField64, TwoAdicField};
use p3_goldilocks::Goldilocks;
use p3_koala_bear::KoalaBear;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Identifier of a supported curve variant.
///
/// Each variant binds one prime field, the native field of circuits built for
/// it, and the challenge extension the STARK prover samples from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum CurveId {
    /// p = 15 * 2^27 + 1
    BabyBear = 1,
    /// p = 2^31 - 2^24 + 1
    KoalaBear = 2,
    /// p = 2^64 - 2^32 + 1
    Goldilocks = 3,
}

/// Nonlinear layer of the MiMC round function for a given field.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sbox {
    /// `x ↦ x^5`, a permutation when `gcd(5, p - 1) = 1`.
    Pow5,
    /// `x ↦ x^{-1}` with `0 ↦ 0`.
    Inverse,
}

impl CurveId {
    /// Every registered variant, in tag order.
    pub const ALL: [CurveId; 3] = [CurveId::BabyBear, CurveId::KoalaBear, CurveId::Goldilocks];

    pub const fn name(self) -> &'static str {
        match self {
            CurveId::BabyBear => "babybear",
            CurveId::KoalaBear => "koalabear",
            CurveId::Goldilocks => "goldilocks",
        }
    }

    /// One-byte tag used in serialized artifacts.
    pub const fn tag(self) -> u8 {
        self as u8
    }

    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(CurveId::BabyBear),
            2 => Some(CurveId::KoalaBear),
            3 => Some(CurveId::Goldilocks),
            _ => None,
        }
    }

    /// Order of the variant's prime field.
    pub fn modulus(self) -> BigUint {
        match self {
            CurveId::BabyBear => BabyBear::order(),
            CurveId::KoalaBear => KoalaBear::order(),
            CurveId::Goldilocks => Goldilocks::order(),
        }
    }

    /// Bit length of the modulus.
    pub fn bits(self) -> usize {
        self.modulus().bits() as usize
    }

    /// Degree of the extension the prover draws Fiat-Shamir challenges from.
    pub const fn challenge_degree(self) -> usize {
        match self {
            CurveId::BabyBear | CurveId::KoalaBear => 4,
            CurveId::Goldilocks => 2,
        }
    }

    /// MiMC Sbox for this field. `x^5` is only a permutation when 5 does not
    /// divide `p - 1`; BabyBear and Goldilocks fall back to inversion.
    pub const fn sbox(self) -> Sbox {
        match self {
            CurveId::KoalaBear => Sbox::Pow5,
            CurveId::BabyBear | CurveId::Goldilocks => Sbox::Inverse,
        }
    }

    /// Number of MiMC rounds for this field.
    ///
    /// With `x^5` this is the smallest `r` such that `5^r >= p`. The inverse
    /// Sbox has no useful algebraic degree, so one round per modulus bit is used.
    pub fn mimc_rounds(self) -> usize {
        match self.sbox() {
            Sbox::Pow5 => {
                let p = self.modulus();
                let mut power = BigUint::from(1u32);
                let mut rounds = 0;
                while power < p {
                    power *= 5u32;
                    rounds += 1;
                }
                rounds
            }
            Sbox::Inverse => self.bits(),
        }
    }
}

impl Display for CurveId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CurveId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "babybear" | "baby-bear" | "bb" => Ok(CurveId::BabyBear),
            "koalabear" | "koala-bear" | "kb" => Ok(CurveId::KoalaBear),
            "goldilocks" | "gl" => Ok(CurveId::Goldilocks),
            _ => Err(Error::UnknownCurveName(s.to_string())),
        }
    }
}

impl TryFrom<u8> for CurveId {
    type Error = Error;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        Self::from_tag(tag).ok_or(Error::UnknownCurve(tag))
    }
}

/// Native field of a curve variant.
///
/// Ties a concrete field type to its [`CurveId`] at compile time, so that
/// code generic over the field never has to look the variant up at runtime.
pub trait CurveField:
    PrimeField64 + TwoAdicField + Serialize + DeserializeOwned + Send + Sync
{
    const CURVE: CurveId;
}

impl CurveField for BabyBear {
    const CURVE: CurveId = CurveId::BabyBear;
}

impl CurveField for KoalaBear {
    const CURVE: CurveId = CurveId::KoalaBear;
}

impl CurveField for Goldilocks {
    const CURVE: CurveId = CurveId::Goldilocks;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_order<F: CurveField>() -> BigUint {
        F::order()
    }

    #[test]
    fn test_tags_round_trip() {
        for curve in CurveId::ALL {
            assert_eq!(CurveId::try_from(curve.tag()).unwrap(), curve);
        }
        assert_eq!(CurveId::try_from(0), Err(Error::UnknownCurve(0)));
        assert_eq!(CurveId::try_from(42), Err(Error::UnknownCurve(42)));
    }

    #[test]
    fn test_parse_names() {
        for curve in CurveId::ALL {
            assert_eq!(curve.to_string().parse::<CurveId>().unwrap(), curve);
        }
        assert_eq!("KB".parse::<CurveId>().unwrap(), CurveId::KoalaBear);
        assert_eq!("baby-bear".parse::<CurveId>().unwrap(), CurveId::BabyBear);
        assert!(matches!(
            "bn254".parse::<CurveId>(),
            Err(Error::UnknownCurveName(name)) if name == "bn254"
        ));
    }

    #[test]
    fn test_field_binding_matches_registry() {
        assert_eq!(field_order::<BabyBear>(), CurveId::BabyBear.modulus());
        assert_eq!(field_order::<KoalaBear>(), CurveId::KoalaBear.modulus());
        assert_eq!(field_order::<Goldilocks>(), CurveId::Goldilocks.modulus());
        assert_eq!(<KoalaBear as CurveField>::CURVE, CurveId::KoalaBear);
    }

    #[test]
    fn test_sbox_policy_follows_modulus() {
        for curve in CurveId::ALL {
            let p_minus_one = curve.modulus() - 1u32;
            let five_divides = (&p_minus_one % 5u32) == BigUint::from(0u32);
            let expected = if five_divides { Sbox::Inverse } else { Sbox::Pow5 };
            assert_eq!(curve.sbox(), expected, "{curve}");
        }
    }

    #[test]
    fn test_mimc_rounds() {
        assert_eq!(CurveId::KoalaBear.mimc_rounds(), 14);
        assert_eq!(CurveId::BabyBear.mimc_rounds(), 31);
        assert_eq!(CurveId::Goldilocks.mimc_rounds(), 64);
    }
}
