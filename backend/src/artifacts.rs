//! Curve-erased artifacts.
//!
//! Each enum wraps the per-variant type of one artifact. The variant is the
//! runtime curve selection; everything inside it is statically typed.
//!
//! Wire format: one curve tag byte, the payload length as a little-endian
//! `u64`, then the payload. Keys, circuits, reference strings and witnesses
//! are bincode-encoded; proofs use postcard.

use std::io::{Read, Write};

use bincode::Options;
use circuit::Witness as TypedWitness;
use curve::{BabyBear, CurveField, CurveId, Goldilocks, KoalaBear};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::constants::MAX_ARTIFACT_LEN;
use crate::errors::Error;
use crate::keys;
use crate::srs;
use crate::variants::{babybear, goldilocks, koalabear};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Codec {
    Bincode,
    Postcard,
}

impl Codec {
    fn encode<T: Serialize>(self, value: &T) -> Result<Vec<u8>, Error> {
        Ok(match self {
            Codec::Bincode => bincode::serialize(value)?,
            Codec::Postcard => postcard::to_allocvec(value)?,
        })
    }

    /// With `exact`, input left over after the value is an error.
    fn decode<T: DeserializeOwned>(self, bytes: &[u8], exact: bool) -> Result<T, Error> {
        match (self, exact) {
            (Codec::Bincode, true) => Ok(bincode::options()
                .with_fixint_encoding()
                .reject_trailing_bytes()
                .deserialize(bytes)?),
            (Codec::Bincode, false) => Ok(bincode::deserialize(bytes)?),
            (Codec::Postcard, true) => {
                let (value, rest) = postcard::take_from_bytes(bytes)?;
                if !rest.is_empty() {
                    return Err(Error::Corrupted(format!("{} trailing bytes", rest.len())));
                }
                Ok(value)
            }
            (Codec::Postcard, false) => Ok(postcard::from_bytes(bytes)?),
        }
    }
}

/// A typed artifact that can travel inside one of the curve-erased enums.
trait Artifact: Serialize + DeserializeOwned {
    const CODEC: Codec;

    /// Checks run by validated reads after decoding.
    fn validate(&self) -> Result<(), Error> {
        Ok(())
    }
}

impl<F: CurveField> Artifact for circuit::ConstraintSystem<F> {
    const CODEC: Codec = Codec::Bincode;

    fn validate(&self) -> Result<(), Error> {
        Ok(circuit::ConstraintSystem::validate(self)?)
    }
}

impl<F: CurveField> Artifact for TypedWitness<F> {
    const CODEC: Codec = Codec::Bincode;
}

impl<F: CurveField> Artifact for srs::ReferenceString<F> {
    const CODEC: Codec = Codec::Bincode;

    fn validate(&self) -> Result<(), Error> {
        self.fri().validate()
    }
}

impl<F: CurveField> Artifact for keys::ProvingKey<F> {
    const CODEC: Codec = Codec::Bincode;

    fn validate(&self) -> Result<(), Error> {
        keys::ProvingKey::validate(self)
    }
}

impl<F: CurveField> Artifact for keys::VerifyingKey<F> {
    const CODEC: Codec = Codec::Bincode;

    fn validate(&self) -> Result<(), Error> {
        keys::VerifyingKey::validate(self)
    }
}

impl Artifact for babybear::Proof {
    const CODEC: Codec = Codec::Postcard;
}

impl Artifact for koalabear::Proof {
    const CODEC: Codec = Codec::Postcard;
}

impl Artifact for goldilocks::Proof {
    const CODEC: Codec = Codec::Postcard;
}

fn write_artifact<W: Write, A: Artifact>(
    writer: &mut W,
    curve: CurveId,
    artifact: &A,
) -> Result<usize, Error> {
    let payload = A::CODEC.encode(artifact)?;
    writer.write_all(&[curve.tag()])?;
    writer.write_all(&(payload.len() as u64).to_le_bytes())?;
    writer.write_all(&payload)?;
    Ok(1 + 8 + payload.len())
}

/// Reads the tag and length header, returning the curve and payload length.
fn read_header<R: Read>(reader: &mut R) -> Result<(CurveId, u64), Error> {
    let mut tag = [0u8; 1];
    reader.read_exact(&mut tag)?;
    let curve = CurveId::try_from(tag[0])?;
    let mut len = [0u8; 8];
    reader.read_exact(&mut len)?;
    let len = u64::from_le_bytes(len);
    if len > MAX_ARTIFACT_LEN {
        return Err(Error::Corrupted(format!("payload length {len} too large")));
    }
    Ok((curve, len))
}

fn read_payload<R: Read>(reader: &mut R, len: u64) -> Result<Vec<u8>, Error> {
    let mut payload = Vec::new();
    reader.take(len).read_to_end(&mut payload)?;
    if payload.len() as u64 != len {
        return Err(Error::Corrupted(format!(
            "expected {len} payload bytes, got {}",
            payload.len()
        )));
    }
    Ok(payload)
}

fn read_artifact<R: Read, A: Artifact>(
    reader: &mut R,
    expected: CurveId,
    artifact: &mut A,
    checked: bool,
) -> Result<usize, Error> {
    let (found, len) = read_header(reader)?;
    if found != expected {
        return Err(Error::CurveMismatch { expected, found });
    }
    let payload = read_payload(reader, len)?;
    let decoded = A::CODEC.decode::<A>(&payload, checked)?;
    if checked {
        decoded.validate()?;
    }
    *artifact = decoded;
    Ok(1 + 8 + payload.len())
}

macro_rules! curve_artifact {
    ($(#[$doc:meta])* $name:ident, $babybear:ty, $koalabear:ty, $goldilocks:ty) => {
        $(#[$doc])*
        pub enum $name {
            BabyBear($babybear),
            KoalaBear($koalabear),
            Goldilocks($goldilocks),
        }

        impl $name {
            /// Empty artifact of the given variant, to be filled by
            /// [`Self::read_from`].
            pub fn new(curve: CurveId) -> Self {
                match curve {
                    CurveId::BabyBear => Self::BabyBear(Default::default()),
                    CurveId::KoalaBear => Self::KoalaBear(Default::default()),
                    CurveId::Goldilocks => Self::Goldilocks(Default::default()),
                }
            }

            pub fn curve(&self) -> CurveId {
                match self {
                    Self::BabyBear(_) => CurveId::BabyBear,
                    Self::KoalaBear(_) => CurveId::KoalaBear,
                    Self::Goldilocks(_) => CurveId::Goldilocks,
                }
            }

            /// Returns the number of bytes written.
            pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<usize, Error> {
                match self {
                    Self::BabyBear(a) => write_artifact(writer, CurveId::BabyBear, a),
                    Self::KoalaBear(a) => write_artifact(writer, CurveId::KoalaBear, a),
                    Self::Goldilocks(a) => write_artifact(writer, CurveId::Goldilocks, a),
                }
            }

            /// Decodes into `self`, whose variant must match the encoded tag,
            /// and validates the result. Returns the number of bytes read.
            pub fn read_from<R: Read>(&mut self, reader: &mut R) -> Result<usize, Error> {
                self.read(reader, true)
            }

            /// Like [`Self::read_from`] without validation or the trailing
            /// bytes check.
            pub fn read_from_unchecked<R: Read>(&mut self, reader: &mut R) -> Result<usize, Error> {
                self.read(reader, false)
            }

            fn read<R: Read>(&mut self, reader: &mut R, checked: bool) -> Result<usize, Error> {
                match self {
                    Self::BabyBear(a) => read_artifact(reader, CurveId::BabyBear, a, checked),
                    Self::KoalaBear(a) => read_artifact(reader, CurveId::KoalaBear, a, checked),
                    Self::Goldilocks(a) => read_artifact(reader, CurveId::Goldilocks, a, checked),
                }
            }
        }

        impl From<$babybear> for $name {
            fn from(a: $babybear) -> Self {
                Self::BabyBear(a)
            }
        }

        impl From<$koalabear> for $name {
            fn from(a: $koalabear) -> Self {
                Self::KoalaBear(a)
            }
        }

        impl From<$goldilocks> for $name {
            fn from(a: $goldilocks) -> Self {
                Self::Goldilocks(a)
            }
        }
    };
}

curve_artifact!(
    /// A compiled circuit over one of the registered fields.
    #[derive(Clone, Debug, PartialEq, Eq)]
    ConstraintSystem,
    circuit::ConstraintSystem<BabyBear>,
    circuit::ConstraintSystem<KoalaBear>,
    circuit::ConstraintSystem<Goldilocks>
);

curve_artifact!(
    #[derive(Clone, Debug, PartialEq, Eq)]
    Witness,
    TypedWitness<BabyBear>,
    TypedWitness<KoalaBear>,
    TypedWitness<Goldilocks>
);

curve_artifact!(
    /// Public setup parameters.
    #[derive(Clone, Debug, PartialEq, Eq)]
    ReferenceString,
    srs::ReferenceString<BabyBear>,
    srs::ReferenceString<KoalaBear>,
    srs::ReferenceString<Goldilocks>
);

curve_artifact!(
    #[derive(Clone, Debug, PartialEq, Eq)]
    ProvingKey,
    babybear::ProvingKey,
    koalabear::ProvingKey,
    goldilocks::ProvingKey
);

curve_artifact!(
    #[derive(Clone, Debug, PartialEq, Eq)]
    VerifyingKey,
    babybear::VerifyingKey,
    koalabear::VerifyingKey,
    goldilocks::VerifyingKey
);

curve_artifact!(
    Proof,
    babybear::Proof,
    koalabear::Proof,
    goldilocks::Proof
);

impl Witness {
    /// Drops the secret half, keeping the variant.
    pub fn public_only(&self) -> Self {
        match self {
            Self::BabyBear(w) => Self::BabyBear(w.public_only()),
            Self::KoalaBear(w) => Self::KoalaBear(w.public_only()),
            Self::Goldilocks(w) => Self::Goldilocks(w.public_only()),
        }
    }
}

impl ProvingKey {
    pub fn verifying_key(&self) -> VerifyingKey {
        match self {
            Self::BabyBear(pk) => VerifyingKey::BabyBear(pk.verifying_key().clone()),
            Self::KoalaBear(pk) => VerifyingKey::KoalaBear(pk.verifying_key().clone()),
            Self::Goldilocks(pk) => VerifyingKey::Goldilocks(pk.verifying_key().clone()),
        }
    }
}

impl VerifyingKey {
    pub fn nb_public_inputs(&self) -> usize {
        match self {
            Self::BabyBear(vk) => vk.nb_public_inputs(),
            Self::KoalaBear(vk) => vk.nb_public_inputs(),
            Self::Goldilocks(vk) => vk.nb_public_inputs(),
        }
    }

    pub fn export_verifier<W: Write>(&self, writer: &mut W) -> Result<(), Error> {
        match self {
            Self::BabyBear(vk) => vk.export_verifier(writer),
            Self::KoalaBear(vk) => vk.export_verifier(writer),
            Self::Goldilocks(vk) => vk.export_verifier(writer),
        }
    }
}

impl ReferenceString {
    pub fn with_params(curve: CurveId, fri: srs::FriParams) -> Self {
        match curve {
            CurveId::BabyBear => Self::BabyBear(srs::ReferenceString::new(fri)),
            CurveId::KoalaBear => Self::KoalaBear(srs::ReferenceString::new(fri)),
            CurveId::Goldilocks => Self::Goldilocks(srs::ReferenceString::new(fri)),
        }
    }
}
