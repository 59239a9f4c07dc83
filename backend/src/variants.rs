//! Monomorphic backends, one module per curve variant.
//!
//! Each module fixes the value field, the challenge extension and the full
//! STARK configuration: Keccak-based Merkle commitments, a two-adic FRI PCS
//! and a hash challenger seeded with the circuit digest.

macro_rules! stark_variant {
    (
        $(#[$doc:meta])*
        $module:ident,
        field = $field:ty,
        challenge_degree = $degree:literal,
        challenger = $challenger:ident $(,)?
    ) => {
        $(#[$doc])*
        pub mod $module {
            use p3_challenger::{$challenger, HashChallenger};
            use p3_commit::ExtensionMmcs;
            use p3_dft::Radix2DitParallel;
            use p3_field::extension::BinomialExtensionField;
            use p3_fri::{FriParameters, TwoAdicFriPcs};
            use p3_keccak::{Keccak256Hash, KeccakF};
            use p3_merkle_tree::MerkleTreeMmcs;
            use p3_symmetric::{CompressionFunctionFromHasher, PaddingFreeSponge, SerializingHasher};
            use p3_uni_stark::{prove_with_preprocessed, verify_with_preprocessed, StarkConfig};
            use serde::{Deserialize, Serialize};
            use tracing::{debug, instrument};

            use crate::air::CircuitAir;
            use crate::errors::{Error, InvalidWitness};
            use crate::prover::{generate_trace, ProverOptions};

            pub type Val = $field;
            pub type Challenge = BinomialExtensionField<Val, $degree>;

            type ByteHash = Keccak256Hash;
            type U64Hash = PaddingFreeSponge<KeccakF, 25, 17, 4>;
            type FieldHash = SerializingHasher<U64Hash>;
            type MyCompress = CompressionFunctionFromHasher<U64Hash, 2, 4>;
            type ValMmcs = MerkleTreeMmcs<
                [Val; p3_keccak::VECTOR_LEN],
                [u64; p3_keccak::VECTOR_LEN],
                FieldHash,
                MyCompress,
                4,
            >;
            type ChallengeMmcs = ExtensionMmcs<Val, Challenge, ValMmcs>;
            type Challenger = $challenger<Val, HashChallenger<u8, ByteHash, 32>>;
            type Dft = Radix2DitParallel<Val>;
            type Pcs = TwoAdicFriPcs<Val, Dft, ValMmcs, ChallengeMmcs>;

            pub type Config = StarkConfig<Pcs, Challenge, Challenger>;
            pub type ConstraintSystem = circuit::ConstraintSystem<Val>;
            pub type Witness = circuit::Witness<Val>;
            pub type ProvingKey = crate::keys::ProvingKey<Val>;
            pub type VerifyingKey = crate::keys::VerifyingKey<Val>;
            pub type ReferenceString = crate::srs::ReferenceString<Val>;

            /// STARK proof for a circuit over this variant's field.
            ///
            /// The default value holds no proof and is only useful as a target
            /// for deserialization.
            #[derive(Default, Serialize, Deserialize)]
            pub struct Proof {
                inner: Option<p3_uni_stark::Proof<Config>>,
            }

            impl Proof {
                pub fn is_empty(&self) -> bool {
                    self.inner.is_none()
                }
            }

            fn config(vk: &VerifyingKey) -> Config {
                let byte_hash = ByteHash {};
                let u64_hash = U64Hash::new(KeccakF {});
                let field_hash = FieldHash::new(u64_hash);
                let compress = MyCompress::new(u64_hash);
                let val_mmcs = ValMmcs::new(field_hash, compress);
                let challenge_mmcs = ChallengeMmcs::new(val_mmcs.clone());
                let challenger = Challenger::from_hasher(vk.digest().to_vec(), byte_hash);

                let fri = vk.fri();
                let fri_params = FriParameters {
                    log_blowup: fri.log_blowup,
                    log_final_poly_len: fri.log_final_poly_len,
                    num_queries: fri.num_queries,
                    commit_proof_of_work_bits: fri.proof_of_work_bits,
                    query_proof_of_work_bits: fri.proof_of_work_bits,
                    mmcs: challenge_mmcs,
                };
                let pcs = Pcs::new(Dft::default(), val_mmcs, fri_params);
                Config::new(pcs, challenger)
            }

            #[instrument(skip_all, fields(variables = cs.num_variables()))]
            pub fn setup(
                cs: &ConstraintSystem,
                srs: &ReferenceString,
            ) -> Result<(ProvingKey, VerifyingKey), Error> {
                crate::keys::setup(cs, srs)
            }

            /// Proves `witness` against `cs`. The proof is not hiding.
            #[instrument(skip_all, fields(variables = cs.num_variables()))]
            pub fn prove(
                cs: &ConstraintSystem,
                pk: &ProvingKey,
                witness: &Witness,
                options: &ProverOptions,
            ) -> Result<Proof, Error> {
                let (trace, public_values) = generate_trace(cs, pk, witness, options)?;
                let vk = pk.verifying_key();
                let config = config(vk);
                let air = CircuitAir::new(vk.constraint_system());

                let proof = prove_with_preprocessed(&config, &air, trace, &public_values, None);
                debug!(public_values = public_values.len(), "proof generated");
                Ok(Proof { inner: Some(proof) })
            }

            /// Checks `proof` against `vk` and the public part of `public`.
            /// Secret values in `public` are ignored.
            #[instrument(skip_all, fields(public_values = public.public.len()))]
            pub fn verify(proof: &Proof, vk: &VerifyingKey, public: &Witness) -> Result<(), Error> {
                let inner = proof.inner.as_ref().ok_or(Error::MissingProof)?;
                if public.public.len() != vk.nb_public_inputs() {
                    return Err(InvalidWitness::Length {
                        expected: vk.nb_public_inputs(),
                        found: public.public.len(),
                    }
                    .into());
                }

                let config = config(vk);
                let air = CircuitAir::new(vk.constraint_system());
                verify_with_preprocessed(&config, &air, inner, &public.public, None)
                    .map_err(|e| Error::Verification(format!("{e:?}")))
            }
        }
    };
}

stark_variant!(
    /// Backend over BabyBear with a quartic challenge extension.
    babybear,
    field = p3_baby_bear::BabyBear,
    challenge_degree = 4,
    challenger = SerializingChallenger32,
);

stark_variant!(
    /// Backend over KoalaBear with a quartic challenge extension.
    koalabear,
    field = p3_koala_bear::KoalaBear,
    challenge_degree = 4,
    challenger = SerializingChallenger32,
);

stark_variant!(
    /// Backend over Goldilocks with a quadratic challenge extension.
    goldilocks,
    field = p3_goldilocks::Goldilocks,
    challenge_degree = 2,
    challenger = SerializingChallenger64,
);

#[cfg(test)]
mod tests {
    use curve::{CurveField, CurveId};

    use super::*;

    #[test]
    fn test_challenge_degree_matches_registry() {
        use p3_field::BasedVectorSpace;

        assert_eq!(
            <babybear::Challenge as BasedVectorSpace<babybear::Val>>::DIMENSION,
            CurveId::BabyBear.challenge_degree()
        );
        assert_eq!(
            <koalabear::Challenge as BasedVectorSpace<koalabear::Val>>::DIMENSION,
            CurveId::KoalaBear.challenge_degree()
        );
        assert_eq!(
            <goldilocks::Challenge as BasedVectorSpace<goldilocks::Val>>::DIMENSION,
            CurveId::Goldilocks.challenge_degree()
        );
        assert_eq!(<goldilocks::Val as CurveField>::CURVE, CurveId::Goldilocks);
    }
}
