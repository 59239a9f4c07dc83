use super::*;
use circuit::{ConstraintSystemBuilder, Fp2Var, GateKind, Mimc};
use curve::{BabyBear, CurveField, Extension, Fp2, Goldilocks, KoalaBear, RandomField};
use p3_field::PrimeCharacteristicRing;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// `x * y == z` with `z` public.
fn product_circuit<F: CurveField>() -> circuit::ConstraintSystem<F> {
    let mut builder = ConstraintSystemBuilder::new();
    let z = builder.public_input();
    let x = builder.secret_input();
    let y = builder.secret_input();
    let xy = builder.mul(x, y);
    builder.assert_equal(xy, z);
    builder.build()
}

fn product_witness<F: CurveField>(x: u32, y: u32, z: u32) -> circuit::Witness<F> {
    circuit::Witness::new(vec![F::from_u32(z)], vec![F::from_u32(x), F::from_u32(y)])
}

fn product_instance(curve: CurveId, x: u32, y: u32, z: u32) -> (ConstraintSystem, Witness) {
    match curve {
        CurveId::BabyBear => (
            product_circuit::<BabyBear>().into(),
            product_witness::<BabyBear>(x, y, z).into(),
        ),
        CurveId::KoalaBear => (
            product_circuit::<KoalaBear>().into(),
            product_witness::<KoalaBear>(x, y, z).into(),
        ),
        CurveId::Goldilocks => (
            product_circuit::<Goldilocks>().into(),
            product_witness::<Goldilocks>(x, y, z).into(),
        ),
    }
}

fn keys_for(cs: &ConstraintSystem) -> (ProvingKey, VerifyingKey) {
    setup(cs, &ReferenceString::new(cs.curve())).expect("setup")
}

#[test]
fn test_prove_verify_every_curve() {
    for curve in CurveId::ALL {
        let (cs, witness) = product_instance(curve, 6, 7, 42);
        let (pk, vk) = keys_for(&cs);
        assert_eq!(pk.curve(), curve);
        assert_eq!(vk.nb_public_inputs(), 1);

        let proof = prove(&cs, &pk, &witness, &ProverOptions::default()).expect("prove");
        assert_eq!(proof.curve(), curve);
        verify(&proof, &vk, &witness.public_only()).expect("verify");
    }
}

#[test]
fn test_verify_rejects_witness_of_other_curve() {
    let (cs, witness) = product_instance(CurveId::KoalaBear, 6, 7, 42);
    let (pk, vk) = keys_for(&cs);
    let proof = prove(&cs, &pk, &witness, &ProverOptions::default()).expect("prove");

    let (_, foreign) = product_instance(CurveId::BabyBear, 6, 7, 42);
    let err = verify(&proof, &vk, &foreign.public_only()).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidWitness(InvalidWitness::Curve {
            expected: CurveId::KoalaBear,
            found: CurveId::BabyBear
        })
    ));
}

#[test]
fn test_verify_rejects_wrong_public_value() {
    let (cs, witness) = product_instance(CurveId::BabyBear, 6, 7, 42);
    let (pk, vk) = keys_for(&cs);
    let proof = prove(&cs, &pk, &witness, &ProverOptions::default()).expect("prove");

    let (_, wrong) = product_instance(CurveId::BabyBear, 6, 7, 43);
    let err = verify(&proof, &vk, &wrong.public_only()).unwrap_err();
    assert!(matches!(err, Error::Verification(_)), "{err}");
}

#[test]
fn test_verify_rejects_wrong_public_length() {
    let (cs, witness) = product_instance(CurveId::Goldilocks, 6, 7, 42);
    let (pk, vk) = keys_for(&cs);
    let proof = prove(&cs, &pk, &witness, &ProverOptions::default()).expect("prove");

    let public: Witness = circuit::Witness::<Goldilocks>::new(vec![], vec![]).into();
    let err = verify(&proof, &vk, &public).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidWitness(InvalidWitness::Length {
            expected: 1,
            found: 0
        })
    ));
}

#[test]
fn test_verify_rejects_key_of_other_curve() {
    let (cs, witness) = product_instance(CurveId::KoalaBear, 6, 7, 42);
    let (pk, _) = keys_for(&cs);
    let proof = prove(&cs, &pk, &witness, &ProverOptions::default()).expect("prove");

    let (other_cs, _) = product_instance(CurveId::Goldilocks, 6, 7, 42);
    let (_, other_vk) = keys_for(&other_cs);
    let err = verify(&proof, &other_vk, &witness.public_only()).unwrap_err();
    assert!(matches!(
        err,
        Error::CurveMismatch {
            expected: CurveId::Goldilocks,
            found: CurveId::KoalaBear
        }
    ));
}

#[test]
fn test_prove_reports_unsatisfied_witness() {
    let (cs, _) = product_instance(CurveId::KoalaBear, 6, 7, 42);
    let (pk, _) = keys_for(&cs);
    let (_, bad) = product_instance(CurveId::KoalaBear, 6, 7, 41);

    let err = prove(&cs, &pk, &bad, &ProverOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::Solver(circuit::Error::Unsatisfied {
            kind: GateKind::AssertZero,
            ..
        })
    ));
}

#[test]
fn test_prove_rejects_mismatched_inputs() {
    let (cs, witness) = product_instance(CurveId::BabyBear, 6, 7, 42);
    let (pk, _) = keys_for(&cs);

    let (other_cs, other_witness) = product_instance(CurveId::KoalaBear, 6, 7, 42);
    assert!(matches!(
        prove(&other_cs, &pk, &other_witness, &ProverOptions::default()),
        Err(Error::CurveMismatch { .. })
    ));
    assert!(matches!(
        prove(&cs, &pk, &other_witness, &ProverOptions::default()),
        Err(Error::InvalidWitness(InvalidWitness::Curve { .. }))
    ));

    let mut builder = ConstraintSystemBuilder::<BabyBear>::new();
    let z = builder.public_input();
    let x = builder.secret_input();
    let y = builder.secret_input();
    let sum = builder.add(&[x, y]);
    builder.assert_equal(sum, z);
    let sum_cs: ConstraintSystem = builder.build().into();
    assert!(matches!(
        prove(&sum_cs, &pk, &witness, &ProverOptions::default()),
        Err(Error::CircuitMismatch)
    ));
}

#[test]
fn test_setup_checks() {
    let (cs, _) = product_instance(CurveId::BabyBear, 1, 1, 1);
    assert!(matches!(
        setup(&cs, &ReferenceString::new(CurveId::Goldilocks)),
        Err(Error::CurveMismatch {
            expected: CurveId::BabyBear,
            found: CurveId::Goldilocks
        })
    ));

    let empty = ConstraintSystem::new(CurveId::BabyBear);
    assert!(matches!(
        setup(&empty, &ReferenceString::new(CurveId::BabyBear)),
        Err(Error::EmptyConstraintSystem)
    ));

    let bad_srs = ReferenceString::with_params(
        CurveId::BabyBear,
        FriParams {
            log_blowup: 0,
            ..FriParams::default()
        },
    );
    assert!(matches!(
        setup(&cs, &bad_srs),
        Err(Error::InvalidReferenceString(_))
    ));
}

#[test]
fn test_prover_options_are_validated() {
    let (cs, witness) = product_instance(CurveId::KoalaBear, 6, 7, 42);
    let (pk, _) = keys_for(&cs);
    let options = ProverOptions {
        log_trace_height: 0,
    };
    assert!(matches!(
        prove(&cs, &pk, &witness, &options),
        Err(Error::InvalidProverOptions(_))
    ));
}

#[test]
fn test_empty_proof_is_rejected() {
    let (cs, witness) = product_instance(CurveId::Goldilocks, 6, 7, 42);
    let (_, vk) = keys_for(&cs);
    let proof = Proof::new(CurveId::Goldilocks);
    assert!(matches!(
        verify(&proof, &vk, &witness.public_only()),
        Err(Error::MissingProof)
    ));
}

#[test]
fn test_serialization_round_trip() {
    for curve in CurveId::ALL {
        let (cs, witness) = product_instance(curve, 3, 5, 15);
        let (pk, vk) = keys_for(&cs);
        let proof = prove(&cs, &pk, &witness, &ProverOptions::default()).expect("prove");

        let mut bytes = Vec::new();
        cs.write_to(&mut bytes).expect("write cs");
        pk.write_to(&mut bytes).expect("write pk");
        vk.write_to(&mut bytes).expect("write vk");
        proof.write_to(&mut bytes).expect("write proof");

        let mut reader = bytes.as_slice();
        let mut cs2 = ConstraintSystem::new(curve);
        let mut pk2 = ProvingKey::new(curve);
        let mut vk2 = VerifyingKey::new(curve);
        let mut proof2 = Proof::new(curve);
        cs2.read_from(&mut reader).expect("read cs");
        pk2.read_from(&mut reader).expect("read pk");
        vk2.read_from(&mut reader).expect("read vk");
        proof2.read_from(&mut reader).expect("read proof");
        assert!(reader.is_empty());

        assert_eq!(cs2, cs);
        assert_eq!(pk2, pk);
        assert_eq!(vk2, vk);
        assert_eq!(pk2.verifying_key(), vk2);
        verify(&proof2, &vk2, &witness.public_only()).expect("verify decoded proof");

        let proof3 = prove(&cs2, &pk2, &witness, &ProverOptions::default()).expect("prove");
        verify(&proof3, &vk, &witness.public_only()).expect("verify with original key");
    }
}

#[test]
fn test_tampered_verifying_key() {
    let (cs, witness) = product_instance(CurveId::KoalaBear, 6, 7, 42);
    let (pk, vk) = keys_for(&cs);
    let proof = prove(&cs, &pk, &witness, &ProverOptions::default()).expect("prove");

    let mut bytes = Vec::new();
    vk.write_to(&mut bytes).expect("write vk");
    // The circuit digest is the last field of the payload.
    *bytes.last_mut().expect("non-empty") ^= 1;

    let mut decoded = VerifyingKey::new(CurveId::KoalaBear);
    assert!(matches!(
        decoded.read_from(&mut bytes.as_slice()),
        Err(Error::Corrupted(_))
    ));

    decoded
        .read_from_unchecked(&mut bytes.as_slice())
        .expect("unchecked read");
    assert!(matches!(
        verify(&proof, &decoded, &witness.public_only()),
        Err(Error::Verification(_))
    ));
}

#[test]
fn test_export_verifier() {
    let (cs, _) = product_instance(CurveId::Goldilocks, 1, 1, 1);
    let (_, vk) = keys_for(&cs);
    let mut out = Vec::new();
    vk.export_verifier(&mut out).expect("export");
    let text = String::from_utf8(out).expect("utf8");
    assert!(text.contains("curve: goldilocks"));
    assert!(text.contains("public_inputs: 1"));
    assert!(text.contains("gates.mul: 1"));
}

#[test]
fn test_concurrent_proving() {
    std::thread::scope(|scope| {
        for curve in CurveId::ALL {
            scope.spawn(move || {
                let (cs, witness) = product_instance(curve, 2, 21, 42);
                let (pk, vk) = keys_for(&cs);
                let proof = prove(&cs, &pk, &witness, &ProverOptions::default()).expect("prove");
                verify(&proof, &vk, &witness.public_only()).expect("verify");
            });
        }
    });
}

#[test]
fn test_artifacts_are_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ConstraintSystem>();
    assert_send_sync::<Witness>();
    assert_send_sync::<ReferenceString>();
    assert_send_sync::<ProvingKey>();
    assert_send_sync::<VerifyingKey>();
    assert_send_sync::<Proof>();
    assert_send_sync::<Mimc>();
}

/// Proves knowledge of a MiMC preimage of a public digest.
fn prove_mimc_preimage<F: CurveField + RandomField>()
where
    ConstraintSystem: From<circuit::ConstraintSystem<F>>,
    Witness: From<circuit::Witness<F>>,
{
    let mimc = Mimc::new(b"seed", F::CURVE);
    let mut rng = StdRng::seed_from_u64(7);
    let preimage: Vec<F> = (0..2).map(|_| F::random(&mut rng)).collect();

    let mut builder = ConstraintSystemBuilder::<F>::new();
    let digest = builder.public_input();
    let inputs = [builder.secret_input(), builder.secret_input()];
    let h = mimc.hash(&mut builder, &inputs);
    builder.assert_equal(h, digest);
    let cs: ConstraintSystem = builder.build().into();

    let witness: Witness =
        circuit::Witness::new(vec![mimc.hash_native(&preimage)], preimage.clone()).into();
    let (pk, vk) = keys_for(&cs);
    let proof = prove(&cs, &pk, &witness, &ProverOptions::default()).expect("prove");
    verify(&proof, &vk, &witness.public_only()).expect("verify");

    let wrong: Witness = circuit::Witness::new(vec![F::ONE], vec![]).into();
    assert!(matches!(
        verify(&proof, &vk, &wrong),
        Err(Error::Verification(_))
    ));
}

#[test]
fn test_mimc_preimage_proof() {
    // x^5 Sbox
    prove_mimc_preimage::<KoalaBear>();
    // inverse Sbox, cubic constraints
    prove_mimc_preimage::<Goldilocks>();
}

#[test]
fn test_fp2_inverse_proof() {
    let ext = Extension::<BabyBear>::over_generator();
    let mut rng = StdRng::seed_from_u64(5);
    let a = Fp2::<BabyBear>::random(&mut rng);
    let inv = ext.inverse(&a).expect("non-zero");

    let mut builder = ConstraintSystemBuilder::<BabyBear>::new();
    let expected = Fp2Var::public_input(&mut builder);
    let x = Fp2Var::secret_input(&mut builder);
    let y = x.inverse(&mut builder, &ext);
    y.assert_equal(&mut builder, &expected);
    let cs: ConstraintSystem = builder.build().into();

    let witness: Witness =
        circuit::Witness::new(vec![inv.c0, inv.c1], vec![a.c0, a.c1]).into();
    let (pk, vk) = keys_for(&cs);
    let proof = prove(&cs, &pk, &witness, &ProverOptions::default()).expect("prove");
    verify(&proof, &vk, &witness.public_only()).expect("verify");
}
