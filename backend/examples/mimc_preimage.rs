//! Proves that a message hashes to a public MiMC digest, choosing the curve
//! variant at runtime. Proofs are not hiding, so the message is recoverable
//! from the serialized proof.
//!
//! Usage: `cargo run -p backend --example mimc_preimage -- [babybear|koalabear|goldilocks]`

use std::time::Instant;

use backend::{ProverOptions, ReferenceString, init_tracing, prove, setup, verify};
use circuit::{ConstraintSystemBuilder, Mimc};
use curve::{BabyBear, CurveField, CurveId, Goldilocks, KoalaBear};

fn build<F: CurveField>(mimc: &Mimc) -> (backend::ConstraintSystem, backend::Witness)
where
    backend::ConstraintSystem: From<circuit::ConstraintSystem<F>>,
    backend::Witness: From<circuit::Witness<F>>,
{
    let message = [F::from_u32(0xBEEF), F::from_u32(0x1234), F::from_u32(0xCAFE)];

    let mut builder = ConstraintSystemBuilder::<F>::new();
    let digest = builder.public_input();
    let inputs: Vec<_> = message.iter().map(|_| builder.secret_input()).collect();
    let h = mimc.hash(&mut builder, &inputs);
    builder.assert_equal(h, digest);

    let witness = circuit::Witness::new(vec![mimc.hash_native(&message)], message.to_vec());
    (builder.build().into(), witness.into())
}

fn main() {
    init_tracing();

    let curve: CurveId = std::env::args()
        .nth(1)
        .as_deref()
        .unwrap_or("koalabear")
        .parse()
        .expect("curve name");
    let mimc = Mimc::new(b"mimc_preimage", curve);
    let (cs, witness) = match curve {
        CurveId::BabyBear => build::<BabyBear>(&mimc),
        CurveId::KoalaBear => build::<KoalaBear>(&mimc),
        CurveId::Goldilocks => build::<Goldilocks>(&mimc),
    };

    let (pk, vk) = setup(&cs, &ReferenceString::new(curve)).expect("setup");
    println!("Curve: {curve}");
    println!("MiMC rounds: {}", mimc.num_rounds());
    println!("Public inputs: {}", vk.nb_public_inputs());

    let prove_start = Instant::now();
    let proof = prove(&cs, &pk, &witness, &ProverOptions::default()).expect("prove");
    let prove_time = prove_start.elapsed();

    let mut proof_bytes = Vec::new();
    let proof_len = proof.write_to(&mut proof_bytes).expect("serialize proof");

    let verify_start = Instant::now();
    verify(&proof, &vk, &witness.public_only()).expect("verify");
    let verify_time = verify_start.elapsed();

    println!("Proving time: {:?}", prove_time);
    println!("Proof size (bytes): {}", proof_len);
    println!("Verification time: {:?}", verify_time);
    println!("MiMC digest proof verified.");
}
