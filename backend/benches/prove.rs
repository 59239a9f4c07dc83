use backend::{ProverOptions, ReferenceString, prove, setup, verify};
use circuit::{ConstraintSystemBuilder, Mimc};
use criterion::{Criterion, criterion_group, criterion_main};
use curve::{CurveField, CurveId, Goldilocks, KoalaBear};

fn mimc_instance<F: CurveField>() -> (backend::ConstraintSystem, backend::Witness)
where
    backend::ConstraintSystem: From<circuit::ConstraintSystem<F>>,
    backend::Witness: From<circuit::Witness<F>>,
{
    let mimc = Mimc::new(b"bench", F::CURVE);
    let (m, k) = (F::from_u32(42), F::from_u32(7));

    let mut builder = ConstraintSystemBuilder::<F>::new();
    let out = builder.public_input();
    let m_var = builder.secret_input();
    let k_var = builder.secret_input();
    let c = mimc.encrypt(&mut builder, m_var, k_var);
    builder.assert_equal(c, out);

    let witness = circuit::Witness::new(vec![mimc.encrypt_native(m, k)], vec![m, k]);
    (builder.build().into(), witness.into())
}

fn bench_prove_verify(c: &mut Criterion) {
    for (curve, (cs, witness)) in [
        (CurveId::KoalaBear, mimc_instance::<KoalaBear>()),
        (CurveId::Goldilocks, mimc_instance::<Goldilocks>()),
    ] {
        let (pk, vk) = setup(&cs, &ReferenceString::new(curve)).expect("setup");
        let options = ProverOptions::default();

        c.bench_function(&format!("{curve}_mimc_prove"), |bencher| {
            bencher.iter(|| prove(&cs, &pk, &witness, &options).expect("prove"))
        });

        let proof = prove(&cs, &pk, &witness, &options).expect("prove");
        let public = witness.public_only();
        c.bench_function(&format!("{curve}_mimc_verify"), |bencher| {
            bencher.iter(|| verify(&proof, &vk, &public).expect("verify"))
        });
    }
}

criterion_group!(benches, bench_prove_verify);
criterion_main!(benches);
