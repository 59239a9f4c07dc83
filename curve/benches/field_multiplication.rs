use criterion::{black_box, criterion_group, criterion_main, Criterion};
use curve::{Extension, Fp2, Goldilocks, KoalaBear};
use p3_field::extension::BinomialExtensionField;
use p3_field::PrimeCharacteristicRing;

fn bench_koalabear_mul(c: &mut Criterion) {
    c.bench_function("koalabear_mul", |bencher| {
        let a = KoalaBear::new(123456789);
        let b = KoalaBear::new(987654321);
        bencher.iter(|| black_box(black_box(a) * black_box(b)))
    });
}

fn bench_fp2_mul(c: &mut Criterion) {
    c.bench_function("koalabear_fp2_mul", |bencher| {
        let ext = Extension::<KoalaBear>::over_generator();
        let a = Fp2::new(KoalaBear::new(123456789), KoalaBear::new(42));
        let b = Fp2::new(KoalaBear::new(987654321), KoalaBear::new(7));
        bencher.iter(|| black_box(ext.mul(black_box(&a), black_box(&b))))
    });
}

fn bench_fp2_inverse(c: &mut Criterion) {
    c.bench_function("goldilocks_fp2_inverse", |bencher| {
        let ext = Extension::<Goldilocks>::binomial();
        let a = Fp2::new(Goldilocks::from_u64(123456789), Goldilocks::from_u64(987654321));
        bencher.iter(|| black_box(ext.inverse(black_box(&a))))
    });
}

fn bench_goldilocks_ext2_mul(c: &mut Criterion) {
    c.bench_function("goldilocks_ext2_mul", |bencher| {
        let a = BinomialExtensionField::<Goldilocks, 2>::from_u64(123456789);
        let b = BinomialExtensionField::<Goldilocks, 2>::from_u64(987654321);
        bencher.iter(|| black_box(black_box(a) * black_box(b)))
    });
}

criterion_group!(
    benches,
    bench_koalabear_mul,
    bench_fp2_mul,
    bench_fp2_inverse,
    bench_goldilocks_ext2_mul
);
criterion_main!(benches);
