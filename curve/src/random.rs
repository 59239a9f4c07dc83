use p3_baby_bear::BabyBear;
use p3_goldilocks::Goldilocks;
use p3_koala_bear::KoalaBear;
use rand::distr::{Distribution, StandardUniform};
use rand::Rng;

use crate::Fp2;

/// Helper trait for sampling random field elements.
pub trait RandomField: Sized {
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self;
}

macro_rules! impl_random_field {
    ($($field:ty),*) => {
        $(
            impl RandomField for $field {
                #[inline]
                fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
                    StandardUniform.sample(rng)
                }
            }
        )*
    };
}

impl_random_field!(BabyBear, KoalaBear, Goldilocks);

impl<F: RandomField> RandomField for Fp2<F> {
    #[inline]
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let c0 = F::random(rng);
        let c1 = F::random(rng);
        Fp2 { c0, c1 }
    }
}
