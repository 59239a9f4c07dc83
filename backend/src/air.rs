//! AIR view of a compiled constraint system.
//!
//! One column per circuit variable. Every gate becomes one polynomial
//! constraint evaluated on each row (two for `InverseOrZero`), and the public
//! inputs are bound to their columns on the first row.

use circuit::{ConstraintSystem, Gate, LinearCombination, Variable};
use p3_air::{Air, AirBuilder, AirBuilderWithPublicValues, BaseAir, BaseAirWithPublicValues};
use p3_field::{Field, PrimeCharacteristicRing};
use p3_matrix::Matrix;

#[derive(Clone, Debug)]
pub struct CircuitAir<'a, F> {
    cs: &'a ConstraintSystem<F>,
}

impl<'a, F: Field> CircuitAir<'a, F> {
    pub fn new(cs: &'a ConstraintSystem<F>) -> Self {
        Self { cs }
    }
}

impl<F: Field> BaseAir<F> for CircuitAir<'_, F> {
    fn width(&self) -> usize {
        self.cs.num_variables()
    }
}

impl<F: Field> BaseAirWithPublicValues<F> for CircuitAir<'_, F> {
    fn num_public_values(&self) -> usize {
        self.cs.num_public_inputs()
    }
}

impl<F, AB> Air<AB> for CircuitAir<'_, F>
where
    F: Field,
    AB: AirBuilderWithPublicValues<F = F>,
{
    fn eval(&self, builder: &mut AB) {
        let main = builder.main();
        let local = main.row_slice(0).expect("circuit trace is empty");
        let row = (*local).as_ref();
        let public = builder.public_values().to_vec();

        let var = |v: Variable| -> AB::Expr { row[v.index()].clone().into() };
        let combination = |lc: &LinearCombination<F>| -> AB::Expr {
            lc.terms
                .iter()
                .fold(AB::Expr::from(lc.constant), |acc, &(v, c)| {
                    acc + var(v) * AB::Expr::from(c)
                })
        };

        for gate in self.cs.gates() {
            match gate {
                Gate::Linear { lc, out } => builder.assert_eq(var(*out), combination(lc)),
                Gate::Mul { a, b, out } => builder.assert_eq(var(*out), var(*a) * var(*b)),
                Gate::Inverse { x, out } => builder.assert_one(var(*x) * var(*out)),
                Gate::InverseOrZero { x, out } => {
                    let e = var(*x) * var(*out) - AB::Expr::ONE;
                    builder.assert_zero(var(*x) * e.clone());
                    builder.assert_zero(var(*out) * e);
                }
                Gate::AssertZero { lc } => builder.assert_zero(combination(lc)),
            }
        }

        let mut first = builder.when_first_row();
        for (&input, &value) in self.cs.public_inputs().iter().zip(&public) {
            first.assert_eq(row[input.index()].clone(), value);
        }
    }
}
