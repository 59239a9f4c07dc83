//! Incremental construction of arithmetic constraint systems.
//!
//! Gadgets borrow a [`ConstraintSystemBuilder`] for the duration of a call and
//! append gates to it. Every gate defines at most one new variable, so the
//! gate list is also a valid evaluation order for the solver.

use p3_field::Field;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constraint_system::ConstraintSystem;

/// Handle to a wire of the constraint system. Carries no value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Variable(pub(crate) usize);

impl Variable {
    /// Column of this variable in the assignment and the trace.
    pub const fn index(self) -> usize {
        self.0
    }
}

/// `Σ cᵢ·vᵢ + k`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearCombination<F> {
    pub terms: Vec<(Variable, F)>,
    pub constant: F,
}

impl<F: Field> LinearCombination<F> {
    pub fn zero() -> Self {
        Self {
            terms: Vec::new(),
            constant: F::ZERO,
        }
    }

    pub fn constant(constant: F) -> Self {
        Self {
            terms: Vec::new(),
            constant,
        }
    }

    /// Sum of the given variables with unit coefficients.
    pub fn sum(vars: &[Variable]) -> Self {
        Self {
            terms: vars.iter().map(|&v| (v, F::ONE)).collect(),
            constant: F::ZERO,
        }
    }

    pub fn with_term(mut self, var: Variable, coeff: F) -> Self {
        self.terms.push((var, coeff));
        self
    }

    pub fn with_constant(mut self, constant: F) -> Self {
        self.constant += constant;
        self
    }

    pub fn variables(&self) -> impl Iterator<Item = Variable> + '_ {
        self.terms.iter().map(|&(v, _)| v)
    }

    /// Evaluates against a (possibly partial) assignment. `None` if a term
    /// refers to an unassigned variable.
    pub fn evaluate(&self, values: &[Option<F>]) -> Option<F> {
        self.terms
            .iter()
            .try_fold(self.constant, |acc, &(v, c)| Some(acc + c * (*values.get(v.0)?)?))
    }
}

impl<F: Field> From<Variable> for LinearCombination<F> {
    fn from(var: Variable) -> Self {
        Self::zero().with_term(var, F::ONE)
    }
}

/// A single constraint together with the variable it defines, if any.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gate<F> {
    /// `out = lc`
    Linear {
        lc: LinearCombination<F>,
        out: Variable,
    },
    /// `out = a·b`
    Mul { a: Variable, b: Variable, out: Variable },
    /// `x·out = 1`
    Inverse { x: Variable, out: Variable },
    /// `x·(x·out − 1) = 0` and `out·(x·out − 1) = 0`, so `out = x⁻¹` or `0 ↦ 0`.
    InverseOrZero { x: Variable, out: Variable },
    /// `lc = 0`
    AssertZero { lc: LinearCombination<F> },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateKind {
    Linear,
    Mul,
    Inverse,
    InverseOrZero,
    AssertZero,
}

impl<F> Gate<F> {
    pub fn kind(&self) -> GateKind {
        match self {
            Gate::Linear { .. } => GateKind::Linear,
            Gate::Mul { .. } => GateKind::Mul,
            Gate::Inverse { .. } => GateKind::Inverse,
            Gate::InverseOrZero { .. } => GateKind::InverseOrZero,
            Gate::AssertZero { .. } => GateKind::AssertZero,
        }
    }

    /// The variable this gate assigns.
    pub fn output(&self) -> Option<Variable> {
        match self {
            Gate::Linear { out, .. }
            | Gate::Mul { out, .. }
            | Gate::Inverse { out, .. }
            | Gate::InverseOrZero { out, .. } => Some(*out),
            Gate::AssertZero { .. } => None,
        }
    }

    /// Variables read by this gate.
    pub fn operands(&self) -> Vec<Variable> {
        match self {
            Gate::Linear { lc, .. } | Gate::AssertZero { lc } => {
                lc.terms.iter().map(|&(v, _)| v).collect()
            }
            Gate::Mul { a, b, .. } => vec![*a, *b],
            Gate::Inverse { x, .. } | Gate::InverseOrZero { x, .. } => vec![*x],
        }
    }
}

/// Mutable accumulator of inputs and gates.
#[derive(Clone, Debug)]
pub struct ConstraintSystemBuilder<F> {
    num_variables: usize,
    public_inputs: Vec<Variable>,
    secret_inputs: Vec<Variable>,
    gates: Vec<Gate<F>>,
}

impl<F: Field> Default for ConstraintSystemBuilder<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Field> ConstraintSystemBuilder<F> {
    /// An empty system with no variables.
    pub fn new() -> Self {
        Self {
            num_variables: 0,
            public_inputs: Vec::new(),
            secret_inputs: Vec::new(),
            gates: Vec::new(),
        }
    }

    fn alloc(&mut self) -> Variable {
        let var = Variable(self.num_variables);
        self.num_variables += 1;
        var
    }

    /// Allocates the next public input. Public inputs are filled from
    /// [`Witness::public`](crate::Witness) in allocation order.
    pub fn public_input(&mut self) -> Variable {
        let var = self.alloc();
        self.public_inputs.push(var);
        var
    }

    /// Allocates the next secret input, filled from
    /// [`Witness::secret`](crate::Witness) in allocation order.
    pub fn secret_input(&mut self) -> Variable {
        let var = self.alloc();
        self.secret_inputs.push(var);
        var
    }

    /// One linear gate assigning `lc` to a fresh variable.
    pub fn linear(&mut self, lc: LinearCombination<F>) -> Variable {
        let out = self.alloc();
        self.gates.push(Gate::Linear { lc, out });
        out
    }

    /// A variable fixed to `value`.
    pub fn constant(&mut self, value: F) -> Variable {
        self.linear(LinearCombination::constant(value))
    }

    /// Sum of `terms` as a single linear gate.
    pub fn add(&mut self, terms: &[Variable]) -> Variable {
        self.linear(LinearCombination::sum(terms))
    }

    /// `a − b`, a linear gate.
    pub fn sub(&mut self, a: Variable, b: Variable) -> Variable {
        self.linear(LinearCombination::from(a).with_term(b, F::NEG_ONE))
    }

    /// `−a`, a linear gate.
    pub fn neg(&mut self, a: Variable) -> Variable {
        self.linear(LinearCombination::zero().with_term(a, F::NEG_ONE))
    }

    /// `c·a`, a linear gate.
    pub fn scale(&mut self, a: Variable, c: F) -> Variable {
        self.linear(LinearCombination::zero().with_term(a, c))
    }

    /// `a·b`, one multiplication gate.
    pub fn mul(&mut self, a: Variable, b: Variable) -> Variable {
        let out = self.alloc();
        self.gates.push(Gate::Mul { a, b, out });
        out
    }

    /// `a⁻¹`. Unsatisfiable when `a = 0`; that is only detected when solving.
    pub fn inverse(&mut self, a: Variable) -> Variable {
        let out = self.alloc();
        self.gates.push(Gate::Inverse { x: a, out });
        out
    }

    /// `a⁻¹`, or `0` when `a = 0`.
    pub fn inverse_or_zero(&mut self, a: Variable) -> Variable {
        let out = self.alloc();
        self.gates.push(Gate::InverseOrZero { x: a, out });
        out
    }

    /// Constrains `lc` to zero without defining a variable.
    pub fn assert_zero(&mut self, lc: LinearCombination<F>) {
        self.gates.push(Gate::AssertZero { lc });
    }

    /// Constrains `a = b`.
    pub fn assert_equal(&mut self, a: Variable, b: Variable) {
        self.assert_zero(LinearCombination::from(a).with_term(b, F::NEG_ONE));
    }

    pub fn num_gates(&self) -> usize {
        self.gates.len()
    }

    /// Freezes the builder into a [`ConstraintSystem`].
    pub fn build(self) -> ConstraintSystem<F> {
        debug!(
            variables = self.num_variables,
            public_inputs = self.public_inputs.len(),
            secret_inputs = self.secret_inputs.len(),
            gates = self.gates.len(),
            "built constraint system"
        );
        ConstraintSystem::from_parts(
            self.num_variables,
            self.public_inputs,
            self.secret_inputs,
            self.gates,
        )
    }
}
