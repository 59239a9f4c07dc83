//! Compiled constraint systems, witnesses and the witness solver.

use p3_field::Field;
use serde::{Deserialize, Serialize};

use crate::builder::{Gate, GateKind, LinearCombination, Variable};
use crate::error::{Error, Visibility};

/// Input values in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Witness<F> {
    pub public: Vec<F>,
    pub secret: Vec<F>,
}

impl<F: Clone> Witness<F> {
    /// Public values first, then secret values, each in allocation order.
    pub fn new(public: Vec<F>, secret: Vec<F>) -> Self {
        Self { public, secret }
    }

    /// The verifier's view: public values only.
    pub fn public_only(&self) -> Self {
        Self {
            public: self.public.clone(),
            secret: Vec::new(),
        }
    }
}

/// Full assignment of every variable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution<F> {
    values: Vec<F>,
}

impl<F: Copy> Solution<F> {
    /// Value assigned to `var`.
    ///
    /// # Panics
    ///
    /// If `var` was allocated by a builder with more variables than the
    /// system this solution belongs to. Use [`Solution::get`] to check.
    pub fn value(&self, var: Variable) -> F {
        self.values[var.0]
    }

    /// Value assigned to `var`, or `None` if `var` is out of range.
    pub fn get(&self, var: Variable) -> Option<F> {
        self.values.get(var.0).copied()
    }

    pub fn values(&self) -> &[F] {
        &self.values
    }
}

/// Immutable compiled form of a circuit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintSystem<F> {
    num_variables: usize,
    public_inputs: Vec<Variable>,
    secret_inputs: Vec<Variable>,
    gates: Vec<Gate<F>>,
}

impl<F> Default for ConstraintSystem<F> {
    fn default() -> Self {
        Self {
            num_variables: 0,
            public_inputs: Vec::new(),
            secret_inputs: Vec::new(),
            gates: Vec::new(),
        }
    }
}

impl<F: Field> ConstraintSystem<F> {
    pub(crate) fn from_parts(
        num_variables: usize,
        public_inputs: Vec<Variable>,
        secret_inputs: Vec<Variable>,
        gates: Vec<Gate<F>>,
    ) -> Self {
        Self {
            num_variables,
            public_inputs,
            secret_inputs,
            gates,
        }
    }

    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    pub fn num_public_inputs(&self) -> usize {
        self.public_inputs.len()
    }

    pub fn num_secret_inputs(&self) -> usize {
        self.secret_inputs.len()
    }

    pub fn public_inputs(&self) -> &[Variable] {
        &self.public_inputs
    }

    pub fn secret_inputs(&self) -> &[Variable] {
        &self.secret_inputs
    }

    pub fn gates(&self) -> &[Gate<F>] {
        &self.gates
    }

    pub fn gate_count(&self, kind: GateKind) -> usize {
        self.gates.iter().filter(|g| g.kind() == kind).count()
    }

    pub fn is_empty(&self) -> bool {
        self.num_variables == 0
    }

    /// Values of the public inputs under `solution`, in declaration order.
    pub fn public_values(&self, solution: &Solution<F>) -> Vec<F> {
        self.public_inputs.iter().map(|&v| solution.value(v)).collect()
    }

    /// Structural checks: every index is in range, every variable is defined
    /// exactly once, and gates only read variables defined before them.
    pub fn validate(&self) -> Result<(), Error> {
        let mut defined = vec![false; self.num_variables];
        let mut define = |var: Variable, what: &str| -> Result<(), Error> {
            match defined.get_mut(var.0) {
                None => Err(Error::Malformed(format!(
                    "{what} {} out of range ({} variables)",
                    var.0, self.num_variables
                ))),
                Some(true) => Err(Error::Malformed(format!(
                    "variable {} defined more than once",
                    var.0
                ))),
                Some(slot) => {
                    *slot = true;
                    Ok(())
                }
            }
        };
        for &var in self.public_inputs.iter().chain(&self.secret_inputs) {
            define(var, "input")?;
        }

        for (i, gate) in self.gates.iter().enumerate() {
            for var in gate.operands() {
                if !defined.get(var.0).copied().unwrap_or(false) {
                    return Err(Error::Malformed(format!(
                        "gate {i} reads variable {} before it is defined",
                        var.0
                    )));
                }
            }
            if let Some(out) = gate.output() {
                match defined.get_mut(out.0) {
                    None => {
                        return Err(Error::Malformed(format!(
                            "gate {i} output {} out of range",
                            out.0
                        )))
                    }
                    Some(true) => {
                        return Err(Error::Malformed(format!(
                            "gate {i} redefines variable {}",
                            out.0
                        )))
                    }
                    Some(slot) => *slot = true,
                }
            }
        }

        if let Some(unset) = defined.iter().position(|d| !d) {
            return Err(Error::Malformed(format!("variable {unset} is never defined")));
        }
        Ok(())
    }

    /// Computes every variable from the inputs, in gate order.
    pub fn solve(&self, witness: &Witness<F>) -> Result<Solution<F>, Error> {
        if witness.public.len() != self.public_inputs.len() {
            return Err(Error::WitnessLength {
                visibility: Visibility::Public,
                expected: self.public_inputs.len(),
                found: witness.public.len(),
            });
        }
        if witness.secret.len() != self.secret_inputs.len() {
            return Err(Error::WitnessLength {
                visibility: Visibility::Secret,
                expected: self.secret_inputs.len(),
                found: witness.secret.len(),
            });
        }

        let mut values: Vec<Option<F>> = vec![None; self.num_variables];
        let inputs = self.public_inputs.iter().zip(&witness.public);
        let inputs = inputs.chain(self.secret_inputs.iter().zip(&witness.secret));
        for (var, &value) in inputs {
            let slot = values
                .get_mut(var.0)
                .ok_or_else(|| Error::Malformed(format!("input {} out of range", var.0)))?;
            *slot = Some(value);
        }

        for (i, gate) in self.gates.iter().enumerate() {
            let unsatisfied = || Error::Unsatisfied {
                gate: i,
                kind: gate.kind(),
            };
            let read = |var: Variable| {
                values.get(var.0).copied().flatten().ok_or_else(|| {
                    Error::Malformed(format!("gate {i} reads undefined variable {}", var.0))
                })
            };
            let assignment = match gate {
                Gate::Linear { lc, out } => {
                    let value = lc.evaluate(&values).ok_or_else(|| {
                        Error::Malformed(format!("gate {i} reads an undefined variable"))
                    })?;
                    Some((*out, value))
                }
                Gate::Mul { a, b, out } => Some((*out, read(*a)? * read(*b)?)),
                Gate::Inverse { x, out } => {
                    let inv = read(*x)?.try_inverse().ok_or_else(unsatisfied)?;
                    Some((*out, inv))
                }
                Gate::InverseOrZero { x, out } => {
                    Some((*out, read(*x)?.try_inverse().unwrap_or(F::ZERO)))
                }
                Gate::AssertZero { lc } => {
                    let value = lc.evaluate(&values).ok_or_else(|| {
                        Error::Malformed(format!("gate {i} reads an undefined variable"))
                    })?;
                    if !value.is_zero() {
                        return Err(unsatisfied());
                    }
                    None
                }
            };
            if let Some((out, value)) = assignment {
                let slot = values
                    .get_mut(out.0)
                    .ok_or_else(|| Error::Malformed(format!("gate {i} output out of range")))?;
                *slot = Some(value);
            }
        }

        let values = values
            .into_iter()
            .enumerate()
            .map(|(i, v)| v.ok_or_else(|| Error::Malformed(format!("variable {i} is never defined"))))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Solution { values })
    }

    /// Re-checks every gate against a full assignment.
    pub fn check(&self, solution: &Solution<F>) -> Result<(), Error> {
        if solution.values.len() != self.num_variables {
            return Err(Error::Malformed(format!(
                "solution has {} values for {} variables",
                solution.values.len(),
                self.num_variables
            )));
        }
        let value = |var: Variable| solution.values[var.0];
        let lc_value = |lc: &LinearCombination<F>| {
            lc.terms
                .iter()
                .fold(lc.constant, |acc, &(v, c)| acc + c * value(v))
        };
        for (i, gate) in self.gates.iter().enumerate() {
            let holds = match gate {
                Gate::Linear { lc, out } => value(*out) == lc_value(lc),
                Gate::Mul { a, b, out } => value(*out) == value(*a) * value(*b),
                Gate::Inverse { x, out } => value(*x) * value(*out) == F::ONE,
                Gate::InverseOrZero { x, out } => {
                    let (x, out) = (value(*x), value(*out));
                    let e = x * out - F::ONE;
                    (x * e).is_zero() && (out * e).is_zero()
                }
                Gate::AssertZero { lc } => lc_value(lc).is_zero(),
            };
            if !holds {
                return Err(Error::Unsatisfied {
                    gate: i,
                    kind: gate.kind(),
                });
            }
        }
        Ok(())
    }
}
