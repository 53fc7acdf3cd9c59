//! The `Potential` abstraction and its construction modes.

use ndarray::{Array1, Array2};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use qpot_ir::{Circuit, ParameterExpression, QuantumRegister, QubitId};

use crate::MAX_MATRIX_QUBITS;
use crate::error::{PotentialError, PotentialResult};

/// Name of the register created when none is supplied.
pub const DEFAULT_REGISTER: &str = "q";

/// How a potential is materialised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstructMode {
    /// Dense diagonal matrix.
    Matrix,
    /// Phase circuit implementing `exp(-i t V)`.
    Circuit,
}

impl FromStr for ConstructMode {
    type Err = PotentialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "matrix" => Ok(ConstructMode::Matrix),
            "circuit" => Ok(ConstructMode::Circuit),
            _ => Err(PotentialError::UnknownMode(s.to_string())),
        }
    }
}

impl fmt::Display for ConstructMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstructMode::Matrix => write!(f, "matrix"),
            ConstructMode::Circuit => write!(f, "circuit"),
        }
    }
}

/// Output of [`Potential::construct_circuit`].
#[derive(Debug, Clone)]
pub enum Construction {
    /// `2ⁿ × 2ⁿ` diagonal matrix.
    Matrix(Array2<f64>),
    /// Evolution circuit.
    Circuit(Circuit),
}

impl Construction {
    /// The matrix, if this is a matrix construction.
    pub fn into_matrix(self) -> Option<Array2<f64>> {
        match self {
            Construction::Matrix(m) => Some(m),
            Construction::Circuit(_) => None,
        }
    }

    /// The circuit, if this is a circuit construction.
    pub fn into_circuit(self) -> Option<Circuit> {
        match self {
            Construction::Circuit(c) => Some(c),
            Construction::Matrix(_) => None,
        }
    }
}

/// A potential-energy operator that is diagonal in the position basis.
///
/// Grid point `j` is the basis state whose bit `k` is held by qubit `k`.
pub trait Potential: fmt::Debug + Send + Sync {
    /// Registry name.
    fn name(&self) -> &str;

    /// Number of qubits discretising the position grid.
    fn num_qubits(&self) -> u32;

    /// Time used by [`Potential::evolution_circuit`].
    fn evolution_time(&self) -> f64;

    /// `V(j)` on grid point `index`.
    fn value(&self, index: u64) -> f64;

    /// Append `exp(-i · time · V)` on `qubits` to `circuit`.
    fn append_evolution(
        &self,
        circuit: &mut Circuit,
        qubits: &[QubitId],
        time: &ParameterExpression,
    ) -> PotentialResult<()>;

    /// `V(j)` for every grid point.
    fn values(&self) -> Array1<f64> {
        let dim = 1u64 << self.num_qubits();
        (0..dim).map(|j| self.value(j)).collect()
    }

    /// Diagonal matrix with `M[j, j] = V(j)`.
    fn matrix(&self) -> PotentialResult<Array2<f64>> {
        if self.num_qubits() > MAX_MATRIX_QUBITS {
            return Err(PotentialError::MatrixTooLarge(self.num_qubits()));
        }
        Ok(Array2::from_diag(&self.values()))
    }

    /// `exp(-i t V(j))` for every grid point.
    fn evolution_diagonal(&self, time: f64) -> Array1<Complex64> {
        self.values()
            .mapv(|v| Complex64::from_polar(1.0, -time * v))
    }

    /// Fresh circuit on `register` (or a new register `q`) holding the
    /// evolution for [`Potential::evolution_time`].
    fn evolution_circuit(&self, register: Option<&QuantumRegister>) -> PotentialResult<Circuit> {
        let time = ParameterExpression::constant(self.evolution_time());
        circuit_on_register(self, register, &time)
    }

    /// Evolution circuit whose angles are proportional to the symbol `symbol`.
    ///
    /// Binding `symbol` to `t` gives the same unitary as an evolution
    /// circuit built for time `t`.
    fn parameterized_circuit(
        &self,
        symbol: &str,
        register: Option<&QuantumRegister>,
    ) -> PotentialResult<Circuit> {
        circuit_on_register(self, register, &ParameterExpression::symbol(symbol))
    }

    /// Build the potential in the requested mode.
    fn construct_circuit(
        &self,
        mode: ConstructMode,
        register: Option<&QuantumRegister>,
    ) -> PotentialResult<Construction> {
        debug!(potential = self.name(), %mode, num_qubits = self.num_qubits(), "constructing");
        match mode {
            ConstructMode::Matrix => self.matrix().map(Construction::Matrix),
            ConstructMode::Circuit => self.evolution_circuit(register).map(Construction::Circuit),
        }
    }

    /// `Σ_j p_j V(j)` for a position distribution `probabilities`.
    fn expectation(&self, probabilities: &[f64]) -> PotentialResult<f64> {
        let expected = 1usize << self.num_qubits();
        if probabilities.len() != expected {
            return Err(PotentialError::ProbabilityLength {
                expected,
                got: probabilities.len(),
            });
        }
        Ok((0u64..)
            .zip(probabilities)
            .map(|(j, p)| p * self.value(j))
            .sum())
    }
}

/// New circuit on `register` with the evolution for `time` appended.
fn circuit_on_register<P: Potential + ?Sized>(
    potential: &P,
    register: Option<&QuantumRegister>,
    time: &ParameterExpression,
) -> PotentialResult<Circuit> {
    let num_qubits = potential.num_qubits();
    let register = match register {
        Some(reg) if reg.size() != num_qubits => {
            return Err(PotentialError::RegisterSizeMismatch {
                expected: num_qubits,
                got: reg.size() as usize,
            });
        }
        Some(reg) => reg.clone(),
        None => QuantumRegister::new(DEFAULT_REGISTER, num_qubits),
    };

    let mut circuit = Circuit::with_register(potential.name(), &register);
    let qubits = circuit.register_qubits(register.name())?.to_vec();
    potential.append_evolution(&mut circuit, &qubits, time)?;
    Ok(circuit)
}
