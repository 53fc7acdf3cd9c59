//! Extraction of the diagonal of a diagonal circuit's unitary.

use num_complex::Complex64;
use tracing::debug;

use qpot_ir::Circuit;

use crate::error::{SimError, SimResult};
use crate::statevector::Statevector;

/// Return `⟨j|U|j⟩` for every basis state `j`, where `U` is the unitary of
/// `circuit` (global phase included).
///
/// Fails with [`SimError::NotDiagonal`] if any column of `U` has more than
/// `tolerance` probability outside its own basis state.
pub fn circuit_diagonal(circuit: &Circuit, tolerance: f64) -> SimResult<Vec<Complex64>> {
    let num_qubits = circuit.num_qubits();
    let dim = Statevector::new(num_qubits)?.amplitudes().len();
    debug!(num_qubits, ops = circuit.num_ops(), "extracting circuit diagonal");

    let mut diagonal = Vec::with_capacity(dim);
    for column in 0..dim {
        let mut sv = Statevector::basis(num_qubits, column)?;
        sv.run(circuit)?;
        let entry = sv.amplitudes()[column];
        let leakage = (1.0 - entry.norm_sqr()).max(0.0);
        if leakage > tolerance {
            return Err(SimError::NotDiagonal { column, leakage });
        }
        diagonal.push(entry);
    }
    Ok(diagonal)
}

/// Largest `|a_j - b_j|` over two diagonals of equal length.
///
/// Returns `f64::INFINITY` when the lengths differ.
pub fn max_phase_deviation(a: &[Complex64], b: &[Complex64]) -> f64 {
    if a.len() != b.len() {
        return f64::INFINITY;
    }
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).norm())
        .fold(0.0, f64::max)
}
