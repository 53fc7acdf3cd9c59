//! Error types for statevector simulation.

use thiserror::Error;

/// Errors produced while simulating a circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// A gate angle or the global phase still contains a symbol.
    #[error("Cannot simulate: parameter '{0}' is unbound")]
    UnboundParameter(String),

    /// An instruction addresses a qubit beyond the statevector width.
    #[error("Qubit {qubit} out of range for a {num_qubits}-qubit statevector")]
    QubitOutOfRange {
        /// The offending qubit index.
        qubit: u32,
        /// Width of the statevector.
        num_qubits: usize,
    },

    /// The statevector would not fit in memory.
    #[error("{0} qubits exceed the dense simulation limit of {max}", max = crate::MAX_QUBITS)]
    TooManyQubits(usize),

    /// An amplitude vector whose length is not a power of two.
    #[error("Amplitude vector length {0} is not a power of two")]
    InvalidLength(usize),

    /// Basis state index outside the state space.
    #[error("Basis index {index} out of range for {num_qubits} qubits")]
    BasisOutOfRange {
        /// Requested basis index.
        index: usize,
        /// Width of the statevector.
        num_qubits: usize,
    },

    /// The circuit maps a basis state outside its own ray.
    #[error("Circuit is not diagonal: column {column} leaks {leakage:.3e} probability")]
    NotDiagonal {
        /// Basis state whose image is not parallel to itself.
        column: usize,
        /// Probability found outside the input basis state.
        leakage: f64,
    },
}

/// Result type for simulation.
pub type SimResult<T> = Result<T, SimError>;
