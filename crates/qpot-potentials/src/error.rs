//! Error types for the potentials crate.

use thiserror::Error;

/// Errors produced while building or compiling potential operators.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PotentialError {
    /// Register width outside `1..=MAX_QUBITS`.
    #[error("num_qubits must be between 1 and {max}, got {0}", max = crate::MAX_QUBITS)]
    InvalidQubitCount(u32),

    /// A dense matrix for this many qubits would not fit in memory.
    #[error("Dense matrix for {0} qubits exceeds the limit of {max} qubits", max = crate::MAX_MATRIX_QUBITS)]
    MatrixTooLarge(u32),

    /// A physical scalar is NaN or infinite.
    #[error("Parameter '{name}' must be finite, got {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// The target register does not match the potential's width.
    #[error("Potential acts on {expected} qubits but the register has {got}")]
    RegisterSizeMismatch {
        /// Width of the potential.
        expected: u32,
        /// Width of the register that was supplied.
        got: usize,
    },

    /// Construction mode string not recognised.
    #[error("Unknown construction mode '{0}' (expected 'matrix' or 'circuit')")]
    UnknownMode(String),

    /// No potential registered under this name.
    #[error("Unknown potential '{0}'")]
    UnknownPotential(String),

    /// Probability vector does not cover the position grid.
    #[error("Expected {expected} probabilities, got {got}")]
    ProbabilityLength {
        /// Grid size.
        expected: usize,
        /// Length supplied.
        got: usize,
    },

    /// Circuit builder returned an error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] qpot_ir::IrError),

    /// Reading a configuration file failed.
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// YAML configuration could not be parsed.
    #[error("Invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON configuration could not be parsed.
    #[error("Invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for potential operations.
pub type PotentialResult<T> = Result<T, PotentialError>;
