//! Error types for QASM emission.

use thiserror::Error;

/// Errors that can occur while serialising a circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QasmError {
    /// OpenQASM 2 has no way to declare a free parameter.
    #[error("Parameter '{0}' is unbound; OpenQASM 2 requires numeric angles")]
    UnboundParameter(String),

    /// Anonymous qubits are emitted as register `q`, which is already taken.
    #[error("Register name '{0}' clashes with the register used for anonymous qubits")]
    RegisterNameClash(String),

    /// A register or parameter name cannot be declared in OpenQASM.
    #[error("Invalid name '{name}': {reason}")]
    InvalidIdentifier {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// A qubit of the circuit has no declared position.
    #[error("Qubit {0} has no register position")]
    UnmappedQubit(qpot_ir::QubitId),
}

/// Result type for emission.
pub type QasmResult<T> = Result<T, QasmError>;
