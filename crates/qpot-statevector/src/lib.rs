//! Dense statevector simulation for qpot circuits.
//!
//! The engine exists to check synthesised circuits against their intended
//! unitaries: [`circuit_diagonal`] runs a circuit on every basis state and
//! returns the diagonal of its unitary.
//!
//! ```rust
//! use qpot_ir::{Circuit, QubitId};
//! use qpot_statevector::circuit_diagonal;
//!
//! let mut circuit = Circuit::with_size("u1", 1);
//! circuit.u1(std::f64::consts::PI, QubitId(0)).unwrap();
//!
//! let diag = circuit_diagonal(&circuit, 1e-12).unwrap();
//! assert!((diag[0].re - 1.0).abs() < 1e-12);
//! assert!((diag[1].re + 1.0).abs() < 1e-12);
//! ```

pub mod diagonal;
pub mod error;
pub mod statevector;

pub use diagonal::{circuit_diagonal, max_phase_deviation};
pub use error::{SimError, SimResult};
pub use statevector::Statevector;

/// Largest register the dense engine accepts.
pub const MAX_QUBITS: usize = 24;
