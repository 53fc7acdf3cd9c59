//! OpenQASM output for qpot circuits.
//!
//! ```rust
//! use qpot_ir::{Circuit, QuantumRegister};
//!
//! let mut circuit = Circuit::with_register("kick", &QuantumRegister::new("x", 1));
//! let q = circuit.register_qubits("x").unwrap()[0];
//! circuit.u1(0.5, q).unwrap();
//!
//! let qasm2 = qpot_qasm3::emit_qasm2(&circuit).unwrap();
//! assert!(qasm2.contains("qreg x[1];"));
//! assert!(qasm2.contains("u1(0.5) x[0];"));
//!
//! let qasm3 = qpot_qasm3::emit(&circuit).unwrap();
//! assert!(qasm3.contains("p(0.5) x[0];"));
//! ```

pub mod emitter;
pub mod error;

pub use emitter::{check_identifier, emit, emit_qasm2};
pub use error::{QasmError, QasmResult};
