//! qpot Circuit Intermediate Representation
//!
//! Core data structures for the circuits that potential operators are
//! compiled into.
//!
//! # Core Components
//!
//! - **Qubits and registers**: [`QubitId`], [`Qubit`] and [`QuantumRegister`]
//! - **Gates**: [`StandardGate`] (X, CX, phase/u1, controlled phase, ...)
//! - **Parameters**: [`ParameterExpression`] for angles that depend on a symbolic time
//! - **Instructions**: [`Instruction`] combining gates with their operands
//! - **DAG**: [`CircuitDag`] for the internal graph representation
//! - **Circuit**: [`Circuit`] high-level builder API
//!
//! # Example
//!
//! ```rust
//! use qpot_ir::{Circuit, QuantumRegister};
//!
//! let reg = QuantumRegister::new("q", 2);
//! let mut circuit = Circuit::with_register("phase_kick", &reg);
//! let q = circuit.register_qubits("q").unwrap().to_vec();
//!
//! circuit.u1(0.5, q[0]).unwrap();
//! circuit.x(q[0]).unwrap();
//! circuit.u1(0.5, q[0]).unwrap();
//! circuit.x(q[0]).unwrap();
//! circuit.cx(q[0], q[1]).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.depth(), 5);
//! ```
//!
//! Qubit `k` of a register holds bit `k` of a basis-state index
//! (little-endian).

pub mod circuit;
pub mod dag;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod parameter;
pub mod qubit;

pub use circuit::Circuit;
pub use dag::{CircuitDag, DagEdge, DagNode, NodeIndex};
pub use error::{IrError, IrResult};
pub use gate::{Gate, StandardGate};
pub use instruction::{Instruction, InstructionKind};
pub use parameter::{ParameterExpression, wrap_angle};
pub use qubit::{QuantumRegister, Qubit, QubitId};
