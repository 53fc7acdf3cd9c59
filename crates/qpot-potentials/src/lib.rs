//! Potential-energy operators for quantum simulation.
//!
//! A potential is diagonal in the position basis. It can be materialised
//! either as a dense diagonal matrix or as a circuit implementing the
//! evolution `exp(-i t V)` with phase (`u1`) and CNOT gates.
//!
//! # Example
//!
//! ```rust
//! use qpot_potentials::{ConstructMode, HarmonicPotential, Potential};
//!
//! let harmonic = HarmonicPotential::new(3, 1.0, 1.0, -2.0, 0.5)
//!     .unwrap()
//!     .with_evolution_time(0.25)
//!     .unwrap();
//!
//! let matrix = harmonic
//!     .construct_circuit(ConstructMode::Matrix, None)
//!     .unwrap()
//!     .into_matrix()
//!     .unwrap();
//! assert_eq!(matrix.dim(), (8, 8));
//!
//! let circuit = harmonic.evolution_circuit(None).unwrap();
//! assert_eq!(circuit.num_qubits(), 3);
//! ```

pub mod config;
pub mod error;
pub mod harmonic;
pub mod phase_polynomial;
pub mod potential;

pub use config::{HarmonicConfig, PluggableInfo, PotentialConfig, lookup, registered_potentials};
pub use error::{PotentialError, PotentialResult};
pub use harmonic::HarmonicPotential;
pub use phase_polynomial::{PhasePolynomial, SynthesisStyle};
pub use potential::{ConstructMode, Construction, DEFAULT_REGISTER, Potential};

/// Largest register a potential can be defined on.
pub const MAX_QUBITS: u32 = 24;

/// Largest register for which a dense matrix is built.
pub const MAX_MATRIX_QUBITS: u32 = 14;
