//! One-dimensional harmonic potential `V(x) = ½ m ω² x²`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use qpot_ir::{Circuit, ParameterExpression, QubitId};

use crate::MAX_QUBITS;
use crate::config::HarmonicConfig;
use crate::error::{PotentialError, PotentialResult};
use crate::phase_polynomial::{PhasePolynomial, SynthesisStyle};
use crate::potential::Potential;

/// Harmonic potential on a uniform grid.
///
/// Grid point `j ∈ [0, 2ⁿ)` sits at position `x0 + δ·j`, so
///
///   V(j) = ½ m ω² (x0 + δ·j)²
///
/// # Example
///
/// ```rust
/// use qpot_potentials::{HarmonicPotential, Potential};
///
/// let harmonic = HarmonicPotential::new(2, 1.0, 2.0, -1.0, 0.5).unwrap();
/// assert_eq!(harmonic.value(0), 2.0);
/// assert_eq!(harmonic.value(2), 0.0);
/// ```
///
/// Serialises as a [`HarmonicConfig`]; deserialising runs the same checks
/// as [`HarmonicPotential::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "HarmonicConfig", into = "HarmonicConfig")]
pub struct HarmonicPotential {
    num_qubits: u32,
    m: f64,
    omega: f64,
    x0: f64,
    delta: f64,
    evolution_time: f64,
    synthesis: SynthesisStyle,
}

impl HarmonicPotential {
    /// Create a harmonic potential.
    ///
    /// `m` is the mass, `omega` the angular frequency, `x0` the position of
    /// grid point 0 and `delta` the grid spacing.
    pub fn new(num_qubits: u32, m: f64, omega: f64, x0: f64, delta: f64) -> PotentialResult<Self> {
        if num_qubits == 0 || num_qubits > MAX_QUBITS {
            return Err(PotentialError::InvalidQubitCount(num_qubits));
        }
        for (name, value) in [("m", m), ("omega", omega), ("x0", x0), ("delta", delta)] {
            check_finite(name, value)?;
        }
        Ok(Self {
            num_qubits,
            m,
            omega,
            x0,
            delta,
            evolution_time: 1.0,
            synthesis: SynthesisStyle::default(),
        })
    }

    /// Set the time used for the evolution circuit.
    pub fn with_evolution_time(mut self, time: f64) -> PotentialResult<Self> {
        check_finite("evolution_time", time)?;
        self.evolution_time = time;
        Ok(self)
    }

    /// Set how two-qubit phase terms are emitted.
    #[must_use]
    pub fn with_synthesis(mut self, synthesis: SynthesisStyle) -> Self {
        self.synthesis = synthesis;
        self
    }

    /// Mass.
    pub fn m(&self) -> f64 {
        self.m
    }

    /// Angular frequency.
    pub fn omega(&self) -> f64 {
        self.omega
    }

    /// Position of grid point 0.
    pub fn x0(&self) -> f64 {
        self.x0
    }

    /// Grid spacing.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Two-qubit gate style.
    pub fn synthesis(&self) -> SynthesisStyle {
        self.synthesis
    }

    /// Spring constant `½ m ω²`.
    pub fn stiffness(&self) -> f64 {
        0.5 * self.m * self.omega * self.omega
    }

    /// Position of grid point `index`.
    #[allow(clippy::cast_precision_loss)]
    pub fn position(&self, index: u64) -> f64 {
        self.x0 + self.delta * index as f64
    }

    /// `V` written as a polynomial in the bits of the grid index.
    pub fn phase_polynomial(&self) -> PhasePolynomial {
        PhasePolynomial::from_harmonic(self.num_qubits, self.m, self.omega, self.x0, self.delta)
    }
}

fn check_finite(name: &'static str, value: f64) -> PotentialResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PotentialError::InvalidParameter { name, value })
    }
}

impl Potential for HarmonicPotential {
    fn name(&self) -> &str {
        "harmonic"
    }

    fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    fn evolution_time(&self) -> f64 {
        self.evolution_time
    }

    fn value(&self, index: u64) -> f64 {
        let x = self.position(index);
        self.stiffness() * x * x
    }

    fn append_evolution(
        &self,
        circuit: &mut Circuit,
        qubits: &[QubitId],
        time: &ParameterExpression,
    ) -> PotentialResult<()> {
        if let Some(t) = time.as_f64() {
            check_finite("evolution_time", t)?;
        }
        debug!(
            num_qubits = self.num_qubits,
            stiffness = self.stiffness(),
            x0 = self.x0,
            delta = self.delta,
            "appending harmonic evolution"
        );
        self.phase_polynomial()
            .synthesize(circuit, qubits, time, self.synthesis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConstructMode;
    use qpot_ir::QuantumRegister;

    #[test]
    fn test_stored_scalars() {
        let h = HarmonicPotential::new(3, 2.0, 0.5, -1.0, 0.25).unwrap();
        assert_eq!(h.num_qubits(), 3);
        assert_eq!(h.m(), 2.0);
        assert_eq!(h.omega(), 0.5);
        assert_eq!(h.x0(), -1.0);
        assert_eq!(h.delta(), 0.25);
        assert_eq!(h.evolution_time(), 1.0);
        assert_eq!(h.synthesis(), SynthesisStyle::Decomposed);
        assert!((h.stiffness() - 0.25).abs() < 1e-15);
    }

    #[test]
    fn test_values_follow_parabola() {
        let h = HarmonicPotential::new(3, 1.0, 1.0, -2.0, 0.5).unwrap();
        let values = h.values();
        assert_eq!(values.len(), 8);
        for (j, v) in values.iter().enumerate() {
            let x = -2.0 + 0.5 * j as f64;
            assert!((v - 0.5 * x * x).abs() < 1e-12);
        }
        // Minimum at x = 0, i.e. j = 4.
        assert_eq!(values[4], 0.0);
    }

    #[test]
    fn test_phase_polynomial_agrees_with_value() {
        let h = HarmonicPotential::new(4, 1.3, 0.7, 0.4, -0.15).unwrap();
        let poly = h.phase_polynomial();
        for j in 0..16 {
            assert!((poly.evaluate(j) - h.value(j)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_zero_qubits_rejected() {
        assert!(matches!(
            HarmonicPotential::new(0, 1.0, 1.0, 0.0, 1.0),
            Err(PotentialError::InvalidQubitCount(0))
        ));
        assert!(matches!(
            HarmonicPotential::new(MAX_QUBITS + 1, 1.0, 1.0, 0.0, 1.0),
            Err(PotentialError::InvalidQubitCount(_))
        ));
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(matches!(
            HarmonicPotential::new(2, f64::NAN, 1.0, 0.0, 1.0),
            Err(PotentialError::InvalidParameter { name: "m", .. })
        ));
        assert!(matches!(
            HarmonicPotential::new(2, 1.0, 1.0, 0.0, f64::INFINITY),
            Err(PotentialError::InvalidParameter { name: "delta", .. })
        ));
        let h = HarmonicPotential::new(2, 1.0, 1.0, 0.0, 1.0).unwrap();
        assert!(matches!(
            h.with_evolution_time(f64::NAN),
            Err(PotentialError::InvalidParameter {
                name: "evolution_time",
                ..
            })
        ));
    }

    #[test]
    fn test_matrix_is_diagonal() {
        let h = HarmonicPotential::new(2, 1.0, 2.0, -1.0, 0.5).unwrap();
        let m = h
            .construct_circuit(ConstructMode::Matrix, None)
            .unwrap()
            .into_matrix()
            .unwrap();
        assert_eq!(m.dim(), (4, 4));
        for i in 0..4 {
            for j in 0..4 {
                if i != j {
                    assert_eq!(m[[i, j]], 0.0);
                }
            }
            assert!((m[[i, i]] - h.value(i as u64)).abs() < 1e-15);
        }
    }

    #[test]
    fn test_circuit_uses_default_register() {
        let h = HarmonicPotential::new(3, 1.0, 1.0, 0.5, 0.25).unwrap();
        let circuit = h
            .construct_circuit(ConstructMode::Circuit, None)
            .unwrap()
            .into_circuit()
            .unwrap();
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.register_qubits("q").unwrap().len(), 3);
        let gates: Vec<_> = circuit.count_ops().into_keys().collect();
        assert!(gates.iter().all(|g| g == "p" || g == "cx"), "{gates:?}");
    }

    #[test]
    fn test_register_size_mismatch() {
        let h = HarmonicPotential::new(3, 1.0, 1.0, 0.0, 1.0).unwrap();
        let reg = QuantumRegister::new("x", 2);
        assert!(matches!(
            h.evolution_circuit(Some(&reg)),
            Err(PotentialError::RegisterSizeMismatch {
                expected: 3,
                got: 2
            })
        ));
    }

    #[test]
    fn test_constant_potential_is_global_phase_only() {
        let h = HarmonicPotential::new(3, 1.0, 1.0, 0.5, 0.0)
            .unwrap()
            .with_evolution_time(0.8)
            .unwrap();
        let circuit = h.evolution_circuit(None).unwrap();
        assert_eq!(circuit.num_ops(), 0);
        let phase = circuit.global_phase().as_f64().unwrap();
        assert!((phase + 0.8 * 0.125).abs() < 1e-12);
    }

    #[test]
    fn test_parameterized_circuit_is_symbolic() {
        let h = HarmonicPotential::new(2, 1.0, 1.0, 0.5, 0.25).unwrap();
        let circuit = h.parameterized_circuit("t", None).unwrap();
        assert!(circuit.is_parameterized());
        assert_eq!(circuit.parameters().into_iter().collect::<Vec<_>>(), vec!["t"]);
    }
}
