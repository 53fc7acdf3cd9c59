//! Diagonal-phase synthesis for potentials that are quadratic in the grid index.
//!
//! A potential sampled on the grid `j = Σ_k 2ᵏ b_k` (bit `b_k` on qubit `k`)
//! that is a quadratic polynomial in `j`,
//!
//!   V(j) = a + b·j + c·j²
//!
//! is also a quadratic polynomial in the bits (using `b_k² = b_k`):
//!
//!   V = a + Σ_k (b·2ᵏ + c·4ᵏ) b_k + Σ_{k<l} 2c·2^{k+l} b_k b_l
//!
//! so `exp(-i t V)` factors exactly into a global phase, one phase gate per
//! qubit and one controlled phase per qubit pair. No Trotter error.
//!
//! The controlled phase `CP(θ)` is either emitted natively or decomposed
//! into the `u1` + `cx` gate set:
//!
//!   CP(θ) = u1(θ/2)_k · u1(θ/2)_l · CX(k,l) · u1(-θ/2)_l · CX(k,l)
//!
//! with the `u1(θ/2)` halves merged into the per-qubit phases.

use serde::{Deserialize, Serialize};
use tracing::debug;

use qpot_ir::{Circuit, ParameterExpression, QubitId};

use crate::error::{PotentialError, PotentialResult};

/// Angles smaller than this (after wrapping) are dropped.
const ANGLE_EPSILON: f64 = 1e-12;

/// How two-qubit phase terms are written into the circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SynthesisStyle {
    /// `u1` and `cx` only.
    #[default]
    Decomposed,
    /// Native controlled-phase (`cp`) gates.
    ControlledPhase,
}

/// `V(b) = constant + Σ_k linear[k]·b_k + Σ quadratic[(k,l)]·b_k·b_l`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhasePolynomial {
    num_qubits: u32,
    constant: f64,
    linear: Vec<f64>,
    /// Pair terms with `k < l`, sorted.
    quadratic: Vec<(u32, u32, f64)>,
}

impl PhasePolynomial {
    /// Bit expansion of `V(j) = a + b·j + c·j²` on `num_qubits` qubits.
    #[allow(clippy::cast_possible_wrap)]
    pub fn quadratic_form(num_qubits: u32, a: f64, b: f64, c: f64) -> Self {
        let weight = |k: u32| 2.0_f64.powi(k as i32);
        let linear = (0..num_qubits)
            .map(|k| b * weight(k) + c * weight(2 * k))
            .collect();
        let mut quadratic = Vec::new();
        for k in 0..num_qubits {
            for l in (k + 1)..num_qubits {
                quadratic.push((k, l, 2.0 * c * weight(k + l)));
            }
        }
        Self {
            num_qubits,
            constant: a,
            linear,
            quadratic,
        }
    }

    /// `½ m ω² (x0 + δ j)²` expanded in `j`.
    pub fn from_harmonic(num_qubits: u32, m: f64, omega: f64, x0: f64, delta: f64) -> Self {
        let k = 0.5 * m * omega * omega;
        Self::quadratic_form(num_qubits, k * x0 * x0, 2.0 * k * x0 * delta, k * delta * delta)
    }

    /// Number of qubits (bits of the grid index).
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Bit-independent term.
    pub fn constant(&self) -> f64 {
        self.constant
    }

    /// Coefficient of each single bit.
    pub fn linear(&self) -> &[f64] {
        &self.linear
    }

    /// Coefficients of bit pairs `(k, l, c_kl)` with `k < l`.
    pub fn quadratic(&self) -> &[(u32, u32, f64)] {
        &self.quadratic
    }

    /// Evaluate the polynomial on the basis state `index`.
    pub fn evaluate(&self, index: u64) -> f64 {
        let bit = |k: u32| (index >> k) & 1 == 1;
        let mut value = self.constant;
        for (k, coeff) in (0u32..).zip(&self.linear) {
            if bit(k) {
                value += coeff;
            }
        }
        for &(k, l, coeff) in &self.quadratic {
            if bit(k) && bit(l) {
                value += coeff;
            }
        }
        value
    }

    /// Append `exp(-i · time · V)` acting on `qubits` (qubit `k` holds bit `k`).
    pub fn synthesize(
        &self,
        circuit: &mut Circuit,
        qubits: &[QubitId],
        time: &ParameterExpression,
        style: SynthesisStyle,
    ) -> PotentialResult<()> {
        if qubits.len() != self.num_qubits as usize {
            return Err(PotentialError::RegisterSizeMismatch {
                expected: self.num_qubits,
                got: qubits.len(),
            });
        }

        let ops_before = circuit.num_ops();
        circuit.add_global_phase(time.scaled(-self.constant).wrapped());

        let mut single = self.linear.clone();
        if style == SynthesisStyle::Decomposed {
            for &(k, l, coeff) in &self.quadratic {
                single[k as usize] += coeff / 2.0;
                single[l as usize] += coeff / 2.0;
            }
        }

        for (qubit, coeff) in qubits.iter().zip(&single) {
            if let Some(angle) = phase_angle(time, -coeff) {
                circuit.u1(angle, *qubit)?;
            }
        }

        for &(k, l, coeff) in &self.quadratic {
            let (qk, ql) = (qubits[k as usize], qubits[l as usize]);
            match style {
                SynthesisStyle::Decomposed => {
                    if let Some(angle) = phase_angle(time, coeff / 2.0) {
                        circuit.cx(qk, ql)?;
                        circuit.u1(angle, ql)?;
                        circuit.cx(qk, ql)?;
                    }
                }
                SynthesisStyle::ControlledPhase => {
                    if let Some(angle) = phase_angle(time, -coeff) {
                        circuit.cp(angle, qk, ql)?;
                    }
                }
            }
        }

        debug!(
            num_qubits = self.num_qubits,
            ?style,
            gates = circuit.num_ops() - ops_before,
            symbolic = time.is_symbolic(),
            "synthesised diagonal phase polynomial"
        );
        Ok(())
    }
}

/// `factor · time`, wrapped into `(-π, π]`; `None` when the gate would be identity.
fn phase_angle(time: &ParameterExpression, factor: f64) -> Option<ParameterExpression> {
    if factor == 0.0 {
        return None;
    }
    let angle = time.scaled(factor).wrapped();
    match angle.as_f64() {
        Some(v) if v.abs() < ANGLE_EPSILON => None,
        _ => Some(angle),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quadratic_form_matches_direct_evaluation() {
        let poly = PhasePolynomial::quadratic_form(3, 0.5, -1.25, 0.75);
        for j in 0..8u64 {
            let x = j as f64;
            let direct = 0.5 - 1.25 * x + 0.75 * x * x;
            assert!((poly.evaluate(j) - direct).abs() < 1e-12, "j = {j}");
        }
    }

    #[test]
    fn test_pair_terms_are_ordered() {
        let poly = PhasePolynomial::quadratic_form(3, 0.0, 0.0, 1.0);
        let pairs: Vec<_> = poly.quadratic().iter().map(|&(k, l, _)| (k, l)).collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn test_linear_only_has_no_two_qubit_gates() {
        let poly = PhasePolynomial::quadratic_form(3, 0.0, 0.3, 0.0);
        let mut circuit = Circuit::with_size("linear", 3);
        let qubits: Vec<_> = (0..3).map(QubitId).collect();
        poly.synthesize(
            &mut circuit,
            &qubits,
            &ParameterExpression::constant(1.0),
            SynthesisStyle::Decomposed,
        )
        .unwrap();
        let counts = circuit.count_ops();
        assert_eq!(counts.get("p"), Some(&3));
        assert!(counts.get("cx").is_none());
    }

    #[test]
    fn test_decomposed_style_uses_two_cx_per_pair() {
        let poly = PhasePolynomial::quadratic_form(3, 0.0, 0.0, 0.1);
        let mut circuit = Circuit::with_size("pairs", 3);
        let qubits: Vec<_> = (0..3).map(QubitId).collect();
        poly.synthesize(
            &mut circuit,
            &qubits,
            &ParameterExpression::constant(1.0),
            SynthesisStyle::Decomposed,
        )
        .unwrap();
        assert_eq!(circuit.count_ops().get("cx"), Some(&6));
    }

    #[test]
    fn test_controlled_phase_style() {
        let poly = PhasePolynomial::quadratic_form(3, 0.0, 0.0, 0.1);
        let mut circuit = Circuit::with_size("pairs", 3);
        let qubits: Vec<_> = (0..3).map(QubitId).collect();
        poly.synthesize(
            &mut circuit,
            &qubits,
            &ParameterExpression::constant(1.0),
            SynthesisStyle::ControlledPhase,
        )
        .unwrap();
        let counts = circuit.count_ops();
        assert_eq!(counts.get("cp"), Some(&3));
        assert!(counts.get("cx").is_none());
    }

    #[test]
    fn test_width_mismatch() {
        let poly = PhasePolynomial::quadratic_form(2, 0.0, 1.0, 1.0);
        let mut circuit = Circuit::with_size("narrow", 3);
        let qubits: Vec<_> = (0..3).map(QubitId).collect();
        let err = poly
            .synthesize(
                &mut circuit,
                &qubits,
                &ParameterExpression::constant(1.0),
                SynthesisStyle::Decomposed,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            PotentialError::RegisterSizeMismatch {
                expected: 2,
                got: 3
            }
        ));
    }

    #[test]
    fn test_zero_time_emits_nothing() {
        let poly = PhasePolynomial::quadratic_form(2, 1.0, 1.0, 1.0);
        let mut circuit = Circuit::with_size("idle", 2);
        let qubits = [QubitId(0), QubitId(1)];
        poly.synthesize(
            &mut circuit,
            &qubits,
            &ParameterExpression::constant(0.0),
            SynthesisStyle::Decomposed,
        )
        .unwrap();
        assert_eq!(circuit.num_ops(), 0);
        assert_eq!(circuit.global_phase().as_f64(), Some(0.0));
    }
}
