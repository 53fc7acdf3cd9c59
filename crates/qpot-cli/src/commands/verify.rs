//! Verify command implementation.

use anyhow::Result;
use console::style;
use tracing::info;

use qpot_statevector::{circuit_diagonal, max_phase_deviation};

use super::common::{PotentialArgs, build_potential};

/// Verification simulates one basis state per grid point.
const MAX_VERIFY_QUBITS: u32 = 10;

/// Execute the verify command.
pub fn execute(args: &PotentialArgs, time: Option<f64>, tolerance: f64) -> Result<()> {
    let potential = build_potential(args, time)?;
    let num_qubits = potential.num_qubits();
    if num_qubits > MAX_VERIFY_QUBITS {
        anyhow::bail!(
            "Verification is limited to {MAX_VERIFY_QUBITS} qubits, potential has {num_qubits}"
        );
    }
    let t = potential.evolution_time();

    println!(
        "{} Verifying {} potential on {} qubits at t = {}",
        style("→").cyan().bold(),
        style(potential.name()).green(),
        num_qubits,
        style(t).yellow()
    );

    let circuit = potential.evolution_circuit(None)?;
    println!(
        "  Circuit: {} ops, depth {}",
        circuit.num_ops(),
        circuit.depth()
    );

    let simulated = circuit_diagonal(&circuit, tolerance)?;
    let exact = potential.evolution_diagonal(t).to_vec();
    let deviation = max_phase_deviation(&simulated, &exact);
    info!(deviation, tolerance, "compared circuit against exp(-i t V)");

    if deviation > tolerance {
        anyhow::bail!("Maximum deviation {deviation:.3e} exceeds tolerance {tolerance:.1e}");
    }

    println!(
        "{} Circuit matches exp(-i t V): max deviation {}",
        style("✓").green().bold(),
        style(format!("{deviation:.3e}")).yellow()
    );
    Ok(())
}
