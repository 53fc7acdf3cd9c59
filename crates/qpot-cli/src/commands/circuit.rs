//! Circuit command implementation.

use anyhow::{Context, Result};
use console::style;
use std::fs;
use tracing::info;

use qpot_ir::{Circuit, QuantumRegister};
use qpot_potentials::ConstructMode;
use qpot_qasm3::{check_identifier, emit, emit_qasm2};

use super::common::{PotentialArgs, build_potential};

/// Execute the circuit command.
pub fn execute(
    args: &PotentialArgs,
    time: Option<f64>,
    symbolic: Option<&str>,
    register: &str,
    qasm2: bool,
    output: Option<&str>,
) -> Result<()> {
    check_identifier(register).context("Invalid register name")?;
    if let Some(symbol) = symbolic {
        check_identifier(symbol).context("Invalid time symbol")?;
    }

    let potential = build_potential(args, time)?;
    let register = QuantumRegister::new(register, potential.num_qubits());

    let circuit = match symbolic {
        Some(symbol) => potential.parameterized_circuit(symbol, Some(&register))?,
        None => potential
            .construct_circuit(ConstructMode::Circuit, Some(&register))?
            .into_circuit()
            .context("Circuit construction returned a matrix")?,
    };
    info!(
        qubits = circuit.num_qubits(),
        ops = circuit.num_ops(),
        depth = circuit.depth(),
        "built evolution circuit"
    );

    let source = if qasm2 {
        emit_qasm2(&circuit)
    } else {
        emit(&circuit)
    }
    .context("Failed to emit OpenQASM")?;

    match output {
        Some(path) => {
            fs::write(path, &source).with_context(|| format!("Failed to write file: {path}"))?;
            print_summary(&circuit, potential.evolution_time(), symbolic);
            println!("  Output: {}", style(path).green());
        }
        None => print!("{source}"),
    }

    Ok(())
}

fn print_summary(circuit: &Circuit, time: f64, symbolic: Option<&str>) {
    let time = symbolic.map_or_else(|| time.to_string(), |s| format!("{s} (symbolic)"));
    println!(
        "{} Evolution circuit for t = {}",
        style("✓").green().bold(),
        style(time).yellow()
    );
    println!(
        "  {} qubits, {} ops, depth {}",
        circuit.num_qubits(),
        circuit.num_ops(),
        circuit.depth()
    );
    for (gate, count) in circuit.count_ops() {
        println!("    {:<4} {:>6}", style(gate).cyan(), count);
    }
}
