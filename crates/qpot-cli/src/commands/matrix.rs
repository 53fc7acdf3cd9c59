//! Matrix command implementation.

use anyhow::{Context, Result};
use console::style;
use serde_json::json;

use qpot_potentials::ConstructMode;

use super::common::{PotentialArgs, bitstring, build_potential};

/// Execute the matrix command.
pub fn execute(args: &PotentialArgs, full: bool, format: &str) -> Result<()> {
    let potential = build_potential(args, None)?;
    let num_qubits = potential.num_qubits();
    let matrix = potential
        .construct_circuit(ConstructMode::Matrix, None)?
        .into_matrix()
        .context("Matrix construction returned a circuit")?;
    let diagonal = matrix.diag().to_vec();

    match format.to_lowercase().as_str() {
        "json" => {
            let value = if full {
                let rows: Vec<Vec<f64>> = matrix.rows().into_iter().map(|r| r.to_vec()).collect();
                json!({ "potential": potential.name(), "num_qubits": num_qubits, "matrix": rows })
            } else {
                json!({ "potential": potential.name(), "num_qubits": num_qubits, "diagonal": diagonal })
            };
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        "table" => {
            println!(
                "{} {} potential on {} qubits ({} grid points)",
                style("→").cyan().bold(),
                style(potential.name()).green(),
                num_qubits,
                diagonal.len()
            );
            if full {
                for row in matrix.rows() {
                    let cells: Vec<String> = row.iter().map(|v| format!("{v:>10.4}")).collect();
                    println!("  {}", cells.join(" "));
                }
            } else {
                println!("  {:>6}  {:>width$}  {:>14}", "j", "bits", "V(j)", width = num_qubits as usize);
                for (j, v) in diagonal.iter().enumerate() {
                    println!(
                        "  {:>6}  {}  {:>14.6}",
                        j,
                        style(bitstring(j, num_qubits)).cyan(),
                        v
                    );
                }
            }
        }
        other => anyhow::bail!("Unknown format: '{other}'. Available: table, json"),
    }

    Ok(())
}
