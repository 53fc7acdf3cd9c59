//! Shared helpers for CLI commands.

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use qpot_potentials::{HarmonicConfig, Potential, PotentialConfig, SynthesisStyle};

/// Where the potential comes from: a configuration file, or inline
/// harmonic parameters. A configuration file takes precedence.
#[derive(Args, Debug, Clone)]
pub struct PotentialArgs {
    /// Potential configuration file (YAML or JSON)
    #[arg(short, long, env = "QPOT_CONFIG")]
    pub config: Option<String>,

    /// Number of qubits on the position grid
    #[arg(short, long, default_value = "3")]
    pub num_qubits: u32,

    /// Mass
    #[arg(long, default_value = "1.0")]
    pub mass: f64,

    /// Angular frequency
    #[arg(long, default_value = "1.0")]
    pub omega: f64,

    /// Position of grid point 0
    #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
    pub x0: f64,

    /// Grid spacing
    #[arg(long, default_value = "1.0", allow_negative_numbers = true)]
    pub delta: f64,

    /// Two-qubit phase gates (decomposed, controlled-phase)
    #[arg(long, default_value = "decomposed")]
    pub synthesis: String,
}

/// Parse a synthesis style name.
pub fn parse_synthesis(name: &str) -> Result<SynthesisStyle> {
    match name.to_lowercase().replace('-', "_").as_str() {
        "decomposed" | "cx" => Ok(SynthesisStyle::Decomposed),
        "controlled_phase" | "cp" => Ok(SynthesisStyle::ControlledPhase),
        other => {
            anyhow::bail!("Unknown synthesis style: '{other}'. Available: decomposed, controlled-phase")
        }
    }
}

/// Resolve the potential configuration, applying a time override.
pub fn resolve_config(args: &PotentialArgs, time: Option<f64>) -> Result<PotentialConfig> {
    let config = match &args.config {
        Some(path) => PotentialConfig::load(path)
            .with_context(|| format!("Failed to load potential configuration: {path}"))?,
        None => PotentialConfig::Harmonic(HarmonicConfig {
            num_qubits: args.num_qubits,
            m: args.mass,
            omega: args.omega,
            x0: args.x0,
            delta: args.delta,
            evolution_time: 1.0,
            synthesis: parse_synthesis(&args.synthesis)?,
        }),
    };
    debug!(?config, "resolved potential configuration");
    Ok(match time {
        Some(t) => config.with_evolution_time(t),
        None => config,
    })
}

/// Build the potential described by the arguments.
pub fn build_potential(args: &PotentialArgs, time: Option<f64>) -> Result<Box<dyn Potential>> {
    resolve_config(args, time)?
        .build()
        .context("Invalid potential parameters")
}

/// `j` as a bitstring, most significant qubit first.
pub fn bitstring(index: usize, num_qubits: u32) -> String {
    format!("{index:0width$b}", width = num_qubits as usize)
}
