//! qpot Command-Line Interface
//!
//! Builds potential-energy operators as diagonal matrices or phase circuits,
//! emits the circuits as OpenQASM and checks them against the exact
//! evolution on a statevector.
//!
//! ```text
//! qpot matrix  -n 3 --mass 1 --omega 1 --x0=-2 --delta 0.5
//! qpot circuit -c harmonic.yaml --time 0.25 --qasm2
//! qpot verify  -c harmonic.yaml
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::common::PotentialArgs;
use commands::{circuit, list, matrix, verify, version};

/// qpot - potential-energy operators for quantum circuits
#[derive(Parser)]
#[command(name = "qpot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the potential as a diagonal matrix
    Matrix {
        #[command(flatten)]
        potential: PotentialArgs,

        /// Print the full 2^n x 2^n matrix instead of the diagonal
        #[arg(long)]
        full: bool,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Emit the evolution circuit exp(-i t V) as OpenQASM
    Circuit {
        #[command(flatten)]
        potential: PotentialArgs,

        /// Evolution time (overrides the configured value)
        #[arg(short, long, allow_negative_numbers = true)]
        time: Option<f64>,

        /// Leave the time as a named circuit input instead of a number
        #[arg(long, conflicts_with_all = ["time", "qasm2"])]
        symbolic: Option<String>,

        /// Name of the position register
        #[arg(long, default_value = "q")]
        register: String,

        /// Emit OpenQASM 2.0 instead of 3.0
        #[arg(long)]
        qasm2: bool,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Check the circuit against the exact evolution on a statevector
    Verify {
        #[command(flatten)]
        potential: PotentialArgs,

        /// Evolution time (overrides the configured value)
        #[arg(short, long, allow_negative_numbers = true)]
        time: Option<f64>,

        /// Largest accepted amplitude deviation
        #[arg(long, default_value = "1e-9")]
        tolerance: f64,
    },

    /// List available potentials
    List,

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Matrix {
            potential,
            full,
            format,
        } => matrix::execute(&potential, full, &format),

        Commands::Circuit {
            potential,
            time,
            symbolic,
            register,
            qasm2,
            output,
        } => circuit::execute(
            &potential,
            time,
            symbolic.as_deref(),
            &register,
            qasm2,
            output.as_deref(),
        ),

        Commands::Verify {
            potential,
            time,
            tolerance,
        } => verify::execute(&potential, time, tolerance),

        Commands::List => {
            list::execute();
            Ok(())
        }

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
