//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - potential-energy operators for quantum circuits",
        style("qpot").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qpot-ir           Circuit intermediate representation");
    println!("  qpot-qasm3        OpenQASM 2.0 / 3.0 emitter");
    println!("  qpot-statevector  Statevector verification engine");
    println!("  qpot-potentials   Potential operators and phase synthesis");
    println!("  qpot-cli          Command-line interface");
    println!();
    println!("License:    {}", style(env!("CARGO_PKG_LICENSE")).dim());
}
