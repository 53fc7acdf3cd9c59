//! List command implementation.

use console::style;

use qpot_potentials::registered_potentials;

/// Execute the list command.
pub fn execute() {
    println!("{}", style("Available potentials:").bold());
    println!();

    for info in registered_potentials() {
        println!("  {} {}", style("✓").green(), style(info.name).cyan().bold());
        println!("    {}", info.description);
        println!("    Parameters: {}", style(info.parameters.join(", ")).dim());
        println!();
    }
}
