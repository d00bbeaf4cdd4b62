//! List rules command implementation.

use loglint_rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules (evaluated in this order):\n");
    println!("{:<8} {:<18} {:<9} Description", "Code", "ID", "Severity");
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        println!(
            "{:<8} {:<18} {:<9} {}",
            rule.code(),
            rule.name(),
            rule.default_severity().to_string(),
            rule.description()
        );
    }

    println!("\nUse --rules to run a subset, by ID or code:");
    println!("  loglint check --rules lowercase,sensitive");
    println!("  loglint check --rules LL004,LL005");
}
