pub mod oracle;
pub mod simulate;

use colored::Colorize;

use crate::core::gates::LIBRARY;

/// `qstate gates`
pub fn list_gates() {
    println!("{}", "Available gates (name@qubit, two-qubit gates as name@a:b):".bold());
    for (name, about) in LIBRARY {
        println!("  {:<9} {}", name.yellow(), about);
    }
}
