// SPDX-License-Identifier: Apache-2.0

use colored::Colorize;

/// Prints `message` (plus any `details` key/value lines) to stderr and exits
/// with status 1.
pub fn report_cli_error_and_exit(message: &str, op: Option<&str>, details: Vec<(&str, &str)>) -> ! {
    let op_str = if let Some(op) = op {
        format!("{}: ", op)
    } else {
        String::new()
    };
    eprintln!("adder-lower: {}{}", op_str, message.red().bold());
    for (key, value) in details {
        eprintln!("  {}: {}", key, value);
    }
    std::process::exit(1);
}
