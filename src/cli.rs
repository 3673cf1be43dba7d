// File: ./src/cli.rs
//! Shared command-line interface logic, like printing help and rendering
//! command results.
use crate::command::{CommandResult, ResultType, all_usages};
use crate::model::display::render_table;

pub fn print_help(binary_name: &str) {
    println!(
        "InternTrack v{} - Keep track of internship applications and their events",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [--root <path>] [--verbose]", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and data.");
    println!("    -v, --verbose         Write debug output to the log file.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("Commands are read line by line from standard input. Type `help` at the");
    println!("prompt for the list of commands, and `exit` to save and quit.");
}

/// Text shown after a command ran: the feedback line, then whatever view
/// the result carries.
pub fn render(result: &CommandResult) -> String {
    let mut out = result.feedback.clone();
    match result.kind {
        ResultType::ShowHelp => {
            for usage in all_usages() {
                out.push_str("\n\n");
                out.push_str(usage);
            }
        }
        ResultType::ShowInfo => {
            if let Some(selected) = &result.selected {
                out.push_str(&format!("\n\n{}", selected));
            }
            if let Some(events) = &result.events {
                out.push_str(&format!("\n\n{}", render_table(events)));
            }
        }
        ResultType::ShowInternships => {
            if let Some(internships) = &result.internships {
                out.push_str(&format!("\n\n{}", render_table(internships)));
            }
        }
        ResultType::FindEvents => {
            if let Some(events) = &result.events {
                out.push_str(&format!("\n\n{}", render_table(events)));
            }
        }
        ResultType::Exit => {}
    }
    out
}
