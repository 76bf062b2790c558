/// ujihisa command-line interpreter
///
/// Runs, disassembles or tokenizes programs written in the three ujihisa
/// keywords and line breaks.

use ujihisa_core::cli;

fn main() {
    if let Err(e) = cli::run_cli() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
