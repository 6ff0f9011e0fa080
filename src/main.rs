//! aeroreg CLI entry point
//!
//! Parses arguments, dispatches to CLI commands, prints errors to
//! stderr and exits non-zero on failure. All subsystem wiring lives in
//! the CLI module; main stays free of configuration and I/O.

use aeroreg::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
