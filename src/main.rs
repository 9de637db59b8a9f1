//! randonaut CLI entry point
//!
//! Quantum random attractor point generator

use randonaut::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
