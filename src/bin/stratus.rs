//! Stratus CLI Binary
//!
//! Command-line interface for the cloud provider API.

use std::process;

fn main() {
    let registrar = match stratus::command::command_tree() {
        Ok(registrar) => registrar,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(stratus::error::EXIT_FAILURE);
        }
    };

    process::exit(registrar.dispatch(std::env::args_os()));
}
