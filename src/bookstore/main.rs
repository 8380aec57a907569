//! # Bookstore CLI
//!
//! The binary is thin: `src/cli/` owns flags, logging, and the input loop,
//! and this file only invokes `cli::run()` and handles process termination.
//!
//! Commands arrive one per line on stdin. Each successful command prints its
//! result (or nothing) on stdout, each rejected one prints `Invalid`, and
//! `quit`, `exit` or end of input ends the run. Diagnostics go to stderr.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
