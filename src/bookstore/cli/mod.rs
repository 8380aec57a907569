//! # CLI Behavior
//!
//! The only place that knows about stdin, stdout, stderr and exit codes.
//! For the overall architecture, see the crate-level docs of the library.
//!
//! ## Data Directory
//!
//! Where the three data files live, first match wins:
//!
//! 1. `--data-dir <PATH>`
//! 2. `BOOKSTORE_HOME` environment variable
//! 3. `--global`: the per-user data directory
//! 4. the current working directory
//!
//! ## Streams
//!
//! stdout carries command output and nothing else. Logs go to stderr,
//! filtered by `RUST_LOG` or, without it, by `--verbose`.
//!
//! ## Module Structure
//!
//! - `commands`: Context setup and the input loop
//! - `render`: Turns outcomes into output lines
//! - `setup`: Argument parsing via clap

mod commands;
mod render;
pub mod setup;

pub use commands::run;
