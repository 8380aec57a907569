//! # Bookstore Architecture
//!
//! A bookstore engine driven by line-oriented commands: accounts with
//! privilege levels, nested logins, an inventory, and a ledger of sales and
//! restocks, all persisted as fixed-size binary records.
//!
//! It is a library first. The binary in `main.rs` is one client of it.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Flags, data directory, logging setup                     │
//! │  - Reads stdin, renders outcomes to stdout                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - One raw line in, one `Outcome` out                       │
//! │  - Folds rejections into outcomes                           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Privilege table, validation, business rules              │
//! │  - Mutates `Bookstore` state, returns `CmdResult`           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - `DataStore` trait, fixed-width record codec              │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O in the Core
//!
//! From `api.rs` inward nothing prints, exits, or assumes a terminal. The
//! store is the only thing that touches the filesystem, and it is a trait
//! so command tests run entirely in memory.
//!
//! ## Testing Strategy
//!
//! 1. **Commands**: most of the testing lives next to each command, against
//!    `InMemoryStore` fixtures.
//! 2. **API**: line handling, rejection folding, error propagation.
//! 3. **CLI**: rendering of each `CmdResult`, plus end-to-end runs of the
//!    binary in `tests/`.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade; entry point for all operations
//! - [`commands`]: Command table and one module per command family
//! - [`state`]: In-memory collections and the login stack
//! - [`session`]: The login stack itself
//! - [`parse`]: Line tokenizer and `-KEY=VALUE` options
//! - [`validation`]: Field syntax rules and numeric parsing
//! - [`model`]: Accounts, books, transactions, privileges
//! - [`store`]: Storage abstraction and implementations
//! - [`config`]: Data file names
//! - [`error`]: Error types
//! - `cli`: Flags, logging setup, the input loop and output rendering (binary only)

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod parse;
pub mod session;
pub mod state;
pub mod store;
pub mod validation;
