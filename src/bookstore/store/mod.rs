//! # Storage Layer
//!
//! The [`DataStore`] trait is the persistence boundary for the three entity
//! sets. Collections are loaded whole at startup and written back whole after
//! any mutation of that set, so the trait deals in complete collections rather
//! than single records.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production storage, one fixed-width binary file per
//!   entity set (see [`record`] for the layout).
//! - [`memory::InMemoryStore`]: No persistence, used by unit tests.
//!
//! ## Storage Format
//!
//! ```text
//! <data dir>/
//! ├── accounts.dat        # Account records, sorted by user id
//! ├── books.dat           # Book records, sorted by ISBN
//! ├── transactions.dat    # Ledger records, in append order
//! └── config.json         # Optional file name overrides
//! ```

use crate::error::Result;
use crate::model::{Account, Book, Transaction};

pub mod fs;
pub mod memory;
pub mod record;

/// Abstract interface for entity persistence.
pub trait DataStore {
    fn load_accounts(&self) -> Result<Vec<Account>>;

    /// Replace every stored account
    fn save_accounts(&mut self, accounts: &[Account]) -> Result<()>;

    fn load_books(&self) -> Result<Vec<Book>>;

    /// Replace every stored book
    fn save_books(&mut self, books: &[Book]) -> Result<()>;

    fn load_transactions(&self) -> Result<Vec<Transaction>>;

    /// Replace the stored ledger
    fn save_transactions(&mut self, ledger: &[Transaction]) -> Result<()>;
}
