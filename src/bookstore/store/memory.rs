use super::DataStore;
use crate::error::{BookstoreError, Result};
use crate::model::{Account, Book, Transaction};

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    accounts: Vec<Account>,
    books: Vec<Book>,
    ledger: Vec<Transaction>,
    writes: WriteCounts,
    simulate_write_error: bool,
}

/// How many times each collection has been rewritten.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WriteCounts {
    pub accounts: usize,
    pub books: usize,
    pub transactions: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> WriteCounts {
        self.writes
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&mut self, simulate: bool) {
        self.simulate_write_error = simulate;
    }

    fn check_writable(&self) -> Result<()> {
        if self.simulate_write_error {
            return Err(BookstoreError::Store("simulated write error".to_string()));
        }
        Ok(())
    }
}

impl DataStore for InMemoryStore {
    fn load_accounts(&self) -> Result<Vec<Account>> {
        Ok(self.accounts.clone())
    }

    fn save_accounts(&mut self, accounts: &[Account]) -> Result<()> {
        self.check_writable()?;
        self.accounts = accounts.to_vec();
        self.writes.accounts += 1;
        Ok(())
    }

    fn load_books(&self) -> Result<Vec<Book>> {
        Ok(self.books.clone())
    }

    fn save_books(&mut self, books: &[Book]) -> Result<()> {
        self.check_writable()?;
        self.books = books.to_vec();
        self.writes.books += 1;
        Ok(())
    }

    fn load_transactions(&self) -> Result<Vec<Transaction>> {
        Ok(self.ledger.clone())
    }

    fn save_transactions(&mut self, ledger: &[Transaction]) -> Result<()> {
        self.check_writable()?;
        self.ledger = ledger.to_vec();
        self.writes.transactions += 1;
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::Privilege;
    use rust_decimal::Decimal;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_account(mut self, user_id: &str, password: &str, privilege: Privilege) -> Self {
            self.store
                .accounts
                .push(Account::new(user_id, password, user_id, privilege));
            self
        }

        pub fn with_book(mut self, isbn: &str, price: Decimal, quantity: u64) -> Self {
            let mut book = Book::blank(isbn);
            book.price = price;
            book.quantity = quantity;
            self.store.books.push(book);
            self
        }

        pub fn with_transaction(mut self, transaction: Transaction) -> Self {
            self.store.ledger.push(transaction);
            self
        }
    }
}
