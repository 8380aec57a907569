//! Process-wide state: the three entity collections, the login stack, and the
//! store they persist to.
//!
//! Commands mutate the collections directly and then call the matching
//! `persist_*` method, which rewrites that whole set through the store.
//! Accounts and books live in `BTreeMap`s so iteration is ordered by key,
//! byte-wise, which is also the order `show` prints in.

use crate::error::{Rejection, Result};
use crate::model::{Account, Book, Privilege, Transaction, ROOT_USER_ID};
use crate::session::SessionStack;
use crate::store::DataStore;
use std::collections::BTreeMap;

pub struct Bookstore<S: DataStore> {
    store: S,
    pub(crate) accounts: BTreeMap<String, Account>,
    pub(crate) books: BTreeMap<String, Book>,
    pub(crate) ledger: Vec<Transaction>,
    pub(crate) sessions: SessionStack,
}

impl<S: DataStore> Bookstore<S> {
    /// Loads every collection and creates the bootstrap account if missing.
    pub fn open(store: S) -> Result<Self> {
        let accounts = keyed(store.load_accounts()?, |a| a.user_id.clone(), "account");
        let books = keyed(store.load_books()?, |b| b.isbn.clone(), "book");
        let ledger = store.load_transactions()?;

        let mut shop = Self {
            store,
            accounts,
            books,
            ledger,
            sessions: SessionStack::new(),
        };

        if !shop.accounts.contains_key(ROOT_USER_ID) {
            tracing::info!("creating bootstrap account '{}'", ROOT_USER_ID);
            let root = Account::bootstrap();
            shop.accounts.insert(root.user_id.clone(), root);
            shop.persist_accounts()?;
        }

        tracing::info!(
            accounts = shop.accounts.len(),
            books = shop.books.len(),
            transactions = shop.ledger.len(),
            "bookstore opened"
        );
        Ok(shop)
    }

    pub fn privilege(&self) -> Privilege {
        self.sessions.current_privilege(&self.accounts)
    }

    /// Fails unless the current login has at least `required` privilege.
    pub fn require(&self, required: Privilege) -> Result<()> {
        let current = self.privilege();
        if current < required {
            return Err(Rejection::InsufficientPrivilege { required, current }.into());
        }
        Ok(())
    }

    /// ISBN selected in the top frame, if it still names a book.
    pub fn selected_isbn(&self) -> Result<String> {
        let isbn = self
            .sessions
            .current_selection()
            .ok_or(Rejection::NoSelection)?;
        if !self.books.contains_key(isbn) {
            return Err(Rejection::UnknownBook(isbn.to_string()).into());
        }
        Ok(isbn.to_string())
    }

    pub fn accounts(&self) -> &BTreeMap<String, Account> {
        &self.accounts
    }

    pub fn books(&self) -> &BTreeMap<String, Book> {
        &self.books
    }

    pub fn ledger(&self) -> &[Transaction] {
        &self.ledger
    }

    pub fn sessions(&self) -> &SessionStack {
        &self.sessions
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub(crate) fn persist_accounts(&mut self) -> Result<()> {
        let accounts: Vec<Account> = self.accounts.values().cloned().collect();
        self.store.save_accounts(&accounts)
    }

    pub(crate) fn persist_books(&mut self) -> Result<()> {
        let books: Vec<Book> = self.books.values().cloned().collect();
        self.store.save_books(&books)
    }

    pub(crate) fn persist_ledger(&mut self) -> Result<()> {
        self.store.save_transactions(&self.ledger)
    }
}

fn keyed<T>(records: Vec<T>, key: impl Fn(&T) -> String, kind: &str) -> BTreeMap<String, T> {
    let mut map = BTreeMap::new();
    for record in records {
        if map.insert(key(&record), record).is_some() {
            tracing::warn!("duplicate {} record on disk, keeping the later one", kind);
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;
    use rust_decimal::Decimal;

    #[test]
    fn open_creates_root_once() {
        let shop = Bookstore::open(InMemoryStore::new()).unwrap();
        assert_eq!(shop.accounts()[ROOT_USER_ID], Account::bootstrap());
        assert_eq!(shop.store().writes().accounts, 1);
        assert_eq!(shop.privilege(), Privilege::Guest);
    }

    #[test]
    fn open_keeps_existing_root() {
        let fixture = StoreFixture::new().with_account("root", "changed", Privilege::Owner);
        let shop = Bookstore::open(fixture.store).unwrap();
        assert_eq!(shop.accounts()["root"].password, "changed");
        assert_eq!(shop.store().writes().accounts, 0);
    }

    #[test]
    fn open_loads_all_collections() {
        let fixture = StoreFixture::new()
            .with_book("2", Decimal::ONE, 1)
            .with_book("1", Decimal::ONE, 1)
            .with_transaction(Transaction::income(Decimal::TEN));
        let shop = Bookstore::open(fixture.store).unwrap();
        let isbns: Vec<&String> = shop.books().keys().collect();
        assert_eq!(isbns, vec!["1", "2"]);
        assert_eq!(shop.ledger().len(), 1);
    }

    #[test]
    fn require_compares_against_top_frame() {
        let mut shop = Bookstore::open(InMemoryStore::new()).unwrap();
        assert!(shop.require(Privilege::Guest).is_ok());
        assert!(shop.require(Privilege::Customer).is_err());
        shop.sessions.push("root");
        assert!(shop.require(Privilege::Owner).is_ok());
    }

    #[test]
    fn selected_isbn_requires_existing_book() {
        let fixture = StoreFixture::new().with_book("1", Decimal::ONE, 1);
        let mut shop = Bookstore::open(fixture.store).unwrap();
        shop.sessions.push("root");
        assert!(shop.selected_isbn().is_err());
        shop.sessions.select("1");
        assert_eq!(shop.selected_isbn().unwrap(), "1");
        shop.sessions.select("missing");
        assert!(shop.selected_isbn().is_err());
    }
}
