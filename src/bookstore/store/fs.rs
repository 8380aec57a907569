use super::record::{decode_all, encode_all, Record};
use super::DataStore;
use crate::config::BookstoreConfig;
use crate::error::{BookstoreError, Result};
use crate::model::{Account, Book, Transaction};
use std::fs;
use std::path::PathBuf;

/// File-backed store: one binary file per entity set under `root`.
pub struct FileStore {
    root: PathBuf,
    accounts_file: String,
    books_file: String,
    transactions_file: String,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self::with_config(root, &BookstoreConfig::default())
    }

    pub fn with_config(root: PathBuf, config: &BookstoreConfig) -> Self {
        Self {
            root,
            accounts_file: config.accounts_file.clone(),
            books_file: config.books_file.clone(),
            transactions_file: config.transactions_file.clone(),
        }
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(BookstoreError::Io)?;
        }
        Ok(())
    }

    fn load<T: Record>(&self, file_name: &str) -> Result<Vec<T>> {
        let path = self.root.join(file_name);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let bytes = fs::read(&path).map_err(BookstoreError::Io)?;
        let (records, trailing) =
            decode_all::<T>(&bytes).map_err(|e| BookstoreError::CorruptRecord {
                file: path.display().to_string(),
                reason: e.to_string(),
            })?;
        if trailing > 0 {
            tracing::warn!(
                file = %path.display(),
                trailing,
                "ignoring partial record at end of file"
            );
        }
        tracing::debug!(file = %path.display(), count = records.len(), "loaded records");
        Ok(records)
    }

    fn save<T: Record>(&self, file_name: &str, records: &[T]) -> Result<()> {
        self.ensure_dir()?;
        let target = self.root.join(file_name);
        let bytes = encode_all(records);

        // Write to a sibling then rename so the file is never half written
        let tmp = self.root.join(format!(".{}.tmp", file_name));
        fs::write(&tmp, bytes).map_err(BookstoreError::Io)?;
        fs::rename(&tmp, &target).map_err(BookstoreError::Io)?;
        tracing::debug!(file = %target.display(), count = records.len(), "saved records");
        Ok(())
    }
}

impl DataStore for FileStore {
    fn load_accounts(&self) -> Result<Vec<Account>> {
        self.load(&self.accounts_file)
    }

    fn save_accounts(&mut self, accounts: &[Account]) -> Result<()> {
        self.save(&self.accounts_file, accounts)
    }

    fn load_books(&self) -> Result<Vec<Book>> {
        self.load(&self.books_file)
    }

    fn save_books(&mut self, books: &[Book]) -> Result<()> {
        self.save(&self.books_file, books)
    }

    fn load_transactions(&self) -> Result<Vec<Transaction>> {
        self.load(&self.transactions_file)
    }

    fn save_transactions(&mut self, ledger: &[Transaction]) -> Result<()> {
        self.save(&self.transactions_file, ledger)
    }
}
