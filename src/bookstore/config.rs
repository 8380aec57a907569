use crate::error::{BookstoreError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

/// Store layout, read from `<data dir>/config.json` when present.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct BookstoreConfig {
    #[serde(default = "default_accounts_file")]
    pub accounts_file: String,

    #[serde(default = "default_books_file")]
    pub books_file: String,

    #[serde(default = "default_transactions_file")]
    pub transactions_file: String,
}

fn default_accounts_file() -> String {
    "accounts.dat".to_string()
}

fn default_books_file() -> String {
    "books.dat".to_string()
}

fn default_transactions_file() -> String {
    "transactions.dat".to_string()
}

impl Default for BookstoreConfig {
    fn default() -> Self {
        Self {
            accounts_file: default_accounts_file(),
            books_file: default_books_file(),
            transactions_file: default_transactions_file(),
        }
    }
}

impl BookstoreConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(BookstoreError::Io)?;
        let config: BookstoreConfig =
            serde_json::from_str(&content).map_err(BookstoreError::Serialization)?;
        config.check()?;
        Ok(config)
    }

    /// File names must be plain, distinct names inside the data directory.
    fn check(&self) -> Result<()> {
        let names = [
            &self.accounts_file,
            &self.books_file,
            &self.transactions_file,
        ];
        for name in names {
            if name.is_empty() || name.contains(['/', '\\']) || name == CONFIG_FILENAME {
                return Err(BookstoreError::Store(format!(
                    "invalid data file name in {}: {:?}",
                    CONFIG_FILENAME, name
                )));
            }
        }
        if names[0] == names[1] || names[1] == names[2] || names[0] == names[2] {
            return Err(BookstoreError::Store(format!(
                "data file names in {} must be distinct",
                CONFIG_FILENAME
            )));
        }
        Ok(())
    }
}
