//! # API Facade
//!
//! The single entry point for driving a bookstore, whatever the front end.
//! [`BookstoreApi::execute`] takes one raw command line and returns an
//! [`Outcome`]; it never writes to stdout or stderr.
//!
//! Business rejections are ordinary outcomes here, not errors: the caller
//! prints a marker and carries on. Only storage failures come back as `Err`,
//! and those are meant to end the session.
//!
//! Storage failures are the one way a session ends besides `quit`, `exit`
//! and end of input.
//!
//! ## Generic Over DataStore
//!
//! - Production: `BookstoreApi<FileStore>`
//! - Testing: `BookstoreApi<InMemoryStore>`

use crate::commands::{self, CmdResult, CommandKind, Invocation};
use crate::error::{BookstoreError, Rejection, Result};
use crate::parse::tokenize;
use crate::state::Bookstore;
use crate::store::DataStore;

/// What one input line amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Blank line, nothing to do
    Skip,
    /// `quit` or `exit`
    Quit,
    Done(CmdResult),
    Rejected(Rejection),
}

pub struct BookstoreApi<S: DataStore> {
    shop: Bookstore<S>,
}

impl<S: DataStore> BookstoreApi<S> {
    pub fn open(store: S) -> Result<Self> {
        Ok(Self {
            shop: Bookstore::open(store)?,
        })
    }

    /// Tokenizes and runs one command line.
    pub fn execute(&mut self, line: &str) -> Result<Outcome> {
        let tokens = tokenize(line);
        let invocation = match Invocation::from_tokens(&tokens) {
            Ok(Some(invocation)) => invocation,
            Ok(None) => return Ok(Outcome::Skip),
            Err(e) => return settle(line, Err(e)),
        };

        if invocation.kind == CommandKind::Quit {
            return Ok(Outcome::Quit);
        }
        settle(line, self.invoke(invocation.kind, &invocation.args))
    }

    /// Runs an already-resolved command, privilege check included.
    pub fn invoke(&mut self, kind: CommandKind, args: &[String]) -> Result<CmdResult> {
        commands::run(&mut self.shop, kind, args)
    }

    pub fn bookstore(&self) -> &Bookstore<S> {
        &self.shop
    }
}

/// Folds a rejection into an outcome; anything else stays an error.
fn settle(line: &str, result: Result<CmdResult>) -> Result<Outcome> {
    match result {
        Ok(output) => Ok(Outcome::Done(output)),
        Err(BookstoreError::Rejected(reason)) => {
            tracing::debug!(line = line.trim(), %reason, "rejected");
            Ok(Outcome::Rejected(reason))
        }
        Err(e) => {
            tracing::error!(line = line.trim(), error = %e, "command failed");
            Err(e)
        }
    }
}
