//! # Login Stack
//!
//! Logins nest: `su` pushes a frame and `logout` pops it, restoring the
//! previous login exactly as it was. Only the top frame is consulted for
//! privilege checks and book selection.
//!
//! Each frame owns its own selection. A frame starts with nothing selected,
//! and popping a frame discards whatever it had selected; frames below are
//! never affected by `select` in a frame above them.

use crate::model::{Account, Privilege};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    /// ISBN picked by `select` in this frame
    pub selection: Option<String>,
}

impl Session {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            selection: None,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct SessionStack {
    frames: Vec<Session>,
}

impl SessionStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, user_id: impl Into<String>) {
        self.frames.push(Session::new(user_id));
    }

    pub fn pop(&mut self) -> Option<Session> {
        self.frames.pop()
    }

    pub fn top(&self) -> Option<&Session> {
        self.frames.last()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn current_user(&self) -> Option<&str> {
        self.top().map(|s| s.user_id.as_str())
    }

    pub fn current_selection(&self) -> Option<&str> {
        self.top().and_then(|s| s.selection.as_deref())
    }

    /// Sets the top frame's selection. Returns false if no one is logged in.
    pub fn select(&mut self, isbn: impl Into<String>) -> bool {
        match self.frames.last_mut() {
            Some(frame) => {
                frame.selection = Some(isbn.into());
                true
            }
            None => false,
        }
    }

    /// True if any frame, not just the top one, belongs to `user_id`.
    pub fn is_logged_in(&self, user_id: &str) -> bool {
        self.frames.iter().any(|s| s.user_id == user_id)
    }

    /// Privilege of the top frame's account, or `Guest` when empty.
    pub fn current_privilege(&self, accounts: &BTreeMap<String, Account>) -> Privilege {
        self.current_user()
            .and_then(|id| accounts.get(id))
            .map(|a| a.privilege)
            .unwrap_or(Privilege::Guest)
    }
}
