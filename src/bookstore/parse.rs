//! Line tokenizer and the `-KEY=VALUE` option grammar used by `show` and
//! `modify`.
//!
//! Tokens are separated by spaces outside double quotes. Quote characters are
//! kept in the token, so `-name="Dune Messiah"` arrives as a single token and
//! the option parser decides what the quotes mean.

use crate::error::Rejection;
use std::fmt;

/// Splits a command line into tokens.
///
/// # Examples
/// ```
/// use bookstore::parse::tokenize;
///
/// assert_eq!(tokenize("  buy 978-0  3 "), vec!["buy", "978-0", "3"]);
/// assert_eq!(
///     tokenize(r#"modify -name="Dune Messiah" -price=9.5"#),
///     vec!["modify", r#"-name="Dune Messiah""#, "-price=9.5"]
/// );
/// ```
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.trim().chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                current.push(c);
            }
            ' ' if !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OptionKey {
    Isbn,
    Name,
    Author,
    Keyword,
    Price,
}

impl OptionKey {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "ISBN" => Some(OptionKey::Isbn),
            "name" => Some(OptionKey::Name),
            "author" => Some(OptionKey::Author),
            "keyword" => Some(OptionKey::Keyword),
            "price" => Some(OptionKey::Price),
            _ => None,
        }
    }

    /// Name, author and keyword values must be written in quotes.
    pub fn needs_quotes(self) -> bool {
        matches!(self, OptionKey::Name | OptionKey::Author | OptionKey::Keyword)
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OptionKey::Isbn => "ISBN",
            OptionKey::Name => "name",
            OptionKey::Author => "author",
            OptionKey::Keyword => "keyword",
            OptionKey::Price => "price",
        };
        write!(f, "-{}", name)
    }
}

/// One parsed `-KEY=VALUE` option. `value` is the inner text for quoted keys
/// and the raw text otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookOption {
    pub key: OptionKey,
    pub value: String,
}

impl BookOption {
    pub fn parse(token: &str) -> Result<Self, Rejection> {
        let malformed = || Rejection::MalformedOption(token.to_string());

        let body = token.strip_prefix('-').ok_or_else(malformed)?;
        let (name, raw) = body.split_once('=').ok_or_else(malformed)?;
        let key = OptionKey::from_name(name).ok_or_else(malformed)?;

        let value = if key.needs_quotes() {
            unquote(raw).ok_or_else(malformed)?
        } else {
            raw
        };
        Ok(Self {
            key,
            value: value.to_string(),
        })
    }
}

/// Inner text of `"..."`; `None` unless quoted with at least one inner char.
fn unquote(raw: &str) -> Option<&str> {
    raw.strip_prefix('"')
        .and_then(|r| r.strip_suffix('"'))
        .filter(|inner| !inner.is_empty())
}
