//! Field-level validation for accounts, books and command arguments.
//!
//! Every check is a pure function over the raw argument text. Numeric parsers
//! widen to `i64` before range checking so an oversized argument is refused
//! instead of wrapping.
//!
//! | Field               | Length | Characters                          |
//! |---------------------|--------|-------------------------------------|
//! | user id / password  | 1..=30 | `[A-Za-z0-9_]`                      |
//! | display name        | 1..=30 | ASCII 32..=126                      |
//! | ISBN                | 1..=20 | ASCII 33..=126                      |
//! | name / author       | 1..=60 | ASCII 32..=126 except `"`           |
//! | keyword list        | 1..=60 | as name, `|`-separated, unique      |
//! | price               | 1..=13 | digits, at most one `.`             |
//! | quantity            | 1..=10 | digits, 1..=2147483647              |
//! | count               | 1..=10 | digits, 0..=2147483647              |

use crate::model::{Privilege, KEYWORD_SEPARATOR};
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::str::FromStr;

pub const MAX_USER_ID_LEN: usize = 30;
pub const MAX_USERNAME_LEN: usize = 30;
pub const MAX_ISBN_LEN: usize = 20;
pub const MAX_BOOK_TEXT_LEN: usize = 60;
pub const MAX_PRICE_LEN: usize = 13;
pub const MAX_INTEGER_LEN: usize = 10;

const INT32_MAX: i64 = i32::MAX as i64;

/// Checks a user id: 1 to 30 letters, digits or underscores.
///
/// # Examples
/// ```
/// use bookstore::validation::validate_user_id;
///
/// assert!(validate_user_id("root").is_ok());
/// assert!(validate_user_id("alice_2").is_ok());
///
/// assert!(validate_user_id("").is_err());
/// assert!(validate_user_id("bad-id").is_err());
/// ```
pub fn validate_user_id(s: &str) -> Result<(), ValidationError> {
    check_length(s, MAX_USER_ID_LEN)?;
    check_chars(s, |c| c.is_ascii_alphanumeric() || c == '_')
}

/// Passwords share the user id alphabet.
pub fn validate_password(s: &str) -> Result<(), ValidationError> {
    validate_user_id(s)
}

pub fn validate_username(s: &str) -> Result<(), ValidationError> {
    check_length(s, MAX_USERNAME_LEN)?;
    check_chars(s, is_printable)
}

pub fn validate_isbn(s: &str) -> Result<(), ValidationError> {
    check_length(s, MAX_ISBN_LEN)?;
    check_chars(s, |c| is_printable(c) && c != ' ')
}

/// Book name and author: printable ASCII without double quotes.
pub fn validate_book_text(s: &str) -> Result<(), ValidationError> {
    check_length(s, MAX_BOOK_TEXT_LEN)?;
    check_chars(s, |c| is_printable(c) && c != '"')
}

/// Checks a stored keyword list such as `fiction|classic`.
///
/// Segments must be non-empty and distinct.
pub fn validate_keywords(s: &str) -> Result<(), ValidationError> {
    validate_book_text(s)?;

    let mut seen = HashSet::new();
    for segment in s.split(KEYWORD_SEPARATOR) {
        if segment.is_empty() {
            return Err(ValidationError::EmptyKeyword);
        }
        if !seen.insert(segment) {
            return Err(ValidationError::DuplicateKeyword(segment.to_string()));
        }
    }
    Ok(())
}

/// Checks a single search keyword. Only emptiness and the separator are
/// refused here; stored lists go through [`validate_keywords`].
pub fn validate_keyword_query(s: &str) -> Result<(), ValidationError> {
    if s.is_empty() {
        return Err(ValidationError::Empty);
    }
    if s.contains(KEYWORD_SEPARATOR) {
        return Err(ValidationError::InvalidCharacter(KEYWORD_SEPARATOR));
    }
    Ok(())
}

/// Parses a non-negative price or cost such as `12`, `12.5` or `.99`.
pub fn parse_price(s: &str) -> Result<Decimal, ValidationError> {
    check_length(s, MAX_PRICE_LEN)?;
    check_chars(s, |c| c.is_ascii_digit() || c == '.')?;

    let (whole, fraction) = match s.split_once('.') {
        Some((w, f)) => (w, f),
        None => (s, ""),
    };
    if fraction.contains('.') {
        return Err(ValidationError::MultipleDecimalPoints);
    }
    if whole.is_empty() && fraction.is_empty() {
        return Err(ValidationError::NoDigits);
    }

    let whole = if whole.is_empty() { "0" } else { whole };
    let normalized = if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, fraction)
    };
    Decimal::from_str(&normalized).map_err(|_| ValidationError::NoDigits)
}

/// Parses a strictly positive quantity that fits a signed 32-bit integer.
pub fn parse_quantity(s: &str) -> Result<u32, ValidationError> {
    let value = parse_wide_integer(s)?;
    if value < 1 || value > INT32_MAX {
        return Err(ValidationError::OutOfRange(value));
    }
    Ok(value as u32)
}

/// Parses a ledger entry count; zero is allowed.
pub fn parse_count(s: &str) -> Result<usize, ValidationError> {
    let value = parse_wide_integer(s)?;
    if value > INT32_MAX {
        return Err(ValidationError::OutOfRange(value));
    }
    Ok(value as usize)
}

/// Parses a privilege argument: exactly one of `1`, `3` or `7`.
pub fn parse_privilege(s: &str) -> Result<Privilege, ValidationError> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_digit() => Privilege::from_level(c as u8 - b'0')
            .filter(|p| *p != Privilege::Guest)
            .ok_or_else(|| ValidationError::InvalidPrivilege(s.to_string())),
        _ => Err(ValidationError::InvalidPrivilege(s.to_string())),
    }
}

fn parse_wide_integer(s: &str) -> Result<i64, ValidationError> {
    check_length(s, MAX_INTEGER_LEN)?;
    check_chars(s, |c| c.is_ascii_digit())?;
    // At most ten digits, always fits in i64.
    s.parse::<i64>().map_err(|_| ValidationError::NoDigits)
}

fn check_length(s: &str, max: usize) -> Result<(), ValidationError> {
    if s.is_empty() {
        return Err(ValidationError::Empty);
    }
    if s.len() > max {
        return Err(ValidationError::TooLong { max, len: s.len() });
    }
    Ok(())
}

fn check_chars(s: &str, allowed: impl Fn(char) -> bool) -> Result<(), ValidationError> {
    match s.chars().find(|c| !allowed(*c)) {
        Some(c) => Err(ValidationError::InvalidCharacter(c)),
        None => Ok(()),
    }
}

fn is_printable(c: char) -> bool {
    matches!(c, ' '..='~')
}

/// Error type for field validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Value is empty
    Empty,
    /// Value exceeds the field width
    TooLong { max: usize, len: usize },
    /// Value contains a character outside the field's alphabet
    InvalidCharacter(char),
    /// Keyword list has an empty segment
    EmptyKeyword,
    /// Keyword list repeats a segment
    DuplicateKeyword(String),
    /// Price has more than one decimal point
    MultipleDecimalPoints,
    /// Numeric value has no digits
    NoDigits,
    /// Integer outside the accepted range
    OutOfRange(i64),
    /// Privilege is not one of 1, 3, 7
    InvalidPrivilege(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Empty => write!(f, "value cannot be empty"),
            ValidationError::TooLong { max, len } => {
                write!(f, "value is {} characters, limit is {}", len, max)
            }
            ValidationError::InvalidCharacter(ch) => {
                write!(f, "value contains invalid character {:?}", ch)
            }
            ValidationError::EmptyKeyword => write!(f, "keyword list has an empty keyword"),
            ValidationError::DuplicateKeyword(kw) => {
                write!(f, "keyword list repeats '{}'", kw)
            }
            ValidationError::MultipleDecimalPoints => {
                write!(f, "number has more than one decimal point")
            }
            ValidationError::NoDigits => write!(f, "number has no digits"),
            ValidationError::OutOfRange(v) => write!(f, "{} is out of range", v),
            ValidationError::InvalidPrivilege(p) => write!(f, "'{}' is not a privilege level", p),
        }
    }
}

impl std::error::Error for ValidationError {}
