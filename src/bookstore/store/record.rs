//! Fixed-width binary records.
//!
//! Each entity encodes to a constant number of bytes so a file is simply the
//! concatenation of its records. Integers are little-endian, decimals use the
//! 16-byte `rust_decimal` encoding, and strings are ASCII padded with NUL up
//! to the field width. A string ends at its first NUL or at the width.
//!
//! ```text
//! Account      user_id[30] password[30] username[30] privilege[1]          =  91
//! Book         isbn[20] name[60] author[60] keywords[60] price[16] qty[8]  = 224
//! Transaction  amount[16] kind[1]                                          =  17
//! ```

use crate::model::{Account, Book, Privilege, Transaction, TransactionKind};
use crate::validation::{MAX_BOOK_TEXT_LEN, MAX_ISBN_LEN, MAX_USERNAME_LEN, MAX_USER_ID_LEN};
use rust_decimal::Decimal;
use thiserror::Error;

const DECIMAL_WIDTH: usize = 16;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct DecodeError(pub String);

pub trait Record: Sized {
    const SIZE: usize;

    fn encode(&self, out: &mut RecordWriter<'_>);

    fn decode(input: &mut RecordReader<'_>) -> Result<Self, DecodeError>;
}

/// Encodes every record back to back.
pub fn encode_all<'a, T: Record + 'a>(records: impl IntoIterator<Item = &'a T>) -> Vec<u8> {
    let mut bytes = Vec::new();
    for record in records {
        let start = bytes.len();
        bytes.resize(start + T::SIZE, 0);
        let mut writer = RecordWriter::new(&mut bytes[start..]);
        record.encode(&mut writer);
    }
    bytes
}

/// Decodes consecutive records. Returns the records and the number of
/// trailing bytes that did not form a whole record.
pub fn decode_all<T: Record>(bytes: &[u8]) -> Result<(Vec<T>, usize), DecodeError> {
    let chunks = bytes.chunks_exact(T::SIZE);
    let trailing = chunks.remainder().len();
    let records = chunks
        .map(|chunk| T::decode(&mut RecordReader::new(chunk)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((records, trailing))
}

pub struct RecordWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> RecordWriter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn take(&mut self, width: usize) -> &mut [u8] {
        let field = &mut self.buf[self.pos..self.pos + width];
        self.pos += width;
        field
    }

    /// Writes `s` NUL-padded to `width`. Longer input is cut at the width.
    pub fn string(&mut self, s: &str, width: usize) {
        let field = self.take(width);
        let len = s.len().min(width);
        field[..len].copy_from_slice(&s.as_bytes()[..len]);
        field[len..].fill(0);
    }

    pub fn u8(&mut self, value: u8) {
        self.take(1)[0] = value;
    }

    pub fn u64(&mut self, value: u64) {
        self.take(8).copy_from_slice(&value.to_le_bytes());
    }

    pub fn decimal(&mut self, value: Decimal) {
        self.take(DECIMAL_WIDTH).copy_from_slice(&value.serialize());
    }
}

pub struct RecordReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> RecordReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn take(&mut self, width: usize) -> Result<&'a [u8], DecodeError> {
        let end = self.pos + width;
        let field = self
            .buf
            .get(self.pos..end)
            .ok_or_else(|| DecodeError(format!("record shorter than {} bytes", end)))?;
        self.pos = end;
        Ok(field)
    }

    pub fn string(&mut self, width: usize) -> Result<String, DecodeError> {
        let field = self.take(width)?;
        let len = field.iter().position(|b| *b == 0).unwrap_or(width);
        let text = &field[..len];
        if !text.is_ascii() {
            return Err(DecodeError("string field is not ASCII".to_string()));
        }
        Ok(text.iter().map(|b| *b as char).collect())
    }

    pub fn u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }

    pub fn u64(&mut self) -> Result<u64, DecodeError> {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(self.take(8)?);
        Ok(u64::from_le_bytes(raw))
    }

    pub fn decimal(&mut self) -> Result<Decimal, DecodeError> {
        let mut raw = [0u8; DECIMAL_WIDTH];
        raw.copy_from_slice(self.take(DECIMAL_WIDTH)?);
        Ok(Decimal::deserialize(raw))
    }
}

impl Record for Account {
    const SIZE: usize = MAX_USER_ID_LEN * 2 + MAX_USERNAME_LEN + 1;

    fn encode(&self, out: &mut RecordWriter<'_>) {
        out.string(&self.user_id, MAX_USER_ID_LEN);
        out.string(&self.password, MAX_USER_ID_LEN);
        out.string(&self.username, MAX_USERNAME_LEN);
        out.u8(self.privilege.level());
    }

    fn decode(input: &mut RecordReader<'_>) -> Result<Self, DecodeError> {
        let user_id = input.string(MAX_USER_ID_LEN)?;
        let password = input.string(MAX_USER_ID_LEN)?;
        let username = input.string(MAX_USERNAME_LEN)?;
        let level = input.u8()?;
        let privilege = Privilege::from_level(level)
            .filter(|p| *p != Privilege::Guest)
            .ok_or_else(|| DecodeError(format!("unknown privilege level {}", level)))?;
        if user_id.is_empty() {
            return Err(DecodeError("account without user id".to_string()));
        }
        Ok(Account {
            user_id,
            password,
            username,
            privilege,
        })
    }
}

impl Record for Book {
    const SIZE: usize = MAX_ISBN_LEN + MAX_BOOK_TEXT_LEN * 3 + DECIMAL_WIDTH + 8;

    fn encode(&self, out: &mut RecordWriter<'_>) {
        out.string(&self.isbn, MAX_ISBN_LEN);
        out.string(&self.name, MAX_BOOK_TEXT_LEN);
        out.string(&self.author, MAX_BOOK_TEXT_LEN);
        out.string(&self.keywords, MAX_BOOK_TEXT_LEN);
        out.decimal(self.price);
        out.u64(self.quantity);
    }

    fn decode(input: &mut RecordReader<'_>) -> Result<Self, DecodeError> {
        let book = Book {
            isbn: input.string(MAX_ISBN_LEN)?,
            name: input.string(MAX_BOOK_TEXT_LEN)?,
            author: input.string(MAX_BOOK_TEXT_LEN)?,
            keywords: input.string(MAX_BOOK_TEXT_LEN)?,
            price: input.decimal()?,
            quantity: input.u64()?,
        };
        if book.isbn.is_empty() {
            return Err(DecodeError("book without ISBN".to_string()));
        }
        Ok(book)
    }
}

impl Record for Transaction {
    const SIZE: usize = DECIMAL_WIDTH + 1;

    fn encode(&self, out: &mut RecordWriter<'_>) {
        out.decimal(self.amount);
        out.u8(match self.kind {
            TransactionKind::Income => 1,
            TransactionKind::Expenditure => 0,
        });
    }

    fn decode(input: &mut RecordReader<'_>) -> Result<Self, DecodeError> {
        let amount = input.decimal()?;
        let kind = match input.u8()? {
            1 => TransactionKind::Income,
            0 => TransactionKind::Expenditure,
            other => return Err(DecodeError(format!("unknown transaction kind {}", other))),
        };
        Ok(Transaction { amount, kind })
    }
}
