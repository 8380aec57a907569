use super::{expect_args, CmdResult};
use crate::error::{Rejection, Result};
use crate::model::Book;
use crate::parse::{BookOption, OptionKey};
use crate::state::Bookstore;
use crate::store::DataStore;
use crate::validation::{validate_book_text, validate_isbn, validate_keyword_query};

/// What `show` filters on. A keyword filter matches one whole keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookFilter {
    All,
    Isbn(String),
    Name(String),
    Author(String),
    Keyword(String),
}

impl BookFilter {
    pub fn parse(args: &[String]) -> Result<Self> {
        expect_args(args, 0, 1)?;
        let Some(token) = args.first() else {
            return Ok(BookFilter::All);
        };

        let option = BookOption::parse(token)?;
        let filter = match option.key {
            OptionKey::Isbn => {
                validate_isbn(&option.value)?;
                BookFilter::Isbn(option.value)
            }
            OptionKey::Name => {
                validate_book_text(&option.value)?;
                BookFilter::Name(option.value)
            }
            OptionKey::Author => {
                validate_book_text(&option.value)?;
                BookFilter::Author(option.value)
            }
            OptionKey::Keyword => {
                validate_keyword_query(&option.value)?;
                BookFilter::Keyword(option.value)
            }
            OptionKey::Price => return Err(Rejection::MalformedOption(token.clone()).into()),
        };
        Ok(filter)
    }

    pub fn matches(&self, book: &Book) -> bool {
        match self {
            BookFilter::All => true,
            BookFilter::Isbn(isbn) => &book.isbn == isbn,
            BookFilter::Name(name) => &book.name == name,
            BookFilter::Author(author) => &book.author == author,
            BookFilter::Keyword(keyword) => book.has_keyword(keyword),
        }
    }
}

/// `show [-ISBN=… | -name="…" | -author="…" | -keyword="…"]`
pub fn run<S: DataStore>(shop: &mut Bookstore<S>, args: &[String]) -> Result<CmdResult> {
    let filter = BookFilter::parse(args)?;
    // BTreeMap iteration is already ISBN order
    let books = shop
        .books
        .values()
        .filter(|b| filter.matches(b))
        .cloned()
        .collect();
    Ok(CmdResult::Books(books))
}
