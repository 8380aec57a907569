use super::{expect_args, CmdResult};
use crate::error::{Rejection, Result};
use crate::model::Book;
use crate::state::Bookstore;
use crate::store::DataStore;
use crate::validation::validate_isbn;

/// `select <ISBN>`: makes the book current for `modify` and `import`,
/// creating a blank one if the ISBN is new.
pub fn run<S: DataStore>(shop: &mut Bookstore<S>, args: &[String]) -> Result<CmdResult> {
    expect_args(args, 1, 1)?;
    let isbn = &args[0];
    validate_isbn(isbn)?;

    if shop.sessions.is_empty() {
        return Err(Rejection::EmptySession.into());
    }

    if !shop.books.contains_key(isbn) {
        tracing::info!(isbn = %isbn, "new blank book");
        shop.books.insert(isbn.clone(), Book::blank(isbn.clone()));
        shop.persist_books()?;
    }

    shop.sessions.select(isbn.clone());
    Ok(CmdResult::Silent)
}
