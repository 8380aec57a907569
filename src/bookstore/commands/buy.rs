use super::{expect_args, CmdResult};
use crate::error::{Rejection, Result};
use crate::model::Transaction;
use crate::state::Bookstore;
use crate::store::DataStore;
use crate::validation::{parse_quantity, validate_isbn};
use rust_decimal::Decimal;

/// `buy <ISBN> <quantity>`: sells from stock and books the income.
///
/// The whole purchase is refused if stock is short.
pub fn run<S: DataStore>(shop: &mut Bookstore<S>, args: &[String]) -> Result<CmdResult> {
    expect_args(args, 2, 2)?;
    let isbn = &args[0];
    validate_isbn(isbn)?;
    let quantity = u64::from(parse_quantity(&args[1])?);

    let book = shop
        .books
        .get_mut(isbn)
        .ok_or_else(|| Rejection::UnknownBook(isbn.clone()))?;
    if book.quantity < quantity {
        return Err(Rejection::InsufficientStock {
            requested: quantity,
            available: book.quantity,
        }
        .into());
    }
    let total = book
        .price
        .checked_mul(Decimal::from(quantity))
        .ok_or(Rejection::Overflow)?;

    book.quantity -= quantity;
    shop.ledger.push(Transaction::income(total));
    tracing::info!(isbn = %isbn, quantity, total = %total, "sale");

    shop.persist_books()?;
    shop.persist_ledger()?;
    Ok(CmdResult::SaleTotal(total))
}
