use super::{expect_args, CmdResult};
use crate::error::{Rejection, Result};
use crate::model::Transaction;
use crate::state::Bookstore;
use crate::store::DataStore;
use crate::validation::{parse_price, parse_quantity};

/// `import <quantity> <total-cost>`: restocks the selected book and books the
/// cost as an expenditure. The total must be strictly positive.
pub fn run<S: DataStore>(shop: &mut Bookstore<S>, args: &[String]) -> Result<CmdResult> {
    let selected = shop.selected_isbn()?;
    expect_args(args, 2, 2)?;
    let quantity = u64::from(parse_quantity(&args[0])?);
    let total = parse_price(&args[1])?;
    if total.is_zero() {
        return Err(Rejection::NonPositiveTotal.into());
    }

    let book = shop
        .books
        .get_mut(&selected)
        .ok_or_else(|| Rejection::UnknownBook(selected.clone()))?;
    book.quantity = book
        .quantity
        .checked_add(quantity)
        .ok_or(Rejection::Overflow)?;

    shop.ledger.push(Transaction::expenditure(total));
    tracing::info!(isbn = %selected, quantity, total = %total, "restock");

    shop.persist_books()?;
    shop.persist_ledger()?;
    Ok(CmdResult::Silent)
}
