use super::{expect_args, CmdResult};
use crate::error::{Rejection, Result};
use crate::model::FinanceSummary;
use crate::state::Bookstore;
use crate::store::DataStore;
use crate::validation::parse_count;

/// `show finance [count]`: totals over the last `count` ledger entries, or
/// the whole ledger. A count of zero yields an empty result; a count longer
/// than the ledger is refused.
pub fn show<S: DataStore>(shop: &mut Bookstore<S>, args: &[String]) -> Result<CmdResult> {
    expect_args(args, 0, 1)?;
    let available = shop.ledger.len();

    let count = match args.first() {
        Some(raw) => parse_count(raw)?,
        None => available,
    };
    if count == 0 && !args.is_empty() {
        return Ok(CmdResult::Finance(None));
    }
    if count > available {
        return Err(Rejection::LedgerTooShort {
            requested: count,
            available,
        }
        .into());
    }

    let window = &shop.ledger[available - count..];
    let summary = FinanceSummary::over(window).ok_or(Rejection::Overflow)?;
    Ok(CmdResult::Finance(Some(summary)))
}

/// `report finance`: totals and profit over the whole ledger.
pub fn report<S: DataStore>(shop: &mut Bookstore<S>) -> Result<CmdResult> {
    let summary = FinanceSummary::over(&shop.ledger).ok_or(Rejection::Overflow)?;
    Ok(CmdResult::FinanceReport(summary))
}
