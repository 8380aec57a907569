use super::CmdResult;
use crate::error::Result;
use crate::state::Bookstore;
use crate::store::DataStore;

pub fn employees<S: DataStore>(shop: &mut Bookstore<S>) -> Result<CmdResult> {
    Ok(CmdResult::EmployeeReport {
        employees: shop.accounts.len(),
    })
}

pub fn log<S: DataStore>(shop: &mut Bookstore<S>) -> Result<CmdResult> {
    Ok(CmdResult::SystemLog {
        transactions: shop.ledger.len(),
    })
}
