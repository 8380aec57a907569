//! # Command Layer
//!
//! One module per command family. Every command follows the same order:
//!
//! 1. Privilege check against [`CommandKind::min_privilege`] (done here, in
//!    [`run`], before the handler sees its arguments)
//! 2. Argument count and syntax
//! 3. Lookups and business rules
//! 4. Mutation of the in-memory collections
//! 5. Persistence of each touched collection
//!
//! Steps 1 to 3 never mutate anything, so a rejected command leaves no trace.

use crate::error::{Rejection, Result};
use crate::model::{Book, FinanceSummary, Privilege};
use crate::state::Bookstore;
use crate::store::DataStore;
use rust_decimal::Decimal;

pub mod account;
pub mod buy;
pub mod finance;
pub mod import;
pub mod modify;
pub mod report;
pub mod select;
pub mod session;
pub mod show;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Su,
    Logout,
    Register,
    Passwd,
    Useradd,
    Delete,
    Show,
    ShowFinance,
    Buy,
    Select,
    Modify,
    Import,
    ReportFinance,
    ReportEmployee,
    Log,
    Quit,
}

impl CommandKind {
    /// Lowest privilege allowed to invoke the command.
    pub fn min_privilege(self) -> Privilege {
        match self {
            CommandKind::Su | CommandKind::Register | CommandKind::Quit => Privilege::Guest,
            CommandKind::Logout
            | CommandKind::Passwd
            | CommandKind::Show
            | CommandKind::Buy => Privilege::Customer,
            CommandKind::Useradd
            | CommandKind::Select
            | CommandKind::Modify
            | CommandKind::Import => Privilege::Clerk,
            CommandKind::Delete
            | CommandKind::ShowFinance
            | CommandKind::ReportFinance
            | CommandKind::ReportEmployee
            | CommandKind::Log => Privilege::Owner,
        }
    }
}

/// A command keyword resolved to its kind, with the remaining arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub kind: CommandKind,
    pub args: Vec<String>,
}

impl Invocation {
    /// Resolves tokens to a command. `None` for an empty token list.
    ///
    /// `show finance` and the `report` pair are two-word commands; `report`
    /// takes exactly one sub-keyword and nothing else.
    pub fn from_tokens(tokens: &[String]) -> Result<Option<Self>> {
        let Some((name, rest)) = tokens.split_first() else {
            return Ok(None);
        };
        let args = rest.to_vec();

        let (kind, args) = match name.as_str() {
            "quit" | "exit" => (CommandKind::Quit, args),
            "su" => (CommandKind::Su, args),
            "logout" => (CommandKind::Logout, args),
            "register" => (CommandKind::Register, args),
            "passwd" => (CommandKind::Passwd, args),
            "useradd" => (CommandKind::Useradd, args),
            "delete" => (CommandKind::Delete, args),
            "show" if rest.first().map(String::as_str) == Some("finance") => {
                (CommandKind::ShowFinance, args[1..].to_vec())
            }
            "show" => (CommandKind::Show, args),
            "buy" => (CommandKind::Buy, args),
            "select" => (CommandKind::Select, args),
            "modify" => (CommandKind::Modify, args),
            "import" => (CommandKind::Import, args),
            "log" => (CommandKind::Log, args),
            "report" => match rest {
                [sub] if sub == "finance" => (CommandKind::ReportFinance, Vec::new()),
                [sub] if sub == "employee" => (CommandKind::ReportEmployee, Vec::new()),
                [_] => return Err(Rejection::UnknownCommand(tokens.join(" ")).into()),
                _ => return Err(Rejection::ArgumentCount.into()),
            },
            other => return Err(Rejection::UnknownCommand(other.to_string()).into()),
        };
        Ok(Some(Self { kind, args }))
    }
}

/// What a successful command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CmdResult {
    /// Nothing to print
    Silent,
    /// `show`: matching books in ISBN order
    Books(Vec<Book>),
    /// `buy`: what the customer paid
    SaleTotal(Decimal),
    /// `show finance`: `None` when a zero-length window was asked for
    Finance(Option<FinanceSummary>),
    FinanceReport(FinanceSummary),
    EmployeeReport { employees: usize },
    SystemLog { transactions: usize },
}

/// Checks the privilege table, then hands off to the command's handler.
pub fn run<S: DataStore>(
    shop: &mut Bookstore<S>,
    kind: CommandKind,
    args: &[String],
) -> Result<CmdResult> {
    shop.require(kind.min_privilege())?;

    match kind {
        CommandKind::Su => session::su(shop, args),
        CommandKind::Logout => session::logout(shop),
        CommandKind::Register => account::register(shop, args),
        CommandKind::Passwd => account::passwd(shop, args),
        CommandKind::Useradd => account::useradd(shop, args),
        CommandKind::Delete => account::delete(shop, args),
        CommandKind::Show => show::run(shop, args),
        CommandKind::ShowFinance => finance::show(shop, args),
        CommandKind::Buy => buy::run(shop, args),
        CommandKind::Select => select::run(shop, args),
        CommandKind::Modify => modify::run(shop, args),
        CommandKind::Import => import::run(shop, args),
        CommandKind::ReportFinance => finance::report(shop),
        CommandKind::ReportEmployee => report::employees(shop),
        CommandKind::Log => report::log(shop),
        CommandKind::Quit => Ok(CmdResult::Silent),
    }
}

/// Rejects unless `args` has between `min` and `max` entries.
pub(crate) fn expect_args(args: &[String], min: usize, max: usize) -> Result<()> {
    if args.len() < min || args.len() > max {
        return Err(Rejection::ArgumentCount.into());
    }
    Ok(())
}
