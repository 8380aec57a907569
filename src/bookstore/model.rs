use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;

pub const KEYWORD_SEPARATOR: char = '|';

/// Access level of an account. Ordering follows the numeric level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Privilege {
    /// No one logged in
    Guest,
    Customer,
    Clerk,
    Owner,
}

impl Privilege {
    pub fn level(self) -> u8 {
        match self {
            Privilege::Guest => 0,
            Privilege::Customer => 1,
            Privilege::Clerk => 3,
            Privilege::Owner => 7,
        }
    }

    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            0 => Some(Privilege::Guest),
            1 => Some(Privilege::Customer),
            3 => Some(Privilege::Clerk),
            7 => Some(Privilege::Owner),
            _ => None,
        }
    }
}

impl fmt::Display for Privilege {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.level())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub user_id: String,
    pub password: String,
    pub username: String,
    pub privilege: Privilege,
}

impl Account {
    pub fn new(
        user_id: impl Into<String>,
        password: impl Into<String>,
        username: impl Into<String>,
        privilege: Privilege,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            password: password.into(),
            username: username.into(),
            privilege,
        }
    }

    /// The account created on first run.
    pub fn bootstrap() -> Self {
        Self::new(ROOT_USER_ID, "sjtu", "root", Privilege::Owner)
    }
}

pub const ROOT_USER_ID: &str = "root";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub isbn: String,
    pub name: String,
    pub author: String,
    /// `|`-separated keyword list, possibly empty
    pub keywords: String,
    pub price: Decimal,
    pub quantity: u64,
}

impl Book {
    /// A book that exists only by ISBN; every other field is blank.
    pub fn blank(isbn: impl Into<String>) -> Self {
        Self {
            isbn: isbn.into(),
            name: String::new(),
            author: String::new(),
            keywords: String::new(),
            price: Decimal::ZERO,
            quantity: 0,
        }
    }

    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.keywords
            .split(KEYWORD_SEPARATOR)
            .any(|kw| kw == keyword)
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}",
            self.isbn,
            self.name,
            self.author,
            self.keywords,
            format_money(self.price),
            self.quantity
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    /// Money in from a sale
    Income,
    /// Money out for restocking
    Expenditure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transaction {
    pub amount: Decimal,
    pub kind: TransactionKind,
}

impl Transaction {
    pub fn income(amount: Decimal) -> Self {
        Self {
            amount,
            kind: TransactionKind::Income,
        }
    }

    pub fn expenditure(amount: Decimal) -> Self {
        Self {
            amount,
            kind: TransactionKind::Expenditure,
        }
    }
}

/// Income and expenditure totals over some run of ledger entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FinanceSummary {
    pub income: Decimal,
    pub expenditure: Decimal,
}

impl FinanceSummary {
    /// Sums `entries`. `None` if either total leaves the decimal range.
    pub fn over<'a>(entries: impl IntoIterator<Item = &'a Transaction>) -> Option<Self> {
        let mut summary = Self::default();
        for entry in entries {
            let total = match entry.kind {
                TransactionKind::Income => &mut summary.income,
                TransactionKind::Expenditure => &mut summary.expenditure,
            };
            *total = total.checked_add(entry.amount)?;
        }
        Some(summary)
    }

    pub fn profit(&self) -> Decimal {
        self.income - self.expenditure
    }
}

/// Renders an amount with exactly two fraction digits.
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}
