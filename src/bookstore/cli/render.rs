//! Output text for each outcome. Layout lives here and nowhere else.

use bookstore::api::Outcome;
use bookstore::commands::CmdResult;
use bookstore::model::format_money;

/// Printed for every rejected command.
pub const INVALID_MARKER: &str = "Invalid";

/// Lines to print for `outcome`, without trailing newlines. An empty vector
/// prints nothing; `vec![""]` prints one blank line.
pub fn render(outcome: &Outcome) -> Vec<String> {
    match outcome {
        Outcome::Skip | Outcome::Quit => Vec::new(),
        Outcome::Rejected(_) => vec![INVALID_MARKER.to_string()],
        Outcome::Done(result) => render_result(result),
    }
}

fn render_result(result: &CmdResult) -> Vec<String> {
    match result {
        CmdResult::Silent => Vec::new(),
        CmdResult::Books(books) if books.is_empty() => vec![String::new()],
        CmdResult::Books(books) => books.iter().map(|b| b.to_string()).collect(),
        CmdResult::SaleTotal(total) => vec![format_money(*total)],
        CmdResult::Finance(None) => vec![String::new()],
        CmdResult::Finance(Some(summary)) => vec![format!(
            "+ {} - {}",
            format_money(summary.income),
            format_money(summary.expenditure)
        )],
        CmdResult::FinanceReport(summary) => vec![
            "=== Financial Report ===".to_string(),
            format!("Total Income: {}", format_money(summary.income)),
            format!("Total Expenditure: {}", format_money(summary.expenditure)),
            format!("Net Profit: {}", format_money(summary.profit())),
        ],
        CmdResult::EmployeeReport { employees } => vec![
            "=== Employee Work Report ===".to_string(),
            format!("Total employees: {}", employees),
        ],
        CmdResult::SystemLog { transactions } => vec![
            "=== System Log ===".to_string(),
            format!("Total transactions: {}", transactions),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookstore::error::Rejection;
    use bookstore::model::{Book, FinanceSummary};
    use rust_decimal::Decimal;

    fn done(result: CmdResult) -> Vec<String> {
        render(&Outcome::Done(result))
    }

    #[test]
    fn silent_outcomes_print_nothing() {
        assert!(render(&Outcome::Skip).is_empty());
        assert!(render(&Outcome::Quit).is_empty());
        assert!(done(CmdResult::Silent).is_empty());
    }

    #[test]
    fn rejections_print_marker() {
        assert_eq!(
            render(&Outcome::Rejected(Rejection::WrongPassword)),
            vec!["Invalid"]
        );
    }

    #[test]
    fn books_are_tab_separated() {
        let mut book = Book::blank("978-7");
        book.name = "Dune".to_string();
        book.author = "Frank Herbert".to_string();
        book.keywords = "sf|classic".to_string();
        book.price = Decimal::new(995, 2);
        book.quantity = 3;

        assert_eq!(
            done(CmdResult::Books(vec![book, Book::blank("978-8")])),
            vec![
                "978-7\tDune\tFrank Herbert\tsf|classic\t9.95\t3",
                "978-8\t\t\t\t0.00\t0",
            ]
        );
    }

    #[test]
    fn empty_listing_is_one_blank_line() {
        assert_eq!(done(CmdResult::Books(Vec::new())), vec![""]);
        assert_eq!(done(CmdResult::Finance(None)), vec![""]);
    }

    #[test]
    fn money_has_two_decimals() {
        assert_eq!(
            done(CmdResult::SaleTotal(Decimal::new(24, 0))),
            vec!["24.00"]
        );
        assert_eq!(
            done(CmdResult::Finance(Some(FinanceSummary {
                income: Decimal::new(1005, 3),
                expenditure: Decimal::new(3, 1),
            }))),
            vec!["+ 1.01 - 0.30"]
        );
    }

    #[test]
    fn reports() {
        let summary = FinanceSummary {
            income: Decimal::new(50, 0),
            expenditure: Decimal::new(80, 0),
        };
        assert_eq!(
            done(CmdResult::FinanceReport(summary)),
            vec![
                "=== Financial Report ===",
                "Total Income: 50.00",
                "Total Expenditure: 80.00",
                "Net Profit: -30.00",
            ]
        );
        assert_eq!(
            done(CmdResult::EmployeeReport { employees: 2 }),
            vec!["=== Employee Work Report ===", "Total employees: 2"]
        );
        assert_eq!(
            done(CmdResult::SystemLog { transactions: 0 }),
            vec!["=== System Log ===", "Total transactions: 0"]
        );
    }
}
