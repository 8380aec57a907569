use super::CmdResult;
use crate::error::{Rejection, Result};
use crate::parse::{BookOption, OptionKey};
use crate::state::Bookstore;
use crate::store::DataStore;
use crate::validation::{parse_price, validate_book_text, validate_isbn, validate_keywords};
use std::collections::HashSet;

/// `modify -KEY=VALUE...` on the selected book.
///
/// Every option is validated against a working copy first; if any one fails
/// the book is left exactly as it was. An ISBN change is applied last: the
/// book moves to its new key and this frame's selection follows it.
pub fn run<S: DataStore>(shop: &mut Bookstore<S>, args: &[String]) -> Result<CmdResult> {
    let selected = shop.selected_isbn()?;
    if args.is_empty() {
        return Err(Rejection::ArgumentCount.into());
    }

    let mut book = shop.books[&selected].clone();
    let mut seen = HashSet::new();
    let mut new_isbn = None;

    for token in args {
        let option = BookOption::parse(token)?;
        if !seen.insert(option.key) {
            return Err(Rejection::RepeatedOption(option.key.to_string()).into());
        }

        match option.key {
            OptionKey::Isbn => {
                validate_isbn(&option.value)?;
                if option.value == selected {
                    return Err(Rejection::SameIsbn(option.value).into());
                }
                if shop.books.contains_key(&option.value) {
                    return Err(Rejection::DuplicateIsbn(option.value).into());
                }
                new_isbn = Some(option.value);
            }
            OptionKey::Name => {
                validate_book_text(&option.value)?;
                book.name = option.value;
            }
            OptionKey::Author => {
                validate_book_text(&option.value)?;
                book.author = option.value;
            }
            OptionKey::Keyword => {
                validate_keywords(&option.value)?;
                book.keywords = option.value;
            }
            OptionKey::Price => {
                book.price = parse_price(&option.value)?;
            }
        }
    }

    match new_isbn {
        Some(isbn) => {
            tracing::info!(from = %selected, to = %isbn, "ISBN changed");
            shop.books.remove(&selected);
            book.isbn = isbn.clone();
            shop.books.insert(isbn.clone(), book);
            shop.sessions.select(isbn);
        }
        None => {
            tracing::info!(isbn = %selected, "book modified");
            shop.books.insert(selected, book);
        }
    }

    shop.persist_books()?;
    Ok(CmdResult::Silent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::select;
    use crate::commands::test_support::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;
    use rust_decimal::Decimal;

    fn shop_with_selection() -> Bookstore<InMemoryStore> {
        let fixture = StoreFixture::new()
            .with_book("111", Decimal::ONE, 5)
            .with_book("222", Decimal::TEN, 1);
        let mut shop = shop_from(fixture);
        shop.sessions.push("clerk");
        select::run(&mut shop, &args(&["111"])).unwrap();
        shop
    }

    #[test]
    fn applies_all_fields_with_one_write() {
        let mut shop = shop_with_selection();
        run(
            &mut shop,
            &args(&[
                "-name=\"The Dispossessed\"",
                "-author=\"Ursula K. Le Guin\"",
                "-keyword=\"sf|anarchy\"",
                "-price=15.5",
            ]),
        )
        .unwrap();

        let book = &shop.books()["111"];
        assert_eq!(book.name, "The Dispossessed");
        assert_eq!(book.author, "Ursula K. Le Guin");
        assert_eq!(book.keywords, "sf|anarchy");
        assert_eq!(book.price, Decimal::new(155, 1));
        assert_eq!(book.quantity, 5);
        assert_eq!(shop.store().writes().books, 1);
    }

    #[test]
    fn rename_moves_book_and_selection() {
        let mut shop = shop_with_selection();
        run(&mut shop, &args(&["-price=2", "-ISBN=333"])).unwrap();

        assert!(!shop.books().contains_key("111"));
        let moved = &shop.books()["333"];
        assert_eq!(moved.isbn, "333");
        assert_eq!(moved.price, Decimal::new(2, 0));
        assert_eq!(moved.quantity, 5);
        assert_eq!(shop.sessions().current_selection(), Some("333"));
    }

    #[test]
    fn one_bad_option_aborts_everything() {
        let mut shop = shop_with_selection();
        let before = shop.books()["111"].clone();

        for bad in [
            vec!["-name=\"Fine\"", "-keyword=\"a|a\""],
            vec!["-ISBN=444", "-price=1.2.3"],
            vec!["-author=\"Fine\"", "-name=unquoted"],
            vec!["-price=3", "-quantity=4"],
        ] {
            assert!(is_rejected(run(&mut shop, &args(&bad))), "{:?}", bad);
        }

        assert_eq!(shop.books()["111"], before);
        assert!(!shop.books().contains_key("444"));
        assert_eq!(shop.sessions().current_selection(), Some("111"));
        assert_eq!(shop.store().writes().books, 0);
    }

    #[test]
    fn repeated_option_is_rejected() {
        let mut shop = shop_with_selection();
        assert!(is_rejected(run(
            &mut shop,
            &args(&["-price=1", "-price=2"])
        )));
        assert_eq!(shop.books()["111"].price, Decimal::ONE);
    }

    #[test]
    fn isbn_rename_rules() {
        let mut shop = shop_with_selection();
        assert!(is_rejected(run(&mut shop, &args(&["-ISBN=111"]))));
        assert!(is_rejected(run(&mut shop, &args(&["-ISBN=222"]))));
        assert!(is_rejected(run(&mut shop, &args(&["-ISBN="]))));
        assert_eq!(shop.books().len(), 2);
    }

    #[test]
    fn needs_selection_and_arguments() {
        let mut shop = shop_as("clerk");
        assert!(is_rejected(run(&mut shop, &args(&["-price=1"]))));

        let mut shop = shop_with_selection();
        assert!(is_rejected(run(&mut shop, &args(&[]))));
    }

    #[test]
    fn selection_renamed_by_another_frame_is_stale() {
        let mut shop = shop_with_selection();
        shop.sessions.push("root");
        select::run(&mut shop, &args(&["111"])).unwrap();
        run(&mut shop, &args(&["-ISBN=999"])).unwrap();
        shop.sessions.pop();

        assert_eq!(shop.sessions().current_selection(), Some("111"));
        assert!(is_rejected(run(&mut shop, &args(&["-price=1"]))));
        assert_eq!(shop.books()["999"].quantity, 5);
    }
}
