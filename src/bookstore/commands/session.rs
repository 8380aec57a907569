use super::{expect_args, CmdResult};
use crate::error::{Rejection, Result};
use crate::state::Bookstore;
use crate::store::DataStore;
use crate::validation::{validate_password, validate_user_id};

/// `su <user-id> [password]`
///
/// The password may be omitted when the current login strictly outranks the
/// target account. Otherwise it must match exactly.
pub fn su<S: DataStore>(shop: &mut Bookstore<S>, args: &[String]) -> Result<CmdResult> {
    expect_args(args, 1, 2)?;
    let user_id = &args[0];
    let password = args.get(1);

    validate_user_id(user_id)?;
    if let Some(password) = password {
        validate_password(password)?;
    }

    let account = shop
        .accounts
        .get(user_id)
        .ok_or_else(|| Rejection::UnknownUser(user_id.clone()))?;

    if shop.privilege() <= account.privilege && password != Some(&account.password) {
        return Err(Rejection::WrongPassword.into());
    }

    shop.sessions.push(user_id.clone());
    tracing::info!(user = %user_id, depth = shop.sessions.len(), "login");
    Ok(CmdResult::Silent)
}

/// `logout`: pops the top login. Extra arguments are ignored.
pub fn logout<S: DataStore>(shop: &mut Bookstore<S>) -> Result<CmdResult> {
    let session = shop.sessions.pop().ok_or(Rejection::EmptySession)?;
    tracing::info!(user = %session.user_id, depth = shop.sessions.len(), "logout");
    Ok(CmdResult::Silent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::*;
    use crate::model::Privilege;

    #[test]
    fn guest_needs_password_for_everyone() {
        let mut shop = shop();
        assert!(is_rejected(su(&mut shop, &args(&["alice"]))));
        assert!(is_rejected(su(&mut shop, &args(&["alice", "wrong"]))));
        assert!(is_rejected(su(&mut shop, &args(&["root"]))));
        su(&mut shop, &args(&["alice", "alicepw"])).unwrap();
        assert_eq!(shop.sessions().current_user(), Some("alice"));
    }

    #[test]
    fn higher_privilege_skips_password() {
        let mut shop = shop_as("root");
        su(&mut shop, &args(&["clerk"])).unwrap();
        assert_eq!(shop.privilege(), Privilege::Clerk);
        su(&mut shop, &args(&["alice"])).unwrap();
        assert_eq!(shop.privilege(), Privilege::Customer);
    }

    #[test]
    fn higher_privilege_ignores_wrong_password() {
        let mut shop = shop_as("root");
        su(&mut shop, &args(&["alice", "nope"])).unwrap();
        assert_eq!(shop.sessions().current_user(), Some("alice"));
    }

    #[test]
    fn equal_privilege_needs_password() {
        let mut shop = shop_as("root");
        assert!(is_rejected(su(&mut shop, &args(&["root"]))));
        su(&mut shop, &args(&["root", "sjtu"])).unwrap();
        assert_eq!(shop.sessions().len(), 2);
    }

    #[test]
    fn rejects_unknown_and_malformed() {
        let mut shop = shop_as("root");
        assert!(is_rejected(su(&mut shop, &args(&["ghost"]))));
        assert!(is_rejected(su(&mut shop, &args(&["bad-id"]))));
        assert!(is_rejected(su(&mut shop, &args(&["alice", "bad pw"]))));
        assert!(is_rejected(su(&mut shop, &args(&[]))));
        assert!(is_rejected(su(&mut shop, &args(&["alice", "a", "b"]))));
        assert_eq!(shop.sessions().len(), 1);
    }

    #[test]
    fn logout_restores_previous_login() {
        let mut shop = shop_as("root");
        su(&mut shop, &args(&["alice"])).unwrap();
        logout(&mut shop).unwrap();
        assert_eq!(shop.sessions().current_user(), Some("root"));
        logout(&mut shop).unwrap();
        assert!(is_rejected(logout(&mut shop)));
    }
}
