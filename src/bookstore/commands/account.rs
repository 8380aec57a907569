use super::{expect_args, CmdResult};
use crate::error::{Rejection, Result};
use crate::model::{Account, Privilege};
use crate::state::Bookstore;
use crate::store::DataStore;
use crate::validation::{parse_privilege, validate_password, validate_user_id, validate_username};

/// `register <user-id> <password> <username>`: self sign-up as a customer.
pub fn register<S: DataStore>(shop: &mut Bookstore<S>, args: &[String]) -> Result<CmdResult> {
    expect_args(args, 3, 3)?;
    let account = Account::new(&args[0], &args[1], &args[2], Privilege::Customer);
    insert_account(shop, account)
}

/// `useradd <user-id> <password> <privilege> <username>`
///
/// The new account must rank strictly below the invoker.
pub fn useradd<S: DataStore>(shop: &mut Bookstore<S>, args: &[String]) -> Result<CmdResult> {
    expect_args(args, 4, 4)?;
    let privilege = parse_privilege(&args[2])?;

    let current = shop.privilege();
    if privilege >= current {
        return Err(Rejection::PrivilegeEscalation {
            requested: privilege,
            current,
        }
        .into());
    }

    let account = Account::new(&args[0], &args[1], &args[3], privilege);
    insert_account(shop, account)
}

fn insert_account<S: DataStore>(shop: &mut Bookstore<S>, account: Account) -> Result<CmdResult> {
    validate_user_id(&account.user_id)?;
    validate_password(&account.password)?;
    validate_username(&account.username)?;

    if shop.accounts.contains_key(&account.user_id) {
        return Err(Rejection::DuplicateUser(account.user_id).into());
    }

    tracing::info!(
        user = %account.user_id,
        privilege = %account.privilege,
        "account created"
    );
    shop.accounts.insert(account.user_id.clone(), account);
    shop.persist_accounts()?;
    Ok(CmdResult::Silent)
}

/// `passwd <user-id> [current-password] <new-password>`
///
/// Owners may leave out the current password. Anyone else must supply it and
/// it must match.
pub fn passwd<S: DataStore>(shop: &mut Bookstore<S>, args: &[String]) -> Result<CmdResult> {
    expect_args(args, 2, 3)?;
    let user_id = &args[0];
    let (current_password, new_password) = if args.len() == 3 {
        (Some(&args[1]), &args[2])
    } else {
        (None, &args[1])
    };

    validate_user_id(user_id)?;
    validate_password(new_password)?;
    if let Some(current) = current_password {
        validate_password(current)?;
    }

    let is_owner = shop.privilege() == Privilege::Owner;
    let account = shop
        .accounts
        .get_mut(user_id)
        .ok_or_else(|| Rejection::UnknownUser(user_id.clone()))?;

    if !is_owner && current_password != Some(&account.password) {
        return Err(Rejection::WrongPassword.into());
    }

    account.password = new_password.clone();
    tracing::info!(user = %user_id, "password changed");
    shop.persist_accounts()?;
    Ok(CmdResult::Silent)
}

/// `delete <user-id>`: refused while the user is anywhere on the login stack.
pub fn delete<S: DataStore>(shop: &mut Bookstore<S>, args: &[String]) -> Result<CmdResult> {
    expect_args(args, 1, 1)?;
    let user_id = &args[0];
    validate_user_id(user_id)?;

    if !shop.accounts.contains_key(user_id) {
        return Err(Rejection::UnknownUser(user_id.clone()).into());
    }
    if shop.sessions.is_logged_in(user_id) {
        return Err(Rejection::UserLoggedIn(user_id.clone()).into());
    }

    shop.accounts.remove(user_id);
    tracing::info!(user = %user_id, "account deleted");
    shop.persist_accounts()?;
    Ok(CmdResult::Silent)
}
