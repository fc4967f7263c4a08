use std::path::Path;

use crate::commands::common::{open_engine, required_text, resolve_user};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{UserData, UserListData};
use crate::store::TransactionStore;
use crate::{ClientError, ClientResult};

#[derive(Debug, Default)]
pub struct UserRegisterOptions<'a> {
    pub username: String,
    pub email: String,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct UserShowOptions<'a> {
    pub user: Option<String>,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct UserListOptions<'a> {
    pub home_override: Option<&'a Path>,
}

pub fn register(options: UserRegisterOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let command = "user register";
    let username = required_text(&options.username, "username", command)?;
    let email = required_text(&options.email, "email", command)?;
    if !email.contains('@') {
        return Err(ClientError::invalid_argument_for_command(
            "`email` must look like an email address.",
            Some(command),
        ));
    }

    let mut engine = open_engine(options.home_override)?;
    if engine.store().find_user_by_username(&username)?.is_some() {
        return Err(ClientError::user_exists("username", &username));
    }
    if engine.store().find_user_by_email(&email)?.is_some() {
        return Err(ClientError::user_exists("email", &email));
    }

    let user = engine.store_mut().insert_user(&username, &email)?;
    success(command, UserData { user })
}

pub fn show(options: UserShowOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let engine = open_engine(options.home_override)?;
    let user = resolve_user(&engine, options.user.as_deref())?;
    success("user show", UserData { user })
}

pub fn list(options: UserListOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let engine = open_engine(options.home_override)?;
    let rows = engine.store().list_users()?;
    success("user list", UserListData { rows })
}
