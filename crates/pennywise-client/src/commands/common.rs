use std::path::Path;

use crate::ledger::calendar::{validate_month, validate_year};
use crate::ledger::engine::AggregationEngine;
use crate::ledger::types::User;
use crate::setup::load_setup;
use crate::state::resolve_acting_username;
use crate::store::TransactionStore;
use crate::store::sqlite::SqliteStore;
use crate::{ClientError, ClientResult};

pub type LedgerEngine = AggregationEngine<SqliteStore>;

pub fn open_engine(home_override: Option<&Path>) -> ClientResult<LedgerEngine> {
    let setup = load_setup(home_override)?;
    let store = SqliteStore::open(&setup.db_path)?;
    Ok(AggregationEngine::new(store))
}

/// Resolves the acting user from an explicit name or `PENNYWISE_USER`.
pub fn resolve_user(engine: &LedgerEngine, username: Option<&str>) -> ClientResult<User> {
    let Some(username) = resolve_acting_username(username) else {
        return Err(ClientError::user_required());
    };

    engine
        .store()
        .find_user_by_username(&username)?
        .ok_or_else(|| ClientError::user_not_found(&username))
}

pub(crate) fn validate_period(month: u32, year: i32, command: &str) -> ClientResult<(u32, i32)> {
    Ok((validate_month(month, command)?, validate_year(year, command)?))
}

pub(crate) fn validate_amount(value: f64, field_name: &str, command: &str) -> ClientResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(ClientError::invalid_argument_for_command(
            &format!("`{field_name}` must be a non-negative number (received {value})."),
            Some(command),
        ));
    }
    Ok(value)
}

pub(crate) fn required_text(value: &str, field_name: &str, command: &str) -> ClientResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ClientError::invalid_argument_for_command(
            &format!("`{field_name}` must not be empty."),
            Some(command),
        ));
    }
    Ok(trimmed.to_string())
}
