use std::path::Path;

use crate::ClientResult;
use crate::commands::common::{open_engine, resolve_user, validate_amount, validate_period};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{BudgetData, BudgetShowData};

#[derive(Debug, Default)]
pub struct BudgetSetOptions<'a> {
    pub user: Option<String>,
    pub month: u32,
    pub year: i32,
    pub amount: f64,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct BudgetPeriodOptions<'a> {
    pub user: Option<String>,
    pub month: u32,
    pub year: i32,
    pub home_override: Option<&'a Path>,
}

pub fn set(options: BudgetSetOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let command = "budget set";
    let (month, year) = validate_period(options.month, options.year, command)?;
    let amount = validate_amount(options.amount, "amount", command)?;
    let mut engine = open_engine(options.home_override)?;
    let user = resolve_user(&engine, options.user.as_deref())?;
    let budget = engine.upsert_budget(&user.user_id, month, year, amount)?;
    success(command, BudgetData { budget })
}

pub fn show(options: BudgetPeriodOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let command = "budget show";
    let (month, year) = validate_period(options.month, options.year, command)?;
    let engine = open_engine(options.home_override)?;
    let user = resolve_user(&engine, options.user.as_deref())?;
    let budget = engine.get_budget(&user.user_id, month, year)?;
    success(
        command,
        BudgetShowData {
            month,
            year,
            budget,
        },
    )
}

pub fn status(options: BudgetPeriodOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let command = "budget status";
    let (month, year) = validate_period(options.month, options.year, command)?;
    let engine = open_engine(options.home_override)?;
    let user = resolve_user(&engine, options.user.as_deref())?;
    let status = engine.budget_status(&user.user_id, month, year)?;
    success(command, status)
}
