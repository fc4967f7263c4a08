use std::path::Path;

use crate::ClientResult;
use crate::commands::common::{open_engine, resolve_user, validate_period};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{
    CategoryReportData, DailyReportData, TrendReportData, YearlyReportData,
};
use crate::ledger::calendar::validate_year;

#[derive(Debug, Default)]
pub struct ReportMonthOptions<'a> {
    pub user: Option<String>,
    pub month: u32,
    pub year: i32,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct ReportYearOptions<'a> {
    pub user: Option<String>,
    pub year: i32,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct ReportTrendOptions<'a> {
    pub user: Option<String>,
    pub home_override: Option<&'a Path>,
}

pub fn monthly(options: ReportMonthOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let command = "report monthly";
    let (month, year) = validate_period(options.month, options.year, command)?;
    let engine = open_engine(options.home_override)?;
    let user = resolve_user(&engine, options.user.as_deref())?;
    let summary = engine.monthly_summary(&user.user_id, month, year)?;
    success(command, summary)
}

pub fn categories(options: ReportMonthOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let command = "report categories";
    let (month, year) = validate_period(options.month, options.year, command)?;
    let engine = open_engine(options.home_override)?;
    let user = resolve_user(&engine, options.user.as_deref())?;
    let rows = engine.category_breakdown(&user.user_id, month, year)?;
    success(command, CategoryReportData { month, year, rows })
}

pub fn daily(options: ReportMonthOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let command = "report daily";
    let (month, year) = validate_period(options.month, options.year, command)?;
    let engine = open_engine(options.home_override)?;
    let user = resolve_user(&engine, options.user.as_deref())?;
    let rows = engine.daily_series(&user.user_id, month, year)?;
    success(command, DailyReportData { month, year, rows })
}

pub fn yearly(options: ReportYearOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let command = "report yearly";
    let year = validate_year(options.year, command)?;
    let engine = open_engine(options.home_override)?;
    let user = resolve_user(&engine, options.user.as_deref())?;
    let rows = engine.yearly_series(&user.user_id, year)?;
    success(command, YearlyReportData { year, rows })
}

pub fn trend(options: ReportTrendOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let engine = open_engine(options.home_override)?;
    let user = resolve_user(&engine, options.user.as_deref())?;
    let rows = engine.multi_year_trend(&user.user_id)?;
    success("report trend", TrendReportData { rows })
}
