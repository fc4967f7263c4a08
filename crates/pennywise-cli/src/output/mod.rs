mod error_text;
mod format;
mod json;
mod ledger_text;
mod mode;
mod report_text;

use std::io;

use pennywise_client::{ClientError, SuccessEnvelope};

use crate::stdout_io::write_stdout_line;

pub use mode::{OutputMode, mode_for_command};

pub fn print_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(success)?,
        OutputMode::Json => json::render_success_json(success)?,
    };
    write_stdout_line(&body)
}

pub fn print_failure(error: &ClientError, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Json => json::render_error_json(error)?,
        OutputMode::Text => error_text::render_error(error),
    };
    write_stdout_line(&body)
}

fn render_text_success(success: &SuccessEnvelope) -> io::Result<String> {
    let data = &success.data;
    match success.command.as_str() {
        "user register" | "user show" => ledger_text::render_user(&success.command, data),
        "user list" => ledger_text::render_user_list(data),
        "txn add" | "txn update" => ledger_text::render_transaction(&success.command, data),
        "txn list" => ledger_text::render_transaction_list(data),
        "txn delete" => ledger_text::render_transaction_delete(data),
        "budget set" | "budget show" => ledger_text::render_budget(data),
        "budget status" => report_text::render_budget_status(data),
        "report monthly" => report_text::render_monthly(data),
        "report categories" => report_text::render_categories(data),
        "report daily" => report_text::render_daily(data),
        "report yearly" => report_text::render_yearly(data),
        "report trend" => report_text::render_trend(data),
        _ => Err(io::Error::other(format!(
            "unsupported text output command `{}`",
            success.command
        ))),
    }
}
