use std::io;

use pennywise_client::ledger::calendar::month_name;
use serde_json::Value;

use super::format::{self, Column, key_value_rows, money_field, rows_of, text_field};

/// "March 2025" from a payload carrying `month` and `year`.
pub fn period_label(data: &Value) -> String {
    let month = data
        .get("month")
        .and_then(Value::as_u64)
        .and_then(|value| u32::try_from(value).ok())
        .and_then(month_name)
        .unwrap_or("Unknown month");
    format!("{month} {}", text_field(data, "year"))
}

pub fn render_monthly(data: &Value) -> io::Result<String> {
    let mut lines = vec![format!("Summary for {}:", period_label(data))];
    lines.extend(key_value_rows(
        &[
            ("Income:", money_field(data, "total_income")),
            ("Expenses:", money_field(data, "total_expenses")),
            ("Balance:", money_field(data, "balance")),
        ],
        2,
    ));
    Ok(lines.join("\n"))
}

pub fn render_categories(data: &Value) -> io::Result<String> {
    let rows = rows_of(data, "report categories")?;
    if rows.is_empty() {
        return Ok(format!("No expenses recorded for {}.", period_label(data)));
    }

    let table_rows = rows
        .iter()
        .map(|row| vec![text_field(row, "category"), money_field(row, "total_expenses")])
        .collect::<Vec<Vec<String>>>();

    let mut lines = vec![format!("Expenses by category for {}:", period_label(data)), String::new()];
    lines.extend(format::render_table(
        &[Column::left("Category"), Column::right("Expenses")],
        &table_rows,
    ));
    Ok(lines.join("\n"))
}

pub fn render_daily(data: &Value) -> io::Result<String> {
    let rows = rows_of(data, "report daily")?;
    let table_rows = rows
        .iter()
        .map(|row| vec![text_field(row, "date"), money_field(row, "total_expenses")])
        .collect::<Vec<Vec<String>>>();

    let mut lines = vec![format!("Daily expenses for {}:", period_label(data)), String::new()];
    lines.extend(format::render_table(
        &[Column::left("Date"), Column::right("Expenses")],
        &table_rows,
    ));
    Ok(lines.join("\n"))
}

pub fn render_yearly(data: &Value) -> io::Result<String> {
    let rows = rows_of(data, "report yearly")?;
    let table_rows = rows
        .iter()
        .map(|row| vec![text_field(row, "month_name"), money_field(row, "total_expenses")])
        .collect::<Vec<Vec<String>>>();

    let mut lines = vec![
        format!("Monthly expenses for {}:", text_field(data, "year")),
        String::new(),
    ];
    lines.extend(format::render_table(
        &[Column::left("Month"), Column::right("Expenses")],
        &table_rows,
    ));
    Ok(lines.join("\n"))
}

pub fn render_trend(data: &Value) -> io::Result<String> {
    let rows = rows_of(data, "report trend")?;
    if rows.is_empty() {
        return Ok("No expenses recorded yet.".to_string());
    }

    let table_rows = rows
        .iter()
        .map(|row| vec![text_field(row, "year"), money_field(row, "total_expenses")])
        .collect::<Vec<Vec<String>>>();

    let mut lines = vec!["Expenses by year:".to_string(), String::new()];
    lines.extend(format::render_table(
        &[Column::left("Year"), Column::right("Expenses")],
        &table_rows,
    ));
    Ok(lines.join("\n"))
}

pub fn render_budget_status(data: &Value) -> io::Result<String> {
    let mut lines = vec![format!("Budget status for {}:", period_label(data))];
    let has_budget = data.get("budget").is_some_and(|value| !value.is_null());

    let mut entries = vec![
        ("Budget:", money_field(data, "budget")),
        ("Income:", money_field(data, "total_income")),
        ("Expenses:", money_field(data, "total_expenses")),
    ];
    if has_budget {
        entries.push(("Remaining:", money_field(data, "remaining")));
        entries.push((
            "Used:",
            format!("{}%", money_field(data, "progress_percent")),
        ));
    }
    lines.extend(key_value_rows(&entries, 2));

    if !has_budget {
        lines.push(String::new());
        lines.push(format!(
            "No budget set. Run `pennywise budget set --month {} --year {} --amount <amount>`.",
            text_field(data, "month"),
            text_field(data, "year"),
        ));
    }
    Ok(lines.join("\n"))
}
