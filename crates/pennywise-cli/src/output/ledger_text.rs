use std::io;

use serde_json::Value;

use super::format::{self, Column, key_value_rows, money_field, rows_of, text_field};
use super::report_text::period_label;

pub fn render_user(command: &str, data: &Value) -> io::Result<String> {
    let user = data
        .get("user")
        .ok_or_else(|| io::Error::other("user output requires user"))?;

    let heading = if command == "user register" {
        "Registered user:"
    } else {
        "User profile:"
    };
    let mut lines = vec![heading.to_string()];
    lines.extend(key_value_rows(
        &[
            ("Username:", text_field(user, "username")),
            ("Email:", text_field(user, "email")),
            ("User ID:", text_field(user, "user_id")),
        ],
        2,
    ));
    Ok(lines.join("\n"))
}

pub fn render_user_list(data: &Value) -> io::Result<String> {
    let rows = rows_of(data, "user list")?;
    if rows.is_empty() {
        return Ok([
            "No users registered yet.",
            "",
            "Create one with:",
            "  pennywise user register <username> --email <email>",
        ]
        .join("\n"));
    }

    let table_rows = rows
        .iter()
        .map(|row| {
            vec![
                text_field(row, "username"),
                text_field(row, "email"),
                text_field(row, "user_id"),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    let mut lines = vec![format!("{} registered user(s):", rows.len()), String::new()];
    lines.extend(format::render_table(
        &[
            Column::left("Username"),
            Column::left("Email"),
            Column::left("User ID"),
        ],
        &table_rows,
    ));
    Ok(lines.join("\n"))
}

pub fn render_transaction(command: &str, data: &Value) -> io::Result<String> {
    let transaction = data
        .get("transaction")
        .ok_or_else(|| io::Error::other("transaction output requires transaction"))?;

    let heading = if command == "txn add" {
        "Recorded transaction:"
    } else {
        "Updated transaction:"
    };
    let mut lines = vec![heading.to_string()];
    lines.extend(key_value_rows(
        &[
            ("ID:", text_field(transaction, "txn_id")),
            ("Date:", text_field(transaction, "date")),
            ("Name:", text_field(transaction, "name")),
            ("Category:", text_field(transaction, "category")),
            ("Income:", money_field(transaction, "income_amount")),
            ("Expense:", money_field(transaction, "expense_amount")),
            ("Description:", text_field(transaction, "description")),
        ],
        2,
    ));
    Ok(lines.join("\n"))
}

pub fn render_transaction_list(data: &Value) -> io::Result<String> {
    let rows = rows_of(data, "txn list")?;
    let username = text_field(data, "username");
    let category = data.get("category").and_then(Value::as_str);

    if rows.is_empty() {
        return Ok(match category {
            Some(name) => format!("No `{name}` transactions found for {username}."),
            None => format!("No transactions recorded for {username} yet."),
        });
    }

    let heading = match category {
        Some(name) => format!("{} `{name}` transaction(s) for {username}:", rows.len()),
        None => format!("{} transaction(s) for {username}:", rows.len()),
    };

    let table_rows = rows
        .iter()
        .map(|row| {
            vec![
                text_field(row, "date"),
                text_field(row, "name"),
                text_field(row, "category"),
                money_field(row, "income_amount"),
                money_field(row, "expense_amount"),
                text_field(row, "txn_id"),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    let mut lines = vec![heading, String::new()];
    lines.extend(format::render_table(
        &[
            Column::left("Date"),
            Column::left("Name"),
            Column::left("Category"),
            Column::right("Income"),
            Column::right("Expense"),
            Column::left("ID"),
        ],
        &table_rows,
    ));
    Ok(lines.join("\n"))
}

pub fn render_transaction_delete(data: &Value) -> io::Result<String> {
    Ok(format!("Deleted transaction {}.", text_field(data, "txn_id")))
}

pub fn render_budget(data: &Value) -> io::Result<String> {
    let budget = data.get("budget").filter(|value| !value.is_null());
    let Some(budget) = budget else {
        return Ok(format!(
            "No budget set for {}.\n\nSet one with:\n  pennywise budget set --month {} --year {} --amount <amount>",
            period_label(data),
            text_field(data, "month"),
            text_field(data, "year"),
        ));
    };

    let mut lines = vec![format!("Budget for {}:", period_label(budget))];
    lines.extend(key_value_rows(
        &[
            ("Amount:", money_field(budget, "amount")),
            ("Budget ID:", text_field(budget, "budget_id")),
        ],
        2,
    ));
    Ok(lines.join("\n"))
}
