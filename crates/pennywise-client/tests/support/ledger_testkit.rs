#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use pennywise_client::ClientResult;
use pennywise_client::SuccessEnvelope;
use pennywise_client::commands::transaction::{self, TransactionInput, TxnAddOptions};
use pennywise_client::commands::user::{self, UserRegisterOptions};
use serde_json::Value;
use tempfile::{Builder, TempDir};

pub fn temp_home_in_tmp(prefix: &str) -> std::io::Result<(TempDir, PathBuf)> {
    let dir = Builder::new().prefix(prefix).tempdir_in("/tmp")?;
    let home = dir.path().join("ledger-home");
    fs::create_dir_all(&home)?;
    Ok((dir, home))
}

pub fn payload(result: ClientResult<SuccessEnvelope>) -> Value {
    assert!(result.is_ok());
    if let Ok(success) = result {
        let value = serde_json::to_value(success);
        assert!(value.is_ok());
        if let Ok(json) = value {
            return json;
        }
    }
    Value::Null
}

pub fn register(home: &Path, username: &str) -> Value {
    payload(user::register(UserRegisterOptions {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        home_override: Some(home),
    }))
}

pub fn input(
    name: &str,
    date: &str,
    category: &str,
    income: Option<f64>,
    expense: Option<f64>,
) -> TransactionInput {
    TransactionInput {
        name: name.to_string(),
        date: date.to_string(),
        category: category.to_string(),
        income,
        expense,
        description: None,
    }
}

pub fn expense(home: &Path, username: &str, date: &str, category: &str, amount: f64) -> String {
    add(home, username, input("Expense", date, category, None, Some(amount)))
}

pub fn income(home: &Path, username: &str, date: &str, amount: f64) -> String {
    add(home, username, input("Paycheck", date, "Salary", Some(amount), None))
}

pub fn add(home: &Path, username: &str, input: TransactionInput) -> String {
    let value = payload(transaction::add(TxnAddOptions {
        user: Some(username.to_string()),
        input,
        home_override: Some(home),
    }));
    value["data"]["transaction"]["txn_id"]
        .as_str()
        .unwrap_or_default()
        .to_string()
}

pub fn rows(value: &Value) -> Vec<Value> {
    value["data"]["rows"].as_array().cloned().unwrap_or_default()
}
