use std::path::Path;

use crate::commands::common::{open_engine, required_text, resolve_user, validate_amount};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{TransactionData, TransactionDeleteData, TransactionListData};
use crate::ledger::calendar::parse_iso_date;
use crate::ledger::types::TransactionFields;
use crate::{ClientError, ClientResult};

/// Raw transaction fields as received from a caller, before validation.
#[derive(Debug, Clone, Default)]
pub struct TransactionInput {
    pub name: String,
    pub date: String,
    pub category: String,
    pub income: Option<f64>,
    pub expense: Option<f64>,
    pub description: Option<String>,
}

impl TransactionInput {
    fn into_fields(self, command: &str) -> ClientResult<TransactionFields> {
        let date = parse_iso_date(self.date.trim()).ok_or_else(|| {
            ClientError::invalid_argument_for_command(
                "`date` must use YYYY-MM-DD format with a real calendar date.",
                Some(command),
            )
        })?;

        Ok(TransactionFields {
            name: required_text(&self.name, "name", command)?,
            income_amount: validate_amount(self.income.unwrap_or(0.0), "income", command)?,
            expense_amount: validate_amount(self.expense.unwrap_or(0.0), "expense", command)?,
            description: self
                .description
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty()),
            category: required_text(&self.category, "category", command)?,
            date,
        })
    }
}

#[derive(Debug, Default)]
pub struct TxnAddOptions<'a> {
    pub user: Option<String>,
    pub input: TransactionInput,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct TxnListOptions<'a> {
    pub user: Option<String>,
    pub category: Option<String>,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct TxnUpdateOptions<'a> {
    pub user: Option<String>,
    pub txn_id: String,
    pub input: TransactionInput,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct TxnDeleteOptions<'a> {
    pub user: Option<String>,
    pub txn_id: String,
    pub home_override: Option<&'a Path>,
}

pub fn add(options: TxnAddOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let command = "txn add";
    let fields = options.input.into_fields(command)?;
    let mut engine = open_engine(options.home_override)?;
    let user = resolve_user(&engine, options.user.as_deref())?;
    let transaction = engine.create_transaction(&user.user_id, &fields)?;
    success(command, TransactionData { transaction })
}

pub fn list(options: TxnListOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let engine = open_engine(options.home_override)?;
    let user = resolve_user(&engine, options.user.as_deref())?;
    let category = options
        .category
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());
    let rows = engine.list_transactions(&user.user_id, category.as_deref())?;

    success(
        "txn list",
        TransactionListData {
            username: user.username,
            category,
            count: rows.len(),
            rows,
        },
    )
}

pub fn update(options: TxnUpdateOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let command = "txn update";
    let txn_id = required_text(&options.txn_id, "txn_id", command)?;
    let fields = options.input.into_fields(command)?;
    let mut engine = open_engine(options.home_override)?;
    let user = resolve_user(&engine, options.user.as_deref())?;

    let Some(transaction) = engine.update_transaction(&user.user_id, &txn_id, &fields)? else {
        return Err(ClientError::transaction_not_found(&txn_id));
    };
    success(command, TransactionData { transaction })
}

pub fn delete(options: TxnDeleteOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let command = "txn delete";
    let txn_id = required_text(&options.txn_id, "txn_id", command)?;
    let mut engine = open_engine(options.home_override)?;
    let user = resolve_user(&engine, options.user.as_deref())?;

    if !engine.delete_transaction(&user.user_id, &txn_id)? {
        return Err(ClientError::transaction_not_found(&txn_id));
    }
    success(
        command,
        TransactionDeleteData {
            txn_id,
            deleted: true,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::TransactionInput;

    fn input(date: &str) -> TransactionInput {
        TransactionInput {
            name: " Lunch ".to_string(),
            date: date.to_string(),
            category: "Food".to_string(),
            income: None,
            expense: Some(12.0),
            description: Some("   ".to_string()),
        }
    }

    #[test]
    fn input_defaults_missing_amounts_and_drops_blank_description() {
        let fields = input("2025-01-10").into_fields("txn add");
        assert!(fields.is_ok());
        if let Ok(value) = fields {
            assert_eq!(value.name, "Lunch");
            assert_eq!(value.income_amount, 0.0);
            assert_eq!(value.expense_amount, 12.0);
            assert!(value.description.is_none());
        }
    }

    #[test]
    fn input_rejects_impossible_dates() {
        let fields = input("2025-02-30").into_fields("txn add");
        assert!(fields.is_err());
        if let Err(error) = fields {
            assert!(error.message.contains("date"));
        }
    }
}
