use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `pennywise {cmd} --help` for usage."),
            None => "Run `pennywise --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    /// Raised for update/delete when no row matches both the id and the acting user.
    /// The wording is identical whether the id is unknown or owned by someone else.
    pub fn transaction_not_found(txn_id: &str) -> Self {
        Self::new(
            "transaction_not_found",
            &format!("Transaction `{txn_id}` was not found."),
            vec![
                "Run `pennywise txn list` to find a valid transaction id.".to_string(),
                "Retry the command with that id.".to_string(),
            ],
        )
        .with_data(json!({
            "txn_id": txn_id,
        }))
    }

    pub fn user_required() -> Self {
        Self::new(
            "user_required",
            "No user was selected for this command.",
            vec![
                "Pass `--user <username>`, or set `PENNYWISE_USER`.".to_string(),
                "Run `pennywise user register <username> --email <email>` if you have no user yet."
                    .to_string(),
            ],
        )
    }

    pub fn user_not_found(username: &str) -> Self {
        Self::new(
            "user_not_found",
            &format!("User `{username}` was not found."),
            vec![
                "Run `pennywise user list` to see registered users.".to_string(),
                format!("Run `pennywise user register {username} --email <email>` to create it."),
            ],
        )
        .with_data(json!({
            "username": username,
        }))
    }

    pub fn user_exists(field: &str, value: &str) -> Self {
        Self::new(
            "user_exists",
            &format!("A user with {field} `{value}` is already registered."),
            vec![format!("Choose a different {field}, or run `pennywise user list`.")],
        )
        .with_data(json!({
            "field": field,
            "value": value,
        }))
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }

    pub fn ledger_init_permission_denied(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "ledger_init_permission_denied",
            &format!("Cannot initialize ledger at `{location}`: {detail}"),
            vec![format!(
                "Grant write access to `{location}` or set `PENNYWISE_HOME` to a writable directory."
            )],
        )
    }

    pub fn ledger_locked(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "ledger_locked",
            &format!("Ledger database is locked at `{location}`."),
            vec![format!(
                "Close other processes using `{location}` so the lock is released."
            )],
        )
    }

    pub fn ledger_corrupt(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "ledger_corrupt",
            &format!("Ledger database appears corrupt at `{location}`."),
            vec![format!(
                "Replace `{location}` with a valid SQLite ledger file or restore from backup."
            )],
        )
    }

    pub fn migration_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "migration_failed",
            &format!("Ledger migration failed at `{location}`: {detail}"),
            vec!["Resolve conflicting schema objects referenced in the error details.".to_string()],
        )
    }

    pub fn ledger_init_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "ledger_init_failed",
            &format!("Ledger initialization failed at `{location}`: {detail}"),
            Vec::new(),
        )
    }

    pub fn is_internal(&self) -> bool {
        self.code.starts_with("internal_")
            || matches!(
                self.code.as_str(),
                "ledger_init_permission_denied"
                    | "ledger_locked"
                    | "ledger_corrupt"
                    | "migration_failed"
                    | "ledger_init_failed"
            )
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
