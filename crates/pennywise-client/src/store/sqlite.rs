use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row, TransactionBehavior, params};
use tracing::{debug, info};
use ulid::Ulid;

use crate::ledger::types::{Budget, DateRange, Transaction, TransactionFields, User};
use crate::setup::prepare_schema;
use crate::state::{configure_connection, is_unique_violation, map_sqlite_error, open_connection};
use crate::store::TransactionStore;
use crate::{ClientError, ClientResult};

const TRANSACTION_COLUMNS: &str = "txn_id,
                user_id,
                name,
                income_amount,
                expense_amount,
                description,
                category,
                posted_at";

pub struct SqliteStore {
    connection: Connection,
    db_path: PathBuf,
}

impl SqliteStore {
    /// Opens an already-initialized ledger file.
    pub fn open(db_path: &Path) -> ClientResult<Self> {
        let connection = open_connection(db_path)?;
        Ok(Self {
            connection,
            db_path: db_path.to_path_buf(),
        })
    }

    /// A private, migrated ledger that lives only as long as the store.
    pub fn open_in_memory() -> ClientResult<Self> {
        let db_path = PathBuf::from(":memory:");
        let mut connection =
            Connection::open_in_memory().map_err(|error| map_sqlite_error(&db_path, &error))?;
        configure_connection(&connection, &db_path)?;
        prepare_schema(&mut connection, &db_path)?;
        Ok(Self {
            connection,
            db_path,
        })
    }

    fn map_error(&self, error: &rusqlite::Error) -> ClientError {
        map_sqlite_error(&self.db_path, error)
    }

    fn collect_rows<T>(
        &self,
        rows: impl Iterator<Item = rusqlite::Result<T>>,
    ) -> ClientResult<Vec<T>> {
        let mut collected = Vec::new();
        for row in rows {
            collected.push(row.map_err(|error| self.map_error(&error))?);
        }
        Ok(collected)
    }

    fn find_user_by(&self, column: UserLookup, value: &str) -> ClientResult<Option<User>> {
        let sql = match column {
            UserLookup::Username => {
                "SELECT user_id, username, email, created_at FROM users WHERE username = ?1"
            }
            UserLookup::Email => {
                "SELECT user_id, username, email, created_at FROM users WHERE email = ?1"
            }
        };
        self.connection
            .query_row(sql, [value], user_from_row)
            .optional()
            .map_err(|error| self.map_error(&error))
    }
}

#[derive(Debug, Clone, Copy)]
enum UserLookup {
    Username,
    Email,
}

impl TransactionStore for SqliteStore {
    fn insert_user(&mut self, username: &str, email: &str) -> ClientResult<User> {
        let user = User {
            user_id: format!("usr_{}", Ulid::new()),
            username: username.to_string(),
            email: email.to_string(),
            created_at: now_timestamp(),
        };

        let inserted = self.connection.execute(
            "INSERT INTO users (user_id, username, email, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![&user.user_id, &user.username, &user.email, &user.created_at],
        );
        match inserted {
            Ok(_) => {}
            Err(error) if is_unique_violation(&error) => {
                return Err(ClientError::user_exists("username or email", username));
            }
            Err(error) => return Err(self.map_error(&error)),
        }

        info!(user_id = %user.user_id, username = %user.username, "registered user");
        Ok(user)
    }

    fn find_user_by_username(&self, username: &str) -> ClientResult<Option<User>> {
        self.find_user_by(UserLookup::Username, username)
    }

    fn find_user_by_email(&self, email: &str) -> ClientResult<Option<User>> {
        self.find_user_by(UserLookup::Email, email)
    }

    fn list_users(&self) -> ClientResult<Vec<User>> {
        let mut statement = self
            .connection
            .prepare(
                "SELECT user_id, username, email, created_at
                 FROM users
                 ORDER BY username ASC",
            )
            .map_err(|error| self.map_error(&error))?;
        let rows = statement
            .query_map([], user_from_row)
            .map_err(|error| self.map_error(&error))?;
        self.collect_rows(rows)
    }

    fn insert_transaction(
        &mut self,
        user_id: &str,
        fields: &TransactionFields,
    ) -> ClientResult<Transaction> {
        let txn_id = format!("txn_{}", Ulid::new());
        let timestamp = now_timestamp();
        self.connection
            .execute(
                "INSERT INTO transactions (
                    txn_id,
                    user_id,
                    name,
                    income_amount,
                    expense_amount,
                    description,
                    category,
                    posted_at,
                    created_at,
                    updated_at
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
                params![
                    &txn_id,
                    user_id,
                    &fields.name,
                    fields.income_amount,
                    fields.expense_amount,
                    &fields.description,
                    &fields.category,
                    fields.date,
                    &timestamp
                ],
            )
            .map_err(|error| self.map_error(&error))?;

        info!(%txn_id, %user_id, date = %fields.date, "created transaction");
        Ok(Transaction {
            txn_id,
            user_id: user_id.to_string(),
            name: fields.name.clone(),
            income_amount: fields.income_amount,
            expense_amount: fields.expense_amount,
            description: fields.description.clone(),
            category: fields.category.clone(),
            date: fields.date,
        })
    }

    fn list_transactions(
        &self,
        user_id: &str,
        category: Option<&str>,
    ) -> ClientResult<Vec<Transaction>> {
        let sql = format!(
            "SELECT {TRANSACTION_COLUMNS}
             FROM transactions
             WHERE user_id = ?1
               AND (?2 IS NULL OR category = ?2)
             ORDER BY posted_at ASC, created_at ASC, txn_id ASC"
        );
        let mut statement = self
            .connection
            .prepare(&sql)
            .map_err(|error| self.map_error(&error))?;
        let rows = statement
            .query_map(params![user_id, category], transaction_from_row)
            .map_err(|error| self.map_error(&error))?;
        let transactions = self.collect_rows(rows)?;
        debug!(%user_id, ?category, count = transactions.len(), "listed transactions");
        Ok(transactions)
    }

    fn update_transaction_owned(
        &mut self,
        user_id: &str,
        txn_id: &str,
        fields: &TransactionFields,
    ) -> ClientResult<Option<Transaction>> {
        // The owner predicate lives in the UPDATE itself; a foreign row is simply not matched.
        let sql = format!(
            "UPDATE transactions
             SET name = ?3,
                 income_amount = ?4,
                 expense_amount = ?5,
                 description = ?6,
                 category = ?7,
                 posted_at = ?8,
                 updated_at = ?9
             WHERE txn_id = ?1 AND user_id = ?2
             RETURNING {TRANSACTION_COLUMNS}"
        );
        let updated = self
            .connection
            .query_row(
                &sql,
                params![
                    txn_id,
                    user_id,
                    &fields.name,
                    fields.income_amount,
                    fields.expense_amount,
                    &fields.description,
                    &fields.category,
                    fields.date,
                    now_timestamp()
                ],
                transaction_from_row,
            )
            .optional()
            .map_err(|error| self.map_error(&error))?;

        if updated.is_some() {
            info!(%txn_id, %user_id, "updated transaction");
        }
        Ok(updated)
    }

    fn delete_transaction_owned(&mut self, user_id: &str, txn_id: &str) -> ClientResult<bool> {
        let deleted = self
            .connection
            .execute(
                "DELETE FROM transactions WHERE txn_id = ?1 AND user_id = ?2",
                params![txn_id, user_id],
            )
            .map_err(|error| self.map_error(&error))?;

        if deleted > 0 {
            info!(%txn_id, %user_id, "deleted transaction");
        }
        Ok(deleted > 0)
    }

    fn sum_totals(&self, user_id: &str, range: DateRange) -> ClientResult<(f64, f64)> {
        self.connection
            .query_row(
                "SELECT
                    ROUND(COALESCE(SUM(income_amount), 0), 2),
                    ROUND(COALESCE(SUM(expense_amount), 0), 2)
                 FROM transactions
                 WHERE user_id = ?1
                   AND posted_at >= ?2
                   AND posted_at <= ?3",
                params![user_id, range.first, range.last],
                |row| Ok((row.get::<_, f64>(0)?, row.get::<_, f64>(1)?)),
            )
            .map_err(|error| self.map_error(&error))
    }

    fn expenses_by_category(
        &self,
        user_id: &str,
        range: DateRange,
    ) -> ClientResult<Vec<(String, f64)>> {
        let mut statement = self
            .connection
            .prepare(
                "SELECT category, ROUND(SUM(expense_amount), 2) AS total
                 FROM transactions
                 WHERE user_id = ?1
                   AND posted_at >= ?2
                   AND posted_at <= ?3
                   AND expense_amount > 0
                 GROUP BY category
                 ORDER BY category ASC",
            )
            .map_err(|error| self.map_error(&error))?;
        let rows = statement
            .query_map(params![user_id, range.first, range.last], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?))
            })
            .map_err(|error| self.map_error(&error))?;
        self.collect_rows(rows)
    }

    fn expenses_by_day(
        &self,
        user_id: &str,
        range: DateRange,
    ) -> ClientResult<Vec<(NaiveDate, f64)>> {
        let mut statement = self
            .connection
            .prepare(
                "SELECT posted_at, ROUND(SUM(expense_amount), 2) AS total
                 FROM transactions
                 WHERE user_id = ?1
                   AND posted_at >= ?2
                   AND posted_at <= ?3
                   AND expense_amount > 0
                 GROUP BY posted_at
                 ORDER BY posted_at ASC",
            )
            .map_err(|error| self.map_error(&error))?;
        let rows = statement
            .query_map(params![user_id, range.first, range.last], |row| {
                Ok((row.get::<_, NaiveDate>(0)?, row.get::<_, f64>(1)?))
            })
            .map_err(|error| self.map_error(&error))?;
        self.collect_rows(rows)
    }

    fn expenses_by_month(&self, user_id: &str, year: i32) -> ClientResult<Vec<(u32, f64)>> {
        let mut statement = self
            .connection
            .prepare(
                "SELECT CAST(strftime('%m', posted_at) AS INTEGER) AS month,
                        ROUND(SUM(expense_amount), 2) AS total
                 FROM transactions
                 WHERE user_id = ?1
                   AND strftime('%Y', posted_at) = ?2
                   AND expense_amount > 0
                 GROUP BY month
                 ORDER BY month ASC",
            )
            .map_err(|error| self.map_error(&error))?;
        let rows = statement
            .query_map(params![user_id, format!("{year:04}")], |row| {
                Ok((row.get::<_, u32>(0)?, row.get::<_, f64>(1)?))
            })
            .map_err(|error| self.map_error(&error))?;
        self.collect_rows(rows)
    }

    fn expenses_by_year(&self, user_id: &str) -> ClientResult<Vec<(i32, f64)>> {
        let mut statement = self
            .connection
            .prepare(
                "SELECT CAST(strftime('%Y', posted_at) AS INTEGER) AS year,
                        ROUND(SUM(expense_amount), 2) AS total
                 FROM transactions
                 WHERE user_id = ?1
                   AND expense_amount > 0
                 GROUP BY year
                 ORDER BY year ASC",
            )
            .map_err(|error| self.map_error(&error))?;
        let rows = statement
            .query_map([user_id], |row| {
                Ok((row.get::<_, i32>(0)?, row.get::<_, f64>(1)?))
            })
            .map_err(|error| self.map_error(&error))?;
        self.collect_rows(rows)
    }

    fn find_budget(&self, user_id: &str, month: u32, year: i32) -> ClientResult<Option<Budget>> {
        self.connection
            .query_row(
                "SELECT budget_id, user_id, month, year, amount
                 FROM budgets
                 WHERE user_id = ?1 AND month = ?2 AND year = ?3",
                params![user_id, month, year],
                budget_from_row,
            )
            .optional()
            .map_err(|error| self.map_error(&error))
    }

    fn upsert_budget(
        &mut self,
        user_id: &str,
        month: u32,
        year: i32,
        amount: f64,
    ) -> ClientResult<Budget> {
        let db_path = self.db_path.clone();
        let timestamp = now_timestamp();
        let transaction = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|error| map_sqlite_error(&db_path, &error))?;

        let existing = transaction
            .query_row(
                "SELECT budget_id FROM budgets WHERE user_id = ?1 AND month = ?2 AND year = ?3",
                params![user_id, month, year],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(|error| map_sqlite_error(&db_path, &error))?;

        let budget_id = match existing {
            Some(budget_id) => {
                transaction
                    .execute(
                        "UPDATE budgets SET amount = ?2, updated_at = ?3 WHERE budget_id = ?1",
                        params![&budget_id, amount, &timestamp],
                    )
                    .map_err(|error| map_sqlite_error(&db_path, &error))?;
                info!(%budget_id, %user_id, month, year, amount, "updated budget");
                budget_id
            }
            None => {
                let budget_id = format!("bud_{}", Ulid::new());
                transaction
                    .execute(
                        "INSERT INTO budgets (budget_id, user_id, month, year, amount, updated_at)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                        params![&budget_id, user_id, month, year, amount, &timestamp],
                    )
                    .map_err(|error| map_sqlite_error(&db_path, &error))?;
                info!(%budget_id, %user_id, month, year, amount, "created budget");
                budget_id
            }
        };

        transaction
            .commit()
            .map_err(|error| map_sqlite_error(&db_path, &error))?;

        Ok(Budget {
            budget_id,
            user_id: user_id.to_string(),
            month,
            year,
            amount,
        })
    }
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        user_id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        created_at: row.get(3)?,
    })
}

fn transaction_from_row(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        txn_id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        income_amount: row.get(3)?,
        expense_amount: row.get(4)?,
        description: row.get(5)?,
        category: row.get(6)?,
        date: row.get(7)?,
    })
}

fn budget_from_row(row: &Row<'_>) -> rusqlite::Result<Budget> {
    Ok(Budget {
        budget_id: row.get(0)?,
        user_id: row.get(1)?,
        month: row.get(2)?,
        year: row.get(3)?,
        amount: row.get(4)?,
    })
}

pub(crate) fn now_timestamp() -> String {
    let now = SystemTime::now().duration_since(UNIX_EPOCH);
    match now {
        Ok(duration) => format!("{}", duration.as_secs()),
        Err(_) => "0".to_string(),
    }
}
