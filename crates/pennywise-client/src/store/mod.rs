//! Persistence capability consumed by the aggregation engine.
//!
//! Every transaction and budget method is scoped by `user_id`. Implementations
//! must fold the owner check into the same statement that locates the row.

pub mod sqlite;

use chrono::NaiveDate;

use crate::ClientResult;
use crate::ledger::types::{Budget, DateRange, Transaction, TransactionFields, User};

pub trait TransactionStore {
    fn insert_user(&mut self, username: &str, email: &str) -> ClientResult<User>;

    fn find_user_by_username(&self, username: &str) -> ClientResult<Option<User>>;

    fn find_user_by_email(&self, email: &str) -> ClientResult<Option<User>>;

    fn list_users(&self) -> ClientResult<Vec<User>>;

    fn insert_transaction(
        &mut self,
        user_id: &str,
        fields: &TransactionFields,
    ) -> ClientResult<Transaction>;

    /// Rows owned by `user_id`, optionally limited to one exact category.
    fn list_transactions(
        &self,
        user_id: &str,
        category: Option<&str>,
    ) -> ClientResult<Vec<Transaction>>;

    /// Returns `None` when no row matches both `txn_id` and `user_id`.
    fn update_transaction_owned(
        &mut self,
        user_id: &str,
        txn_id: &str,
        fields: &TransactionFields,
    ) -> ClientResult<Option<Transaction>>;

    /// Returns `false` when no row matches both `txn_id` and `user_id`.
    fn delete_transaction_owned(&mut self, user_id: &str, txn_id: &str) -> ClientResult<bool>;

    /// `(income, expenses)` summed over every row in the range.
    fn sum_totals(&self, user_id: &str, range: DateRange) -> ClientResult<(f64, f64)>;

    /// Categories with positive expense rows in the range.
    fn expenses_by_category(
        &self,
        user_id: &str,
        range: DateRange,
    ) -> ClientResult<Vec<(String, f64)>>;

    /// Sparse per-day expense totals, positive expense rows only.
    fn expenses_by_day(
        &self,
        user_id: &str,
        range: DateRange,
    ) -> ClientResult<Vec<(NaiveDate, f64)>>;

    /// Sparse per-month expense totals for one year, keyed by month number.
    fn expenses_by_month(&self, user_id: &str, year: i32) -> ClientResult<Vec<(u32, f64)>>;

    /// Per-year expense totals across the whole history, ascending by year.
    fn expenses_by_year(&self, user_id: &str) -> ClientResult<Vec<(i32, f64)>>;

    fn find_budget(&self, user_id: &str, month: u32, year: i32) -> ClientResult<Option<Budget>>;

    /// Overwrites the amount of an existing `(user, month, year)` budget or inserts one.
    fn upsert_budget(
        &mut self,
        user_id: &str,
        month: u32,
        year: i32,
        amount: f64,
    ) -> ClientResult<Budget>;
}
