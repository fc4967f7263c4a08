use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub txn_id: String,
    pub user_id: String,
    pub name: String,
    pub income_amount: f64,
    pub expense_amount: f64,
    pub description: Option<String>,
    pub category: String,
    pub date: NaiveDate,
}

/// The caller-supplied part of a transaction. Create and update both take the full set.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFields {
    pub name: String,
    pub income_amount: f64,
    pub expense_amount: f64,
    pub description: Option<String>,
    pub category: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Budget {
    pub budget_id: String,
    pub user_id: String,
    pub month: u32,
    pub year: i32,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummary {
    pub month: u32,
    pub year: i32,
    pub total_income: f64,
    pub total_expenses: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub category: String,
    pub total_expenses: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySeries {
    pub date: NaiveDate,
    pub total_expenses: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlySeries {
    pub month: u32,
    pub month_name: String,
    pub total_expenses: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiYearTrend {
    pub year: i32,
    pub total_expenses: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetStatus {
    pub month: u32,
    pub year: i32,
    pub budget: Option<f64>,
    pub total_income: f64,
    pub total_expenses: f64,
    pub remaining: Option<f64>,
    pub progress_percent: f64,
}

/// Inclusive calendar window used by the month-scoped aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub first: NaiveDate,
    pub last: NaiveDate,
}
