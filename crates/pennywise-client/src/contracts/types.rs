use serde::Serialize;

use crate::ledger::types::{
    Budget, CategoryBreakdown, DailySeries, MultiYearTrend, Transaction, User, YearlySeries,
};

#[derive(Debug, Clone, Serialize)]
pub struct UserData {
    pub user: User,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserListData {
    pub rows: Vec<User>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionData {
    pub transaction: Transaction,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionListData {
    pub username: String,
    pub category: Option<String>,
    pub count: usize,
    pub rows: Vec<Transaction>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionDeleteData {
    pub txn_id: String,
    pub deleted: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetData {
    pub budget: Budget,
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetShowData {
    pub month: u32,
    pub year: i32,
    pub budget: Option<Budget>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryReportData {
    pub month: u32,
    pub year: i32,
    pub rows: Vec<CategoryBreakdown>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyReportData {
    pub month: u32,
    pub year: i32,
    pub rows: Vec<DailySeries>,
}

#[derive(Debug, Clone, Serialize)]
pub struct YearlyReportData {
    pub year: i32,
    pub rows: Vec<YearlySeries>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendReportData {
    pub rows: Vec<MultiYearTrend>,
}
