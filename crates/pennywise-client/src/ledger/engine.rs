//! Calendar-bucketed summaries over one user's transaction log.
//!
//! Daily and yearly series are dense: the store returns sparse buckets and the
//! engine walks the full, statically known bucket range, filling gaps with zero.
//! Category breakdowns and the multi-year trend stay sparse.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::ClientResult;
use crate::ledger::calendar::{days_of, month_name, month_range};
use crate::ledger::types::{
    Budget, BudgetStatus, CategoryBreakdown, DailySeries, MonthlySummary, MultiYearTrend,
    Transaction, TransactionFields, YearlySeries,
};
use crate::store::TransactionStore;

pub struct AggregationEngine<S> {
    store: S,
}

impl<S: TransactionStore> AggregationEngine<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn monthly_summary(
        &self,
        user_id: &str,
        month: u32,
        year: i32,
    ) -> ClientResult<MonthlySummary> {
        let range = month_range(year, month)?;
        let (total_income, total_expenses) = self.store.sum_totals(user_id, range)?;
        debug!(%user_id, month, year, total_income, total_expenses, "monthly summary");

        Ok(MonthlySummary {
            month,
            year,
            total_income,
            total_expenses,
            balance: round_cents(total_income - total_expenses),
        })
    }

    pub fn category_breakdown(
        &self,
        user_id: &str,
        month: u32,
        year: i32,
    ) -> ClientResult<Vec<CategoryBreakdown>> {
        let range = month_range(year, month)?;
        let rows = self
            .store
            .expenses_by_category(user_id, range)?
            .into_iter()
            .filter(|(_, total)| *total > 0.0)
            .map(|(category, total_expenses)| CategoryBreakdown {
                category,
                total_expenses,
            })
            .collect::<Vec<_>>();
        debug!(%user_id, month, year, categories = rows.len(), "category breakdown");
        Ok(rows)
    }

    pub fn daily_series(
        &self,
        user_id: &str,
        month: u32,
        year: i32,
    ) -> ClientResult<Vec<DailySeries>> {
        let range = month_range(year, month)?;
        let totals: HashMap<NaiveDate, f64> = self
            .store
            .expenses_by_day(user_id, range)?
            .into_iter()
            .collect();

        Ok(days_of(range)
            .map(|date| DailySeries {
                date,
                total_expenses: totals.get(&date).copied().unwrap_or(0.0),
            })
            .collect())
    }

    pub fn yearly_series(&self, user_id: &str, year: i32) -> ClientResult<Vec<YearlySeries>> {
        let totals: HashMap<u32, f64> = self
            .store
            .expenses_by_month(user_id, year)?
            .into_iter()
            .collect();

        Ok((1..=12)
            .map(|month| YearlySeries {
                month,
                month_name: month_name(month).unwrap_or_default().to_string(),
                total_expenses: totals.get(&month).copied().unwrap_or(0.0),
            })
            .collect())
    }

    /// Only years with recorded expenses appear; quiet years are not zero-filled.
    pub fn multi_year_trend(&self, user_id: &str) -> ClientResult<Vec<MultiYearTrend>> {
        let mut rows = self
            .store
            .expenses_by_year(user_id)?
            .into_iter()
            .map(|(year, total_expenses)| MultiYearTrend {
                year,
                total_expenses,
            })
            .collect::<Vec<_>>();
        rows.sort_by_key(|row| row.year);
        Ok(rows)
    }

    pub fn list_transactions(
        &self,
        user_id: &str,
        category: Option<&str>,
    ) -> ClientResult<Vec<Transaction>> {
        self.store.list_transactions(user_id, category)
    }

    pub fn create_transaction(
        &mut self,
        user_id: &str,
        fields: &TransactionFields,
    ) -> ClientResult<Transaction> {
        self.store.insert_transaction(user_id, fields)
    }

    /// `None` when the id is unknown or owned by another user; the two cases are indistinguishable.
    pub fn update_transaction(
        &mut self,
        user_id: &str,
        txn_id: &str,
        fields: &TransactionFields,
    ) -> ClientResult<Option<Transaction>> {
        self.store.update_transaction_owned(user_id, txn_id, fields)
    }

    pub fn delete_transaction(&mut self, user_id: &str, txn_id: &str) -> ClientResult<bool> {
        self.store.delete_transaction_owned(user_id, txn_id)
    }

    pub fn upsert_budget(
        &mut self,
        user_id: &str,
        month: u32,
        year: i32,
        amount: f64,
    ) -> ClientResult<Budget> {
        self.store.upsert_budget(user_id, month, year, amount)
    }

    pub fn get_budget(&self, user_id: &str, month: u32, year: i32) -> ClientResult<Option<Budget>> {
        self.store.find_budget(user_id, month, year)
    }

    pub fn budget_status(
        &self,
        user_id: &str,
        month: u32,
        year: i32,
    ) -> ClientResult<BudgetStatus> {
        let summary = self.monthly_summary(user_id, month, year)?;
        let budget = self
            .get_budget(user_id, month, year)?
            .map(|budget| budget.amount);

        let progress_percent = match budget {
            Some(amount) if amount > 0.0 => round_cents(summary.total_expenses / amount * 100.0),
            _ => 0.0,
        };

        Ok(BudgetStatus {
            month,
            year,
            budget,
            total_income: summary.total_income,
            total_expenses: summary.total_expenses,
            remaining: budget.map(|amount| round_cents(amount - summary.total_expenses)),
            progress_percent,
        })
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::AggregationEngine;
    use crate::ledger::types::TransactionFields;
    use crate::store::TransactionStore;
    use crate::store::sqlite::SqliteStore;

    fn day(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
    }

    fn fields(category: &str, date: NaiveDate, income: f64, expense: f64) -> TransactionFields {
        TransactionFields {
            name: format!("{category} entry"),
            income_amount: income,
            expense_amount: expense,
            description: None,
            category: category.to_string(),
            date,
        }
    }

    /// Engine over a fresh in-memory ledger with one registered user.
    fn engine_with_user(username: &str) -> Option<(AggregationEngine<SqliteStore>, String)> {
        let mut store = SqliteStore::open_in_memory().ok()?;
        let user = store
            .insert_user(username, &format!("{username}@example.com"))
            .ok()?;
        Some((AggregationEngine::new(store), user.user_id))
    }

    fn seed(engine: &mut AggregationEngine<SqliteStore>, user_id: &str, rows: &[TransactionFields]) {
        for row in rows {
            assert!(engine.create_transaction(user_id, row).is_ok());
        }
    }

    #[test]
    fn monthly_summary_of_empty_month_is_all_zero() {
        let setup = engine_with_user("empty");
        assert!(setup.is_some());
        if let Some((engine, user_id)) = setup {
            let summary = engine.monthly_summary(&user_id, 7, 2025);
            assert!(summary.is_ok());
            if let Ok(value) = summary {
                assert_eq!(value.total_income, 0.0);
                assert_eq!(value.total_expenses, 0.0);
                assert_eq!(value.balance, 0.0);
            }
        }
    }

    #[test]
    fn january_example_summary_and_breakdown() {
        let setup = engine_with_user("u");
        assert!(setup.is_some());
        if let Some((mut engine, user_id)) = setup {
            seed(
                &mut engine,
                &user_id,
                &[
                    fields("Food", day(2025, 1, 10), 0.0, 50.0),
                    fields("Food", day(2025, 1, 20), 0.0, 30.0),
                    fields("Transport", day(2025, 2, 1), 0.0, 20.0),
                ],
            );

            let summary = engine.monthly_summary(&user_id, 1, 2025);
            assert!(summary.is_ok());
            if let Ok(value) = summary {
                assert_eq!(value.total_income, 0.0);
                assert_eq!(value.total_expenses, 80.0);
                assert_eq!(value.balance, -80.0);
            }

            let breakdown = engine.category_breakdown(&user_id, 1, 2025);
            assert!(breakdown.is_ok());
            if let Ok(rows) = breakdown {
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0].category, "Food");
                assert_eq!(rows[0].total_expenses, 80.0);
            }
        }
    }

    #[test]
    fn category_breakdown_omits_income_only_categories() {
        let setup = engine_with_user("mixed");
        assert!(setup.is_some());
        if let Some((mut engine, user_id)) = setup {
            seed(
                &mut engine,
                &user_id,
                &[
                    fields("Salary", day(2025, 3, 1), 2500.0, 0.0),
                    fields("Rent", day(2025, 3, 2), 0.0, 900.0),
                ],
            );

            let breakdown = engine.category_breakdown(&user_id, 3, 2025);
            assert!(breakdown.is_ok());
            if let Ok(rows) = breakdown {
                let names = rows
                    .iter()
                    .map(|row| row.category.as_str())
                    .collect::<Vec<_>>();
                assert_eq!(names, vec!["Rent"]);
            }
        }
    }

    #[test]
    fn daily_series_is_dense_for_leap_and_common_february() {
        let setup = engine_with_user("daily");
        assert!(setup.is_some());
        if let Some((mut engine, user_id)) = setup {
            seed(
                &mut engine,
                &user_id,
                &[
                    fields("Food", day(2024, 2, 29), 0.0, 12.5),
                    fields("Food", day(2024, 2, 29), 0.0, 7.5),
                    fields("Food", day(2024, 2, 3), 0.0, 4.0),
                ],
            );

            let leap = engine.daily_series(&user_id, 2, 2024);
            assert!(leap.is_ok());
            if let Ok(rows) = leap {
                assert_eq!(rows.len(), 29);
                assert_eq!(rows[0].date, day(2024, 2, 1));
                assert_eq!(rows[28].date, day(2024, 2, 29));
                assert_eq!(rows[28].total_expenses, 20.0);
                assert_eq!(rows[2].total_expenses, 4.0);
                let non_zero = rows.iter().filter(|row| row.total_expenses > 0.0).count();
                assert_eq!(non_zero, 2);
                assert!(rows.windows(2).all(|pair| pair[0].date < pair[1].date));
            }

            let common = engine.daily_series(&user_id, 2, 2023);
            assert!(common.is_ok());
            if let Ok(rows) = common {
                assert_eq!(rows.len(), 28);
                assert!(rows.iter().all(|row| row.total_expenses == 0.0));
            }
        }
    }

    #[test]
    fn yearly_series_always_has_twelve_months_in_calendar_order() {
        let setup = engine_with_user("yearly");
        assert!(setup.is_some());
        if let Some((mut engine, user_id)) = setup {
            seed(
                &mut engine,
                &user_id,
                &[
                    fields("Travel", day(2025, 8, 14), 0.0, 640.0),
                    fields("Food", day(2025, 2, 1), 0.0, 30.0),
                    fields("Food", day(2024, 2, 1), 0.0, 99.0),
                ],
            );

            let series = engine.yearly_series(&user_id, 2025);
            assert!(series.is_ok());
            if let Ok(rows) = series {
                assert_eq!(rows.len(), 12);
                assert_eq!(rows[0].month_name, "January");
                assert_eq!(rows[11].month_name, "December");
                assert_eq!(rows[1].total_expenses, 30.0);
                assert_eq!(rows[7].total_expenses, 640.0);
                assert_eq!(rows[0].total_expenses, 0.0);
            }

            let empty = engine.yearly_series(&user_id, 2019);
            assert!(matches!(empty, Ok(rows) if rows.len() == 12));
        }
    }

    #[test]
    fn multi_year_trend_is_sparse_and_ascending() {
        let setup = engine_with_user("trend");
        assert!(setup.is_some());
        if let Some((mut engine, user_id)) = setup {
            seed(
                &mut engine,
                &user_id,
                &[
                    fields("Food", day(2025, 5, 1), 0.0, 100.0),
                    fields("Food", day(2022, 5, 1), 0.0, 40.0),
                    fields("Salary", day(2023, 5, 1), 500.0, 0.0),
                ],
            );

            let trend = engine.multi_year_trend(&user_id);
            assert!(trend.is_ok());
            if let Ok(rows) = trend {
                let years = rows.iter().map(|row| row.year).collect::<Vec<_>>();
                assert_eq!(years, vec![2022, 2025]);
                assert_eq!(rows[1].total_expenses, 100.0);
            }
        }
    }

    #[test]
    fn single_year_of_activity_yields_one_trend_row() {
        let setup = engine_with_user("single");
        assert!(setup.is_some());
        if let Some((mut engine, user_id)) = setup {
            seed(
                &mut engine,
                &user_id,
                &[fields("Food", day(2024, 11, 2), 0.0, 15.0)],
            );
            let trend = engine.multi_year_trend(&user_id);
            assert!(matches!(trend, Ok(rows) if rows.len() == 1 && rows[0].year == 2024));
        }
    }

    #[test]
    fn foreign_transactions_cannot_be_updated_or_deleted() {
        let setup = engine_with_user("owner");
        assert!(setup.is_some());
        if let Some((mut engine, owner_id)) = setup {
            let intruder = engine
                .store_mut()
                .insert_user("intruder", "intruder@example.com");
            assert!(intruder.is_ok());
            if let Ok(intruder) = intruder {
                let created =
                    engine.create_transaction(&owner_id, &fields("Food", day(2025, 1, 5), 0.0, 9.0));
                assert!(created.is_ok());
                if let Ok(original) = created {
                    let replacement = fields("Hijack", day(2025, 1, 6), 0.0, 999.0);
                    let updated =
                        engine.update_transaction(&intruder.user_id, &original.txn_id, &replacement);
                    assert!(matches!(updated, Ok(None)));

                    let deleted = engine.delete_transaction(&intruder.user_id, &original.txn_id);
                    assert!(matches!(deleted, Ok(false)));

                    let missing = engine.delete_transaction(&intruder.user_id, "txn_missing");
                    assert!(matches!(missing, Ok(false)));

                    let rows = engine.list_transactions(&owner_id, None);
                    assert!(matches!(rows, Ok(ref list) if list.len() == 1 && list[0] == original));
                    let foreign_view = engine.list_transactions(&intruder.user_id, None);
                    assert!(matches!(foreign_view, Ok(list) if list.is_empty()));
                }
            }
        }
    }

    #[test]
    fn owner_update_replaces_every_field() {
        let setup = engine_with_user("editor");
        assert!(setup.is_some());
        if let Some((mut engine, user_id)) = setup {
            let created =
                engine.create_transaction(&user_id, &fields("Food", day(2025, 1, 5), 0.0, 9.0));
            assert!(created.is_ok());
            if let Ok(original) = created {
                let mut replacement = fields("Transport", day(2025, 2, 7), 0.0, 11.25);
                replacement.description = Some("bus pass".to_string());
                let updated = engine.update_transaction(&user_id, &original.txn_id, &replacement);
                assert!(updated.is_ok());
                if let Ok(Some(row)) = updated {
                    assert_eq!(row.txn_id, original.txn_id);
                    assert_eq!(row.category, "Transport");
                    assert_eq!(row.date, day(2025, 2, 7));
                    assert_eq!(row.description.as_deref(), Some("bus pass"));
                }
                assert!(matches!(engine.delete_transaction(&user_id, &original.txn_id), Ok(true)));
            }
        }
    }

    #[test]
    fn upsert_budget_overwrites_in_place() {
        let setup = engine_with_user("budgeter");
        assert!(setup.is_some());
        if let Some((mut engine, user_id)) = setup {
            let first = engine.upsert_budget(&user_id, 5, 2025, 100.0);
            let second = engine.upsert_budget(&user_id, 5, 2025, 150.0);
            assert!(first.is_ok());
            assert!(second.is_ok());
            if let (Ok(first), Ok(second)) = (first, second) {
                assert_eq!(first.budget_id, second.budget_id);
                assert_eq!(second.amount, 150.0);
            }

            let stored = engine.get_budget(&user_id, 5, 2025);
            assert!(matches!(stored, Ok(Some(ref budget)) if budget.amount == 150.0));
            assert!(matches!(engine.get_budget(&user_id, 6, 2025), Ok(None)));
        }
    }

    #[test]
    fn budget_status_reports_remaining_and_progress() {
        let setup = engine_with_user("status");
        assert!(setup.is_some());
        if let Some((mut engine, user_id)) = setup {
            seed(
                &mut engine,
                &user_id,
                &[fields("Food", day(2025, 9, 3), 0.0, 50.0)],
            );

            let without_budget = engine.budget_status(&user_id, 9, 2025);
            assert!(
                matches!(without_budget, Ok(ref status) if status.budget.is_none() && status.progress_percent == 0.0)
            );

            assert!(engine.upsert_budget(&user_id, 9, 2025, 200.0).is_ok());
            let status = engine.budget_status(&user_id, 9, 2025);
            assert!(status.is_ok());
            if let Ok(value) = status {
                assert_eq!(value.remaining, Some(150.0));
                assert_eq!(value.progress_percent, 25.0);
            }
        }
    }
}
