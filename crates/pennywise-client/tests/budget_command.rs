mod support;

use pennywise_client::commands::budget::{self, BudgetPeriodOptions, BudgetSetOptions};
use support::ledger_testkit::{expense, payload, register, temp_home_in_tmp};

fn set_budget(home: &std::path::Path, username: &str, amount: f64) -> serde_json::Value {
    payload(budget::set(BudgetSetOptions {
        user: Some(username.to_string()),
        month: 3,
        year: 2025,
        amount,
        home_override: Some(home),
    }))
}

fn period<'a>(home: &'a std::path::Path, username: &str) -> BudgetPeriodOptions<'a> {
    BudgetPeriodOptions {
        user: Some(username.to_string()),
        month: 3,
        year: 2025,
        home_override: Some(home),
    }
}

#[test]
fn setting_a_budget_twice_overwrites_the_same_row() {
    let temp = temp_home_in_tmp("pennywise-budget-upsert");
    assert!(temp.is_ok());
    if let Ok((_guard, home)) = temp {
        register(&home, "alice");
        let first = set_budget(&home, "alice", 100.0);
        let second = set_budget(&home, "alice", 150.0);
        assert_eq!(
            first["data"]["budget"]["budget_id"],
            second["data"]["budget"]["budget_id"]
        );

        let shown = payload(budget::show(period(&home, "alice")));
        assert_eq!(shown["data"]["budget"]["amount"], 150.0);
    }
}

#[test]
fn missing_budget_shows_as_null() {
    let temp = temp_home_in_tmp("pennywise-budget-missing");
    assert!(temp.is_ok());
    if let Ok((_guard, home)) = temp {
        register(&home, "alice");
        register(&home, "bob");
        set_budget(&home, "bob", 75.0);

        let shown = payload(budget::show(period(&home, "alice")));
        assert!(shown["data"]["budget"].is_null());
        assert_eq!(shown["data"]["month"], 3);
    }
}

#[test]
fn status_compares_spending_against_the_budget() {
    let temp = temp_home_in_tmp("pennywise-budget-status");
    assert!(temp.is_ok());
    if let Ok((_guard, home)) = temp {
        register(&home, "alice");
        set_budget(&home, "alice", 200.0);
        expense(&home, "alice", "2025-03-04", "Food", 50.0);
        expense(&home, "alice", "2025-04-01", "Food", 999.0);

        let status = payload(budget::status(period(&home, "alice")));
        assert_eq!(status["data"]["budget"], 200.0);
        assert_eq!(status["data"]["total_expenses"], 50.0);
        assert_eq!(status["data"]["remaining"], 150.0);
        assert_eq!(status["data"]["progress_percent"], 25.0);
    }
}

#[test]
fn month_out_of_range_is_rejected() {
    let temp = temp_home_in_tmp("pennywise-budget-month");
    assert!(temp.is_ok());
    if let Ok((_guard, home)) = temp {
        register(&home, "alice");
        let result = budget::set(BudgetSetOptions {
            user: Some("alice".to_string()),
            month: 13,
            year: 2025,
            amount: 10.0,
            home_override: Some(&home),
        });
        assert!(matches!(result, Err(ref error) if error.code == "invalid_argument"));
    }
}
