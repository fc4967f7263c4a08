use chrono::Local;
use pennywise_client::commands::budget::{self, BudgetPeriodOptions, BudgetSetOptions};
use pennywise_client::commands::report::{
    self, ReportMonthOptions, ReportTrendOptions, ReportYearOptions,
};
use pennywise_client::commands::transaction::{
    self, TransactionInput, TxnAddOptions, TxnDeleteOptions, TxnListOptions, TxnUpdateOptions,
};
use pennywise_client::commands::user::{self, UserListOptions, UserRegisterOptions, UserShowOptions};
use pennywise_client::ledger::calendar::format_iso_date;
use pennywise_client::{ClientResult, SuccessEnvelope};

use crate::cli::{
    BudgetCommand, Cli, Commands, PeriodArgs, ReportCommand, TxnCommand, TxnFieldArgs,
    UserCommand,
};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    let acting = cli.user.clone();
    match &cli.command {
        Commands::User { command } => match command {
            UserCommand::Register {
                username, email, ..
            } => user::register(UserRegisterOptions {
                username: username.clone(),
                email: email.clone(),
                home_override: None,
            }),
            UserCommand::Show { .. } => user::show(UserShowOptions {
                user: acting,
                home_override: None,
            }),
            UserCommand::List { .. } => user::list(UserListOptions {
                home_override: None,
            }),
        },
        Commands::Txn { command } => match command {
            TxnCommand::Add { fields, date, .. } => {
                let date = date
                    .as_ref()
                    .map(|value| value.as_str().to_string())
                    .unwrap_or_else(|| format_iso_date(&Local::now().date_naive()));
                transaction::add(TxnAddOptions {
                    user: acting,
                    input: transaction_input(fields, date),
                    home_override: None,
                })
            }
            TxnCommand::List { category, .. } => transaction::list(TxnListOptions {
                user: acting,
                category: category.clone(),
                home_override: None,
            }),
            TxnCommand::Update {
                txn_id,
                fields,
                date,
                ..
            } => transaction::update(TxnUpdateOptions {
                user: acting,
                txn_id: txn_id.clone(),
                input: transaction_input(fields, date.as_str().to_string()),
                home_override: None,
            }),
            TxnCommand::Delete { txn_id, .. } => transaction::delete(TxnDeleteOptions {
                user: acting,
                txn_id: txn_id.clone(),
                home_override: None,
            }),
        },
        Commands::Budget { command } => match command {
            BudgetCommand::Set { period, amount, .. } => budget::set(BudgetSetOptions {
                user: acting,
                month: period.month,
                year: period.year,
                amount: *amount,
                home_override: None,
            }),
            BudgetCommand::Show { period, .. } => budget::show(budget_period(acting, period)),
            BudgetCommand::Status { period, .. } => budget::status(budget_period(acting, period)),
        },
        Commands::Report { command } => match command {
            ReportCommand::Monthly { period, .. } => report::monthly(report_month(acting, period)),
            ReportCommand::Categories { period, .. } => {
                report::categories(report_month(acting, period))
            }
            ReportCommand::Daily { period, .. } => report::daily(report_month(acting, period)),
            ReportCommand::Yearly { year, .. } => report::yearly(ReportYearOptions {
                user: acting,
                year: *year,
                home_override: None,
            }),
            ReportCommand::Trend { .. } => report::trend(ReportTrendOptions {
                user: acting,
                home_override: None,
            }),
        },
    }
}

fn transaction_input(fields: &TxnFieldArgs, date: String) -> TransactionInput {
    TransactionInput {
        name: fields.name.clone(),
        date,
        category: fields.category.clone(),
        income: fields.income,
        expense: fields.expense,
        description: fields.description.clone(),
    }
}

fn budget_period(user: Option<String>, period: &PeriodArgs) -> BudgetPeriodOptions<'static> {
    BudgetPeriodOptions {
        user,
        month: period.month,
        year: period.year,
        home_override: None,
    }
}

fn report_month(user: Option<String>, period: &PeriodArgs) -> ReportMonthOptions<'static> {
    ReportMonthOptions {
        user,
        month: period.month,
        year: period.year,
        home_override: None,
    }
}

#[cfg(test)]
mod tests {
    use crate::cli::{Commands, TxnCommand, parse_from};

    use super::transaction_input;

    #[test]
    fn transaction_fields_carry_over_to_client_input() {
        let parsed = parse_from([
            "pennywise",
            "txn",
            "add",
            "--name",
            "Lunch",
            "--category",
            "Food",
            "--expense",
            "9.75",
            "--description",
            "tacos",
        ]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed
            && let Commands::Txn {
                command: TxnCommand::Add { fields, .. },
            } = &cli.command
        {
            let input = transaction_input(fields, "2025-01-10".to_string());
            assert_eq!(input.name, "Lunch");
            assert_eq!(input.expense, Some(9.75));
            assert_eq!(input.income, None);
            assert_eq!(input.description.as_deref(), Some("tacos"));
            assert_eq!(input.date, "2025-01-10");
        }
    }
}
