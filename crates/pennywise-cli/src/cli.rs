use clap::{Args, Parser, Subcommand};
use pennywise_client::ledger::calendar;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsoDate(pub String);

impl IsoDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn parse_iso_date(value: &str) -> Result<IsoDate, String> {
    match calendar::parse_iso_date(value) {
        Some(_) => Ok(IsoDate(value.to_string())),
        None => Err("date must use YYYY-MM-DD format with a real calendar date".to_string()),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "pennywise",
    version,
    about = "personal income and expense ledger",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Username to act as (defaults to PENNYWISE_USER)
    #[arg(long, global = true, env = "PENNYWISE_USER")]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Register and inspect ledger users
    #[command(arg_required_else_help = true)]
    User {
        #[command(subcommand)]
        command: UserCommand,
    },
    /// Record, list, edit, and remove transactions
    #[command(arg_required_else_help = true)]
    Txn {
        #[command(subcommand)]
        command: TxnCommand,
    },
    /// Set and check monthly spending budgets
    #[command(arg_required_else_help = true)]
    Budget {
        #[command(subcommand)]
        command: BudgetCommand,
    },
    /// Summaries and spending series over your transactions
    #[command(arg_required_else_help = true)]
    Report {
        #[command(subcommand)]
        command: ReportCommand,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum UserCommand {
    /// Create a new user profile
    Register {
        /// Unique username
        username: String,
        /// Unique email address
        #[arg(long)]
        email: String,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Show the acting user's profile
    Show {
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// List every registered user
    List {
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Args)]
pub struct TxnFieldArgs {
    /// Short label for the transaction
    #[arg(long)]
    pub name: String,
    /// Category label, matched exactly in filters and reports
    #[arg(long)]
    pub category: String,
    /// Money received
    #[arg(long, allow_negative_numbers = true)]
    pub income: Option<f64>,
    /// Money spent
    #[arg(long, allow_negative_numbers = true)]
    pub expense: Option<f64>,
    /// Free-form note
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum TxnCommand {
    /// Record a new transaction
    Add {
        #[command(flatten)]
        fields: TxnFieldArgs,
        /// Transaction date (YYYY-MM-DD, defaults to today)
        #[arg(long, value_parser = parse_iso_date)]
        date: Option<IsoDate>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// List your transactions in date order
    List {
        /// Only show this exact category
        #[arg(long)]
        category: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Replace every field of one of your transactions
    Update {
        /// The transaction ID to edit (e.g. txn_01J...)
        txn_id: String,
        #[command(flatten)]
        fields: TxnFieldArgs,
        /// Transaction date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_iso_date)]
        date: IsoDate,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Remove one of your transactions
    Delete {
        /// The transaction ID to remove
        txn_id: String,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, Args)]
pub struct PeriodArgs {
    /// Calendar month, 1-12
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: u32,
    /// Four-digit calendar year
    #[arg(long, value_parser = clap::value_parser!(i32).range(1..=9999))]
    pub year: i32,
}

#[derive(Debug, Clone, Subcommand)]
pub enum BudgetCommand {
    /// Create or overwrite the budget for one month
    Set {
        #[command(flatten)]
        period: PeriodArgs,
        /// Budget amount for the month
        #[arg(long, allow_negative_numbers = true)]
        amount: f64,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Show the budget for one month, if any
    Show {
        #[command(flatten)]
        period: PeriodArgs,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Compare one month's spending with its budget
    Status {
        #[command(flatten)]
        period: PeriodArgs,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ReportCommand {
    /// Income, expenses, and balance for one month
    Monthly {
        #[command(flatten)]
        period: PeriodArgs,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Expenses per category for one month
    Categories {
        #[command(flatten)]
        period: PeriodArgs,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Expenses for every day of one month
    Daily {
        #[command(flatten)]
        period: PeriodArgs,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Expenses for every month of one year
    Yearly {
        /// Four-digit calendar year
        #[arg(long, value_parser = clap::value_parser!(i32).range(1..=9999))]
        year: i32,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Expenses per year across your whole history
    Trend {
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}
