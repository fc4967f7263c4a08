use crate::cli::{BudgetCommand, Commands, ReportCommand, TxnCommand, UserCommand};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputMode {
    Text,
    Json,
}

impl From<bool> for OutputMode {
    fn from(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }
}

pub fn mode_for_command(command: &Commands) -> OutputMode {
    let json = match command {
        Commands::User { command } => match command {
            UserCommand::Register { json, .. }
            | UserCommand::Show { json }
            | UserCommand::List { json } => *json,
        },
        Commands::Txn { command } => match command {
            TxnCommand::Add { json, .. }
            | TxnCommand::List { json, .. }
            | TxnCommand::Update { json, .. }
            | TxnCommand::Delete { json, .. } => *json,
        },
        Commands::Budget { command } => match command {
            BudgetCommand::Set { json, .. }
            | BudgetCommand::Show { json, .. }
            | BudgetCommand::Status { json, .. } => *json,
        },
        Commands::Report { command } => match command {
            ReportCommand::Monthly { json, .. }
            | ReportCommand::Categories { json, .. }
            | ReportCommand::Daily { json, .. }
            | ReportCommand::Yearly { json, .. }
            | ReportCommand::Trend { json } => *json,
        },
    };
    OutputMode::from(json)
}
