//! Commands for the interactive console client.

use std::str::FromStr;

use crate::transaction::{TransactionId, TransactionType};

/// The usage text printed by the `help` command.
pub const HELP_TEXT: &str = "\
Commands:
  list                             Fetch your transactions again
  add <income|expense> <amount> <name>
                                   Add a transaction, e.g. `add income 5000 Salary`
  delete <id>                      Delete a single transaction
  select <id>                      Select or deselect a transaction for batch deletion
  delete-selected                  Delete every selected transaction
  help                             Show this message
  quit                             Exit";

/// A line of input from the console client.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Fetch the transactions again.
    List,
    /// Add a transaction.
    ///
    /// The amount is kept as text so that the dashboard can validate it the
    /// same way it validates any other input.
    Add {
        /// Whether the transaction is income or an expense.
        kind: TransactionType,
        /// The amount as typed.
        amount_text: String,
        /// The rest of the line.
        name: String,
    },
    /// Delete a single transaction.
    Delete(TransactionId),
    /// Toggle a transaction's selection.
    Select(TransactionId),
    /// Delete every selected transaction.
    DeleteSelected,
    /// Show the usage text.
    Help,
    /// Exit the client.
    Quit,
}

/// Why a line of input is not a valid [Command].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CommandError {
    /// The line was blank.
    #[error("enter a command, or `help` to see the commands")]
    Empty,

    /// The first word is not a command.
    #[error("unknown command \"{0}\", enter `help` to see the commands")]
    Unknown(String),

    /// The command is missing something or has something malformed.
    #[error("usage: {0}")]
    Usage(&'static str),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (command, rest) = line
            .split_once(char::is_whitespace)
            .map(|(command, rest)| (command, rest.trim()))
            .unwrap_or((line, ""));

        match command.to_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "list" | "ls" => Ok(Self::List),
            "add" => parse_add(rest),
            "delete" | "rm" => parse_id(rest, "delete <id>").map(Self::Delete),
            "select" => parse_id(rest, "select <id>").map(Self::Select),
            "delete-selected" => Ok(Self::DeleteSelected),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            _ => Err(CommandError::Unknown(command.to_owned())),
        }
    }
}

const ADD_USAGE: &str = "add <income|expense> <amount> <name>";

fn parse_add(arguments: &str) -> Result<Command, CommandError> {
    let mut parts = arguments.splitn(3, char::is_whitespace);

    let kind: TransactionType = parts
        .next()
        .and_then(|kind| kind.to_lowercase().parse().ok())
        .ok_or(CommandError::Usage(ADD_USAGE))?;
    let amount_text = parts
        .next()
        .filter(|amount| !amount.is_empty())
        .ok_or(CommandError::Usage(ADD_USAGE))?;
    let name = parts.next().unwrap_or_default().trim();

    Ok(Command::Add {
        kind,
        amount_text: amount_text.to_owned(),
        name: name.to_owned(),
    })
}

fn parse_id(arguments: &str, usage: &'static str) -> Result<TransactionId, CommandError> {
    arguments.parse().map_err(|_| CommandError::Usage(usage))
}
