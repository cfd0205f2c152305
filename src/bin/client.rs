use std::{
    env,
    io::{self, Write},
    process::ExitCode,
};

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use budget_tracker::dashboard::{
    Command, DashboardSession, HELP_TEXT, HttpTransactionApi, render,
};

/// An interactive console client for the budget tracker.
///
/// The password is read from the `BUDGET_PASSWORD` environment variable.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The address of the budget tracker server.
    #[arg(long, default_value = "http://localhost:3000")]
    url: String,

    /// The email address to log in with.
    #[arg(long)]
    email: String,

    /// Create a new account instead of logging in.
    #[arg(long, requires = "name")]
    register: bool,

    /// The name for a new account.
    #[arg(long)]
    name: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let Ok(password) = env::var("BUDGET_PASSWORD") else {
        eprintln!("The environment variable 'BUDGET_PASSWORD' must be set");
        return ExitCode::FAILURE;
    };

    let api = HttpTransactionApi::new(&args.url);
    let profile = match (&args.name, args.register) {
        (Some(name), true) => api.register(name, &args.email, &password).await,
        _ => api.log_in(&args.email, &password).await,
    };

    match profile {
        Ok(profile) => println!("Logged in as {} <{}>", profile.name, profile.email),
        Err(error) => {
            eprintln!("Could not authenticate: {error}");
            return ExitCode::FAILURE;
        }
    }

    let mut session = DashboardSession::new(api);
    session.mount().await;
    print!("{}", render(session.dashboard()));
    println!("Enter `help` to see the commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        // The prompt is cosmetic.
        let _ = io::stdout().flush();

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(error) => {
                eprintln!("Could not read input: {error}");
                return ExitCode::FAILURE;
            }
        };

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(error) => {
                println!("{error}");
                continue;
            }
        };

        match command {
            Command::List => session.mount().await,
            Command::Add {
                kind,
                amount_text,
                name,
            } => {
                session.add_transaction(&name, &amount_text, kind).await;
            }
            Command::Delete(id) => session.delete_transaction(id).await,
            Command::Select(id) => session.toggle(id),
            Command::DeleteSelected => {
                if !session.dashboard().can_delete_selected() {
                    println!("Select transactions with `select <id>` first.");
                    continue;
                }

                session.delete_selected().await;
            }
            Command::Help => {
                println!("{HELP_TEXT}");
                continue;
            }
            Command::Quit => break,
        }

        print!("{}", render(session.dashboard()));
    }

    ExitCode::SUCCESS
}
