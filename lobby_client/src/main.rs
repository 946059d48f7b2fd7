//! Command-line client for the Lobby condominium package service.
//!
//! Signs in, keeps the session token between runs and lists or confirms
//! parcel deliveries for the signed-in account.

use anyhow::{Context, Result};
use lobby::{ApiClient, ClientConfig, SessionManager};
use lobby_client::{
    app,
    cli::{self, Command},
    logging,
};
use pico_args::Arguments;
use std::io::{self, Write};
use std::sync::Arc;

const HELP: &str = "\
Lobby package service client

USAGE:
  lobby_client [OPTIONS] <COMMAND>

COMMANDS:
  login <LOGIN>               Sign in and remember the session
  whoami                      Show the signed-in account
  logout                      Sign out and forget the session
  deliveries                  List deliveries visible to the account
  confirm <TRACKING_CODE>     Confirm a parcel withdrawal (doormen)
  plans                       List subscription plans
  forgot-password <EMAIL>     Request a password reset e-mail

OPTIONS:
  --server URL          Backend base URL  [env: LOBBY_API_URL]
                        [default: http://localhost:8080/api/v1]
  --data-dir DIR        Directory for the session token  [env: LOBBY_DATA_DIR]
  -p, --password PASS   Password for login (prompted when omitted)

FLAGS:
  -h, --help            Print help information
";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let invocation = match cli::parse(Arguments::from_env()) {
        Ok(invocation) => invocation,
        Err(e) => {
            eprintln!("Error: {e}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    if invocation.command == Command::Help {
        print!("{HELP}");
        return Ok(());
    }

    logging::init();

    let config = ClientConfig::from_env(invocation.server, invocation.data_dir)
        .context("Failed to load configuration")?;
    let api = ApiClient::from_config(&config).context("Failed to create HTTP client")?;
    let session = SessionManager::new(api, Arc::new(config.token_store()));

    let command = match invocation.command {
        Command::Login {
            login,
            password: None,
        } => Command::Login {
            login,
            password: Some(prompt("Password: ")?),
        },
        command => command,
    };

    if command.needs_session() {
        session.restore().await;
    }

    app::run(&session, command, &mut io::stdout()).await
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Failed to read from stdin")?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}
