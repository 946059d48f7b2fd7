//! Command-line parsing.

use pico_args::Arguments;
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

/// What the user asked the client to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Sign in; the password is prompted for when not given
    Login {
        login: String,
        password: Option<String>,
    },
    Whoami,
    Logout,
    /// List the deliveries visible to the signed-in account
    Deliveries,
    /// Confirm a parcel withdrawal (doormen)
    Confirm { tracking_code: String },
    Plans,
    ForgotPassword { email: String },
    Help,
}

impl Command {
    /// Whether the persisted session has to be restored before running
    pub fn needs_session(&self) -> bool {
        matches!(
            self,
            Command::Whoami | Command::Logout | Command::Deliveries | Command::Confirm { .. }
        )
    }
}

/// Parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// `--server` override for the backend base URL
    pub server: Option<String>,
    /// `--data-dir` override for the token directory
    pub data_dir: Option<PathBuf>,
    pub command: Command,
}

/// Errors that can occur during argument parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Subcommand not recognized.
    UnknownCommand(String),
    /// Subcommand is missing a positional argument.
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    /// Option given to a subcommand that does not take it.
    UnexpectedOption {
        command: &'static str,
        option: &'static str,
    },
    /// Arguments left over after parsing.
    UnexpectedArguments(Vec<String>),
    /// Malformed option value.
    InvalidOption(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCommand(command) => write!(
                f,
                "Unrecognized command '{}'. Run with --help to see available commands",
                command
            ),
            Self::MissingArgument { command, argument } => {
                write!(
                    f,
                    "'{}' requires {} (e.g., '{} {}')",
                    command,
                    argument,
                    command,
                    example(argument)
                )
            }
            Self::UnexpectedOption { command, option } => {
                write!(f, "'{}' does not accept {}", command, option)
            }
            Self::UnexpectedArguments(rest) => {
                write!(f, "Unexpected arguments: {}", rest.join(" "))
            }
            Self::InvalidOption(reason) => write!(f, "Invalid option: {}", reason),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<pico_args::Error> for ParseError {
    fn from(error: pico_args::Error) -> Self {
        ParseError::InvalidOption(error.to_string())
    }
}

fn example(argument: &str) -> &'static str {
    match argument {
        "a login" => "ana@example.com",
        "a tracking code" => "BR123456789",
        "an e-mail address" => "ana@example.com",
        _ => "...",
    }
}

/// Parse the process arguments.
///
/// Global options may appear anywhere; the first free argument is the
/// subcommand. No subcommand means help.
///
/// # Errors
///
/// * `ParseError` - Unknown subcommand, missing argument or leftover input
pub fn parse(mut args: Arguments) -> Result<Invocation, ParseError> {
    if args.contains(["-h", "--help"]) {
        return Ok(Invocation {
            server: None,
            data_dir: None,
            command: Command::Help,
        });
    }

    let server: Option<String> = args.opt_value_from_str("--server")?;
    let data_dir: Option<PathBuf> = args.opt_value_from_str("--data-dir")?;
    let password: Option<String> = args.opt_value_from_str(["-p", "--password"])?;
    let name: Option<String> = args.opt_free_from_str()?;

    let command = match name.as_deref() {
        None | Some("help") => Command::Help,
        Some("login") => Command::Login {
            login: required(&mut args, "login", "a login")?,
            password: password.clone(),
        },
        Some("whoami") => Command::Whoami,
        Some("logout") => Command::Logout,
        Some("deliveries") => Command::Deliveries,
        Some("confirm") => Command::Confirm {
            tracking_code: required(&mut args, "confirm", "a tracking code")?,
        },
        Some("plans") => Command::Plans,
        Some("forgot-password") => Command::ForgotPassword {
            email: required(&mut args, "forgot-password", "an e-mail address")?,
        },
        Some(other) => return Err(ParseError::UnknownCommand(other.to_string())),
    };

    if !matches!(command, Command::Login { .. }) && password.is_some() {
        return Err(ParseError::UnexpectedOption {
            command: command_name(&command),
            option: "--password",
        });
    }

    let rest = args.finish();
    if !rest.is_empty() {
        return Err(ParseError::UnexpectedArguments(lossy(rest)));
    }

    Ok(Invocation {
        server,
        data_dir,
        command,
    })
}

fn required(
    args: &mut Arguments,
    command: &'static str,
    argument: &'static str,
) -> Result<String, ParseError> {
    let value: Option<String> = args.opt_free_from_str()?;
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or(ParseError::MissingArgument { command, argument })
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Login { .. } => "login",
        Command::Whoami => "whoami",
        Command::Logout => "logout",
        Command::Deliveries => "deliveries",
        Command::Confirm { .. } => "confirm",
        Command::Plans => "plans",
        Command::ForgotPassword { .. } => "forgot-password",
        Command::Help => "help",
    }
}

fn lossy(rest: Vec<OsString>) -> Vec<String> {
    rest.into_iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_args(args: &[&str]) -> Result<Invocation, ParseError> {
        parse(Arguments::from_vec(
            args.iter().map(OsString::from).collect(),
        ))
    }

    fn command(args: &[&str]) -> Command {
        parse_args(args).unwrap().command
    }

    #[test]
    fn test_parse_no_arguments_is_help() {
        assert_eq!(command(&[]), Command::Help);
        assert_eq!(command(&["help"]), Command::Help);
        assert_eq!(command(&["--help"]), Command::Help);
        assert_eq!(command(&["deliveries", "-h"]), Command::Help);
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(command(&["whoami"]), Command::Whoami);
        assert_eq!(command(&["logout"]), Command::Logout);
        assert_eq!(command(&["deliveries"]), Command::Deliveries);
        assert_eq!(command(&["plans"]), Command::Plans);
    }

    #[test]
    fn test_parse_login_with_and_without_password() {
        assert_eq!(
            command(&["login", "ana"]),
            Command::Login {
                login: "ana".to_string(),
                password: None
            }
        );
        assert_eq!(
            command(&["login", "ana", "--password", "Secret123"]),
            Command::Login {
                login: "ana".to_string(),
                password: Some("Secret123".to_string())
            }
        );
        assert_eq!(
            command(&["-p", "pw", "login", "ana"]),
            Command::Login {
                login: "ana".to_string(),
                password: Some("pw".to_string())
            }
        );
    }

    #[test]
    fn test_parse_global_options_anywhere() {
        let invocation =
            parse_args(&["deliveries", "--server", "https://lobby.example.com/api/v1"]).unwrap();
        assert_eq!(
            invocation.server.as_deref(),
            Some("https://lobby.example.com/api/v1")
        );
        assert_eq!(invocation.command, Command::Deliveries);

        let invocation = parse_args(&["--data-dir", "/tmp/lobby", "whoami"]).unwrap();
        assert_eq!(invocation.data_dir, Some(PathBuf::from("/tmp/lobby")));
        assert_eq!(invocation.server, None);
    }

    #[test]
    fn test_parse_confirm_and_forgot_password() {
        assert_eq!(
            command(&["confirm", "BR123"]),
            Command::Confirm {
                tracking_code: "BR123".to_string()
            }
        );
        assert_eq!(
            command(&["forgot-password", "ana@example.com"]),
            Command::ForgotPassword {
                email: "ana@example.com".to_string()
            }
        );
    }

    #[test]
    fn test_parse_missing_argument() {
        assert_eq!(
            parse_args(&["confirm"]),
            Err(ParseError::MissingArgument {
                command: "confirm",
                argument: "a tracking code"
            })
        );
        assert!(matches!(
            parse_args(&["login"]),
            Err(ParseError::MissingArgument { command: "login", .. })
        ));
    }

    #[test]
    fn test_parse_unknown_command() {
        assert_eq!(
            parse_args(&["dance"]),
            Err(ParseError::UnknownCommand("dance".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_leftovers() {
        assert_eq!(
            parse_args(&["whoami", "extra"]),
            Err(ParseError::UnexpectedArguments(vec!["extra".to_string()]))
        );
        assert!(matches!(
            parse_args(&["plans", "--password", "pw"]),
            Err(ParseError::UnexpectedOption { command: "plans", .. })
        ));
    }

    #[test]
    fn test_only_account_commands_need_a_session() {
        assert!(Command::Whoami.needs_session());
        assert!(Command::Deliveries.needs_session());
        assert!(!Command::Plans.needs_session());
        assert!(!Command::Help.needs_session());
        assert!(
            !Command::Login {
                login: "ana".to_string(),
                password: None
            }
            .needs_session()
        );
    }

    #[test]
    fn test_error_message_missing_argument() {
        let err = ParseError::MissingArgument {
            command: "confirm",
            argument: "a tracking code",
        };
        assert_eq!(
            err.to_string(),
            "'confirm' requires a tracking code (e.g., 'confirm BR123456789')"
        );
    }
}
