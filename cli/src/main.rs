mod render;
mod transport;

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use triage::{CheckerContext, Identity, LocalIdentity, SubmitError, SymptomChecker, User};

use transport::HttpTransport;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("health check failed: HTTP {0}")]
    Unhealthy(u16),
    #[error("{0}")]
    Submit(#[from] SubmitError),
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "healthpulse-cli", about = "HealthPulse symptom checker CLI")]
struct Cli {
    #[arg(long, env = "HEALTHPULSE_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[arg(long, env = "HEALTHPULSE_USER_ID")]
    user_id: Option<String>,

    #[arg(long, env = "HEALTHPULSE_USER_EMAIL", requires = "user_id")]
    email: Option<String>,

    #[arg(long, default_value_t = 90)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the proxy is up.
    Ping,
    /// Analyze one symptom description and exit.
    Ask {
        #[arg(required = true, num_args = 1..)]
        symptoms: Vec<String>,
    },
    /// Interactive symptom check. `/new` starts over, `/signin <id> [email]`
    /// and `/signout` switch the user, `/whoami` shows it, `/quit` exits.
    Chat,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match &cli.command {
        Command::Ping => run_ping(&cli.base_url).await,
        Command::Ask { symptoms } => run_ask(&cli, &symptoms.join(" ")).await,
        Command::Chat => run_chat(&cli).await,
    }
}

async fn run_ping(base_url: &str) -> Result<(), CliError> {
    let url = format!("{}/healthz", base_url.trim_end_matches('/'));
    let status = reqwest::get(url).await?.status();
    if !status.is_success() {
        return Err(CliError::Unhealthy(status.as_u16()));
    }
    println!("ok");
    Ok(())
}

async fn run_ask(cli: &Cli, text: &str) -> Result<(), CliError> {
    let mut checker = build_checker(cli, Arc::new(identity_for(cli)))?;
    let notice = checker.submit(text).await?;

    for turn in checker.transcript() {
        println!("{}\n{}\n", render::stamp(turn), render::render_turn(turn));
    }
    eprintln!("{}", render::render_notice(notice));
    Ok(())
}

async fn run_chat(cli: &Cli) -> Result<(), CliError> {
    let identity = Arc::new(identity_for(cli));
    let mut checker = build_checker(cli, identity.clone())?;
    let mut user_rx = identity.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("HealthPulse symptom checker. Describe how you feel (/new, /signin, /signout, /whoami, /quit).");

    loop {
        tokio::select! {
            changed = user_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let user = user_rx.borrow_and_update().clone();
                if user.is_none() {
                    println!("{}", render::render_notice(checker.reset()));
                    println!("Signed out. Further checks are anonymous.");
                } else {
                    println!("Now {}.", render::render_user(user.as_ref()));
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match line.trim() {
                    "/quit" => break,
                    "/new" => println!("{}", render::render_notice(checker.reset())),
                    "/signout" if identity.current_user().is_none() => println!("Not signed in."),
                    "/signout" => identity.sign_out(),
                    "/whoami" => println!("{}", render::render_user(identity.current_user().as_ref())),
                    command if command.starts_with("/signin") => match parse_sign_in(command) {
                        Some(user) => identity.sign_in(user),
                        None => println!("Usage: /signin <id> [email]"),
                    },
                    text => submit_and_print(&mut checker, text).await,
                }
            }
        }
    }
    Ok(())
}

async fn submit_and_print(checker: &mut SymptomChecker, text: &str) {
    if text.is_empty() {
        return;
    }
    println!("Analyzing your symptoms...");
    match checker.submit(text).await {
        Ok(notice) => {
            if let Some(turn) = checker.transcript().last() {
                println!("\n{}\n{}\n", render::stamp(turn), render::render_turn(turn));
            }
            println!("{}", render::render_notice(notice));
        }
        Err(err) => eprintln!("! {err}"),
    }
}

fn identity_for(cli: &Cli) -> LocalIdentity {
    match &cli.user_id {
        Some(id) => LocalIdentity::new(Some(User { id: id.clone(), email: cli.email.clone() })),
        None => LocalIdentity::anonymous(),
    }
}

/// `/signin <id> [email]`
fn parse_sign_in(command: &str) -> Option<User> {
    let rest = command.strip_prefix("/signin")?;
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let mut words = rest.split_whitespace();
    let id = words.next()?.to_string();
    let email = words.next().map(str::to_string);
    if words.next().is_some() {
        return None;
    }
    Some(User { id, email })
}

fn build_checker(cli: &Cli, identity: Arc<LocalIdentity>) -> Result<SymptomChecker, CliError> {
    let timeout = Duration::from_secs(cli.timeout_secs);
    let transport = HttpTransport::new(&cli.base_url, timeout)?;
    let ctx = CheckerContext::new(identity, Arc::new(transport)).with_timeout(timeout);
    Ok(SymptomChecker::new(ctx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn ask_joins_words() {
        let cli = Cli::try_parse_from(["healthpulse-cli", "ask", "sore", "throat"]).unwrap();
        let Command::Ask { symptoms } = cli.command else {
            panic!("expected ask");
        };
        assert_eq!(symptoms.join(" "), "sore throat");
    }

    #[test]
    fn ask_requires_text() {
        assert!(Cli::try_parse_from(["healthpulse-cli", "ask"]).is_err());
    }

    #[test]
    fn explicit_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "healthpulse-cli",
            "--base-url",
            "http://proxy:8080",
            "--user-id",
            "u-9",
            "--timeout-secs",
            "5",
            "chat",
        ])
        .unwrap();
        assert_eq!(cli.base_url, "http://proxy:8080");
        assert_eq!(cli.timeout_secs, 5);
        assert_eq!(identity_for(&cli).current_user().map(|u| u.id), Some("u-9".to_string()));
    }

    #[test]
    fn email_flag_lands_on_identity() {
        let cli = Cli::try_parse_from(["healthpulse-cli", "--user-id", "u-3", "--email", "pat@example.test", "chat"])
            .unwrap();
        let user = identity_for(&cli).current_user().unwrap();
        assert_eq!(user.email.as_deref(), Some("pat@example.test"));
    }

    #[test]
    fn email_without_user_id_is_rejected() {
        assert!(Cli::try_parse_from(["healthpulse-cli", "--email", "pat@example.test", "chat"]).is_err());
    }

    #[test]
    fn sign_in_command_parses_id_and_email() {
        assert_eq!(
            parse_sign_in("/signin u-4 pat@example.test"),
            Some(User { id: "u-4".into(), email: Some("pat@example.test".into()) })
        );
        assert_eq!(parse_sign_in("/signin u-5"), Some(User { id: "u-5".into(), email: None }));
        assert_eq!(parse_sign_in("/signin"), None);
        assert_eq!(parse_sign_in("/signin a b c"), None);
        assert_eq!(parse_sign_in("/signinx"), None);
    }

    #[test]
    fn sign_in_replaces_current_user() {
        let identity = LocalIdentity::anonymous();
        identity.sign_in(parse_sign_in("/signin u-6").unwrap());
        assert_eq!(identity.current_user().map(|u| u.id), Some("u-6".to_string()));
    }
}
