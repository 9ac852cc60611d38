//! Folio application binary - composition root.
//!
//! Ties the portfolio crates into a terminal front end:
//! 1. Load configuration from TOML
//! 2. Build the GitHub repository source
//! 3. Run the requested command (interactive chat, one-shot ask, or the
//!    project catalog)

mod cli;

use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use folio_chat::{ChatSession, Message, ReplySynthesizer, Sender, SubmitOutcome, QUICK_QUESTIONS};
use folio_core::config::FolioConfig;
use folio_core::error::FolioError;
use folio_github::{GithubClient, ProjectCard, ProjectCatalog, RepositorySource};

use cli::{CliArgs, Command};

/// Shown while a reply is pending, like the widget's typing dots.
const BUSY_INDICATOR: &str = "\u{2022}\u{2022}\u{2022}";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config is read before tracing so its log level can apply; the load
    // outcome is logged right after.
    let config_file = args.resolve_config_path();
    let loaded = FolioConfig::load(&config_file);
    let config_level = loaded
        .as_ref()
        .map(|c| c.general.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());

    // Tracing.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(args.resolve_log_level(&config_level))
            }),
        )
        .init();

    tracing::info!("Starting folio v{}", env!("CARGO_PKG_VERSION"));

    let mut config = match loaded {
        Ok(config) => {
            tracing::info!(path = %config_file.display(), "Configuration loaded");
            config
        }
        Err(e) => {
            tracing::warn!(path = %config_file.display(), error = %e, "Using default configuration");
            FolioConfig::default()
        }
    };
    if let Some(account) = args.account.clone() {
        config.github.account = account;
    }

    // Repository source.
    let client = GithubClient::new(&config.github)?;
    tracing::info!(url = %client.repos_url(), "GitHub repository source ready");
    let source: Arc<dyn RepositorySource> = Arc::new(client);

    match args.command() {
        Command::Chat => {
            let session = ChatSession::new(ReplySynthesizer::from_config(
                Arc::clone(&source),
                &config,
            ));
            run_chat(&session).await?;
        }
        Command::Ask { question } => {
            let session = ChatSession::new(ReplySynthesizer::from_config(
                Arc::clone(&source),
                &config,
            ));
            session.submit(&question).await;
            if let Some(reply) = session.transcript().last() {
                println!("{}", reply.plain_text());
            }
        }
        Command::Projects { json } => {
            let cards = ProjectCatalog::load(source.as_ref())
                .await
                .map_err(FolioError::from)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&cards)?);
            } else {
                print_cards(&cards);
            }
        }
    }

    Ok(())
}

/// Interactive loop over stdin.
///
/// Lines are read one at a time and each submit is awaited before the next
/// read, so a second question can never overlap a pending reply.
async fn run_chat(session: &ChatSession) -> std::io::Result<()> {
    session.open();
    print_messages(&session.transcript());
    print_quick_questions();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        match input {
            "" => continue,
            ":q" | ":quit" | ":salir" => break,
            ":clear" | ":limpiar" => {
                session.clear();
                print_messages(&session.transcript());
                print_quick_questions();
                continue;
            }
            _ => {}
        }

        let before = session.transcript().len();
        println!("{}", BUSY_INDICATOR);
        let outcome = match quick_index(input) {
            Some(index) => session
                .submit_quick(index)
                .await
                .unwrap_or(SubmitOutcome::Ignored),
            None => session.submit(input).await,
        };

        if outcome == SubmitOutcome::Appended {
            let transcript = session.transcript();
            print_messages(transcript.get(before..).unwrap_or_default());
        } else {
            tracing::debug!(?outcome, "Nothing appended");
        }
    }

    session.close();
    Ok(())
}

/// Map "1".."3" to a quick-question index.
fn quick_index(input: &str) -> Option<usize> {
    let n: usize = input.parse().ok()?;
    (1..=QUICK_QUESTIONS.len()).contains(&n).then(|| n - 1)
}

fn print_messages(messages: &[Message]) {
    for msg in messages {
        let prefix = match msg.sender() {
            Sender::User => "tú",
            Sender::Bot => "bot",
        };
        println!("{}> {}", prefix, msg.plain_text());
    }
}

fn print_quick_questions() {
    for (i, q) in QUICK_QUESTIONS.iter().enumerate() {
        println!("  [{}] {}", i + 1, q);
    }
    println!("  [:clear] limpiar chat   [:quit] salir");
}

fn print_cards(cards: &[ProjectCard]) {
    if cards.is_empty() {
        println!("No hay proyectos.");
        return;
    }
    for card in cards {
        println!("{} [{}]", card.name, card.language);
        println!("  {}", card.description);
        println!("  {}", card.url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quick_index_range() {
        assert_eq!(quick_index("1"), Some(0));
        assert_eq!(quick_index("3"), Some(2));
        assert_eq!(quick_index("0"), None);
        assert_eq!(quick_index("4"), None);
        assert_eq!(quick_index("repos"), None);
        assert_eq!(quick_index("-1"), None);
    }
}
