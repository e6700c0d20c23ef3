use std::path::PathBuf;
use std::sync::mpsc;

use clap::Parser;
use color_eyre::eyre::eyre;
use color_eyre::Result;

use deskhint::assistant::{format_suggestion, spawn_worker, AssistantState};
use deskhint::config;
use deskhint::notification::{NotificationLevel, NotificationState};
use deskhint::session::Session;

/// Fetch AI-generated reply suggestions for a support ticket
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Ticket identifier to analyze
    ticket_id: String,

    /// Acting user id (overrides [session] user_id from config)
    #[arg(long)]
    user: Option<String>,

    /// Path to an alternate config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Install color-eyre panic hook for better error messages
    color_eyre::install()?;
    env_logger::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => config::load_from(path)?,
        None => config::load()?,
    };

    if !config.assistant.enabled {
        return Err(eyre!("The AI assistant is disabled in config"));
    }

    let session = Session::resolve(cli.user.as_deref(), &config);
    if session.is_none() {
        return Err(eyre!(
            "No user identity. Pass --user or set [session] user_id in config."
        ));
    }

    let (request_tx, request_rx) = mpsc::channel();
    let (response_tx, response_rx) = mpsc::channel();
    spawn_worker(&config.backend, request_rx, response_tx);

    let mut state = AssistantState::new();
    state.set_channels(request_tx, response_rx);
    let mut notifications = NotificationState::new();

    if !state.fetch_suggestions(session.as_ref(), &cli.ticket_id) {
        return Err(eyre!(
            "Could not start a suggestion fetch for ticket {}",
            cli.ticket_id
        ));
    }
    eprintln!("Analyzing ticket {}...", cli.ticket_id);

    state.wait_for_settlement(&mut notifications);

    for notification in notifications.drain() {
        match notification.level {
            NotificationLevel::Error => eprintln!("error: {}", notification.message),
            NotificationLevel::Info => eprintln!("{}", notification.message),
        }
    }

    match state.suggestion {
        Some(ref suggestion) => {
            print!("{}", format_suggestion(suggestion));
            Ok(())
        }
        None => Err(eyre!(state
            .error
            .clone()
            .unwrap_or_else(|| "No suggestions returned".to_string()))),
    }
}
