//! CLI entrypoint for deskchat
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use deskchat_application::{ConversationObserver, SessionEnv};
use deskchat_domain::Channel;
use deskchat_infrastructure::{
    BackendClient, ConfigLoader, HttpAssistantGateway, HttpIdentityGateway,
    JsonlConversationLogger,
};
use deskchat_presentation::{Cli, ReplConfig, TypingIndicator, WidgetRepl};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };
    for issue in config.validate() {
        warn!("{} (using default)", issue);
    }

    if cli.no_color || !config.output.color {
        colored::control::set_override(false);
    }

    let channel = cli
        .channel
        .map(Channel::from)
        .unwrap_or_else(|| config.widget.parse_channel().0);
    let base_url = match cli.backend {
        Some(url) => url,
        None => config.backend.parse_base_url().0,
    };

    info!("Starting deskchat ({} channel, backend {})", channel, base_url);

    // === Dependency Injection ===
    let client = BackendClient::new(&base_url, config.backend.parse_timeout().0)
        .with_context(|| format!("Invalid backend URL '{}'", base_url))?;
    let assistant = Arc::new(HttpAssistantGateway::new(client.clone()));
    let identity = Arc::new(HttpIdentityGateway::new(client));

    let observer: Arc<dyn ConversationObserver> = if cli.quiet {
        Arc::new(TypingIndicator::quiet())
    } else {
        Arc::new(TypingIndicator::new())
    };
    let mut env = SessionEnv::default()
        .with_behavior(config.behavior())
        .with_observer(observer);

    if let Some(path) = cli.transcript.or(config.logging.transcript) {
        match JsonlConversationLogger::open(&path) {
            Some(logger) => {
                info!("Writing transcript to {}", logger.path().display());
                env = env.with_logger(Arc::new(logger));
            }
            None => warn!("Continuing without a transcript"),
        }
    }

    let repl = WidgetRepl::new(assistant, identity, channel)
        .with_env(env)
        .with_config(ReplConfig::default());

    repl.run().await?;

    Ok(())
}
