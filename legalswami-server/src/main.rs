//! LegalSwami Server - Headless Daemon
//!
//! A Rust HTTP server that:
//! - Resolves Groq API keys into a least-used credential pool
//! - Answers legal questions on /api/chat through the model dispatcher
//! - Exposes model and key status for operators on /api/*
//!
//! Access via: http://localhost:8080

use anyhow::Result;
use clap::Parser;

mod api;
mod cli;
mod commands;
mod router;
mod state;

#[cfg(test)]
mod test_helpers;

use cli::{Cli, Commands};
use legalswami_core::modules::config::load_config;
use legalswami_core::modules::logger::{init_logger, with_startup_logger};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = with_startup_logger(&cli.log_level, || load_config(cli.config.as_deref()))?;
    let _log_guard = init_logger(
        &cli.log_level,
        config.log_dir.as_deref().map(std::path::Path::new),
    )?;

    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => {
            tracing::info!("🚀 LegalSwami Server starting...");
            commands::handle_serve(config, port).await
        }
        Commands::Ask { question, model } => commands::handle_ask(config, &question, model).await,
        Commands::Models { json } => commands::handle_models(config, json),
        Commands::Keys { json } => commands::handle_keys(config, json),
        Commands::EncryptKey { key, secret } => commands::handle_encrypt_key(&config, &key, secret),
    }
}
