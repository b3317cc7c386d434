use anyhow::{Context, Result};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};

use legalswami_core::modules::prompt::build_messages;
use legalswami_core::routing::credential_pool::encrypt_api_key;
use legalswami_core::routing::upstream::user_facing_message;
use legalswami_types::RouterConfig;

use crate::router::build_router;
use crate::state::AppState;

pub async fn handle_serve(config: RouterConfig, port: Option<u16>) -> Result<()> {
    let mut config = config;
    if let Some(port) = port {
        config.port = port;
    }
    let addr = config.get_socket_addr();

    let state = AppState::from_config(config)?;
    if !state.is_ready() {
        tracing::warn!("⚠️ No valid API keys resolved; /api/chat will answer 503");
    }
    tracing::info!(
        "✅ {} API keys, {} models, starting with {}",
        state.pool().len(),
        state.dispatcher().models().len(),
        state.dispatcher().current_model()
    );

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("🌐 Server listening on http://{}", addr);
    tracing::info!("🔌 API available at http://{}/api/", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

pub async fn handle_ask(config: RouterConfig, question: &str, model: Option<String>) -> Result<()> {
    if question.trim().is_empty() {
        anyhow::bail!("Question must not be empty");
    }

    let state = AppState::from_config(config)?;
    if let Some(model) = model {
        state.dispatcher().switch_to_model(&model)?;
    }

    let messages = build_messages(question, &[]);
    match state.dispatcher().send_completion_with_model(&messages).await {
        Ok((answer, model)) => {
            println!("{}", answer);
            println!("\n{} {}", "model:".dimmed(), model.dimmed());
            Ok(())
        }
        Err(e) => {
            tracing::debug!("Completion failed: {}", e);
            anyhow::bail!(user_facing_message(&e))
        }
    }
}

pub fn handle_models(config: RouterConfig, json: bool) -> Result<()> {
    let state = AppState::from_config(config)?;
    let dispatcher = state.dispatcher();
    let current = dispatcher.current_model();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "current": current,
                "models": dispatcher.models(),
                "fallback_enabled": dispatcher.settings().fallback_enabled,
            }))?
        );
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["#", "Model", "Status"]);

    for (i, model) in dispatcher.models().iter().enumerate() {
        let status = if *model == current {
            Cell::new("Current").fg(Color::Green)
        } else {
            Cell::new("-")
        };
        table.add_row(vec![Cell::new(i + 1), Cell::new(model), status]);
    }

    println!("{table}");
    let fallback = if dispatcher.settings().fallback_enabled { "enabled".green() } else { "disabled".red() };
    println!("\nFallback: {}", fallback);
    Ok(())
}

pub fn handle_keys(config: RouterConfig, json: bool) -> Result<()> {
    let state = AppState::from_config(config)?;
    let keys = state.pool().usage_snapshot();

    if json {
        println!("{}", serde_json::to_string_pretty(&keys)?);
        return Ok(());
    }

    if keys.is_empty() {
        println!("{}", "No valid API keys found.".yellow());
        println!("Set GROQ_API_KEY, GROQ_API_KEYS or GROQ_API_KEY_1..GROQ_API_KEY_10.");
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Key", "Requests", "Last used"]);
    for key in &keys {
        let last_used = key
            .last_used
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![Cell::new(&key.preview), Cell::new(key.requests), Cell::new(last_used)]);
    }

    println!("{table}");
    println!("\n{} keys available", keys.len());
    Ok(())
}

pub fn handle_encrypt_key(config: &RouterConfig, key: &str, secret: Option<String>) -> Result<()> {
    let key = key.trim();
    if key.is_empty() {
        anyhow::bail!("Key must not be empty");
    }
    let secret = secret.unwrap_or_else(|| config.encryption_secret.clone());
    if secret == legalswami_types::models::DEFAULT_ENCRYPTION_SECRET {
        eprintln!("{}", "Warning: encrypting with the default secret".yellow());
    }
    println!("{}", encrypt_api_key(key, &secret));
    Ok(())
}
