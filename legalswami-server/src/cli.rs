use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "legalswami",
    about = "LegalSwami - AI legal assistant backend",
    version = env!("CARGO_PKG_VERSION"),
    author,
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(short, long, global = true, env = "LEGALSWAMI_CONFIG", help = "Path to config.json")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Start the HTTP API (default if no command specified)")]
    Serve {
        #[arg(short, long, help = "Override the configured port")]
        port: Option<u16>,
    },

    #[command(about = "Ask one legal question and print the answer")]
    Ask {
        #[arg(help = "The question")]
        question: String,

        #[arg(short, long, help = "Start with this model instead of the first one")]
        model: Option<String>,
    },

    #[command(about = "Show configured models")]
    Models {
        #[arg(short, long, help = "Output as JSON")]
        json: bool,
    },

    #[command(about = "Show resolved API keys (previews only)")]
    Keys {
        #[arg(short, long, help = "Output as JSON")]
        json: bool,
    },

    #[command(about = "Encrypt an API key for use in config or environment")]
    EncryptKey {
        #[arg(help = "Plain API key (gsk_...)")]
        key: String,

        #[arg(long, env = "API_KEY_ENCRYPTION_SECRET", help = "Encryption secret")]
        secret: Option<String>,
    },
}
