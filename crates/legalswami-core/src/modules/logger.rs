//! Logger bootstrap.
//!
//! Console output always; a daily-rolling file when a log directory is set.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, fmt::MakeWriter, prelude::*, EnvFilter};

use crate::error::{AppError, AppResult};

const LOG_FILE_PREFIX: &str = "legalswami.log";

/// Filter from `RUST_LOG` when set, otherwise `default_level`.
pub fn build_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Install the global subscriber.
///
/// Keep the returned guard alive for the life of the process or buffered
/// file output is lost.
pub fn init_logger(default_level: &str, log_dir: Option<&Path>) -> AppResult<Option<WorkerGuard>> {
    let console = fmt::layer().with_target(false);

    match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file = fmt::layer().with_ansi(false).with_writer(writer);

            tracing_subscriber::registry()
                .with(build_filter(default_level))
                .with(console)
                .with(file)
                .try_init()
                .map_err(|e| AppError::Logger(e.to_string()))?;

            tracing::info!("Writing logs to {}", dir.display());
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(build_filter(default_level))
                .with(console)
                .try_init()
                .map_err(|e| AppError::Logger(e.to_string()))?;
            Ok(None)
        }
    }
}

/// Run `f` with a console subscriber installed for the current thread only.
///
/// Config loading happens before [`init_logger`] can run, because the log
/// directory comes from the config. Its warnings go through this instead.
pub fn with_startup_logger<T>(default_level: &str, f: impl FnOnce() -> T) -> T {
    with_scoped_writer(build_filter(default_level), std::io::stdout, f)
}

fn with_scoped_writer<W, T>(filter: EnvFilter, writer: W, f: impl FnOnce() -> T) -> T
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(writer));
    tracing::subscriber::with_default(subscriber, f)
}
