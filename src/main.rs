//! Vitalscore: lifestyle health-score dashboard
//!
//! Main entry point for the terminal application.

use anyhow::Result;
use std::io::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vitalscore::config::Config;
use vitalscore::tui::App;

fn main() -> Result<()> {
    // Writing logs to the terminal would corrupt the TUI (alternate screen).
    // - interactive TTY: log to a file
    // - non-interactive: log to stdout
    let log_mode = std::env::var("VITALSCORE_LOG_MODE").unwrap_or_else(|_| "auto".to_string());

    let interactive = std::io::stdout().is_terminal();
    let use_file = match log_mode.as_str() {
        "file" => true,
        "stdout" => false,
        // auto
        _ => interactive,
    };

    let (writer, _guard) = if use_file {
        let log_file = std::env::var("VITALSCORE_LOG_FILE")
            .unwrap_or_else(|_| "vitalscore.log".to_string());

        if let Some(parent) = std::path::Path::new(&log_file).parent() {
            // Best-effort: a missing directory is reported by open() below.
            let _ = std::fs::create_dir_all(parent);
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(!use_file),
        )
        .init();

    tracing::info!("Starting Vitalscore...");

    let config = Config::from_env_or_default();
    tracing::info!(
        "Using dataset {:?} with {} score link",
        config.data_path,
        config.score_link
    );

    // Dataset and model are prepared before the terminal is touched; failure is fatal.
    let mut app = App::new(&config)?;
    app.run()?;

    tracing::info!("Vitalscore shutdown complete.");
    Ok(())
}
