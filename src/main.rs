//! CardioCheck: cardiovascular risk assessment client
//!
//! Main entry point for the terminal application and the one-shot commands.

use std::io::IsTerminal;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cardiocheck::adapters::sanitize::SanitizingMakeWriter;
use cardiocheck::adapters::HttpPredictor;
use cardiocheck::application::AssessmentService;
use cardiocheck::cli::{Cli, Command};
use cardiocheck::config::{LogSettings, LogSink};
use cardiocheck::tui::App;
use cardiocheck::{compute_features, RawInput};

fn init_logging(owns_terminal: bool) -> Result<WorkerGuard> {
    // Writing logs to the terminal would corrupt the form (alternate screen),
    // so the interactive form logs to a file by default.
    let (writer, guard) = match LogSettings::from_env().sink(owns_terminal) {
        LogSink::File(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                let _ = std::fs::create_dir_all(parent);
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            tracing_appender::non_blocking(file)
        }
        LogSink::Stdout => tracing_appender::non_blocking(std::io::stdout()),
        LogSink::Stderr => tracing_appender::non_blocking(std::io::stderr()),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(SanitizingMakeWriter::new(writer)),
        )
        .init();

    Ok(guard)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = cli.settings();
    let command = cli.command.unwrap_or(Command::Tui);

    let owns_terminal = matches!(command, Command::Tui) && std::io::stdout().is_terminal();
    let _guard = init_logging(owns_terminal)?;

    match command {
        Command::Tui => {
            tracing::info!("Starting CardioCheck...");
            let mut app = App::new(&settings)?;
            app.run()?;
            tracing::info!("CardioCheck shutdown complete.");
        }
        Command::Features(args) => {
            let raw: RawInput = args.into();
            let features = compute_features(&raw);
            println!("{}", serde_json::to_string(&features)?);
        }
        Command::Predict(args) => {
            let predictor = HttpPredictor::new(settings.endpoint()?, settings.timeout)?;
            let service = AssessmentService::new(Arc::new(predictor));
            let raw: RawInput = args.into();
            let assessment = service.assess(&raw)?;
            println!("{}", serde_json::to_string_pretty(&assessment)?);
        }
    }

    Ok(())
}
