//! wow-fisher - fishing bot for World of Warcraft
//!
//! Reads the action list from `bot.json`, focuses the game and then performs
//! the configured actions in order until stopped with Ctrl-C.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use wow_fisher::config::{read_config, DEFAULT_CONFIG_FILE};
use wow_fisher::utils::path::get_data_dir;
use wow_fisher::{ActionRegistry, Robot, SystemDesktop};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Bot configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Log every poll sample and bobber search
    #[arg(long, default_value_t = false)]
    debug: bool,
}

fn init_logging(debug: bool) {
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let log_dir = get_data_dir().join("debug").join("log");
    let _ = std::fs::create_dir_all(&log_dir);
    let log_file_path = log_dir.join("debug.log");
    let file_result = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path);

    // Default to 'info', keep the image decoders quiet
    let log_filter = if debug {
        "info,wow_fisher=debug,png=warn"
    } else {
        "info,wow_fisher=info,png=warn"
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_filter));

    match file_result {
        Ok(file) => {
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .with_span_events(FmtSpan::CLOSE);

            let stdout_layer = tracing_subscriber::fmt::layer().with_span_events(FmtSpan::CLOSE);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(file_layer)
                .with(stdout_layer)
                .init();

            tracing::info!("[INIT] Logging initialized, file: {:?}", log_file_path);
        }
        Err(e) => {
            // Fallback: stdout-only logging with same filter
            tracing_subscriber::fmt().with_env_filter(env_filter).init();
            eprintln!(
                "[INIT] Failed to create debug log file at {:?}: {}",
                log_file_path, e
            );
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    tracing::info!("[INIT] wow-fisher {}", env!("CARGO_PKG_VERSION"));

    let config = read_config(&cli.config)?;
    tracing::info!("[INIT] Loaded {} actions from {:?}", config.action_defs.len(), cli.config);

    let registry = ActionRegistry::with_defaults();
    let desktop = SystemDesktop::new().context("cannot set up input simulation")?;
    let mut robot = Robot::new(&config, &registry, Box::new(desktop))?;

    tokio::select! {
        result = robot.start() => {
            result.context("robot stopped")?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("[ROBOT] Ctrl-C received, stopping");
        }
    }

    let stats = robot.stats();
    tracing::info!(
        "[ROBOT] Session: casts={}, catches={}, timeouts={}, rate={:.1}%",
        stats.casts,
        stats.catches,
        stats.timeouts,
        stats.rate()
    );
    Ok(())
}
