//! Gomoku GUI
//!
//! Play five in a row against the computer.

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gomoku::cli::Cli;
use gomoku::ui::{GameSession, GomokuApp};
use gomoku::GameRunner;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.game_config()?;
    info!(
        size = config.board_size,
        depth = config.search_depth,
        time_limit_ms = config.ai_time_limit_ms,
        "starting gomoku"
    );

    let session = GameSession::spawn(GameRunner::from_config(&config)?);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 750.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Gomoku"),
        ..Default::default()
    };

    eframe::run_native(
        "Gomoku",
        options,
        Box::new(move |cc| Ok(Box::new(GomokuApp::new(cc, session, config)))),
    )?;
    Ok(())
}
