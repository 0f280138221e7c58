use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use downtime_snake::game::GameConfig;
use downtime_snake::metrics::HighScoreStore;
use downtime_snake::modes::{ExitReason, MaintenanceMode};
use downtime_snake::settings::{FileSettingsProvider, SettingsProvider, StaticSettingsProvider};

#[derive(Parser)]
#[command(name = "downtime-snake")]
#[command(version, about = "Snake minigame shown while the dashboard is under maintenance")]
struct Cli {
    /// Side length of the square game grid
    #[arg(long, default_value = "15")]
    grid_size: usize,

    /// JSON file the system-settings poll reads; without it the screen
    /// never leaves on its own
    #[arg(long)]
    settings_file: Option<PathBuf>,

    /// File the best score is persisted to
    #[arg(long)]
    scores_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = GameConfig::new(cli.grid_size);

    let settings: Box<dyn SettingsProvider> = match cli.settings_file {
        Some(path) => Box::new(FileSettingsProvider::new(path)),
        None => Box::new(StaticSettingsProvider::maintenance_on()),
    };
    let scores = cli.scores_file.map(HighScoreStore::new);

    let mut mode = MaintenanceMode::new(config, settings, scores);

    match mode.run().await? {
        ExitReason::UserQuit => {}
        ExitReason::MaintenanceOver => {
            println!("Maintenance is over, the dashboard is back.");
        }
    }

    Ok(())
}
