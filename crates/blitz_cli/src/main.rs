//! Blitzball roster CLI
//!
//! Loads the player data file and either runs the interactive team console
//! or answers a single query.

mod shell;

use anyhow::{Context, Result};
use blitz_core::models::format_stat_line;
use blitz_core::{AppConfig, ConsolePrompt, DataStore, Roster, SaveStore};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "blitzball")]
#[command(about = "Manage a blitzball team from the console", long_about = None)]
struct Cli {
    /// Player data file (overrides BLITZ_DATA_PATH)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Directory for team saves (overrides BLITZ_SAVE_DIR)
    #[arg(long, global = true)]
    save_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive team console (default)
    Play,

    /// List every loaded player
    Players,

    /// Print a player's card
    Show {
        /// Player name
        name: String,
    },

    /// Print a player's stats at a level
    Stats {
        /// Player name
        name: String,

        /// Level to look up; falls back to the closest lower level
        level: u32,
    },
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(buf, "{} - {} - {}", buf.timestamp(), record.level(), record.args())
        })
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = AppConfig::from_env().with_overrides(cli.data, cli.save_dir);
    log::debug!("Using {:?}", config);

    let mut store = DataStore::new();
    store.load(&config.data_path).with_context(|| {
        format!("Failed to load player data from {}", config.data_path.display())
    })?;

    let stdout = io::stdout();
    match cli.command.unwrap_or(Commands::Play) {
        Commands::Players => {
            store.list_names(&mut stdout.lock())?;
        }

        Commands::Show { name } => {
            store.get(&name)?.display_info(&mut stdout.lock());
        }

        Commands::Stats { name, level } => {
            let stats = store.get(&name)?.stats_at(level)?;
            writeln!(stdout.lock(), "{}", format_stat_line(stats))?;
        }

        Commands::Play => {
            let roster = Roster::new(&store).context("Failed to create the starting team")?;
            let saves = SaveStore::new(config.save_dir);
            let console = ConsolePrompt::new(io::stdin().lock(), stdout.lock());
            shell::Shell::new(store, roster, saves, console).run();
        }
    }

    Ok(())
}
