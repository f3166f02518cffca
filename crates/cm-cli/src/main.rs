//! CLI frontend for the Critical Miss campaign engine.

mod commands;
mod session;
mod store;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "cm",
    about = "Critical Miss: a comedic solo fantasy campaign in your terminal",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new character and save file
    New {
        /// Character name (random if omitted)
        #[arg(short, long, default_value = "")]
        name: String,

        /// Sex: male or female
        #[arg(long, default_value = "female")]
        sex: String,

        /// Race, e.g. human, elf, half-orc
        #[arg(long, default_value = "human")]
        race: String,

        /// Class, e.g. fighter, wizard, rogue
        #[arg(short, long, default_value = "fighter")]
        class: String,

        /// Alignment: good, neutral, evil
        #[arg(long, default_value = "neutral")]
        alignment: String,

        /// Stat generation: weighted or chaos
        #[arg(long, default_value = "weighted")]
        stats: String,

        /// Save file to write
        #[arg(short, long, default_value = store::DEFAULT_SAVE)]
        save: PathBuf,

        /// RNG seed for deterministic runs (random if omitted)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Play interactively from a save file
    Play {
        /// Save file to load and update
        #[arg(short, long, default_value = store::DEFAULT_SAVE)]
        save: PathBuf,

        /// RNG seed for deterministic runs (random if omitted)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the character sheet
    Sheet {
        /// Save file to read
        #[arg(short, long, default_value = store::DEFAULT_SAVE)]
        save: PathBuf,
    },

    /// Export the adventure log
    Log {
        /// Save file to read
        #[arg(short, long, default_value = store::DEFAULT_SAVE)]
        save: PathBuf,

        /// Markdown instead of plain text
        #[arg(short, long)]
        markdown: bool,
    },

    /// List the built-in scenes
    Scenes {
        /// Also run validation and the combat lint
        #[arg(short, long)]
        lint: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::New {
            name,
            sex,
            race,
            class,
            alignment,
            stats,
            save,
            seed,
        } => commands::new::run(
            &commands::new::Options {
                name,
                sex,
                race,
                class,
                alignment,
                stats,
            },
            &save,
            seed,
        ),
        Commands::Play { save, seed } => commands::play::run(&save, seed),
        Commands::Sheet { save } => commands::sheet::run(&save),
        Commands::Log { save, markdown } => commands::log::run(&save, markdown),
        Commands::Scenes { lint } => commands::scenes::run(lint),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
