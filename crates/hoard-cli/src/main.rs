//! Command-line treasure roller.

mod commands;
mod render;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "hoard",
    about = "Hoard — a random treasure generator for tabletop games",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll a random item (e.g. `hoard roll minor lesser wondrous`)
    Roll {
        /// Rank, subrank, category, or slot words, in any order
        what: Vec<String>,

        /// Wondrous body slot (belt, head, slotless, ...)
        #[arg(long)]
        slot: Option<String>,

        /// Caster class for scroll or wand spells
        #[arg(long)]
        class: Option<String>,

        /// Base item for armor or weapon assembly
        #[arg(long)]
        base: Option<String>,

        /// Number of items to roll
        #[arg(short = 'n', long, default_value = "1")]
        count: u32,

        /// RNG seed for reproducible rolls
        #[arg(long)]
        seed: Option<u64>,

        /// Directory containing the table data files
        #[arg(short, long, default_value = "data")]
        data: PathBuf,
    },

    /// Roll a random spell from the spell index
    Spell {
        /// Spell level (0-9)
        #[arg(short, long)]
        level: Option<u8>,

        /// Class column: a class name, minimum, spellpage,
        /// spellpage_arcane, spellpage_divine, or random
        #[arg(short, long, default_value = "minimum")]
        class: String,

        /// School, subschool, or descriptor tag
        #[arg(short, long)]
        tag: Option<String>,

        /// RNG seed for reproducible rolls
        #[arg(long)]
        seed: Option<u64>,

        /// Directory containing the table data files
        #[arg(short, long, default_value = "data")]
        data: PathBuf,
    },

    /// Look up a base armor or weapon by name
    Base {
        /// Item family: armor or weapon
        family: String,

        /// Base item name (case- and accent-insensitive)
        name: String,

        /// Directory containing the table data files
        #[arg(short, long, default_value = "data")]
        data: PathBuf,
    },

    /// List the filter tag vocabulary of a base item family
    Tags {
        /// Item family: armor or weapon
        family: String,

        /// Directory containing the table data files
        #[arg(short, long, default_value = "data")]
        data: PathBuf,
    },

    /// Validate every table family in the data directory
    Check {
        /// Directory containing the table data files
        #[arg(short, long, default_value = "data")]
        data: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Roll {
            what,
            slot,
            class,
            base,
            count,
            seed,
            data,
        } => commands::roll::run(
            &data,
            &what,
            slot.as_deref(),
            class,
            base,
            count,
            seed,
        ),
        Commands::Spell {
            level,
            class,
            tag,
            seed,
            data,
        } => commands::spell::run(&data, level, &class, tag.as_deref(), seed),
        Commands::Base { family, name, data } => commands::base::run(&data, &family, &name),
        Commands::Tags { family, data } => commands::tags::run(&data, &family),
        Commands::Check { data } => commands::check::run(&data),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
