//! CLI argument definitions for mapdata.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mapdata")]
#[command(about = "Beatmap data resolver and pattern writer", version)]
pub struct Args {
    /// Path to config file (defaults are used when missing)
    #[arg(short, long, default_value = "mapdata.toml", env = "MAPDATA_CONFIG")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve a beatmap and write its patterns
    Resolve {
        /// Beatmap catalog (JSON array); overrides the config file
        #[arg(long, value_name = "FILE")]
        catalog: Option<PathBuf>,
        /// Current status (Listening, Playing, Editing, ...)
        #[arg(long, default_value = "Playing")]
        status: String,
        /// Beatmap id
        #[arg(long)]
        map_id: Option<i32>,
        #[arg(long, default_value = "")]
        artist: String,
        #[arg(long, default_value = "")]
        title: String,
        /// Difficulty name
        #[arg(long, default_value = "")]
        diff: String,
        /// Mod bits reported by the game before the map is known
        #[arg(long)]
        mods: Option<u32>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List configured patterns and what happens to each for a status
    Patterns {
        #[arg(long, default_value = "Playing")]
        status: String,
    },
}
