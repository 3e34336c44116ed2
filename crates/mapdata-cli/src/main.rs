mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use mapdata_core::Config;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("mapdata=info,mapdata_core=info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = if args.config.exists() {
        let config = Config::load(&args.config)?;
        info!("Loaded config from {:?}", args.config);
        config
    } else {
        warn!("Config {:?} not found, using defaults", args.config);
        Config::default()
    };

    match args.command {
        Command::Resolve {
            catalog,
            status,
            map_id,
            artist,
            title,
            diff,
            mods,
            json,
        } => commands::resolve::run(
            config,
            commands::resolve::ResolveRequest {
                catalog,
                status,
                map_id,
                artist,
                title,
                diff,
                mods,
            },
            json,
        ),
        Command::Patterns { status } => commands::patterns::run(&config, &status),
    }
}
