//! # mapdata-core
//!
//! Beatmap metadata resolution and pattern output for stream overlays.
//!
//! This crate provides:
//! - A prioritized locator chain that resolves the current beatmap from
//!   multiple unreliable sources, carrying modifier data across attempts
//! - Token aggregation from any number of providers
//! - Pattern formatting through registered formatters
//! - Conditional persistence of formatted patterns
//! - Fan-out of each resolved map to new-map listeners

pub mod beatmap;
pub mod broadcast;
pub mod config;
pub mod error;
pub mod locator;
pub mod pattern;
pub mod pipeline;
pub mod saver;
pub mod search;
pub mod status;
pub mod tokens;

// Test doubles for unit and integration tests
#[doc(hidden)]
pub mod mock;

pub use beatmap::{Beatmap, Mods};
pub use broadcast::{ConsoleListener, MapBroadcaster, NewMapListener};
pub use config::{Config, MemorySettings, PatternConfig, SettingsStore, setting_names};
pub use error::{Error, Result};
pub use locator::{CatalogLocator, LocatorChain, MapLocator};
pub use pattern::{FormatterRegistry, OutputPattern, PatternFormatter, TemplateFormatter};
pub use pipeline::{MapDataGetter, MapDataGetterBuilder};
pub use saver::{FileSaver, Saver, destination_name, save_map_strings};
pub use search::{SearchArgs, SearchResult};
pub use status::{OsuStatus, StatusMask};
pub use tokens::{MapTokenProvider, TokenProvider, Tokens};
