//! Configuration and settings access.
//!
//! This module contains:
//! - `Config` - TOML configuration file (output directory, patterns, flags)
//! - `PatternConfig` - a user-defined output pattern
//! - `SettingsStore` - keyed boolean lookup used by the processing pipeline
//! - `MemorySettings` - in-memory settings store

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::status::StatusMask;

/// Well-known setting keys.
pub mod setting_names {
    /// When true, formatted patterns are never written through the saver.
    pub const DISABLE_DISK_PATTERN_WRITE: &str = "DisableDiskPatternWrite";
}

/// Read access to process-wide settings.
pub trait SettingsStore {
    fn get_bool(&self, key: &str) -> Option<bool>;

    /// Missing keys read as `false`.
    fn flag(&self, key: &str) -> bool {
        self.get_bool(key).unwrap_or(false)
    }
}

/// User-defined output pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternConfig {
    pub name: String,
    pub template: String,
    #[serde(default)]
    pub save_event: StatusMask,
    #[serde(default)]
    pub memory: bool,
}

impl PatternConfig {
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
            save_event: StatusMask::ALL,
            memory: false,
        }
    }

    pub fn with_save_event(mut self, save_event: StatusMask) -> Self {
        self.save_event = save_event;
        self
    }

    pub fn memory_only(mut self) -> Self {
        self.memory = true;
        self
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("Files")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory pattern files are written to.
    pub output_dir: PathBuf,
    pub disable_disk_pattern_write: bool,
    /// Optional beatmap catalog (JSON) used by the catalog locator.
    pub catalog: Option<PathBuf>,
    pub patterns: Vec<PatternConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            disable_disk_pattern_write: false,
            catalog: None,
            patterns: vec![
                PatternConfig::new("np_all", "!artist! - !title! [!diffName!] !mods!"),
                PatternConfig::new("np_playing", "!artist! - !title! [!diffName!] !mods!")
                    .with_save_event(crate::status::OsuStatus::Playing.into()),
            ],
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

impl SettingsStore for Config {
    fn get_bool(&self, key: &str) -> Option<bool> {
        match key {
            setting_names::DISABLE_DISK_PATTERN_WRITE => Some(self.disable_disk_pattern_write),
            _ => None,
        }
    }
}

/// Settings held in a plain map.
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    values: HashMap<String, bool>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: bool) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: bool) {
        self.values.insert(key.into(), value);
    }
}

impl SettingsStore for MemorySettings {
    fn get_bool(&self, key: &str) -> Option<bool> {
        self.values.get(key).copied()
    }
}
