//! Patterns command: show configured patterns for a status.

use anyhow::Result;
use mapdata_core::{Config, OsuStatus, PatternConfig, SettingsStore, destination_name, setting_names};
use owo_colors::OwoColorize;

/// What a processing pass does with a pattern for a given status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternAction {
    Write,
    Clear,
    MemoryOnly,
    Disabled,
}

impl PatternAction {
    pub fn for_pattern(pattern: &PatternConfig, status: OsuStatus, disk_disabled: bool) -> Self {
        if pattern.memory {
            PatternAction::MemoryOnly
        } else if disk_disabled {
            PatternAction::Disabled
        } else if pattern.save_event.contains(status) {
            PatternAction::Write
        } else {
            PatternAction::Clear
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PatternAction::Write => "write",
            PatternAction::Clear => "clear",
            PatternAction::MemoryOnly => "memory",
            PatternAction::Disabled => "disabled",
        }
    }
}

pub fn run(config: &Config, status: &str) -> Result<()> {
    let status = OsuStatus::parse(status)?;
    let disk_disabled = config.flag(setting_names::DISABLE_DISK_PATTERN_WRITE);

    println!(
        "{} pattern(s) for {} (output: {:?})",
        config.patterns.len(),
        status.cyan(),
        config.output_dir
    );
    for pattern in &config.patterns {
        let action = PatternAction::for_pattern(pattern, status, disk_disabled);
        let label = match action {
            PatternAction::Write => action.label().green().to_string(),
            PatternAction::Clear => action.label().yellow().to_string(),
            _ => action.label().dimmed().to_string(),
        };
        println!(
            "  {:<8} {:<24} [{}] {}",
            label,
            destination_name(&pattern.name),
            pattern.save_event,
            pattern.template.dimmed()
        );
    }
    Ok(())
}
