//! Beatmap locators and the prioritized locator chain.
//!
//! ## Search order
//!
//! Locators are sorted once, by descending priority, when the chain is
//! built. Equal priorities keep their registration order. For each search:
//!
//! 1. Locators whose search modes do not include the requested status are
//!    skipped without being called.
//! 2. A locator error is logged and treated as "no result".
//! 3. The first result with `found_beatmaps` ends the search. If it carries
//!    no mods, the last mods reported by an earlier attempt are attached.
//! 4. If nothing is found, a fresh "not found" result for the request is
//!    returned. Mods seen along the way are not attached to it.

use std::cmp::Reverse;
use std::fs;
use std::path::Path;

use tracing::{debug, error, trace};

use crate::beatmap::{Beatmap, Mods};
use crate::error::Result;
use crate::search::{SearchArgs, SearchResult};
use crate::status::StatusMask;

/// A source able to resolve beatmap data for a search.
pub trait MapLocator {
    /// Human-readable name used in logs.
    fn name(&self) -> &str;

    /// Higher priorities are tried first.
    fn priority(&self) -> i32;

    /// Statuses this locator is eligible for.
    fn search_modes(&self) -> StatusMask;

    /// `Ok(None)` means the locator produced nothing; `Err` means it failed.
    /// Both let the chain move on to the next locator.
    fn locate(&self, args: &SearchArgs) -> Result<Option<SearchResult>>;
}

pub struct LocatorChain {
    locators: Vec<Box<dyn MapLocator>>,
}

impl LocatorChain {
    pub fn new(mut locators: Vec<Box<dyn MapLocator>>) -> Self {
        // stable: equal priorities keep registration order
        locators.sort_by_key(|l| Reverse(l.priority()));
        Self { locators }
    }

    pub fn len(&self) -> usize {
        self.locators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locators.is_empty()
    }

    /// Locator names in search order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.locators.iter().map(|l| l.name())
    }

    /// Resolve beatmap data for `args`. Never fails.
    pub fn find_map_data(&self, args: &SearchArgs) -> SearchResult {
        let mut found_mods: Option<Mods> = None;

        for locator in &self.locators {
            if !locator.search_modes().contains(args.status) {
                trace!(
                    "Skipping \"{}\" (modes {}, status {})",
                    locator.name(),
                    locator.search_modes(),
                    args.status
                );
                continue;
            }

            let attempt = match locator.locate(args) {
                Ok(result) => result,
                Err(e) => {
                    error!("Locator \"{}\" failed: {}", locator.name(), e);
                    None
                }
            };
            let Some(mut result) = attempt else {
                continue;
            };

            if result.found_beatmaps {
                if result.mods.is_none() {
                    result.mods = found_mods;
                }
                debug!(
                    ">Found data using \"{}\" ID: {}",
                    locator.name(),
                    result
                        .primary()
                        .map(|b| b.map_id.to_string())
                        .unwrap_or_else(|| "?".to_string())
                );
                return result;
            }

            if result.mods.is_some() {
                found_mods = result.mods;
            }
        }

        debug!("No locator found data for {}", args.status);
        SearchResult::not_found(args)
    }
}

/// Locator backed by an in-memory beatmap catalog.
///
/// Matches by map id when the request has one, then by osu file name,
/// then by artist, title and (if given) difficulty name, case-insensitively.
pub struct CatalogLocator {
    name: String,
    priority: i32,
    search_modes: StatusMask,
    beatmaps: Vec<Beatmap>,
}

impl CatalogLocator {
    pub fn new(name: impl Into<String>, beatmaps: Vec<Beatmap>) -> Self {
        Self {
            name: name.into(),
            priority: 0,
            search_modes: StatusMask::ALL,
            beatmaps,
        }
    }

    /// Load a JSON array of beatmaps.
    pub fn from_json_file<P: AsRef<Path>>(name: impl Into<String>, path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let beatmaps: Vec<Beatmap> = serde_json::from_str(&content)?;
        Ok(Self::new(name, beatmaps))
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_search_modes(mut self, search_modes: StatusMask) -> Self {
        self.search_modes = search_modes;
        self
    }

    pub fn len(&self) -> usize {
        self.beatmaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beatmaps.is_empty()
    }

    fn find(&self, args: &SearchArgs) -> Option<&Beatmap> {
        if let Some(map_id) = args.map_id.filter(|id| *id > 0) {
            return self.beatmaps.iter().find(|b| b.map_id == map_id);
        }
        if !args.osu_file_name.is_empty() {
            return self
                .beatmaps
                .iter()
                .find(|b| b.osu_file_name.eq_ignore_ascii_case(&args.osu_file_name));
        }
        if args.title.is_empty() {
            return None;
        }
        self.beatmaps.iter().find(|b| {
            b.title.eq_ignore_ascii_case(&args.title)
                && (args.artist.is_empty() || b.artist.eq_ignore_ascii_case(&args.artist))
                && (args.diff_name.is_empty() || b.diff_name.eq_ignore_ascii_case(&args.diff_name))
        })
    }
}

impl MapLocator for CatalogLocator {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn search_modes(&self) -> StatusMask {
        self.search_modes
    }

    fn locate(&self, args: &SearchArgs) -> Result<Option<SearchResult>> {
        Ok(self
            .find(args)
            .map(|b| SearchResult::found(args, vec![b.clone()])))
    }
}
