//! Search request and result records.

use crate::beatmap::{Beatmap, Mods};
use crate::pattern::OutputPattern;
use crate::status::OsuStatus;

/// What is being searched for.
///
/// Locators use whichever hints they understand; all of them are optional
/// except the status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchArgs {
    pub status: OsuStatus,
    pub map_id: Option<i32>,
    pub artist: String,
    pub title: String,
    pub diff_name: String,
    pub osu_file_name: String,
}

impl SearchArgs {
    pub fn new(status: OsuStatus) -> Self {
        Self {
            status,
            ..Default::default()
        }
    }

    pub fn with_map_id(mut self, map_id: i32) -> Self {
        self.map_id = Some(map_id);
        self
    }

    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = artist.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_diff_name(mut self, diff_name: impl Into<String>) -> Self {
        self.diff_name = diff_name.into();
        self
    }

    pub fn with_osu_file_name(mut self, name: impl Into<String>) -> Self {
        self.osu_file_name = name.into();
        self
    }
}

/// Outcome of one search, later filled in by the processing pipeline.
///
/// Owned by a single pass: created by a locator (or as a "not found"
/// default), given its formatted strings, then handed to listeners.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub found_beatmaps: bool,
    pub beatmaps_found: Vec<Beatmap>,
    pub mods: Option<Mods>,
    pub action: OsuStatus,
    pub formatted_strings: Vec<OutputPattern>,
    pub search_args: SearchArgs,
}

impl SearchResult {
    /// Empty "not found" result carrying the request's status.
    pub fn not_found(args: &SearchArgs) -> Self {
        Self {
            found_beatmaps: false,
            beatmaps_found: Vec::new(),
            mods: None,
            action: args.status,
            formatted_strings: Vec::new(),
            search_args: args.clone(),
        }
    }

    /// Successful result. `found_beatmaps` follows whether `beatmaps` is non-empty.
    pub fn found(args: &SearchArgs, beatmaps: Vec<Beatmap>) -> Self {
        Self {
            found_beatmaps: !beatmaps.is_empty(),
            beatmaps_found: beatmaps,
            ..Self::not_found(args)
        }
    }

    pub fn with_mods(mut self, mods: Mods) -> Self {
        self.mods = Some(mods);
        self
    }

    /// The first (primary) beatmap, if any.
    pub fn primary(&self) -> Option<&Beatmap> {
        self.beatmaps_found.first()
    }

    pub fn pattern(&self, name: &str) -> Option<&OutputPattern> {
        self.formatted_strings.iter().find(|p| p.name == name)
    }
}
