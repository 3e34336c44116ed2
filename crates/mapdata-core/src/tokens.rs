//! Token aggregation.
//!
//! A [`Tokens`] map is built fresh for every processed result: it is seeded
//! from a static token set and then every [`TokenProvider`] writes its
//! entries into it. Later writes win.

use std::collections::HashMap;

use crate::error::Result;
use crate::search::SearchResult;

/// Token name to value mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokens {
    values: HashMap<String, String>,
}

impl Tokens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a token.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copy every entry of `other` into this map, overwriting shared keys.
    pub fn extend_from(&mut self, other: &Tokens) {
        for (name, value) in other.iter() {
            self.set(name, value);
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Tokens {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tokens = Tokens::new();
        for (k, v) in iter {
            tokens.set(k, v);
        }
        tokens
    }
}

/// Contributes result-specific tokens.
pub trait TokenProvider {
    fn contribute(&self, tokens: &mut Tokens, result: &SearchResult) -> Result<()>;
}

/// Well-known per-map tokens taken from the primary beatmap.
#[derive(Debug, Clone, Copy, Default)]
pub struct MapTokenProvider;

impl MapTokenProvider {
    pub const TOKEN_NAMES: [&'static str; 10] = [
        "artist",
        "title",
        "diffName",
        "creator",
        "mapId",
        "mapSetId",
        "md5",
        "osuFileName",
        "mods",
        "status",
    ];
}

impl TokenProvider for MapTokenProvider {
    fn contribute(&self, tokens: &mut Tokens, result: &SearchResult) -> Result<()> {
        match result.primary().filter(|_| result.found_beatmaps) {
            Some(map) => {
                tokens.set("artist", map.artist.as_str());
                tokens.set("title", map.title.as_str());
                tokens.set("diffName", map.diff_name.as_str());
                tokens.set("creator", map.creator.as_str());
                tokens.set("mapId", map.map_id.to_string());
                tokens.set("mapSetId", map.map_set_id.to_string());
                tokens.set("md5", map.md5.as_str());
                tokens.set("osuFileName", map.osu_file_name.as_str());
            }
            None => {
                for name in &Self::TOKEN_NAMES[..8] {
                    tokens.set(*name, "");
                }
            }
        }

        let mods = result.mods.map(|m| m.short_name()).unwrap_or_default();
        tokens.set("mods", mods);
        tokens.set("status", result.action.as_str());
        Ok(())
    }
}
