use serde::{Deserialize, Serialize};

/// Beatmap identity and metadata as reported by a locator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Beatmap {
    pub map_id: i32,
    pub map_set_id: i32,
    pub artist: String,
    pub title: String,
    pub diff_name: String,
    pub creator: String,
    pub md5: String,
    pub osu_file_name: String,
}

impl Beatmap {
    pub fn new(map_id: i32) -> Self {
        Self {
            map_id,
            ..Default::default()
        }
    }

    /// "Artist - Title [Diff]"
    pub fn display_name(&self) -> String {
        format!("{} - {} [{}]", self.artist, self.title, self.diff_name)
    }
}

/// Mod bits paired with their short names, in display order.
///
/// NC and PF come before the mods they imply so that the implied
/// mod is not listed twice.
const MOD_NAMES: [(u32, &str); 15] = [
    (1 << 0, "NF"),
    (1 << 1, "EZ"),
    (1 << 2, "TD"),
    (1 << 3, "HD"),
    (1 << 4, "HR"),
    (1 << 9 | 1 << 6, "NC"),
    (1 << 14 | 1 << 5, "PF"),
    (1 << 5, "SD"),
    (1 << 6, "DT"),
    (1 << 7, "RX"),
    (1 << 8, "HT"),
    (1 << 10, "FL"),
    (1 << 11, "AT"),
    (1 << 12, "SO"),
    (1 << 13, "AP"),
];

/// Gameplay modifier set.
///
/// Opaque to the locator chain: a set found by one attempt replaces any
/// earlier one wholesale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mods(u32);

impl Mods {
    pub const NONE: Mods = Mods(0);

    pub fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Concatenated short names, e.g. "HDHR", or "None".
    pub fn short_name(self) -> String {
        let mut remaining = self.0;
        let mut out = String::new();
        for (bits, name) in MOD_NAMES {
            if remaining & bits == bits {
                out.push_str(name);
                remaining &= !bits;
            }
        }
        if out.is_empty() {
            "None".to_string()
        } else {
            out
        }
    }
}

impl std::fmt::Display for Mods {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_name_none() {
        assert_eq!(Mods::NONE.short_name(), "None");
    }

    #[test]
    fn test_short_name_combination() {
        let mods = Mods::from_bits(8 | 16);
        assert_eq!(mods.short_name(), "HDHR");
    }

    #[test]
    fn test_nightcore_hides_double_time() {
        let mods = Mods::from_bits(8 | 64 | 512);
        assert_eq!(mods.short_name(), "HDNC");
    }

    #[test]
    fn test_perfect_hides_sudden_death() {
        let mods = Mods::from_bits(32 | 16384);
        assert_eq!(mods.short_name(), "PF");

        let mods = Mods::from_bits(32);
        assert_eq!(mods.short_name(), "SD");
    }

    #[test]
    fn test_beatmap_display_name() {
        let map = Beatmap {
            artist: "xi".to_string(),
            title: "FREEDOM DiVE".to_string(),
            diff_name: "FOUR DIMENSIONS".to_string(),
            ..Beatmap::new(129891)
        };
        assert_eq!(map.display_name(), "xi - FREEDOM DiVE [FOUR DIMENSIONS]");
    }

    #[test]
    fn test_beatmap_deserialize_partial() {
        let map: Beatmap = serde_json::from_str(r#"{"map_id": 42, "title": "t"}"#).unwrap();
        assert_eq!(map.map_id, 42);
        assert_eq!(map.title, "t");
        assert!(map.artist.is_empty());
    }
}
