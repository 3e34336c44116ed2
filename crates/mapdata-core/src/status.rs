//! Play states and status masks.
//!
//! Every [`OsuStatus`] occupies a single bit so that locators and patterns
//! can declare the set of states they care about as a [`StatusMask`].

use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::error::{Error, Result};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
#[repr(u32)]
pub enum OsuStatus {
    #[default]
    Null = 1,
    Listening = 2,
    Playing = 4,
    FalsePlaying = 8,
    Watching = 16,
    Editing = 32,
    ResultsScreen = 64,
}

impl OsuStatus {
    pub fn bits(self) -> u32 {
        self as u32
    }

    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Parse a status name, case-insensitively.
    pub fn parse(name: &str) -> Result<Self> {
        name.parse::<OsuStatus>()
            .map_err(|_| Error::UnknownStatus(name.to_string()))
    }
}

impl std::fmt::Display for OsuStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Bitwise set of [`OsuStatus`] values.
///
/// Serialized as a list of status names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<OsuStatus>", into = "Vec<OsuStatus>")]
pub struct StatusMask(u32);

impl StatusMask {
    pub const NONE: StatusMask = StatusMask(0);
    pub const ALL: StatusMask = StatusMask(0x7F);

    pub fn from_bits(bits: u32) -> Self {
        Self(bits & Self::ALL.0)
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    /// True when `status` has a bit in common with this mask.
    pub fn contains(self, status: OsuStatus) -> bool {
        self.0 & status.bits() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = OsuStatus> {
        OsuStatus::iter().filter(move |s| self.contains(*s))
    }
}

impl Default for StatusMask {
    fn default() -> Self {
        Self::ALL
    }
}

impl From<OsuStatus> for StatusMask {
    fn from(status: OsuStatus) -> Self {
        Self(status.bits())
    }
}

impl FromIterator<OsuStatus> for StatusMask {
    fn from_iter<I: IntoIterator<Item = OsuStatus>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NONE, |mask, s| mask | s)
    }
}

impl From<Vec<OsuStatus>> for StatusMask {
    fn from(statuses: Vec<OsuStatus>) -> Self {
        statuses.into_iter().collect()
    }
}

impl From<StatusMask> for Vec<OsuStatus> {
    fn from(mask: StatusMask) -> Self {
        mask.iter().collect()
    }
}

impl BitOr for StatusMask {
    type Output = StatusMask;

    fn bitor(self, rhs: StatusMask) -> StatusMask {
        StatusMask(self.0 | rhs.0)
    }
}

impl BitOr<OsuStatus> for StatusMask {
    type Output = StatusMask;

    fn bitor(self, rhs: OsuStatus) -> StatusMask {
        StatusMask(self.0 | rhs.bits())
    }
}

impl BitOr for OsuStatus {
    type Output = StatusMask;

    fn bitor(self, rhs: OsuStatus) -> StatusMask {
        StatusMask(self.bits() | rhs.bits())
    }
}

impl BitOrAssign<OsuStatus> for StatusMask {
    fn bitor_assign(&mut self, rhs: OsuStatus) {
        self.0 |= rhs.bits();
    }
}

impl std::fmt::Display for StatusMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if *self == Self::ALL {
            return write!(f, "All");
        }
        if self.is_empty() {
            return write!(f, "None");
        }
        let names: Vec<&str> = self.iter().map(|s| s.as_str()).collect();
        write!(f, "{}", names.join("|"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_bits_are_distinct() {
        let total: u32 = OsuStatus::iter().map(|s| s.bits()).sum();
        assert_eq!(total, StatusMask::ALL.bits());
    }

    #[test]
    fn test_mask_contains() {
        let mask = OsuStatus::Playing | OsuStatus::Watching;
        assert!(mask.contains(OsuStatus::Playing));
        assert!(mask.contains(OsuStatus::Watching));
        assert!(!mask.contains(OsuStatus::Listening));
        assert!(!StatusMask::NONE.contains(OsuStatus::Null));
        assert!(StatusMask::ALL.contains(OsuStatus::ResultsScreen));
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(OsuStatus::parse("playing").unwrap(), OsuStatus::Playing);
        assert_eq!(
            OsuStatus::parse("ResultsScreen").unwrap(),
            OsuStatus::ResultsScreen
        );
        assert!(matches!(
            OsuStatus::parse("dancing"),
            Err(Error::UnknownStatus(_))
        ));
    }

    #[test]
    fn test_from_bits_drops_unknown_bits() {
        let mask = StatusMask::from_bits(0xFF00 | OsuStatus::Editing.bits());
        assert_eq!(mask, StatusMask::from(OsuStatus::Editing));
    }

    #[test]
    fn test_display() {
        assert_eq!(StatusMask::ALL.to_string(), "All");
        assert_eq!(StatusMask::NONE.to_string(), "None");
        let mask = OsuStatus::Listening | OsuStatus::Playing;
        assert_eq!(mask.to_string(), "Listening|Playing");
    }

    #[test]
    fn test_serde_as_name_list() {
        let mask = OsuStatus::Listening | OsuStatus::Editing;
        let json = serde_json::to_string(&mask).unwrap();
        assert_eq!(json, r#"["Listening","Editing"]"#);

        let back: StatusMask = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mask);
    }
}
