//! Canonical player statistics record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named progression track converted to a level.
///
/// `name` is the display form; uniqueness inside a list is by
/// case-insensitive name (see [`LevelEntry::insert_unique`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelEntry {
    pub name: String,
    pub level: u32,
    pub xp: f64,
}

/// A skill and its level.
pub type SkillLevel = LevelEntry;

/// A slayer boss challenge and its level.
pub type ChallengeLevel = LevelEntry;

impl LevelEntry {
    pub fn new(name: impl Into<String>, level: u32, xp: f64) -> Self {
        Self {
            name: name.into(),
            level: level.max(1),
            xp: non_negative(xp),
        }
    }

    /// Case-insensitive name comparison.
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    /// Push `entry` unless an entry with the same name is already present.
    ///
    /// Returns whether the entry was inserted. Earlier entries always win.
    pub fn insert_unique(list: &mut Vec<LevelEntry>, entry: LevelEntry) -> bool {
        if list.iter().any(|existing| existing.has_name(&entry.name)) {
            return false;
        }
        list.push(entry);
        true
    }
}

/// Clamp to a finite, non-negative amount.
pub fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// One player's statistics for their active profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub purse: f64,
    pub bank: f64,
    pub profile_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_save: Option<DateTime<Utc>>,
    pub skills: Vec<SkillLevel>,
    pub challenges: Vec<ChallengeLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fairy_souls: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dungeon_level: Option<u32>,
}

impl PlayerStats {
    /// Profile name used when the upstream profile has none.
    pub const UNKNOWN_PROFILE: &'static str = "Unknown";

    pub fn new(profile_name: impl Into<String>) -> Self {
        Self {
            purse: 0.0,
            bank: 0.0,
            profile_name: profile_name.into(),
            game_mode: None,
            last_save: None,
            skills: Vec::new(),
            challenges: Vec::new(),
            fairy_souls: None,
            dungeon_level: None,
        }
    }

    pub fn with_purse(mut self, purse: f64) -> Self {
        self.purse = non_negative(purse);
        self
    }

    pub fn with_bank(mut self, bank: f64) -> Self {
        self.bank = non_negative(bank);
        self
    }

    pub fn with_game_mode(mut self, game_mode: Option<String>) -> Self {
        self.game_mode = game_mode;
        self
    }

    pub fn with_last_save(mut self, last_save: Option<DateTime<Utc>>) -> Self {
        self.last_save = last_save;
        self
    }
}
