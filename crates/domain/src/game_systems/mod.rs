//! Game-specific constants and lookup tables.
//!
//! # Supported Games
//!
//! - Hypixel SkyBlock (`skyblock`)

mod skyblock;

pub use skyblock::{
    challenge_table, skill_display_name, CHALLENGE_KEYS, DUNGEON_LEVEL_CAP, DUNGEON_SKILL_KEY,
    GENERIC_SKILL_TABLE, SKILL_KEYS, SKILL_LEVEL_CAP,
};
