//! Hypixel SkyBlock progression constants.
//!
//! The generic skill table mirrors the official per-skill tables closely
//! enough for display, and is used for any skill the live resource endpoint
//! did not supply. Slayer (boss-challenge) thresholds are fixed game
//! constants and are never fetched.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::value_objects::ExperienceThresholdTable;

/// Highest reportable skill level.
pub const SKILL_LEVEL_CAP: u32 = 60;

/// Highest reportable catacombs level.
pub const DUNGEON_LEVEL_CAP: u32 = 50;

/// New-style experience key reported as dungeon level rather than a skill.
pub const DUNGEON_SKILL_KEY: &str = "SKILL_DUNGEONEERING";

/// Skills probed by name in the legacy flat layout.
pub const SKILL_KEYS: [&str; 12] = [
    "farming",
    "mining",
    "combat",
    "foraging",
    "fishing",
    "enchanting",
    "alchemy",
    "taming",
    "carpentry",
    "runecrafting",
    "social",
    "hunting",
];

/// Slayer bosses in canonical display order.
pub const CHALLENGE_KEYS: [&str; 6] = ["zombie", "spider", "wolf", "enderman", "blaze", "vampire"];

const GENERIC_SKILL_THRESHOLDS: [f64; 61] = [
    0.0, 50.0, 125.0, 200.0, 300.0, 500.0, 750.0, 1_000.0, 1_500.0, 2_000.0, 3_500.0, 5_000.0,
    7_500.0, 10_000.0, 15_000.0, 20_000.0, 30_000.0, 50_000.0, 75_000.0, 100_000.0, 200_000.0,
    300_000.0, 400_000.0, 500_000.0, 600_000.0, 700_000.0, 800_000.0, 900_000.0, 1_000_000.0,
    1_100_000.0, 1_200_000.0, 1_300_000.0, 1_400_000.0, 1_500_000.0, 1_600_000.0, 1_700_000.0,
    1_800_000.0, 1_900_000.0, 2_000_000.0, 2_100_000.0, 2_200_000.0, 2_300_000.0, 2_400_000.0,
    2_500_000.0, 2_600_000.0, 2_750_000.0, 2_900_000.0, 3_100_000.0, 3_400_000.0, 3_700_000.0,
    4_000_000.0, 4_300_000.0, 4_600_000.0, 4_900_000.0, 5_200_000.0, 5_500_000.0, 5_800_000.0,
    6_100_000.0, 6_400_000.0, 6_700_000.0, 7_000_000.0,
];

/// Shared fallback table for every skill without a fetched table.
pub static GENERIC_SKILL_TABLE: Lazy<ExperienceThresholdTable> = Lazy::new(|| {
    ExperienceThresholdTable::new(GENERIC_SKILL_THRESHOLDS).with_level_cap(SKILL_LEVEL_CAP)
});

static CHALLENGE_TABLES: Lazy<HashMap<&'static str, ExperienceThresholdTable>> = Lazy::new(|| {
    let standard = |t1: f64, t2: f64, t3: f64, t4: f64| {
        ExperienceThresholdTable::new([
            0.0, t1, t2, t3, t4, 5_000.0, 20_000.0, 100_000.0, 400_000.0,
            1_000_000.0,
        ])
    };
    HashMap::from([
        ("zombie", standard(5.0, 15.0, 200.0, 1_000.0)),
        ("spider", standard(5.0, 25.0, 200.0, 1_000.0)),
        ("wolf", standard(10.0, 30.0, 250.0, 1_500.0)),
        ("enderman", standard(10.0, 30.0, 250.0, 1_500.0)),
        ("blaze", standard(10.0, 25.0, 250.0, 1_500.0)),
        (
            "vampire",
            ExperienceThresholdTable::new([0.0, 20.0, 75.0, 240.0, 840.0, 2_400.0]),
        ),
    ])
});

/// Static slayer table for a boss id (case-insensitive).
pub fn challenge_table(id: &str) -> Option<&'static ExperienceThresholdTable> {
    CHALLENGE_TABLES.get(id.to_lowercase().as_str())
}

/// Display name for a known skill id, if it has one.
pub fn skill_display_name(skill_id: &str) -> Option<&'static str> {
    Some(match skill_id {
        "farming" => "Farming",
        "mining" => "Mining",
        "combat" => "Combat",
        "foraging" => "Foraging",
        "fishing" => "Fishing",
        "enchanting" => "Enchanting",
        "alchemy" => "Alchemy",
        "taming" => "Taming",
        "carpentry" => "Carpentry",
        "runecrafting" => "Runecrafting",
        "social" => "Social",
        "hunting" => "Hunting",
        _ => return None,
    })
}
