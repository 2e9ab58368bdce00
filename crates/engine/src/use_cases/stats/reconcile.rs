//! Schema reconciler.
//!
//! A member record may come from any of several upstream schema
//! generations. Each sub-fact (purse, skills, slayers, fairy souls, dungeon
//! level) has its own ordered list of candidate layouts; the first layout
//! that yields a usable value wins and later layouts are not consulted.
//! Extractors are pure functions of the record and the level tables.

use chrono::{DateTime, Utc};
use sbstats_domain::common::{
    canonical_skill_id, capitalize_first, from_epoch_millis, title_case,
};
use sbstats_domain::game_systems::{
    skill_display_name, CHALLENGE_KEYS, DUNGEON_LEVEL_CAP, DUNGEON_SKILL_KEY,
    GENERIC_SKILL_TABLE, SKILL_KEYS,
};
use sbstats_domain::{level_for, ChallengeLevel, LevelEntry, SkillLevel};
use serde_json::{Map, Value};

use super::json_probe::{
    first_number, lenient_number, number_at, object_at, positive_number, JsonPath,
};
use super::level_tables::SkillTables;

/// Prefix of legacy flat skill-experience fields.
const LEGACY_SKILL_PREFIX: &str = "experience_skill_";

const PURSE_PATHS: &[JsonPath] = &[&["currencies", "coin_purse"], &["coin_purse"], &["purse"]];

const FAIRY_SOUL_PATHS: &[JsonPath] = &[
    &["fairy_soul", "total_collected"],
    &["fairy_souls_collected"],
    &["fairy_souls"],
];

const DUNGEON_XP_PATHS: &[JsonPath] = &[
    &["dungeon_types", "catacombs", "experience"],
    &["dungeons", "dungeon_types", "catacombs", "experience"],
    &["dungeons", "dungeons", "dungeon_types", "catacombs", "experience"],
    &["dungeon_types", "catacombs_exp"],
    &["dungeons", "dungeon_types", "catacombs_exp"],
    &["experience_dungeon_types_catacombs"],
    &["dungeons", "catacombs", "experience"],
    &["dungeons", "dungeon_types", "experience"],
    &["player_data", "experience", DUNGEON_SKILL_KEY],
];

/// Experience fields on a single slayer entry, in priority order.
const CHALLENGE_XP_PATHS: &[JsonPath] = &[&["xp"], &["total_experience"], &["total_exp"]];

/// Sub-facts read from one member record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconciled {
    pub purse: Option<f64>,
    pub last_save: Option<DateTime<Utc>>,
    pub skills: Vec<SkillLevel>,
    pub challenges: Vec<ChallengeLevel>,
    pub fairy_souls: Option<u32>,
    pub dungeon_level: Option<u32>,
}

/// Which lists the fallback source should fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackNeed {
    pub skills: bool,
    pub challenges: bool,
}

impl FallbackNeed {
    pub fn any(&self) -> bool {
        self.skills || self.challenges
    }
}

impl Reconciled {
    /// Empty lists that a fallback source may backfill.
    pub fn fallback_need(&self) -> FallbackNeed {
        FallbackNeed {
            skills: self.skills.is_empty(),
            challenges: self.challenges.is_empty(),
        }
    }
}

/// Reconcile every sub-fact of a member record.
///
/// `Value::Null` (no member found) reconciles to an empty result.
pub fn reconcile(member: &Value, tables: &SkillTables) -> Reconciled {
    Reconciled {
        purse: purse(member),
        last_save: number_at(member, &["last_save"]).and_then(from_epoch_millis),
        skills: first_layout("skills", member, tables, SKILL_LAYOUTS).unwrap_or_default(),
        challenges: first_layout("challenges", member, tables, CHALLENGE_LAYOUTS)
            .unwrap_or_default(),
        fairy_souls: fairy_souls(member),
        dungeon_level: dungeon_level(member),
    }
}

/// First numeric purse field.
pub fn purse(member: &Value) -> Option<f64> {
    first_number(member, PURSE_PATHS)
}

pub fn fairy_souls(member: &Value) -> Option<u32> {
    first_number(member, FAIRY_SOUL_PATHS).and_then(to_count)
}

/// Catacombs level from the first positive experience value, capped at 50.
pub fn dungeon_level(member: &Value) -> Option<u32> {
    DUNGEON_XP_PATHS
        .iter()
        .find_map(|path| number_at(member, path).filter(|xp| xp.is_finite() && *xp > 0.0))
        .map(|xp| level_for(xp, &GENERIC_SKILL_TABLE).min(DUNGEON_LEVEL_CAP))
}

fn to_count(value: f64) -> Option<u32> {
    (value.is_finite() && value >= 0.0).then(|| value.trunc().min(f64::from(u32::MAX)) as u32)
}

// =============================================================================
// Layout combinator
// =============================================================================

/// A named candidate schema layout for one sub-fact.
pub struct Layout<T> {
    pub name: &'static str,
    pub extract: fn(&Value, &SkillTables) -> Option<T>,
}

/// Run layouts in order and return the first hit.
pub fn first_layout<T>(
    fact: &'static str,
    member: &Value,
    tables: &SkillTables,
    layouts: &[Layout<T>],
) -> Option<T> {
    layouts.iter().find_map(|layout| {
        let hit = (layout.extract)(member, tables);
        if hit.is_some() {
            tracing::trace!(fact, layout = layout.name, "Schema layout matched");
        }
        hit
    })
}

fn non_empty(entries: Vec<LevelEntry>) -> Option<Vec<LevelEntry>> {
    (!entries.is_empty()).then_some(entries)
}

// =============================================================================
// Skills
// =============================================================================

pub const SKILL_LAYOUTS: &[Layout<Vec<SkillLevel>>] = &[
    Layout {
        name: "player_data.experience",
        extract: skills_from_experience_map,
    },
    Layout {
        name: "experience_skill_<name>",
        extract: skills_from_legacy_fields,
    },
    Layout {
        name: "skills.<name>.experience",
        extract: skills_from_nested_objects,
    },
    Layout {
        name: "experience_skill_* scan",
        extract: skills_from_field_scan,
    },
];

/// Collects skills, skipping non-positive experience and duplicate names.
struct SkillCollector<'t> {
    tables: &'t SkillTables,
    skills: Vec<SkillLevel>,
}

impl<'t> SkillCollector<'t> {
    fn new(tables: &'t SkillTables) -> Self {
        Self {
            tables,
            skills: Vec::new(),
        }
    }

    fn add(&mut self, key: &str, xp: Option<f64>) {
        let Some(xp) = xp.filter(|xp| xp.is_finite() && *xp > 0.0) else {
            return;
        };
        let skill_id = canonical_skill_id(key);
        if skill_id.is_empty() {
            return;
        }
        let name = skill_display_name(&skill_id)
            .map(str::to_string)
            .unwrap_or_else(|| title_case(&skill_id));
        let level = self.tables.skill_level(&skill_id, xp);
        LevelEntry::insert_unique(&mut self.skills, LevelEntry::new(name, level, xp));
    }

    fn finish(self) -> Option<Vec<SkillLevel>> {
        non_empty(self.skills)
    }
}

/// `player_data.experience.SKILL_<NAME>`, numeric strings accepted.
fn skills_from_experience_map(member: &Value, tables: &SkillTables) -> Option<Vec<SkillLevel>> {
    let experience = object_at(member, &["player_data", "experience"])?;
    let mut collector = SkillCollector::new(tables);
    for (key, value) in experience {
        if key.eq_ignore_ascii_case(DUNGEON_SKILL_KEY) {
            continue;
        }
        collector.add(key, lenient_number(value));
    }
    collector.finish()
}

/// `experience_skill_<name>` in lower or upper case, for each known skill.
fn skills_from_legacy_fields(member: &Value, tables: &SkillTables) -> Option<Vec<SkillLevel>> {
    let fields = member.as_object()?;
    let mut collector = SkillCollector::new(tables);
    for skill in SKILL_KEYS {
        let xp = [
            format!("{LEGACY_SKILL_PREFIX}{skill}"),
            format!("{LEGACY_SKILL_PREFIX}{}", skill.to_uppercase()),
        ]
        .iter()
        .find_map(|field| fields.get(field).and_then(Value::as_f64));
        collector.add(skill, xp);
    }
    collector.finish()
}

/// `skills.<name>.experience` or `skills.<name>.xp`.
fn skills_from_nested_objects(member: &Value, tables: &SkillTables) -> Option<Vec<SkillLevel>> {
    let skills = object_at(member, &["skills"])?;
    let mut collector = SkillCollector::new(tables);
    for (key, value) in skills {
        if value.is_object() {
            collector.add(key, first_number(value, &[&["experience"], &["xp"]]));
        }
    }
    collector.finish()
}

/// Every top-level field named `experience_skill_*` (any case).
fn skills_from_field_scan(member: &Value, tables: &SkillTables) -> Option<Vec<SkillLevel>> {
    non_empty(skills_from_prefixed_fields(member.as_object()?, tables))
}

// =============================================================================
// Slayer challenges
// =============================================================================

pub const CHALLENGE_LAYOUTS: &[Layout<Vec<ChallengeLevel>>] = &[
    Layout {
        name: "slayer.slayer_bosses",
        extract: challenges_from_nested_bosses,
    },
    Layout {
        name: "slayer_bosses",
        extract: challenges_from_flat_bosses,
    },
    Layout {
        name: "slayer",
        extract: challenges_from_slayer_object,
    },
];

fn challenges_from_nested_bosses(
    member: &Value,
    tables: &SkillTables,
) -> Option<Vec<ChallengeLevel>> {
    challenges_from_mapping(object_at(member, &["slayer", "slayer_bosses"])?, tables)
}

fn challenges_from_flat_bosses(
    member: &Value,
    tables: &SkillTables,
) -> Option<Vec<ChallengeLevel>> {
    challenges_from_mapping(object_at(member, &["slayer_bosses"])?, tables)
}

/// The `slayer` object read as the boss mapping, when it has no sub-mapping.
fn challenges_from_slayer_object(
    member: &Value,
    tables: &SkillTables,
) -> Option<Vec<ChallengeLevel>> {
    let slayer = object_at(member, &["slayer"])?;
    if slayer.contains_key("slayer_bosses") {
        return None;
    }
    challenges_from_mapping(slayer, tables)
}

/// Probe the known bosses in canonical order, else scan every entry.
pub fn challenges_from_mapping(
    bosses: &Map<String, Value>,
    tables: &SkillTables,
) -> Option<Vec<ChallengeLevel>> {
    let mut challenges = Vec::new();
    for key in CHALLENGE_KEYS {
        if let Some(boss) = bosses.get(key) {
            add_challenge(&mut challenges, key, boss, tables);
        }
    }
    if challenges.is_empty() {
        for (key, boss) in bosses {
            add_challenge(&mut challenges, key, boss, tables);
        }
    }
    non_empty(challenges)
}

fn add_challenge(
    challenges: &mut Vec<ChallengeLevel>,
    key: &str,
    boss: &Value,
    tables: &SkillTables,
) {
    if !boss.is_object() {
        return;
    }
    let Some(xp) = CHALLENGE_XP_PATHS
        .iter()
        .find_map(|path| number_at(boss, path))
        .filter(|xp| xp.is_finite() && *xp > 0.0)
    else {
        return;
    };
    let level = tables.challenge_level(key, xp);
    LevelEntry::insert_unique(challenges, LevelEntry::new(capitalize_first(key), level, xp));
}

/// Skills from flat `experience_skill_*` fields with positive numeric values.
pub fn skills_from_prefixed_fields(
    fields: &Map<String, Value>,
    tables: &SkillTables,
) -> Vec<SkillLevel> {
    let mut collector = SkillCollector::new(tables);
    for (key, value) in fields {
        if key.to_lowercase().starts_with(LEGACY_SKILL_PREFIX) {
            collector.add(key, positive_number(value));
        }
    }
    collector.skills
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tables() -> SkillTables {
        SkillTables::default()
    }

    #[test]
    fn purse_prefers_currencies() {
        let member = json!({
            "currencies": { "coin_purse": 100.5 },
            "coin_purse": 5,
            "purse": 1
        });
        assert_eq!(purse(&member), Some(100.5));
    }

    #[test]
    fn purse_falls_back_to_legacy_names() {
        assert_eq!(purse(&json!({ "coin_purse": 5 })), Some(5.0));
        assert_eq!(purse(&json!({ "purse": 1 })), Some(1.0));
        assert_eq!(purse(&json!({ "currencies": { "coin_purse": "9" } })), None);
    }

    #[test]
    fn new_style_experience_map_yields_farming_twenty() {
        let member = json!({ "player_data": { "experience": { "SKILL_FARMING": 100000 } } });
        let result = reconcile(&member, &tables());
        assert_eq!(
            result.skills,
            vec![LevelEntry::new("Farming", 20, 100_000.0)]
        );
    }

    #[test]
    fn dungeoneering_is_not_a_skill() {
        let member = json!({
            "player_data": { "experience": {
                "SKILL_MINING": "2000",
                "SKILL_DUNGEONEERING": 50000
            } }
        });
        let result = reconcile(&member, &tables());
        assert_eq!(result.skills.len(), 1);
        assert_eq!(result.skills[0].name, "Mining");
        assert_eq!(result.skills[0].level, 10);
        assert_eq!(result.dungeon_level, Some(18));
    }

    #[test]
    fn bare_skill_prefixes_are_ignored() {
        let result = reconcile(&json!({ "experience_skill_": 500 }), &tables());
        assert!(result.skills.is_empty());
        assert!(result.fallback_need().skills);

        let member = json!({
            "player_data": { "experience": { "SKILL_": 500, "SKILL_ALCHEMY": 50 } }
        });
        let result = reconcile(&member, &tables());
        assert_eq!(result.skills, vec![LevelEntry::new("Alchemy", 2, 50.0)]);
    }

    #[test]
    fn new_style_map_shadows_legacy_fields() {
        let member = json!({
            "player_data": { "experience": { "SKILL_COMBAT": 300 } },
            "experience_skill_combat": 9_999_999,
            "experience_skill_mining": 500
        });
        let result = reconcile(&member, &tables());
        assert_eq!(result.skills, vec![LevelEntry::new("Combat", 5, 300.0)]);
    }

    #[test]
    fn legacy_fields_accept_upper_case_suffix() {
        let member = json!({
            "experience_skill_FISHING": 75000,
            "experience_skill_taming": 0
        });
        let result = reconcile(&member, &tables());
        assert_eq!(result.skills, vec![LevelEntry::new("Fishing", 19, 75_000.0)]);
    }

    #[test]
    fn nested_skill_objects_are_read() {
        let member = json!({
            "skills": {
                "alchemy": { "experience": 125 },
                "trophy_fish": { "xp": 50 },
                "broken": 7
            }
        });
        let result = reconcile(&member, &tables());
        let names: Vec<&str> = result.skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Alchemy", "Trophy Fish"]);
        assert_eq!(result.skills[0].level, 3);
    }

    #[test]
    fn field_scan_finds_unknown_skills() {
        let member = json!({ "EXPERIENCE_SKILL_DIVING": 200, "other": 1 });
        let result = reconcile(&member, &tables());
        assert_eq!(result.skills, vec![LevelEntry::new("Diving", 4, 200.0)]);
    }

    #[test]
    fn experience_map_without_positive_values_falls_through() {
        let member = json!({
            "player_data": { "experience": { "SKILL_FARMING": 0 } },
            "experience_skill_farming": 50
        });
        let result = reconcile(&member, &tables());
        assert_eq!(result.skills, vec![LevelEntry::new("Farming", 2, 50.0)]);
    }

    #[test]
    fn fetched_table_is_used_for_matching_skill() {
        let tables = SkillTables::from_thresholds(
            [("farming".to_string(), vec![50.0, 175.0, 375.0])].into(),
        );
        let member = json!({ "player_data": { "experience": { "SKILL_FARMING": 200 } } });
        let result = reconcile(&member, &tables);
        assert_eq!(result.skills[0].level, 2);
    }

    #[test]
    fn slayer_bosses_nested_under_slayer() {
        let member = json!({
            "slayer": { "slayer_bosses": {
                "wolf": { "xp": 250 },
                "zombie": { "xp": 1000 },
                "spider": {}
            } }
        });
        let result = reconcile(&member, &tables());
        assert_eq!(
            result.challenges,
            vec![
                LevelEntry::new("Zombie", 5, 1_000.0),
                LevelEntry::new("Wolf", 4, 250.0),
            ]
        );
    }

    #[test]
    fn flat_slayer_bosses_with_legacy_totals() {
        let member = json!({
            "slayer_bosses": {
                "enderman": { "total_experience": 30 },
                "blaze": { "total_exp": 10 }
            }
        });
        let result = reconcile(&member, &tables());
        assert_eq!(result.challenges.len(), 2);
        assert_eq!(result.challenges[0].name, "Enderman");
        assert_eq!(result.challenges[0].level, 3);
        assert_eq!(result.challenges[1].level, 2);
    }

    #[test]
    fn slayer_object_used_as_mapping_without_sub_key() {
        let member = json!({ "slayer": { "vampire": { "xp": 240 } } });
        let result = reconcile(&member, &tables());
        assert_eq!(result.challenges, vec![LevelEntry::new("Vampire", 4, 240.0)]);
    }

    #[test]
    fn unknown_bosses_scanned_when_no_known_key_matches() {
        let member = json!({ "slayer_bosses": { "ghoul": { "xp": 5000 } } });
        let result = reconcile(&member, &tables());
        assert_eq!(result.challenges, vec![LevelEntry::new("Ghoul", 1, 5_000.0)]);
    }

    #[test]
    fn empty_nested_bosses_fall_through_to_flat() {
        let member = json!({
            "slayer": { "slayer_bosses": {} },
            "slayer_bosses": { "spider": { "xp": 25 } }
        });
        let result = reconcile(&member, &tables());
        assert_eq!(result.challenges, vec![LevelEntry::new("Spider", 3, 25.0)]);
    }

    #[test]
    fn fairy_souls_layouts() {
        assert_eq!(fairy_souls(&json!({ "fairy_soul": { "total_collected": 220 } })), Some(220));
        assert_eq!(fairy_souls(&json!({ "fairy_souls_collected": 12 })), Some(12));
        assert_eq!(fairy_souls(&json!({ "fairy_souls": 3 })), Some(3));
        assert_eq!(fairy_souls(&json!({ "fairy_souls": -3 })), None);
        assert_eq!(fairy_souls(&json!({})), None);
    }

    #[test]
    fn dungeon_level_from_doubly_nested_legacy_path() {
        let member = json!({
            "dungeons": { "dungeons": { "dungeon_types": { "catacombs": { "experience": 100000 } } } }
        });
        assert_eq!(dungeon_level(&member), Some(20));
    }

    #[test]
    fn dungeon_level_from_nested_dungeon_types() {
        let member = json!({
            "dungeons": { "dungeon_types": { "catacombs": { "experience": 1e9 } } }
        });
        assert_eq!(dungeon_level(&member), Some(DUNGEON_LEVEL_CAP));
    }

    #[test]
    fn dungeon_level_skips_zero_and_uses_flat_field() {
        let member = json!({
            "dungeon_types": { "catacombs": { "experience": 0 } },
            "experience_dungeon_types_catacombs": 500
        });
        assert_eq!(dungeon_level(&member), Some(6));
        assert_eq!(dungeon_level(&json!({ "dungeons": {} })), None);
    }

    #[test]
    fn null_member_reconciles_to_empty() {
        let result = reconcile(&Value::Null, &tables());
        assert_eq!(result, Reconciled::default());
        let need = result.fallback_need();
        assert!(need.skills && need.challenges && need.any());
    }

    #[test]
    fn last_save_is_read_from_epoch_millis() {
        let member = json!({ "last_save": 1_705_314_600_000_u64 });
        let result = reconcile(&member, &tables());
        assert_eq!(
            result.last_save.map(|t| t.timestamp()),
            Some(1_705_314_600)
        );
    }

    #[test]
    fn reconciliation_is_deterministic() {
        let member = json!({
            "currencies": { "coin_purse": 42 },
            "player_data": { "experience": { "SKILL_MINING": 9000, "SKILL_FORAGING": 10 } },
            "slayer_bosses": { "wolf": { "xp": 1500 } },
            "fairy_souls_collected": 4
        });
        let first = reconcile(&member, &tables());
        let second = reconcile(&member, &tables());
        assert_eq!(first, second);
        assert!(!first.fallback_need().any());
    }

    #[test]
    fn first_layout_short_circuits() {
        fn never(_: &Value, _: &SkillTables) -> Option<u8> {
            None
        }
        fn one(_: &Value, _: &SkillTables) -> Option<u8> {
            Some(1)
        }
        fn two(_: &Value, _: &SkillTables) -> Option<u8> {
            Some(2)
        }
        let layouts = [
            Layout { name: "never", extract: never },
            Layout { name: "one", extract: one },
            Layout { name: "two", extract: two },
        ];
        assert_eq!(first_layout("test", &Value::Null, &tables(), &layouts), Some(1));
        assert_eq!(first_layout("test", &Value::Null, &tables(), &layouts[..1]), None);
    }
}
