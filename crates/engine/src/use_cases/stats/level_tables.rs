//! Level table provider.
//!
//! Skill tables come from the live resource endpoint once per process and
//! are memoized in an injected [`OnceCache`]. Slayer tables are static game
//! constants. Any lookup the live data cannot answer falls through to the
//! bundled generic skill table.

use std::collections::HashMap;
use std::sync::Arc;

use sbstats_domain::game_systems::{challenge_table, GENERIC_SKILL_TABLE, SKILL_LEVEL_CAP};
use sbstats_domain::{level_for, ExperienceThresholdTable};

use crate::infrastructure::cache::OnceCache;
use crate::infrastructure::ports::{SkillTablePort, SkillThresholds};

/// Snapshot of every level table available to one reconciliation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillTables {
    fetched: HashMap<String, ExperienceThresholdTable>,
}

impl SkillTables {
    /// Build from fetched thresholds. Keys are lower-cased, entries sorted
    /// and capped at the skill level cap; empty tables are dropped.
    pub fn from_thresholds(thresholds: SkillThresholds) -> Self {
        let fetched = thresholds
            .into_iter()
            .map(|(skill_id, values)| {
                let table = ExperienceThresholdTable::new(values).with_level_cap(SKILL_LEVEL_CAP);
                (skill_id.to_lowercase(), table)
            })
            .filter(|(_, table)| !table.is_empty())
            .collect();
        Self { fetched }
    }

    /// Table for a skill id, or the generic static table.
    pub fn skill_table(&self, skill_id: &str) -> &ExperienceThresholdTable {
        self.fetched
            .get(&skill_id.to_lowercase())
            .unwrap_or(&*GENERIC_SKILL_TABLE)
    }

    /// Static slayer table for a boss id, if one exists.
    pub fn challenge_table(&self, challenge_id: &str) -> Option<&'static ExperienceThresholdTable> {
        challenge_table(challenge_id)
    }

    pub fn skill_level(&self, skill_id: &str, xp: f64) -> u32 {
        level_for(xp, self.skill_table(skill_id))
    }

    /// Slayer level, or 1 for bosses without a table.
    pub fn challenge_level(&self, challenge_id: &str, xp: f64) -> u32 {
        self.challenge_table(challenge_id)
            .map_or(1, |table| level_for(xp, table))
    }

    /// Whether a table was fetched for this skill.
    pub fn has_fetched(&self, skill_id: &str) -> bool {
        self.fetched.contains_key(&skill_id.to_lowercase())
    }

    /// Number of fetched tables.
    pub fn fetched_len(&self) -> usize {
        self.fetched.len()
    }
}

/// Supplies level tables, fetching the live skill tables at most once.
pub struct LevelTables {
    source: Arc<dyn SkillTablePort>,
    cache: Arc<OnceCache<SkillTables>>,
}

impl LevelTables {
    pub fn new(source: Arc<dyn SkillTablePort>, cache: Arc<OnceCache<SkillTables>>) -> Self {
        Self { source, cache }
    }

    /// Load the table snapshot, fetching on first use.
    ///
    /// A failed fetch caches an empty snapshot, so every skill falls back to
    /// the static table for the rest of the process.
    pub async fn load(&self) -> Arc<SkillTables> {
        self.cache
            .get_or_populate(|| async {
                match self.source.fetch_skill_tables().await {
                    Ok(thresholds) => {
                        let tables = SkillTables::from_thresholds(thresholds);
                        tracing::info!(count = tables.fetched_len(), "Loaded skill level tables");
                        tables
                    }
                    Err(e) => {
                        tracing::warn!(
                            error = %e,
                            "Skill level tables unavailable, using static table"
                        );
                        SkillTables::default()
                    }
                }
            })
            .await
    }

    /// Table for one skill category.
    pub async fn table(&self, category: &str) -> ExperienceThresholdTable {
        self.load().await.skill_table(category).clone()
    }
}
