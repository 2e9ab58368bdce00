//! Fallback aggregator lookup.
//!
//! Backfills skill and slayer lists from the community aggregator when the
//! primary source's member record had none. Every failure is absorbed.

use std::sync::Arc;

use sbstats_domain::{ChallengeLevel, SkillLevel};
use serde_json::{Map, Value};

use crate::infrastructure::ports::{AggregatorPort, AggregatorProfile};

use super::level_tables::SkillTables;
use super::reconcile::{challenges_from_mapping, skills_from_prefixed_fields};

/// Lists recovered from the aggregator. At least one is non-empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FallbackLevels {
    pub skills: Vec<SkillLevel>,
    pub challenges: Vec<ChallengeLevel>,
}

/// Use case for querying the aggregator by display name.
pub struct FetchFallback {
    aggregator: Arc<dyn AggregatorPort>,
}

impl FetchFallback {
    pub fn new(aggregator: Arc<dyn AggregatorPort>) -> Self {
        Self { aggregator }
    }

    /// Skill and slayer lists for `display_name`, or `None` when the
    /// aggregator fails or has nothing usable.
    pub async fn execute(&self, display_name: &str, tables: &SkillTables) -> Option<FallbackLevels> {
        let profiles = match self.aggregator.get_profiles(display_name).await {
            Ok(profiles) => profiles,
            Err(e) => {
                tracing::warn!(display_name, error = %e, "Fallback aggregator lookup failed");
                return None;
            }
        };

        let Some(member) = select_profile(&profiles).and_then(first_member) else {
            tracing::debug!(display_name, "Fallback aggregator returned no member data");
            return None;
        };

        let levels = FallbackLevels {
            skills: skills_from_prefixed_fields(member, tables),
            challenges: member_challenges(member, tables),
        };

        if levels.skills.is_empty() && levels.challenges.is_empty() {
            tracing::debug!(display_name, "Fallback aggregator had no skill or slayer data");
            return None;
        }

        tracing::debug!(
            display_name,
            skills = levels.skills.len(),
            challenges = levels.challenges.len(),
            "Fallback aggregator supplied levels"
        );
        Some(levels)
    }
}

/// The profile flagged as selected, else the first one.
fn select_profile(profiles: &[AggregatorProfile]) -> Option<&AggregatorProfile> {
    profiles
        .iter()
        .find(|profile| profile.selected)
        .or_else(|| profiles.first())
}

fn first_member(profile: &AggregatorProfile) -> Option<&Map<String, Value>> {
    profile.members.values().find_map(Value::as_object)
}

fn member_challenges(member: &Map<String, Value>, tables: &SkillTables) -> Vec<ChallengeLevel> {
    let bosses = member
        .get("slayer_bosses")
        .and_then(Value::as_object)
        .or_else(|| member.get("slayer").and_then(Value::as_object));
    bosses
        .and_then(|bosses| challenges_from_mapping(bosses, tables))
        .unwrap_or_default()
}
