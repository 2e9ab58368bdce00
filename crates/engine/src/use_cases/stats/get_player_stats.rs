//! Player stats orchestration.
//!
//! Resolves the active profile, fetches its detail record, reconciles the
//! player's member entry and backfills missing lists from the aggregator.

use std::sync::Arc;

use sbstats_domain::common::none_if_empty;
use sbstats_domain::{PlayerStats, PlayerUuid};
use serde_json::Value;

use crate::infrastructure::ports::{GameStatsPort, ProfileSummary};

use super::error::StatsError;
use super::fallback::FetchFallback;
use super::level_tables::LevelTables;
use super::member::find_member;
use super::reconcile::{purse, reconcile};

/// Use case for building one player's stats record.
pub struct GetPlayerStats {
    stats_source: Arc<dyn GameStatsPort>,
    level_tables: Arc<LevelTables>,
    fallback: Arc<FetchFallback>,
}

impl GetPlayerStats {
    pub fn new(
        stats_source: Arc<dyn GameStatsPort>,
        level_tables: Arc<LevelTables>,
        fallback: Arc<FetchFallback>,
    ) -> Self {
        Self {
            stats_source,
            level_tables,
            fallback,
        }
    }

    /// Stats for the player's active profile.
    ///
    /// # Arguments
    /// * `uuid` - Player id, hyphenated or compact
    /// * `display_name` - Enables the aggregator fallback when present
    ///
    /// # Returns
    /// The record, or `None` when the player, profile or upstream is
    /// unavailable. Never fails.
    pub async fn execute(&self, uuid: &str, display_name: Option<&str>) -> Option<PlayerStats> {
        match self.build(uuid, display_name).await {
            Ok(stats) => Some(stats),
            Err(e) => {
                e.log("player_stats");
                None
            }
        }
    }

    async fn build(&self, raw_uuid: &str, display_name: Option<&str>) -> Result<PlayerStats, StatsError> {
        let uuid = PlayerUuid::parse(raw_uuid)
            .map_err(|_| StatsError::InvalidIdentity(raw_uuid.to_string()))?;

        let profiles = self.stats_source.list_profiles(&uuid).await?;
        let summary =
            select_profile(&profiles).ok_or_else(|| StatsError::not_found("profile", &uuid))?;
        let summary_member = find_member(&summary.members, &uuid);
        let summary_purse = summary_member.and_then(purse);

        let (detail, tables) = tokio::join!(
            self.stats_source.get_profile(&summary.profile_id),
            self.level_tables.load()
        );
        // A failed detail fetch degrades to the summary member.
        let detail = match detail {
            Ok(detail) => detail,
            Err(e) => {
                tracing::warn!(
                    uuid = %uuid,
                    profile_id = %summary.profile_id,
                    error = %e,
                    "Profile detail unavailable, using summary member"
                );
                None
            }
        };

        let member = detail
            .as_ref()
            .and_then(|detail| find_member(&detail.members, &uuid))
            .or(summary_member);
        if member.is_none() {
            tracing::debug!(
                uuid = %uuid,
                profile_id = %summary.profile_id,
                "Member not found in profile, reconciling empty record"
            );
        }
        let empty = Value::Null;
        let reconciled = reconcile(member.unwrap_or(&empty), &tables);
        let need = reconciled.fallback_need();

        let mut stats = PlayerStats::new(
            summary
                .cute_name
                .as_deref()
                .and_then(none_if_empty)
                .unwrap_or(PlayerStats::UNKNOWN_PROFILE),
        )
        .with_purse(
            reconciled
                .purse
                .filter(|purse| *purse > 0.0)
                .or(summary_purse)
                .unwrap_or(0.0),
        )
        .with_bank(summary.bank_balance.unwrap_or(0.0))
        .with_game_mode(summary.game_mode.clone())
        .with_last_save(reconciled.last_save);
        stats.skills = reconciled.skills;
        stats.challenges = reconciled.challenges;
        stats.fairy_souls = reconciled.fairy_souls;
        stats.dungeon_level = reconciled.dungeon_level;

        let display_name = display_name.and_then(none_if_empty);
        if let Some(name) = display_name.filter(|_| need.any()) {
            tracing::debug!(
                uuid = %uuid,
                skills = need.skills,
                challenges = need.challenges,
                "Primary source lacks levels, trying fallback"
            );
            if let Some(levels) = self.fallback.execute(name, &tables).await {
                if need.skills {
                    stats.skills = levels.skills;
                }
                if need.challenges {
                    stats.challenges = levels.challenges;
                }
            }
        }

        tracing::debug!(
            uuid = %uuid,
            profile_id = %summary.profile_id,
            skills = stats.skills.len(),
            challenges = stats.challenges.len(),
            "Built player stats"
        );
        Ok(stats)
    }
}

/// The profile flagged as selected, else the first one.
fn select_profile(profiles: &[ProfileSummary]) -> Option<&ProfileSummary> {
    profiles
        .iter()
        .find(|profile| profile.selected)
        .or_else(|| profiles.first())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::cache::OnceCache;
    use crate::infrastructure::ports::{
        AggregatorProfile, MockAggregatorPort, MockGameStatsPort, MockSkillTablePort,
        ProfileDetail, UpstreamError,
    };
    use crate::use_cases::stats::level_tables::SkillTables;
    use sbstats_domain::LevelEntry;
    use serde_json::{json, Map};

    const UUID: &str = "069a79f4-44e9-4726-a5be-fca90e38aaf5";
    const COMPACT: &str = "069a79f444e94726a5befca90e38aaf5";

    fn members(key: &str, member: Value) -> Map<String, Value> {
        let mut members = Map::new();
        members.insert(key.to_string(), member);
        members
    }

    fn summary(member: Value) -> ProfileSummary {
        ProfileSummary {
            profile_id: "p1".to_string(),
            cute_name: Some("Apple".to_string()),
            selected: true,
            game_mode: None,
            bank_balance: Some(2_500.0),
            members: members(COMPACT, member),
        }
    }

    fn detail(member: Value) -> ProfileDetail {
        ProfileDetail {
            profile_id: "p1".to_string(),
            members: members(COMPACT, member),
        }
    }

    fn tables_never_fetched() -> Arc<LevelTables> {
        let mut source = MockSkillTablePort::new();
        source.expect_fetch_skill_tables().never();
        Arc::new(LevelTables::new(
            Arc::new(source),
            Arc::new(OnceCache::preloaded(SkillTables::default())),
        ))
    }

    fn no_fallback() -> Arc<FetchFallback> {
        let mut aggregator = MockAggregatorPort::new();
        aggregator.expect_get_profiles().never();
        Arc::new(FetchFallback::new(Arc::new(aggregator)))
    }

    fn use_case(stats: MockGameStatsPort, fallback: Arc<FetchFallback>) -> GetPlayerStats {
        GetPlayerStats::new(Arc::new(stats), tables_never_fetched(), fallback)
    }

    fn stats_source(summary: ProfileSummary, detail: Option<ProfileDetail>) -> MockGameStatsPort {
        let mut stats = MockGameStatsPort::new();
        stats
            .expect_list_profiles()
            .times(1)
            .returning(move |_| Ok(vec![summary.clone()]));
        stats
            .expect_get_profile()
            .times(1)
            .returning(move |_| Ok(detail.clone()));
        stats
    }

    #[tokio::test]
    async fn farming_from_detail_record_uses_generic_table() {
        let stats = stats_source(
            summary(json!({ "coin_purse": 10 })),
            Some(detail(json!({
                "player_data": { "experience": { "SKILL_FARMING": 100000 } },
                "slayer_bosses": { "zombie": { "xp": 5 } }
            }))),
        );

        let result = use_case(stats, no_fallback()).execute(UUID, None).await.unwrap();

        assert_eq!(result.skills, vec![LevelEntry::new("Farming", 20, 100_000.0)]);
        assert_eq!(result.profile_name, "Apple");
        assert_eq!(result.purse, 10.0);
        assert_eq!(result.bank, 2_500.0);
    }

    #[tokio::test]
    async fn fallback_fills_missing_skills_only() {
        let stats = stats_source(
            summary(json!({})),
            Some(detail(json!({ "currencies": { "coin_purse": 750 } }))),
        );
        let mut aggregator = MockAggregatorPort::new();
        aggregator
            .expect_get_profiles()
            .withf(|name| name == "Notch")
            .times(1)
            .returning(|_| {
                let mut members = Map::new();
                members.insert("m".to_string(), json!({ "experience_skill_mining": 50 }));
                Ok(vec![AggregatorProfile {
                    cute_name: None,
                    selected: true,
                    members,
                }])
            });
        let fallback = Arc::new(FetchFallback::new(Arc::new(aggregator)));

        let result = use_case(stats, fallback)
            .execute(COMPACT, Some("Notch"))
            .await
            .unwrap();

        assert_eq!(result.skills, vec![LevelEntry::new("Mining", 2, 50.0)]);
        assert!(result.challenges.is_empty());
        assert_eq!(result.purse, 750.0);
        assert_eq!(result.bank, 2_500.0);
    }

    #[tokio::test]
    async fn fallback_not_called_without_display_name() {
        let stats = stats_source(summary(json!({})), Some(detail(json!({}))));

        let result = use_case(stats, no_fallback()).execute(UUID, Some("  ")).await.unwrap();
        assert!(result.skills.is_empty());
        assert!(result.challenges.is_empty());
    }

    #[tokio::test]
    async fn fallback_does_not_replace_present_lists() {
        let stats = stats_source(
            summary(json!({})),
            Some(detail(json!({ "slayer_bosses": { "wolf": { "xp": 250 } } }))),
        );
        let mut aggregator = MockAggregatorPort::new();
        aggregator.expect_get_profiles().times(1).returning(|_| {
            let mut members = Map::new();
            members.insert(
                "m".to_string(),
                json!({
                    "experience_skill_combat": 300,
                    "slayer_bosses": { "zombie": { "xp": 1000 } }
                }),
            );
            Ok(vec![AggregatorProfile {
                cute_name: None,
                selected: false,
                members,
            }])
        });
        let fallback = Arc::new(FetchFallback::new(Arc::new(aggregator)));

        let result = use_case(stats, fallback).execute(UUID, Some("Notch")).await.unwrap();

        assert_eq!(result.skills, vec![LevelEntry::new("Combat", 5, 300.0)]);
        assert_eq!(result.challenges, vec![LevelEntry::new("Wolf", 4, 250.0)]);
    }

    #[tokio::test]
    async fn rejected_profile_listing_is_unavailable() {
        let mut stats = MockGameStatsPort::new();
        stats
            .expect_list_profiles()
            .returning(|_| Err(UpstreamError::rejected("hypixel", Some("Invalid API key".into()))));
        stats.expect_get_profile().never();

        assert!(use_case(stats, no_fallback()).execute(UUID, None).await.is_none());
    }

    #[tokio::test]
    async fn missing_api_key_is_unavailable() {
        let mut stats = MockGameStatsPort::new();
        stats
            .expect_list_profiles()
            .returning(|_| Err(UpstreamError::MissingApiKey { source_name: "hypixel" }));

        assert!(use_case(stats, no_fallback()).execute(UUID, None).await.is_none());
    }

    #[tokio::test]
    async fn no_profiles_is_unavailable() {
        let mut stats = MockGameStatsPort::new();
        stats.expect_list_profiles().returning(|_| Ok(Vec::new()));
        stats.expect_get_profile().never();

        assert!(use_case(stats, no_fallback()).execute(UUID, None).await.is_none());
    }

    #[tokio::test]
    async fn malformed_id_makes_no_request() {
        let mut stats = MockGameStatsPort::new();
        stats.expect_list_profiles().never();

        assert!(use_case(stats, no_fallback()).execute("not-a-uuid", None).await.is_none());
    }

    #[tokio::test]
    async fn rejected_detail_falls_back_to_summary_member() {
        let mut stats = MockGameStatsPort::new();
        let summary = summary(json!({ "coin_purse": 500, "experience_skill_mining": 2000 }));
        stats
            .expect_list_profiles()
            .returning(move |_| Ok(vec![summary.clone()]));
        stats
            .expect_get_profile()
            .times(1)
            .returning(|_| Err(UpstreamError::rejected("hypixel", Some("Key throttle".into()))));

        let result = use_case(stats, no_fallback()).execute(UUID, None).await.unwrap();

        assert_eq!(result.purse, 500.0);
        assert_eq!(result.skills, vec![LevelEntry::new("Mining", 10, 2_000.0)]);
        assert_eq!(result.bank, 2_500.0);
    }

    #[tokio::test]
    async fn failed_detail_without_summary_data_yields_empty_record() {
        let mut stats = MockGameStatsPort::new();
        let summary = summary(json!({}));
        stats
            .expect_list_profiles()
            .returning(move |_| Ok(vec![summary.clone()]));
        stats
            .expect_get_profile()
            .returning(|_| Err(UpstreamError::Status { source_name: "hypixel", status: 503 }));

        let result = use_case(stats, no_fallback()).execute(UUID, None).await.unwrap();
        assert!(result.skills.is_empty());
        assert_eq!(result.purse, 0.0);
    }

    #[tokio::test]
    async fn selected_profile_is_used_and_summary_purse_backs_zero_detail_purse() {
        let mut stats = MockGameStatsPort::new();
        stats.expect_list_profiles().returning(|_| {
            let first = ProfileSummary {
                profile_id: "p0".to_string(),
                selected: false,
                ..ProfileSummary::default()
            };
            let mut second = summary(json!({ "coin_purse": 99 }));
            second.profile_id = "p1".to_string();
            second.cute_name = None;
            second.game_mode = Some("ironman".to_string());
            Ok(vec![first, second])
        });
        stats
            .expect_get_profile()
            .withf(|id| id == "p1")
            .returning(|_| Ok(Some(detail(json!({ "coin_purse": 0, "fairy_souls_collected": 7 })))));

        let result = use_case(stats, no_fallback()).execute(UUID, None).await.unwrap();

        assert_eq!(result.purse, 99.0);
        assert_eq!(result.profile_name, PlayerStats::UNKNOWN_PROFILE);
        assert_eq!(result.game_mode.as_deref(), Some("ironman"));
        assert_eq!(result.fairy_souls, Some(7));
    }

    #[tokio::test]
    async fn hyphenated_member_key_in_detail_is_found() {
        let mut stats = MockGameStatsPort::new();
        stats
            .expect_list_profiles()
            .returning(|_| Ok(vec![summary(json!({}))]));
        stats.expect_get_profile().returning(|_| {
            Ok(Some(ProfileDetail {
                profile_id: "p1".to_string(),
                members: members(
                    &UUID.to_uppercase(),
                    json!({
                        "dungeons": { "dungeons": { "dungeon_types": {
                            "catacombs": { "experience": 100000 }
                        } } }
                    }),
                ),
            }))
        });

        let result = use_case(stats, no_fallback()).execute(COMPACT, None).await.unwrap();
        assert_eq!(result.dungeon_level, Some(20));
    }

    #[tokio::test]
    async fn missing_detail_member_falls_back_to_summary_member() {
        let stats = stats_source(
            summary(json!({ "experience_skill_taming": 125 })),
            None,
        );

        let result = use_case(stats, no_fallback()).execute(UUID, None).await.unwrap();
        assert_eq!(result.skills, vec![LevelEntry::new("Taming", 3, 125.0)]);
    }
}
