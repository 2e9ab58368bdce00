//! Hypixel public API client
//!
//! Implements the primary game-stats ports: account lookup, profile listing
//! and profile detail (all API-key authenticated), plus the unauthenticated
//! skill resource endpoint that publishes the official level tables.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use sbstats_domain::common::from_epoch_millis;
use sbstats_domain::{PlayerAccount, PlayerUuid, ProfileId};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::infrastructure::config::StatsConfig;
use crate::infrastructure::ports::{
    GameStatsPort, ProfileDetail, ProfileSummary, SkillTablePort, SkillThresholds, UpstreamError,
};

const SOURCE: &str = "hypixel";

/// Header carrying the API key on authenticated endpoints.
const API_KEY_HEADER: &str = "API-Key";

/// Client for the Hypixel public API
#[derive(Clone)]
pub struct HypixelClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HypixelClient {
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub fn from_config(config: &StatsConfig) -> Self {
        Self::new(
            &config.hypixel_base_url,
            config.hypixel_api_key.clone(),
            config.timeout,
        )
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// GET `path` and decode the JSON body.
    ///
    /// Non-success statuses are reported as `Rejected` when the body carries
    /// an envelope `cause`, otherwise as `Status`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        authenticated: bool,
    ) -> Result<T, UpstreamError> {
        let mut request = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .query(query);

        if authenticated {
            let key = self
                .api_key
                .as_deref()
                .ok_or(UpstreamError::MissingApiKey {
                    source_name: SOURCE,
                })?;
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| UpstreamError::request_failed(SOURCE, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| UpstreamError::request_failed(SOURCE, e))?;

        if !status.is_success() {
            let cause = serde_json::from_str::<FailureEnvelope>(&body)
                .ok()
                .and_then(|envelope| envelope.cause);
            return Err(match cause {
                Some(cause) => UpstreamError::rejected(SOURCE, Some(cause)),
                None => UpstreamError::Status {
                    source_name: SOURCE,
                    status: status.as_u16(),
                },
            });
        }

        serde_json::from_str(&body).map_err(|e| UpstreamError::invalid_response(SOURCE, e))
    }
}

#[async_trait]
impl GameStatsPort for HypixelClient {
    async fn get_player(&self, uuid: &PlayerUuid) -> Result<Option<PlayerAccount>, UpstreamError> {
        let envelope: PlayerEnvelope = self
            .get_json("/v2/player", &[("uuid", uuid.compact())], true)
            .await?;
        convert_player(envelope, uuid)
    }

    async fn list_profiles(&self, uuid: &PlayerUuid) -> Result<Vec<ProfileSummary>, UpstreamError> {
        let envelope: ProfilesEnvelope = self
            .get_json("/v2/skyblock/profiles", &[("uuid", uuid.hyphenated())], true)
            .await?;
        convert_profiles(envelope)
    }

    async fn get_profile(&self, profile_id: &str) -> Result<Option<ProfileDetail>, UpstreamError> {
        let envelope: ProfileEnvelope = self
            .get_json("/v2/skyblock/profile", &[("profile", profile_id)], true)
            .await?;
        convert_profile(envelope)
    }
}

#[async_trait]
impl SkillTablePort for HypixelClient {
    async fn fetch_skill_tables(&self) -> Result<SkillThresholds, UpstreamError> {
        let envelope: SkillsEnvelope = self
            .get_json("/v2/resources/skyblock/skills", &[], false)
            .await?;
        convert_skill_tables(envelope)
    }
}

fn convert_player(
    envelope: PlayerEnvelope,
    requested: &PlayerUuid,
) -> Result<Option<PlayerAccount>, UpstreamError> {
    if !envelope.success {
        return Err(UpstreamError::rejected(SOURCE, envelope.cause));
    }
    let Some(player) = envelope.player else {
        return Ok(None);
    };

    let uuid = player
        .uuid
        .as_deref()
        .and_then(|raw| PlayerUuid::parse(raw).ok())
        .unwrap_or_else(|| requested.clone());
    let rank = [player.rank, player.monthly_package_rank, player.new_package_rank]
        .into_iter()
        .flatten()
        .find(|rank| !rank.is_empty() && rank != "NONE");

    Ok(Some(PlayerAccount {
        uuid,
        display_name: player.displayname,
        rank,
        first_login: player.first_login.and_then(from_epoch_millis),
        last_login: player.last_login.and_then(from_epoch_millis),
    }))
}

fn convert_profiles(envelope: ProfilesEnvelope) -> Result<Vec<ProfileSummary>, UpstreamError> {
    if !envelope.success {
        return Err(UpstreamError::rejected(SOURCE, envelope.cause));
    }
    Ok(envelope
        .profiles
        .unwrap_or_default()
        .into_iter()
        .filter_map(|profile| {
            // A profile without an id cannot be fetched in detail.
            let profile_id = ProfileId::new(profile.profile_id?).ok()?;
            Some(ProfileSummary {
                profile_id: profile_id.into(),
                cute_name: profile.cute_name,
                selected: profile.selected.unwrap_or(false),
                game_mode: profile.game_mode,
                bank_balance: profile.banking.and_then(|b| b.balance),
                members: profile.members.unwrap_or_default(),
            })
        })
        .collect())
}

fn convert_profile(envelope: ProfileEnvelope) -> Result<Option<ProfileDetail>, UpstreamError> {
    if !envelope.success {
        return Err(UpstreamError::rejected(SOURCE, envelope.cause));
    }
    Ok(envelope.profile.and_then(|profile| {
        profile.members.map(|members| ProfileDetail {
            profile_id: profile.profile_id.unwrap_or_default(),
            members,
        })
    }))
}

/// Flatten the resource payload into per-skill thresholds in level order.
fn convert_skill_tables(envelope: SkillsEnvelope) -> Result<SkillThresholds, UpstreamError> {
    if !envelope.success {
        return Err(UpstreamError::rejected(SOURCE, envelope.cause));
    }
    let skills = envelope
        .skills
        .ok_or_else(|| UpstreamError::invalid_response(SOURCE, "skills resource has no skills"))?;

    let mut tables = HashMap::with_capacity(skills.len());
    for (skill_id, resource) in skills {
        let Some(mut levels) = resource.levels else {
            continue;
        };
        levels.sort_by_key(|l| l.level);
        let thresholds = levels
            .into_iter()
            .map(|l| l.total_exp_required.unwrap_or(0.0))
            .collect();
        tables.insert(skill_id.to_lowercase(), thresholds);
    }
    Ok(tables)
}

// =============================================================================
// Hypixel API types
// =============================================================================

#[derive(Debug, Deserialize)]
struct FailureEnvelope {
    cause: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlayerEnvelope {
    #[serde(default)]
    success: bool,
    cause: Option<String>,
    player: Option<PlayerDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerDto {
    uuid: Option<String>,
    displayname: Option<String>,
    rank: Option<String>,
    new_package_rank: Option<String>,
    monthly_package_rank: Option<String>,
    first_login: Option<f64>,
    last_login: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ProfilesEnvelope {
    #[serde(default)]
    success: bool,
    cause: Option<String>,
    profiles: Option<Vec<ProfileDto>>,
}

#[derive(Debug, Deserialize)]
struct ProfileEnvelope {
    #[serde(default)]
    success: bool,
    cause: Option<String>,
    profile: Option<ProfileDto>,
}

#[derive(Debug, Deserialize)]
struct ProfileDto {
    profile_id: Option<String>,
    cute_name: Option<String>,
    selected: Option<bool>,
    game_mode: Option<String>,
    banking: Option<BankingDto>,
    members: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct BankingDto {
    balance: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct SkillsEnvelope {
    #[serde(default)]
    success: bool,
    cause: Option<String>,
    skills: Option<HashMap<String, SkillResourceDto>>,
}

#[derive(Debug, Deserialize)]
struct SkillResourceDto {
    levels: Option<Vec<SkillLevelDto>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SkillLevelDto {
    level: u32,
    total_exp_required: Option<f64>,
}
