//! External service port traits (primary stats source, threshold tables, aggregator).

use std::collections::HashMap;

use async_trait::async_trait;
use sbstats_domain::{PlayerAccount, PlayerUuid};
use serde_json::{Map, Value};

use super::error::UpstreamError;

// =============================================================================
// Primary Source Types
// =============================================================================

/// One entry of the account's profile listing.
///
/// Member records are kept as raw JSON: their schema differs between
/// upstream generations and is interpreted by the reconciler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileSummary {
    pub profile_id: String,
    pub cute_name: Option<String>,
    pub selected: bool,
    pub game_mode: Option<String>,
    pub bank_balance: Option<f64>,
    pub members: Map<String, Value>,
}

/// Full profile record from the detail endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileDetail {
    pub profile_id: String,
    pub members: Map<String, Value>,
}

/// Raw per-skill thresholds keyed by lower-cased skill id, in level order.
pub type SkillThresholds = HashMap<String, Vec<f64>>;

// =============================================================================
// Aggregator Types
// =============================================================================

/// A profile as reported by the community aggregator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregatorProfile {
    pub cute_name: Option<String>,
    pub selected: bool,
    pub members: Map<String, Value>,
}

// =============================================================================
// Ports
// =============================================================================

/// Authenticated read endpoints of the primary game-stats source.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GameStatsPort: Send + Sync {
    /// Account lookup. `Ok(None)` when the source reports no such player.
    async fn get_player(&self, uuid: &PlayerUuid) -> Result<Option<PlayerAccount>, UpstreamError>;

    /// Profile summaries for an account. Summaries never carry skill data.
    async fn list_profiles(&self, uuid: &PlayerUuid) -> Result<Vec<ProfileSummary>, UpstreamError>;

    /// Detailed profile record. `Ok(None)` when the payload has no members.
    async fn get_profile(&self, profile_id: &str) -> Result<Option<ProfileDetail>, UpstreamError>;
}

/// Unauthenticated experience-threshold reference endpoint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SkillTablePort: Send + Sync {
    /// Fetch every per-skill table in one call; any parse failure fails the whole fetch.
    async fn fetch_skill_tables(&self) -> Result<SkillThresholds, UpstreamError>;
}

/// Community aggregator keyed by display name.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AggregatorPort: Send + Sync {
    async fn get_profiles(&self, display_name: &str) -> Result<Vec<AggregatorProfile>, UpstreamError>;
}
