//! Port traits for infrastructure boundaries.
//!
//! These are the only abstractions in the engine. Everything else is
//! concrete types. Ports exist for:
//! - The primary game-stats API (account, profile list, profile detail)
//! - The experience-threshold reference endpoint
//! - The community aggregator used as a fallback source

mod error;
mod external;

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::{
    AggregatorPort, AggregatorProfile, GameStatsPort, ProfileDetail, ProfileSummary,
    SkillTablePort, SkillThresholds,
};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use external::{MockAggregatorPort, MockGameStatsPort, MockSkillTablePort};

// =============================================================================
// Error Types
// =============================================================================
pub use error::UpstreamError;
