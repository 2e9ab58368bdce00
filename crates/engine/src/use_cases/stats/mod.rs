//! Player stats use cases.
//!
//! Handles:
//! - Building the canonical stats record for a player's active profile
//! - Looking up the player's account summary

mod error;
mod fallback;
mod get_player_account;
mod get_player_stats;
mod json_probe;
mod level_tables;
mod member;
mod reconcile;

use std::sync::Arc;

pub use error::StatsError;
pub use fallback::{FallbackLevels, FetchFallback};
pub use get_player_account::GetPlayerAccount;
pub use get_player_stats::GetPlayerStats;
pub use level_tables::{LevelTables, SkillTables};
pub use member::find_member;
pub use reconcile::{reconcile, FallbackNeed, Reconciled};

/// Container for stats use cases.
pub struct StatsUseCases {
    pub player_stats: Arc<GetPlayerStats>,
    pub player_account: Arc<GetPlayerAccount>,
    pub level_tables: Arc<LevelTables>,
}

impl StatsUseCases {
    pub fn new(
        player_stats: Arc<GetPlayerStats>,
        player_account: Arc<GetPlayerAccount>,
        level_tables: Arc<LevelTables>,
    ) -> Self {
        Self {
            player_stats,
            player_account,
            level_tables,
        }
    }
}
