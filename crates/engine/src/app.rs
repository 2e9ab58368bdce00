//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    cache::OnceCache,
    config::StatsConfig,
    hypixel::HypixelClient,
    ports::{AggregatorPort, GameStatsPort, SkillTablePort},
    skycrypt::SkyCryptClient,
};
use crate::use_cases::stats::{
    FetchFallback, GetPlayerAccount, GetPlayerStats, LevelTables, SkillTables,
};
use crate::use_cases::StatsUseCases;

/// Main application state.
///
/// Holds the upstream ports and the use cases built on them.
pub struct App {
    pub ports: Ports,
    pub use_cases: UseCases,
}

/// Upstream ports, injected as trait objects.
pub struct Ports {
    pub stats_source: Arc<dyn GameStatsPort>,
    pub skill_tables: Arc<dyn SkillTablePort>,
    pub aggregator: Arc<dyn AggregatorPort>,
}

/// Container for all use cases.
pub struct UseCases {
    pub stats: StatsUseCases,
}

impl App {
    /// Create an App talking to the configured upstream sources.
    pub fn new(config: &StatsConfig) -> Self {
        let hypixel = Arc::new(HypixelClient::from_config(config));
        if !hypixel.has_api_key() {
            tracing::warn!("HYPIXEL_API_KEY not set, player lookups will be unavailable");
        }
        let skycrypt = Arc::new(SkyCryptClient::from_config(config));

        Self::from_ports(
            Ports {
                stats_source: hypixel.clone(),
                skill_tables: hypixel,
                aggregator: skycrypt,
            },
            Arc::new(OnceCache::new()),
        )
    }

    /// Create an App from explicit ports and a level table cache.
    ///
    /// Pass [`OnceCache::preloaded`] to pin the tables without a fetch.
    pub fn from_ports(ports: Ports, table_cache: Arc<OnceCache<SkillTables>>) -> Self {
        let level_tables = Arc::new(LevelTables::new(ports.skill_tables.clone(), table_cache));
        let fallback = Arc::new(FetchFallback::new(ports.aggregator.clone()));

        let player_stats = Arc::new(GetPlayerStats::new(
            ports.stats_source.clone(),
            level_tables.clone(),
            fallback,
        ));
        let player_account = Arc::new(GetPlayerAccount::new(ports.stats_source.clone()));

        let use_cases = UseCases {
            stats: StatsUseCases::new(player_stats, player_account, level_tables),
        };

        Self { ports, use_cases }
    }
}
