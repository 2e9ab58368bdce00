use std::sync::Arc;

use sbstats_domain::{PlayerAccount, PlayerUuid};

use crate::infrastructure::ports::GameStatsPort;

use super::error::StatsError;

/// Use case for the account summary (display name, rank, logins).
pub struct GetPlayerAccount {
    stats_source: Arc<dyn GameStatsPort>,
}

impl GetPlayerAccount {
    pub fn new(stats_source: Arc<dyn GameStatsPort>) -> Self {
        Self { stats_source }
    }

    /// Account for `uuid`, or `None` on any failure.
    pub async fn execute(&self, uuid: &str) -> Option<PlayerAccount> {
        match self.lookup(uuid).await {
            Ok(account) => Some(account),
            Err(e) => {
                e.log("player_account");
                None
            }
        }
    }

    async fn lookup(&self, raw_uuid: &str) -> Result<PlayerAccount, StatsError> {
        let uuid = PlayerUuid::parse(raw_uuid)
            .map_err(|_| StatsError::InvalidIdentity(raw_uuid.to_string()))?;

        self.stats_source
            .get_player(&uuid)
            .await?
            .ok_or_else(|| StatsError::not_found("player", &uuid))
    }
}
