//! Entities produced by a single stats request.

mod player_account;
mod player_stats;

pub use player_account::PlayerAccount;
pub use player_stats::{non_negative, ChallengeLevel, LevelEntry, PlayerStats, SkillLevel};
