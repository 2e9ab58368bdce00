//! SkyBlock stats domain.
//!
//! Pure value types shared by the engine: player identity, experience
//! threshold tables, the static SkyBlock constants and the canonical stats
//! record. Nothing here performs I/O.

extern crate self as sbstats_domain;

pub mod common;
pub mod entities;
pub mod error;
pub mod game_systems;
pub mod ids;
pub mod value_objects;

pub use entities::{
    non_negative, ChallengeLevel, LevelEntry, PlayerAccount, PlayerStats, SkillLevel,
};
pub use error::DomainError;
pub use ids::{PlayerUuid, ProfileId};
pub use value_objects::{level_for, ExperienceThresholdTable};
