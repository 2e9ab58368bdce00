//! SkyBlock stats engine library.
//!
//! Fetches a player's SkyBlock profile data from the upstream sources and
//! reconciles it into the canonical [`sbstats_domain::PlayerStats`] record.
//!
//! ## Structure
//!
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `use_cases/` - Stats orchestration over the ports
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
