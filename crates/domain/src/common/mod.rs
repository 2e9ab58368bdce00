//! Common utility functions shared across the domain and engine crates.
//!
//! Pure functions only: no side effects, no I/O.

pub mod datetime;
pub mod string;

// Re-export commonly used functions for convenience
pub use datetime::from_epoch_millis;
pub use string::{
    canonical_skill_id, capitalize_first, none_if_empty, strip_prefix_ignore_case, title_case,
};
