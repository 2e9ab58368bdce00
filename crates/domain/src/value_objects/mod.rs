//! Value objects - Immutable objects defined by their attributes

mod level_table;

// Experience thresholds and the level converter
pub use level_table::{level_for, ExperienceThresholdTable};
