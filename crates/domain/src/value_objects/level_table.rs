//! Cumulative experience thresholds and the level converter.

use serde::{Deserialize, Serialize};

/// Ordered cumulative-experience thresholds.
///
/// Index `i` holds the experience needed to reach level `i + 1`, so the
/// table length is the highest level it can express. An optional cap lowers
/// that ceiling (the generic skill table is longer than the skill cap).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceThresholdTable {
    thresholds: Vec<f64>,
    max_level: u32,
}

impl ExperienceThresholdTable {
    /// Build a table from thresholds in any order.
    ///
    /// Non-finite entries are dropped and the rest sorted ascending; the
    /// declared order of a remote source is never trusted.
    pub fn new(thresholds: impl IntoIterator<Item = f64>) -> Self {
        let mut thresholds: Vec<f64> = thresholds.into_iter().filter(|t| t.is_finite()).collect();
        thresholds.sort_by(f64::total_cmp);
        let max_level = u32::try_from(thresholds.len()).unwrap_or(u32::MAX);
        Self {
            thresholds,
            max_level,
        }
    }

    /// Lower the highest reportable level to `cap`.
    pub fn with_level_cap(mut self, cap: u32) -> Self {
        self.max_level = self.max_level.min(cap);
        self
    }

    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Highest level this table can report (never below 1).
    pub fn max_level(&self) -> u32 {
        self.max_level.max(1)
    }

    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }

    /// Level reached with `xp` cumulative experience.
    ///
    /// Scans from the top threshold down and reports the first one `xp`
    /// meets as `index + 1`, clamped to [`max_level`](Self::max_level).
    /// Experience below every threshold (or NaN) is level 1.
    pub fn level_for(&self, xp: f64) -> u32 {
        self.thresholds
            .iter()
            .rposition(|threshold| xp >= *threshold)
            .map(|index| u32::try_from(index + 1).unwrap_or(u32::MAX))
            .unwrap_or(1)
            .clamp(1, self.max_level())
    }
}

/// Free-function form of [`ExperienceThresholdTable::level_for`].
pub fn level_for(xp: f64, table: &ExperienceThresholdTable) -> u32 {
    table.level_for(xp)
}
