//! Use cases - User story orchestration.
//!
//! Use cases compose the port traits into the operations the binary exposes.

pub mod stats;

pub use stats::StatsUseCases;
