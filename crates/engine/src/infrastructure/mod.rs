//! Infrastructure implementations.
//!
//! Contains port trait implementations for the upstream HTTP sources, the
//! populate-once table cache and environment configuration.

pub mod cache;
pub mod config;
pub mod hypixel;
pub mod ports;
pub mod skycrypt;
