//! Service plumbing shared by Toolhub binaries: config loading, health probes,
//! request-id middleware, tracing setup and serde helpers.

pub mod config;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
