//! Session auth types shared across Toolhub crates.
//!
//! Provides session JWT issue/validation, cookie builders, and the `Session` extractor.

pub mod cookie;
pub mod session;
pub mod token;
