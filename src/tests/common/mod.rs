//! Common Test Utilities
//!
//! Shared fixtures used across the scenario and property modules.

pub mod fixtures;
