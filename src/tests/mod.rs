//! Crate-level tests.
//!
//! - `common`: shared fixtures
//! - `mocks`: preconfigured mockall doubles for the data service
//! - `property`: proptest invariants of the wizard, slider and ranking
//! - `*_flow_tests`: end-to-end scenarios against the in-process backend

mod common;
mod mocks;
mod property;
