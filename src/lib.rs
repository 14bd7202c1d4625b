/// DareUp - Dare Challenges (TUI Edition)
///
/// Core library providing the stepped onboarding wizard, session gating,
/// dare creation and proof submission, and the leaderboard.

pub mod config;
pub mod core;
pub mod tui;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
