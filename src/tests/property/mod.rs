//! Property-based tests
//!
//! Invariants that should hold for every input, checked with proptest.
//!
//! - `wizard_props`: the stepped wizard state machine
//!   - `1 <= current_step <= total_steps + 1` after any operation sequence
//!   - direction matches the last applied move
//!   - the completion hook fires at most once, and only from the last step
//!   - the transition height settles on the target
//!
//! - `slider_props`: slide-to-accept
//!   - the knob never leaves `[0, max_travel]`
//!   - the accept notification is delivered exactly once
//!
//! - `leaderboard_props`: ranking
//!   - ranks are dense and 1-based
//!   - entries are sorted by score, then dare count
//!
//! Case count follows `PROPTEST_CASES` (default 256).

mod leaderboard_props;
mod slider_props;
mod wizard_props;
