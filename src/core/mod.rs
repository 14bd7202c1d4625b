pub mod logging;

// Stepped wizard state machine + transition animation model
pub mod wizard;
pub mod gesture;

// Managed backend boundary (identity + document store)
pub mod backend;
pub mod session;

// Application operations
pub mod dares;
pub mod onboarding;
pub mod leaderboard;
