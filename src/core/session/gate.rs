//! Route gating on authentication state.

use serde::{Deserialize, Serialize};

use super::store::AuthSnapshot;

/// Screens of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Route {
    Auth,
    Onboarding,
    #[default]
    Dares,
    CreateDare,
    MyDares,
    Leaderboard,
    Profile,
}

impl Route {
    /// Screens reachable from the navigation bar.
    pub const NAV: [Route; 5] = [
        Route::Dares,
        Route::CreateDare,
        Route::MyDares,
        Route::Leaderboard,
        Route::Profile,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Route::Auth => "Sign In",
            Route::Onboarding => "Onboarding",
            Route::Dares => "Dares",
            Route::CreateDare => "Create",
            Route::MyDares => "My Dares",
            Route::Leaderboard => "Leaderboard",
            Route::Profile => "Profile",
        }
    }

    /// Gate applied before showing this route.
    pub fn gate(&self) -> AuthGate {
        match self {
            Route::Auth => AuthGate::open(),
            Route::Onboarding => AuthGate::signed_in(),
            Route::Dares | Route::Leaderboard => AuthGate::open(),
            Route::CreateDare | Route::MyDares | Route::Profile => AuthGate::with_profile(),
        }
    }
}

/// Outcome of evaluating a gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Auth state not resolved yet; show a placeholder.
    Loading,
    Allow,
    Redirect(Route),
}

/// Access requirements for a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuthGate {
    pub require_auth: bool,
    pub require_profile: bool,
}

impl AuthGate {
    pub fn open() -> Self {
        Self::default()
    }

    pub fn signed_in() -> Self {
        Self {
            require_auth: true,
            require_profile: false,
        }
    }

    pub fn with_profile() -> Self {
        Self {
            require_auth: true,
            require_profile: true,
        }
    }

    pub fn evaluate(&self, snapshot: &AuthSnapshot) -> GateDecision {
        if snapshot.loading {
            return GateDecision::Loading;
        }
        match &snapshot.user {
            None if self.require_auth || self.require_profile => GateDecision::Redirect(Route::Auth),
            Some(_) if self.require_profile && !snapshot.has_profile => {
                GateDecision::Redirect(Route::Onboarding)
            }
            _ => GateDecision::Allow,
        }
    }
}
