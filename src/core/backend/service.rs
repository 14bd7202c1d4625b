//! Service boundaries to the managed backend.
//!
//! The application treats authentication and document storage as black-box
//! collaborators. Both are async traits so that a hosted backend and the
//! in-process [`MemoryBackend`](super::MemoryBackend) are interchangeable.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::watch;

use super::error::{AuthError, DataError};
use super::models::{
    AuthUser, Dare, DareQuery, NewDare, NewProof, OnboardingProfile, Proof, UserProfile,
};

/// Sign-in, sign-up and session-state notifications.
#[async_trait]
pub trait IdentityService: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AuthError>;

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<AuthUser, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    fn current_user(&self) -> Option<AuthUser>;

    /// Session-state changes. The receiver always holds the latest user;
    /// dropping it unsubscribes.
    fn subscribe(&self) -> watch::Receiver<Option<AuthUser>>;
}

/// Create/read/update/delete over user, dare and proof records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteDataService: Send + Sync {
    async fn get_profile(&self, uid: &str) -> Result<Option<UserProfile>, DataError>;

    async fn profile_exists(&self, uid: &str) -> Result<bool, DataError>;

    async fn put_profile(&self, profile: UserProfile) -> Result<(), DataError>;

    /// Write onboarding answers and mark onboarding complete, creating the
    /// profile document if it does not exist yet.
    async fn complete_onboarding(
        &self,
        user: &AuthUser,
        profile: OnboardingProfile,
    ) -> Result<(), DataError>;

    async fn list_profiles(&self) -> Result<Vec<UserProfile>, DataError>;

    /// Add `coins` to the user's balance and bump `dares_completed`.
    async fn record_completion(&self, uid: &str, coins: u64) -> Result<(), DataError>;

    async fn create_dare(&self, dare: NewDare) -> Result<Dare, DataError>;

    async fn get_dare(&self, id: &str) -> Result<Option<Dare>, DataError>;

    /// Dares matching `query`, newest first.
    async fn list_dares(&self, query: DareQuery) -> Result<Vec<Dare>, DataError>;

    async fn delete_dare(&self, id: &str) -> Result<(), DataError>;

    async fn increment_dare_participants(&self, id: &str) -> Result<(), DataError>;

    async fn increment_dare_completions(&self, id: &str) -> Result<(), DataError>;

    async fn add_proof(&self, proof: NewProof) -> Result<Proof, DataError>;

    /// Proofs created at or after `since` (all when `None`), newest first.
    async fn list_proofs(&self, since: Option<DateTime<Utc>>) -> Result<Vec<Proof>, DataError>;
}
