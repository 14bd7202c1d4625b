//! Test Fixtures
//!
//! Backends, accounts and drafts shared by the scenario tests.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::core::backend::{
    AuthUser, ExperienceLevel, IdentityService, Interest, MemoryBackend, RemoteDataService,
};
use crate::core::onboarding::OnboardingDraft;
use crate::core::session::{AuthSnapshot, AuthStore, ProfileCache};

pub const PASSWORD: &str = "hunter22";

/// Seeded backend behind both service traits.
pub fn backend() -> Arc<MemoryBackend> {
    Arc::new(MemoryBackend::seeded())
}

/// Register (and sign in) a fresh account.
pub async fn signed_up(backend: &MemoryBackend, email: &str, name: &str) -> AuthUser {
    backend
        .sign_up(email, PASSWORD, name)
        .await
        .expect("sign up should succeed")
}

/// Auth store over `backend` with a small cache.
pub fn auth_store(backend: &Arc<MemoryBackend>) -> AuthStore {
    let identity: Arc<dyn IdentityService> = backend.clone();
    let data: Arc<dyn RemoteDataService> = backend.clone();
    AuthStore::start(identity, data, Arc::new(ProfileCache::new(8)))
}

/// Wait until the published snapshot satisfies `pred`, failing after 2s.
pub async fn wait_for(
    rx: &mut watch::Receiver<AuthSnapshot>,
    pred: impl Fn(&AuthSnapshot) -> bool,
) -> AuthSnapshot {
    let waited = tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            {
                let snapshot = rx.borrow_and_update();
                if pred(&snapshot) {
                    return snapshot.clone();
                }
            }
            rx.changed().await.expect("auth store stopped");
        }
    })
    .await;
    waited.expect("timed out waiting for auth snapshot")
}

/// Draft that passes every onboarding step.
pub fn complete_draft() -> OnboardingDraft {
    OnboardingDraft {
        nickname: "Ace".into(),
        college: "State University".into(),
        experience_level: Some(ExperienceLevel::Intermediate),
        interests: vec![Interest::Social, Interest::Fitness],
        bio: String::new(),
    }
}
