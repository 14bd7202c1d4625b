//! Observable authentication state.
//!
//! A single writer task follows the identity service's session channel,
//! resolves whether the signed-in user has a profile (through the
//! [`ProfileCache`]) and publishes [`AuthSnapshot`]s on a `watch` channel.
//! Readers subscribe and drop their receiver to unsubscribe.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use super::cache::ProfileCache;
use crate::core::backend::{AuthUser, IdentityService, RemoteDataService};

/// Published authentication state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSnapshot {
    pub user: Option<AuthUser>,
    /// True until the first resolution, and while a profile lookup runs.
    pub loading: bool,
    pub has_profile: bool,
}

impl AuthSnapshot {
    pub fn initial() -> Self {
        Self {
            user: None,
            loading: true,
            has_profile: false,
        }
    }

    pub fn uid(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.uid.as_str())
    }
}

impl Default for AuthSnapshot {
    fn default() -> Self {
        Self::initial()
    }
}

#[derive(Debug)]
enum Command {
    /// Re-check the current user's profile, bypassing the cache.
    Refresh,
}

/// Handle to the auth writer task.
pub struct AuthStore {
    state: watch::Receiver<AuthSnapshot>,
    cache: Arc<ProfileCache>,
    commands: mpsc::UnboundedSender<Command>,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl AuthStore {
    /// Spawn the writer task. Must be called from within a tokio runtime.
    pub fn start(
        identity: Arc<dyn IdentityService>,
        data: Arc<dyn RemoteDataService>,
        cache: Arc<ProfileCache>,
    ) -> Self {
        let (state_tx, state_rx) = watch::channel(AuthSnapshot::initial());
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let writer = Writer {
            data,
            cache: cache.clone(),
            state: state_tx,
            last_uid: None,
        };
        let task = tokio::spawn(writer.run(identity.subscribe(), cmd_rx, shutdown_rx));

        Self {
            state: state_rx,
            cache,
            commands: cmd_tx,
            shutdown: Some(shutdown_tx),
            task: Some(task),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthSnapshot> {
        self.state.clone()
    }

    pub fn snapshot(&self) -> AuthSnapshot {
        self.state.borrow().clone()
    }

    pub fn cache(&self) -> &Arc<ProfileCache> {
        &self.cache
    }

    /// Ask the writer to re-resolve the current user's profile, e.g. after
    /// onboarding wrote it.
    pub fn refresh_profile(&self) {
        if self.commands.send(Command::Refresh).is_err() {
            log::warn!("Auth store is not running; refresh dropped");
        }
    }

    /// Stop the writer task and wait for it to exit.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                log::warn!("Auth store task ended abnormally: {e}");
            }
        }
    }
}

impl Drop for AuthStore {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

struct Writer {
    data: Arc<dyn RemoteDataService>,
    cache: Arc<ProfileCache>,
    state: watch::Sender<AuthSnapshot>,
    last_uid: Option<String>,
}

impl Writer {
    async fn run(
        mut self,
        mut session: watch::Receiver<Option<AuthUser>>,
        mut commands: mpsc::UnboundedReceiver<Command>,
        mut shutdown: oneshot::Receiver<()>,
    ) {
        let user = session.borrow_and_update().clone();
        self.resolve(user).await;

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                changed = session.changed() => {
                    if changed.is_err() {
                        log::debug!("Identity service dropped its session channel");
                        break;
                    }
                    let user = session.borrow_and_update().clone();
                    self.resolve(user).await;
                }
                Some(command) = commands.recv() => match command {
                    Command::Refresh => {
                        if let Some(uid) = self.last_uid.clone() {
                            self.cache.invalidate(&uid).await;
                        }
                        let user = session.borrow().clone();
                        self.resolve(user).await;
                    }
                },
            }
        }
        log::debug!("Auth store writer stopped");
    }

    async fn resolve(&mut self, user: Option<AuthUser>) {
        let uid = user.as_ref().map(|u| u.uid.clone());
        if uid != self.last_uid {
            self.cache.clear().await;
            self.last_uid = uid;
        }

        let Some(user) = user else {
            self.publish(AuthSnapshot {
                user: None,
                loading: false,
                has_profile: false,
            });
            return;
        };

        if let Some(has_profile) = self.cache.get(&user.uid).await {
            self.publish(AuthSnapshot {
                user: Some(user),
                loading: false,
                has_profile,
            });
            return;
        }

        self.publish(AuthSnapshot {
            user: Some(user.clone()),
            loading: true,
            has_profile: false,
        });

        let has_profile = match self.data.profile_exists(&user.uid).await {
            Ok(exists) => {
                self.cache.put(&user.uid, exists).await;
                exists
            }
            Err(e) => {
                log::warn!("Profile lookup failed for uid={}: {e}", user.uid);
                false
            }
        };

        self.publish(AuthSnapshot {
            user: Some(user),
            loading: false,
            has_profile,
        });
    }

    fn publish(&self, snapshot: AuthSnapshot) {
        self.state.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::backend::{MemoryBackend, MockRemoteDataService, OnboardingProfile, DataError, ExperienceLevel, Interest};

    fn onboarding() -> OnboardingProfile {
        OnboardingProfile {
            name: "Ace".into(),
            college: "MIT".into(),
            experience_level: ExperienceLevel::Advanced,
            interests: vec![Interest::Extreme],
            bio: String::new(),
        }
    }

    async fn settled(rx: &mut watch::Receiver<AuthSnapshot>) -> AuthSnapshot {
        rx.wait_for(|s| !s.loading).await.unwrap().clone()
    }

    #[tokio::test]
    async fn test_starts_loading_then_signed_out() {
        let backend = Arc::new(MemoryBackend::new());
        let store = AuthStore::start(backend.clone(), backend, Arc::new(ProfileCache::default()));
        let mut rx = store.subscribe();
        let snap = settled(&mut rx).await;
        assert!(snap.user.is_none());
        assert!(!snap.has_profile);
        store.shutdown().await;
    }

    #[tokio::test]
    async fn test_sign_up_without_profile_then_refresh_after_onboarding() {
        let backend = Arc::new(MemoryBackend::new());
        let store = AuthStore::start(backend.clone(), backend.clone(), Arc::new(ProfileCache::default()));
        let mut rx = store.subscribe();
        settled(&mut rx).await;

        let user = backend.sign_up("a@b.co", "secret1", "Ace").await.unwrap();
        let snap = rx
            .wait_for(|s| s.user.is_some() && !s.loading)
            .await
            .unwrap()
            .clone();
        assert!(!snap.has_profile);

        backend.complete_onboarding(&user, onboarding()).await.unwrap();
        store.refresh_profile();
        let snap = rx.wait_for(|s| s.has_profile).await.unwrap().clone();
        assert_eq!(snap.uid(), Some(user.uid.as_str()));
        store.shutdown().await;
    }

    #[tokio::test]
    async fn test_sign_out_clears_cache() {
        let backend = Arc::new(MemoryBackend::new());
        let cache = Arc::new(ProfileCache::default());
        let store = AuthStore::start(backend.clone(), backend.clone(), cache.clone());
        let mut rx = store.subscribe();

        let user = backend.sign_up("a@b.co", "secret1", "Ace").await.unwrap();
        rx.wait_for(|s| s.user.is_some() && !s.loading).await.unwrap();
        assert_eq!(cache.stats().await.current_size, 1);

        backend.sign_out().await.unwrap();
        rx.wait_for(|s| s.user.is_none()).await.unwrap();
        assert_eq!(cache.stats().await.current_size, 0);
        assert!(cache.get(&user.uid).await.is_none());
        store.shutdown().await;
    }

    #[tokio::test]
    async fn test_lookup_failure_publishes_no_profile() {
        let identity = Arc::new(MemoryBackend::new());
        let mut data = MockRemoteDataService::new();
        data.expect_profile_exists()
            .returning(|_| Err(DataError::Backend("offline".into())));

        let store = AuthStore::start(identity.clone(), Arc::new(data), Arc::new(ProfileCache::default()));
        let mut rx = store.subscribe();
        identity.sign_up("a@b.co", "secret1", "Ace").await.unwrap();

        let snap = rx
            .wait_for(|s| s.user.is_some() && !s.loading)
            .await
            .unwrap()
            .clone();
        assert!(!snap.has_profile);
        // Failures are not cached.
        assert_eq!(store.cache().stats().await.current_size, 0);
        store.shutdown().await;
    }
}
