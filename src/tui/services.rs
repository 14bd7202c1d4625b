use std::sync::Arc;

use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::core::backend::{IdentityService, MemoryBackend, RemoteDataService};
use crate::core::session::{AuthSnapshot, AuthStore, ProfileCache};

use super::events::{AppEvent, Notification, NotificationLevel};

/// Centralized handle to all backend services.
///
/// Created once at startup, then passed by reference to views. Views that
/// spawn work clone the `Arc`s they need into the task.
pub struct Services {
    pub identity: Arc<dyn IdentityService>,
    pub data: Arc<dyn RemoteDataService>,
    pub auth: AuthStore,
    pub config: AppConfig,
    pub event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl Services {
    /// Initialize services against the in-process backend.
    pub fn init(config: &AppConfig, event_tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        log::info!("Initializing services (data dir: {})", config.data_dir().display());

        let backend = Arc::new(MemoryBackend::seeded());
        let identity: Arc<dyn IdentityService> = backend.clone();
        let data: Arc<dyn RemoteDataService> = backend;

        Self::with_backends(config, identity, data, event_tx)
    }

    /// Wire services around existing backends. Must run inside a tokio
    /// runtime: it spawns the auth store and its forwarder.
    pub fn with_backends(
        config: &AppConfig,
        identity: Arc<dyn IdentityService>,
        data: Arc<dyn RemoteDataService>,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        let cache = Arc::new(ProfileCache::new(config.cache.profile_capacity));
        let auth = AuthStore::start(identity.clone(), data.clone(), cache);
        spawn_auth_forwarder(auth.subscribe(), event_tx.clone());

        Self {
            identity,
            data,
            auth,
            config: config.clone(),
            event_tx,
        }
    }

    /// Current auth snapshot.
    pub fn session(&self) -> AuthSnapshot {
        self.auth.snapshot()
    }

    /// Queue a notification for the overlay.
    pub fn notify(&self, message: impl Into<String>, level: NotificationLevel) {
        let _ = self
            .event_tx
            .send(AppEvent::Notification(Notification::new(message, level)));
    }
}

/// Forward every published auth snapshot into the event loop. Stops when
/// either side goes away.
fn spawn_auth_forwarder(
    mut rx: tokio::sync::watch::Receiver<AuthSnapshot>,
    tx: mpsc::UnboundedSender<AppEvent>,
) {
    tokio::spawn(async move {
        loop {
            let snapshot = rx.borrow_and_update().clone();
            if tx.send(AppEvent::AuthChanged(snapshot)).is_err() {
                break;
            }
            if rx.changed().await.is_err() {
                break;
            }
        }
        log::debug!("Auth forwarder stopped");
    });
}
