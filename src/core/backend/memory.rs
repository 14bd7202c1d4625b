//! In-process backend implementing both [`IdentityService`] and
//! [`RemoteDataService`].
//!
//! Records live in `tokio::sync::RwLock` maps for the lifetime of the
//! process. Passwords are stored as argon2 PHC strings. A small catalogue of
//! approved dares is seeded so a fresh session has something to browse.

use std::collections::HashMap;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::{watch, RwLock};

use super::error::{AuthError, DataError};
use super::models::{
    AuthUser, Dare, DareCategory, DareQuery, Difficulty, NewDare, NewProof, OnboardingProfile,
    Proof, ReviewStatus, TimeLimit, UserProfile,
};
use super::service::{IdentityService, RemoteDataService};

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Creator id used for the seeded catalogue.
const CATALOGUE_AUTHOR: &str = "dareup";

#[derive(Debug, Clone)]
struct Account {
    user: AuthUser,
    password_hash: String,
}

/// Volatile backend for the terminal app and tests.
pub struct MemoryBackend {
    accounts: RwLock<HashMap<String, Account>>,
    session: watch::Sender<Option<AuthUser>>,
    profiles: RwLock<HashMap<String, UserProfile>>,
    dares: RwLock<HashMap<String, Dare>>,
    proofs: RwLock<Vec<Proof>>,
}

impl MemoryBackend {
    /// Empty backend.
    pub fn new() -> Self {
        let (session, _) = watch::channel(None);
        Self {
            accounts: RwLock::new(HashMap::new()),
            session,
            profiles: RwLock::new(HashMap::new()),
            dares: RwLock::new(HashMap::new()),
            proofs: RwLock::new(Vec::new()),
        }
    }

    /// Backend pre-populated with the approved dare catalogue.
    pub fn seeded() -> Self {
        let mut backend = Self::new();
        let now = Utc::now();
        let catalogue = [
            ("Dance in Public", "Dance for 30 seconds in a busy public area", DareCategory::Social, Difficulty::Medium),
            ("Talk to 5 Strangers", "Start a genuine conversation with five people you have never met", DareCategory::Social, Difficulty::Medium),
            ("Sing Karaoke Solo", "Perform a full song solo at a karaoke night", DareCategory::Fun, Difficulty::Hard),
            ("Random Act of Kindness", "Do something kind for a stranger without being asked", DareCategory::Social, Difficulty::Easy),
            ("Learn a Magic Trick", "Learn a card trick and perform it for three friends", DareCategory::Creative, Difficulty::Medium),
            ("Cold Shower Week", "Take only cold showers for seven days straight", DareCategory::Extreme, Difficulty::Hard),
            ("Sketch a Stranger", "Ask someone if you can sketch them, then gift them the drawing", DareCategory::Creative, Difficulty::Easy),
            ("Midnight Hike", "Hike to a viewpoint and watch the sunrise", DareCategory::Extreme, Difficulty::Extreme),
        ];

        let dares = catalogue
            .into_iter()
            .enumerate()
            .map(|(i, (title, description, category, difficulty))| {
                let created_at = now - Duration::hours(i as i64 * 6);
                Dare {
                    id: uuid::Uuid::new_v4().to_string(),
                    title: title.to_string(),
                    description: description.to_string(),
                    category,
                    difficulty,
                    coins: difficulty.coins(),
                    time_limit: TimeLimit::Hours24,
                    requirements: String::new(),
                    created_by: CATALOGUE_AUTHOR.to_string(),
                    created_by_name: "DareUp".to_string(),
                    status: ReviewStatus::Approved,
                    participants: 0,
                    completions: 0,
                    created_at,
                    updated_at: created_at,
                }
            })
            .map(|dare| (dare.id.clone(), dare))
            .collect();

        backend.dares = RwLock::new(dares);
        backend
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn validate_email(email: &str) -> Result<(), AuthError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(AuthError::InvalidEmail(email.to_string()))
    }
}

fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::encode_b64(&rand::random::<[u8; 16]>())
        .map_err(|e| AuthError::Backend(e.to_string()))?;
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Backend(e.to_string()))
}

fn verify_password(password: &str, phc: &str) -> bool {
    PasswordHash::new(phc)
        .map(|hash| {
            Argon2::default()
                .verify_password(password.as_bytes(), &hash)
                .is_ok()
        })
        .unwrap_or(false)
}

// ============================================================================
// IdentityService
// ============================================================================

#[async_trait]
impl IdentityService for MemoryBackend {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        let key = normalize_email(email);
        let account = self
            .accounts
            .read()
            .await
            .get(&key)
            .cloned()
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &account.password_hash) {
            log::info!("Rejected sign-in for {key}");
            return Err(AuthError::InvalidCredentials);
        }

        log::info!("Signed in uid={}", account.user.uid);
        self.session.send_replace(Some(account.user.clone()));
        Ok(account.user)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<AuthUser, AuthError> {
        let key = normalize_email(email);
        validate_email(&key)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword {
                min: MIN_PASSWORD_LEN,
            });
        }

        let password_hash = hash_password(password)?;
        let user = AuthUser {
            uid: uuid::Uuid::new_v4().to_string(),
            email: key.clone(),
            display_name: Some(display_name.trim().to_string()).filter(|n| !n.is_empty()),
        };

        {
            let mut accounts = self.accounts.write().await;
            if accounts.contains_key(&key) {
                return Err(AuthError::EmailInUse(key));
            }
            accounts.insert(
                key,
                Account {
                    user: user.clone(),
                    password_hash,
                },
            );
        }

        log::info!("Registered uid={}", user.uid);
        self.session.send_replace(Some(user.clone()));
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        if self.session.borrow().is_none() {
            return Err(AuthError::NotSignedIn);
        }
        self.session.send_replace(None);
        log::info!("Signed out");
        Ok(())
    }

    fn current_user(&self) -> Option<AuthUser> {
        self.session.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Option<AuthUser>> {
        self.session.subscribe()
    }
}

// ============================================================================
// RemoteDataService
// ============================================================================

#[async_trait]
impl RemoteDataService for MemoryBackend {
    async fn get_profile(&self, uid: &str) -> Result<Option<UserProfile>, DataError> {
        Ok(self.profiles.read().await.get(uid).cloned())
    }

    async fn profile_exists(&self, uid: &str) -> Result<bool, DataError> {
        Ok(self.profiles.read().await.contains_key(uid))
    }

    async fn put_profile(&self, profile: UserProfile) -> Result<(), DataError> {
        self.profiles
            .write()
            .await
            .insert(profile.uid.clone(), profile);
        Ok(())
    }

    async fn complete_onboarding(
        &self,
        user: &AuthUser,
        onboarding: OnboardingProfile,
    ) -> Result<(), DataError> {
        let mut profiles = self.profiles.write().await;
        let profile = profiles
            .entry(user.uid.clone())
            .or_insert_with(|| UserProfile::new_for(user));
        profile.name = onboarding.name;
        profile.college = onboarding.college;
        profile.experience_level = Some(onboarding.experience_level);
        profile.interests = onboarding.interests;
        profile.bio = onboarding.bio;
        profile.onboarding_completed = true;
        profile.updated_at = Utc::now();
        Ok(())
    }

    async fn list_profiles(&self) -> Result<Vec<UserProfile>, DataError> {
        Ok(self.profiles.read().await.values().cloned().collect())
    }

    async fn record_completion(&self, uid: &str, coins: u64) -> Result<(), DataError> {
        let mut profiles = self.profiles.write().await;
        let profile = profiles
            .get_mut(uid)
            .ok_or_else(|| DataError::not_found(format!("users/{uid}")))?;
        profile.stats.dares_completed += 1;
        profile.stats.coins += coins;
        profile.updated_at = Utc::now();
        Ok(())
    }

    async fn create_dare(&self, new: NewDare) -> Result<Dare, DataError> {
        let now = Utc::now();
        let dare = Dare {
            id: uuid::Uuid::new_v4().to_string(),
            coins: new.difficulty.coins(),
            title: new.title,
            description: new.description,
            category: new.category,
            difficulty: new.difficulty,
            time_limit: new.time_limit,
            requirements: new.requirements,
            created_by: new.created_by,
            created_by_name: new.created_by_name,
            status: ReviewStatus::Pending,
            participants: 0,
            completions: 0,
            created_at: now,
            updated_at: now,
        };
        self.dares
            .write()
            .await
            .insert(dare.id.clone(), dare.clone());
        Ok(dare)
    }

    async fn get_dare(&self, id: &str) -> Result<Option<Dare>, DataError> {
        Ok(self.dares.read().await.get(id).cloned())
    }

    async fn list_dares(&self, query: DareQuery) -> Result<Vec<Dare>, DataError> {
        let mut dares: Vec<Dare> = self
            .dares
            .read()
            .await
            .values()
            .filter(|d| query.created_by.as_deref().map_or(true, |c| d.created_by == c))
            .filter(|d| query.status.map_or(true, |s| d.status == s))
            .cloned()
            .collect();
        dares.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(dares)
    }

    async fn delete_dare(&self, id: &str) -> Result<(), DataError> {
        self.dares
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| DataError::not_found(format!("dares/{id}")))
    }

    async fn increment_dare_participants(&self, id: &str) -> Result<(), DataError> {
        let mut dares = self.dares.write().await;
        let dare = dares
            .get_mut(id)
            .ok_or_else(|| DataError::not_found(format!("dares/{id}")))?;
        dare.participants += 1;
        dare.updated_at = Utc::now();
        Ok(())
    }

    async fn increment_dare_completions(&self, id: &str) -> Result<(), DataError> {
        let mut dares = self.dares.write().await;
        let dare = dares
            .get_mut(id)
            .ok_or_else(|| DataError::not_found(format!("dares/{id}")))?;
        dare.completions += 1;
        dare.updated_at = Utc::now();
        Ok(())
    }

    async fn add_proof(&self, new: NewProof) -> Result<Proof, DataError> {
        let proof = Proof {
            id: uuid::Uuid::new_v4().to_string(),
            dare_id: new.dare_id,
            user_id: new.user_id,
            description: new.description,
            file_name: new.file_name,
            file_type: new.file_type,
            file_size: new.file_size,
            status: ReviewStatus::Pending,
            created_at: Utc::now(),
        };
        self.proofs.write().await.push(proof.clone());
        Ok(proof)
    }

    async fn list_proofs(&self, since: Option<DateTime<Utc>>) -> Result<Vec<Proof>, DataError> {
        let mut proofs: Vec<Proof> = self
            .proofs
            .read()
            .await
            .iter()
            .filter(|p| since.map_or(true, |s| p.created_at >= s))
            .cloned()
            .collect();
        proofs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(proofs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::backend::models::{ExperienceLevel, Interest};

    #[tokio::test]
    async fn test_sign_up_then_sign_in() {
        let backend = MemoryBackend::new();
        let user = backend
            .sign_up("Priya@Example.com", "secret1", "Priya")
            .await
            .unwrap();
        assert_eq!(user.email, "priya@example.com");
        assert_eq!(backend.current_user(), Some(user.clone()));

        backend.sign_out().await.unwrap();
        assert!(backend.current_user().is_none());

        let again = backend.sign_in("priya@example.com", "secret1").await.unwrap();
        assert_eq!(again.uid, user.uid);
    }

    #[tokio::test]
    async fn test_sign_up_validation() {
        let backend = MemoryBackend::new();
        assert!(matches!(
            backend.sign_up("not-an-email", "secret1", "x").await,
            Err(AuthError::InvalidEmail(_))
        ));
        assert_eq!(
            backend.sign_up("a@b.co", "123", "x").await,
            Err(AuthError::WeakPassword { min: MIN_PASSWORD_LEN })
        );
        backend.sign_up("a@b.co", "secret1", "x").await.unwrap();
        assert!(matches!(
            backend.sign_up("A@b.co", "secret2", "y").await,
            Err(AuthError::EmailInUse(_))
        ));
    }

    #[tokio::test]
    async fn test_sign_in_wrong_password() {
        let backend = MemoryBackend::new();
        backend.sign_up("a@b.co", "secret1", "x").await.unwrap();
        backend.sign_out().await.unwrap();
        assert_eq!(
            backend.sign_in("a@b.co", "wrong-pass").await,
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(
            backend.sign_in("nobody@b.co", "secret1").await,
            Err(AuthError::InvalidCredentials)
        );
    }

    #[tokio::test]
    async fn test_subscribe_sees_session_changes() {
        let backend = MemoryBackend::new();
        let mut rx = backend.subscribe();
        assert!(rx.borrow().is_none());
        backend.sign_up("a@b.co", "secret1", "x").await.unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_some());
    }

    #[tokio::test]
    async fn test_complete_onboarding_creates_profile() {
        let backend = MemoryBackend::new();
        let user = backend.sign_up("a@b.co", "secret1", "x").await.unwrap();
        assert!(!backend.profile_exists(&user.uid).await.unwrap());

        backend
            .complete_onboarding(
                &user,
                OnboardingProfile {
                    name: "Ace".into(),
                    college: "IIT".into(),
                    experience_level: ExperienceLevel::Beginner,
                    interests: vec![Interest::Fun],
                    bio: "hi".into(),
                },
            )
            .await
            .unwrap();

        let profile = backend.get_profile(&user.uid).await.unwrap().unwrap();
        assert!(profile.onboarding_completed);
        assert_eq!(profile.name, "Ace");
        assert_eq!(profile.email, "a@b.co");
    }

    #[tokio::test]
    async fn test_seeded_catalogue_is_approved_and_sorted() {
        let backend = MemoryBackend::seeded();
        let dares = backend.list_dares(DareQuery::default()).await.unwrap();
        assert_eq!(dares.len(), 8);
        assert!(dares.iter().all(|d| d.status == ReviewStatus::Approved));
        assert!(dares.windows(2).all(|w| w[0].created_at >= w[1].created_at));
        assert_eq!(dares[0].title, "Dance in Public");
    }

    #[tokio::test]
    async fn test_missing_records_are_not_found() {
        let backend = MemoryBackend::new();
        assert!(matches!(
            backend.delete_dare("nope").await,
            Err(DataError::NotFound(_))
        ));
        assert!(matches!(
            backend.record_completion("nope", 10).await,
            Err(DataError::NotFound(_))
        ));
    }
}
