//! Dare operations: creating, browsing, accepting, proving and deleting.
//!
//! These sit between the front-end and [`RemoteDataService`]. Validation
//! happens here so every front-end rejects the same input.

use std::path::Path;

use thiserror::Error;
use tracing::instrument;

use crate::core::backend::{
    AuthUser, DataError, Dare, DareCategory, DareQuery, DareStatus, Difficulty, NewDare, NewProof,
    Proof, RemoteDataService, TimeLimit,
};

/// Largest accepted proof file.
pub const MAX_PROOF_BYTES: u64 = 10 * 1024 * 1024;

/// Creator name stored when the user has no display name.
pub const ANONYMOUS_CREATOR: &str = "Anonymous";

#[derive(Debug, Error)]
pub enum DareError {
    #[error("Please fill in all required fields")]
    MissingFields,

    #[error("Please provide either a file or description")]
    EmptyProof,

    #[error("Please select an image or video file ({0})")]
    UnsupportedFile(String),

    #[error("File size must be less than 10MB ({size} bytes)")]
    FileTooLarge { size: u64 },

    #[error("Only the creator can delete this dare")]
    NotCreator,

    #[error("Dare not found: {0}")]
    NotFound(String),

    #[error("Failed to read proof file: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Data(#[from] DataError),
}

// ============================================================================
// Creating
// ============================================================================

/// Form state for a new dare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DareDraft {
    pub title: String,
    pub description: String,
    pub category: DareCategory,
    pub difficulty: Difficulty,
    pub time_limit: TimeLimit,
    pub requirements: String,
}

impl Default for DareDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            category: DareCategory::Fun,
            difficulty: Difficulty::Easy,
            time_limit: TimeLimit::Hours24,
            requirements: String::new(),
        }
    }
}

impl DareDraft {
    /// Reward for the selected difficulty.
    pub fn coins(&self) -> u64 {
        self.difficulty.coins()
    }

    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty() && !self.description.trim().is_empty()
    }

    /// Trimmed record ready to store, attributed to `creator`.
    pub fn to_new_dare(&self, creator: &AuthUser) -> Result<NewDare, DareError> {
        if !self.is_valid() {
            return Err(DareError::MissingFields);
        }
        Ok(NewDare {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            category: self.category,
            difficulty: self.difficulty,
            time_limit: self.time_limit,
            requirements: self.requirements.trim().to_string(),
            created_by: creator.uid.clone(),
            created_by_name: creator
                .display_name
                .clone()
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| ANONYMOUS_CREATOR.to_string()),
        })
    }
}

/// Store a new dare. It starts pending moderation.
#[instrument(skip_all, fields(uid = %creator.uid))]
pub async fn create_dare(
    data: &dyn RemoteDataService,
    creator: &AuthUser,
    draft: &DareDraft,
) -> Result<Dare, DareError> {
    let new = draft.to_new_dare(creator)?;
    let dare = data.create_dare(new).await?;
    log::info!("Created dare {} by uid={}", dare.id, creator.uid);
    Ok(dare)
}

// ============================================================================
// Browsing
// ============================================================================

/// Category and free-text filter over the dare list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DareFilter {
    /// `None` shows every category.
    pub category: Option<DareCategory>,
    pub search: String,
}

impl DareFilter {
    pub fn matches(&self, dare: &Dare) -> bool {
        if self.category.is_some_and(|c| c != dare.category) {
            return false;
        }
        let needle = self.search.trim().to_lowercase();
        needle.is_empty()
            || dare.title.to_lowercase().contains(&needle)
            || dare.description.to_lowercase().contains(&needle)
    }

    pub fn apply<'a>(&self, dares: &'a [Dare]) -> Vec<&'a Dare> {
        dares.iter().filter(|d| self.matches(d)).collect()
    }

    /// Step through all categories, then back to "all".
    pub fn cycle_category(&mut self) {
        self.category = match self.category {
            None => Some(DareCategory::ALL[0]),
            Some(current) => DareCategory::ALL
                .iter()
                .position(|c| *c == current)
                .and_then(|i| DareCategory::ALL.get(i + 1).copied()),
        };
    }
}

/// Approved dares, newest first.
pub async fn list_available(data: &dyn RemoteDataService) -> Result<Vec<Dare>, DareError> {
    Ok(data
        .list_dares(DareQuery {
            created_by: None,
            status: Some(DareStatus::Approved),
        })
        .await?)
}

/// Join a dare.
pub async fn accept_dare(data: &dyn RemoteDataService, dare_id: &str) -> Result<(), DareError> {
    data.increment_dare_participants(dare_id).await?;
    log::info!("Accepted dare {dare_id}");
    Ok(())
}

// ============================================================================
// Proof of completion
// ============================================================================

/// File attached to a proof.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofFile {
    pub name: String,
    pub mime: String,
    pub size: u64,
}

impl ProofFile {
    /// Check type and size.
    pub fn new(name: impl Into<String>, size: u64) -> Result<Self, DareError> {
        let name = name.into();
        let mime = guess_mime(&name)
            .filter(|m| m.starts_with("image/") || m.starts_with("video/"))
            .ok_or_else(|| DareError::UnsupportedFile(name.clone()))?;
        if size > MAX_PROOF_BYTES {
            return Err(DareError::FileTooLarge { size });
        }
        Ok(Self {
            name,
            mime: mime.to_string(),
            size,
        })
    }

    /// Stat a file on disk.
    pub fn from_path(path: &Path) -> Result<Self, DareError> {
        let metadata = std::fs::metadata(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::new(name, metadata.len())
    }
}

/// MIME type from a file extension.
pub fn guess_mime(name: &str) -> Option<&'static str> {
    let ext = Path::new(name).extension()?.to_str()?.to_lowercase();
    let mime = match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        "mkv" => "video/x-matroska",
        "avi" => "video/x-msvideo",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "zip" => "application/zip",
        _ => return None,
    };
    Some(mime)
}

/// Proof form state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProofDraft {
    pub description: String,
    pub file: Option<ProofFile>,
}

impl ProofDraft {
    pub fn is_valid(&self) -> bool {
        self.file.is_some() || !self.description.trim().is_empty()
    }
}

/// Submit proof for `dare`: store a pending proof, bump the dare's
/// completion count and credit the user.
#[instrument(skip(data, dare, draft), fields(dare_id = %dare.id))]
pub async fn submit_proof(
    data: &dyn RemoteDataService,
    user_id: &str,
    dare: &Dare,
    draft: &ProofDraft,
) -> Result<Proof, DareError> {
    if !draft.is_valid() {
        return Err(DareError::EmptyProof);
    }

    let (file_name, file_type, file_size) = match &draft.file {
        Some(file) => (file.name.clone(), file.mime.clone(), file.size),
        None => (String::new(), String::new(), 0),
    };

    let proof = data
        .add_proof(NewProof {
            dare_id: dare.id.clone(),
            user_id: user_id.to_string(),
            description: draft.description.trim().to_string(),
            file_name,
            file_type,
            file_size,
        })
        .await?;
    data.increment_dare_completions(&dare.id).await?;
    data.record_completion(user_id, dare.coins).await?;

    log::info!("Proof {} submitted for dare {} by uid={user_id}", proof.id, dare.id);
    Ok(proof)
}

// ============================================================================
// My dares
// ============================================================================

/// Status tabs on the "my dares" screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MyDaresFilter {
    #[default]
    All,
    Pending,
    Approved,
    Rejected,
}

impl MyDaresFilter {
    pub const ALL: [MyDaresFilter; 4] = [
        MyDaresFilter::All,
        MyDaresFilter::Pending,
        MyDaresFilter::Approved,
        MyDaresFilter::Rejected,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MyDaresFilter::All => "All",
            MyDaresFilter::Pending => "Pending",
            MyDaresFilter::Approved => "Approved",
            MyDaresFilter::Rejected => "Rejected",
        }
    }

    pub fn status(self) -> Option<DareStatus> {
        match self {
            MyDaresFilter::All => None,
            MyDaresFilter::Pending => Some(DareStatus::Pending),
            MyDaresFilter::Approved => Some(DareStatus::Approved),
            MyDaresFilter::Rejected => Some(DareStatus::Rejected),
        }
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

/// Dares created by `uid`, newest first.
pub async fn list_my_dares(
    data: &dyn RemoteDataService,
    uid: &str,
    filter: MyDaresFilter,
) -> Result<Vec<Dare>, DareError> {
    Ok(data
        .list_dares(DareQuery {
            created_by: Some(uid.to_string()),
            status: filter.status(),
        })
        .await?)
}

/// Delete a dare the user created.
#[instrument(skip(data))]
pub async fn delete_my_dare(
    data: &dyn RemoteDataService,
    uid: &str,
    dare_id: &str,
) -> Result<(), DareError> {
    let dare = data
        .get_dare(dare_id)
        .await?
        .ok_or_else(|| DareError::NotFound(dare_id.to_string()))?;
    if dare.created_by != uid {
        log::warn!("uid={uid} tried to delete dare {dare_id} owned by {}", dare.created_by);
        return Err(DareError::NotCreator);
    }
    data.delete_dare(dare_id).await?;
    log::info!("Deleted dare {dare_id}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::backend::{
        ExperienceLevel, IdentityService, MemoryBackend, OnboardingProfile, ReviewStatus,
    };
    use rstest::rstest;

    fn draft(title: &str, description: &str) -> DareDraft {
        DareDraft {
            title: title.into(),
            description: description.into(),
            difficulty: Difficulty::Hard,
            ..Default::default()
        }
    }

    async fn signed_up(backend: &MemoryBackend, name: &str) -> AuthUser {
        let user = backend
            .sign_up(&format!("{name}@dare.up"), "secret1", name)
            .await
            .unwrap();
        backend
            .complete_onboarding(
                &user,
                OnboardingProfile {
                    name: name.into(),
                    college: "State".into(),
                    experience_level: ExperienceLevel::Beginner,
                    interests: vec![],
                    bio: String::new(),
                },
            )
            .await
            .unwrap();
        user
    }

    #[rstest]
    #[case("", "desc")]
    #[case("title", "   ")]
    #[case("  ", "")]
    fn test_draft_requires_title_and_description(#[case] title: &str, #[case] description: &str) {
        let user = AuthUser {
            uid: "u".into(),
            email: "u@x.io".into(),
            display_name: None,
        };
        assert!(matches!(
            draft(title, description).to_new_dare(&user),
            Err(DareError::MissingFields)
        ));
    }

    #[tokio::test]
    async fn test_create_dare_is_pending_and_trimmed() {
        let backend = MemoryBackend::new();
        let user = AuthUser {
            uid: "u1".into(),
            email: "u@x.io".into(),
            display_name: None,
        };
        let dare = create_dare(&backend, &user, &draft("  Jump  ", " into the lake "))
            .await
            .unwrap();
        assert_eq!(dare.title, "Jump");
        assert_eq!(dare.description, "into the lake");
        assert_eq!(dare.coins, 300);
        assert_eq!(dare.status, ReviewStatus::Pending);
        assert_eq!(dare.participants, 0);
        assert_eq!(dare.completions, 0);
        assert_eq!(dare.created_by_name, ANONYMOUS_CREATOR);
    }

    #[test]
    fn test_filter_by_category_and_search() {
        let backend_dare = |title: &str, description: &str, category| Dare {
            id: title.into(),
            title: title.into(),
            description: description.into(),
            category,
            difficulty: Difficulty::Easy,
            coins: 50,
            time_limit: TimeLimit::Hours24,
            requirements: String::new(),
            created_by: "x".into(),
            created_by_name: "x".into(),
            status: ReviewStatus::Approved,
            participants: 0,
            completions: 0,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let dares = vec![
            backend_dare("Dance in Public", "Move it", DareCategory::Social),
            backend_dare("Paint", "A PUBLIC mural", DareCategory::Creative),
            backend_dare("Ice bath", "brr", DareCategory::Extreme),
        ];

        let mut filter = DareFilter {
            category: None,
            search: "public".into(),
        };
        assert_eq!(filter.apply(&dares).len(), 2);

        filter.category = Some(DareCategory::Creative);
        let found = filter.apply(&dares);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Paint");

        filter.search.clear();
        filter.category = Some(DareCategory::Fun);
        assert!(filter.apply(&dares).is_empty());
    }

    #[test]
    fn test_cycle_category_wraps_to_all() {
        let mut filter = DareFilter::default();
        for expected in DareCategory::ALL {
            filter.cycle_category();
            assert_eq!(filter.category, Some(expected));
        }
        filter.cycle_category();
        assert_eq!(filter.category, None);
    }

    #[rstest]
    #[case("proof.JPG", 1024, true)]
    #[case("clip.mp4", MAX_PROOF_BYTES, true)]
    #[case("clip.mp4", MAX_PROOF_BYTES + 1, false)]
    #[case("notes.pdf", 10, false)]
    #[case("noextension", 10, false)]
    fn test_proof_file_rules(#[case] name: &str, #[case] size: u64, #[case] ok: bool) {
        assert_eq!(ProofFile::new(name, size).is_ok(), ok);
    }

    #[tokio::test]
    async fn test_submit_proof_updates_counters() {
        let backend = MemoryBackend::seeded();
        let user = signed_up(&backend, "ace").await;
        let dare = list_available(&backend).await.unwrap().remove(0);

        accept_dare(&backend, &dare.id).await.unwrap();
        let proof = submit_proof(
            &backend,
            &user.uid,
            &dare,
            &ProofDraft {
                description: "done it".into(),
                file: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(proof.status, ReviewStatus::Pending);

        let stored = backend.get_dare(&dare.id).await.unwrap().unwrap();
        assert_eq!(stored.participants, 1);
        assert_eq!(stored.completions, 1);

        let profile = backend.get_profile(&user.uid).await.unwrap().unwrap();
        assert_eq!(profile.stats.dares_completed, 1);
        assert_eq!(profile.stats.coins, dare.coins);
    }

    #[tokio::test]
    async fn test_empty_proof_is_rejected() {
        let backend = MemoryBackend::seeded();
        let dare = list_available(&backend).await.unwrap().remove(0);
        let result = submit_proof(&backend, "u1", &dare, &ProofDraft::default()).await;
        assert!(matches!(result, Err(DareError::EmptyProof)));
        assert!(backend.list_proofs(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_my_dares_and_delete() {
        let backend = MemoryBackend::seeded();
        let owner = signed_up(&backend, "owner").await;
        let other = signed_up(&backend, "other").await;

        let dare = create_dare(&backend, &owner, &draft("Mine", "only mine"))
            .await
            .unwrap();

        let mine = list_my_dares(&backend, &owner.uid, MyDaresFilter::All)
            .await
            .unwrap();
        assert_eq!(mine.len(), 1);
        assert!(list_my_dares(&backend, &owner.uid, MyDaresFilter::Approved)
            .await
            .unwrap()
            .is_empty());

        assert!(matches!(
            delete_my_dare(&backend, &other.uid, &dare.id).await,
            Err(DareError::NotCreator)
        ));
        delete_my_dare(&backend, &owner.uid, &dare.id).await.unwrap();
        assert!(matches!(
            delete_my_dare(&backend, &owner.uid, &dare.id).await,
            Err(DareError::NotFound(_))
        ));
    }

    #[test]
    fn test_my_dares_filter_cycles() {
        let mut f = MyDaresFilter::All;
        for _ in 0..4 {
            f = f.next();
        }
        assert_eq!(f, MyDaresFilter::All);
        assert_eq!(MyDaresFilter::Rejected.status(), Some(DareStatus::Rejected));
    }
}
