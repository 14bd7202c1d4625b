//! Profile onboarding.
//!
//! Four steps on top of the [`WizardController`]: nickname, college,
//! experience level and interests (with an optional bio). Each step's
//! predicate reads the shared [`OnboardingDraft`], so the wizard's
//! "Continue" button enables as soon as the form becomes valid.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::Utc;
use thiserror::Error;
use tracing::instrument;

use crate::core::backend::{
    AuthUser, DataError, ExperienceLevel, Interest, OnboardingProfile, RemoteDataService,
    UserProfile, DEFAULT_BIO,
};
use crate::core::session::ProfileCache;
use crate::core::wizard::{WizardBuilder, WizardController, WizardError, WizardLabels, WizardState};

#[derive(Debug, Error)]
pub enum OnboardingError {
    #[error("Step {0} is incomplete")]
    Incomplete(usize),

    #[error("Failed to verify onboarding data")]
    VerificationFailed,

    #[error("Failed to save your information: {0}")]
    Data(#[from] DataError),
}

/// The four onboarding steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingStep {
    Nickname,
    College,
    Experience,
    Interests,
}

impl OnboardingStep {
    pub const ALL: [OnboardingStep; 4] = [
        OnboardingStep::Nickname,
        OnboardingStep::College,
        OnboardingStep::Experience,
        OnboardingStep::Interests,
    ];

    /// 1-based position in the wizard.
    pub fn number(self) -> usize {
        match self {
            OnboardingStep::Nickname => 1,
            OnboardingStep::College => 2,
            OnboardingStep::Experience => 3,
            OnboardingStep::Interests => 4,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            OnboardingStep::Nickname => "What should we call you?",
            OnboardingStep::College => "Where do you study?",
            OnboardingStep::Experience => "How daring are you?",
            OnboardingStep::Interests => "What are you into?",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            OnboardingStep::Nickname => "Pick a nickname other daredevils will see",
            OnboardingStep::College => "Compete with people from your campus",
            OnboardingStep::Experience => "We'll suggest dares that match",
            OnboardingStep::Interests => "Choose at least one, and tell us about yourself",
        }
    }
}

/// Answers collected so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OnboardingDraft {
    pub nickname: String,
    pub college: String,
    pub experience_level: Option<ExperienceLevel>,
    pub interests: Vec<Interest>,
    pub bio: String,
}

/// Draft shared between the form and the wizard predicate.
pub type SharedDraft = Rc<RefCell<OnboardingDraft>>;

impl OnboardingDraft {
    /// Whether the 1-based `step` has what it needs.
    pub fn can_proceed(&self, step: usize) -> bool {
        match step {
            1 => !self.nickname.trim().is_empty(),
            2 => !self.college.trim().is_empty(),
            3 => self.experience_level.is_some(),
            4 => !self.interests.is_empty(),
            _ => false,
        }
    }

    /// Whether every step before the 1-based `step` is answered, i.e. a
    /// jump there cannot skip a required answer.
    pub fn can_reach(&self, step: usize) -> bool {
        (1..step).all(|s| self.can_proceed(s))
    }

    pub fn toggle_interest(&mut self, interest: Interest) {
        if let Some(i) = self.interests.iter().position(|x| *x == interest) {
            self.interests.remove(i);
        } else {
            self.interests.push(interest);
        }
    }

    /// Trimmed answers, with the default bio when left blank.
    pub fn to_profile(&self) -> Result<OnboardingProfile, OnboardingError> {
        if let Some(step) = (1..=OnboardingStep::ALL.len()).find(|s| !self.can_proceed(*s)) {
            return Err(OnboardingError::Incomplete(step));
        }
        let experience_level = self
            .experience_level
            .ok_or(OnboardingError::Incomplete(OnboardingStep::Experience.number()))?;
        let bio = self.bio.trim();
        Ok(OnboardingProfile {
            name: self.nickname.trim().to_string(),
            college: self.college.trim().to_string(),
            experience_level,
            interests: self.interests.clone(),
            bio: if bio.is_empty() {
                DEFAULT_BIO.to_string()
            } else {
                bio.to_string()
            },
        })
    }
}

/// Wizard over the onboarding steps, validated against `draft`.
pub fn onboarding_wizard(
    draft: SharedDraft,
    labels: WizardLabels,
    disable_step_indicators: bool,
    on_complete: impl FnMut(&WizardState) + 'static,
) -> Result<WizardController<OnboardingStep>, WizardError> {
    WizardBuilder::new(OnboardingStep::ALL.to_vec())
        .labels(labels)
        .disable_step_indicators(disable_step_indicators)
        .validator(move |step| draft.borrow().can_proceed(step))
        .on_step_change(|step| log::debug!("Onboarding step {step}"))
        .on_complete(on_complete)
        .build()
}

/// Persist onboarding answers, then read the profile back to confirm they
/// landed. The profile-existence cache entry for the user is dropped.
#[instrument(skip_all, fields(uid = %user.uid))]
pub async fn complete_onboarding(
    data: &dyn RemoteDataService,
    cache: &ProfileCache,
    user: &AuthUser,
    profile: OnboardingProfile,
) -> Result<UserProfile, OnboardingError> {
    let started = Utc::now();
    data.complete_onboarding(user, profile).await?;
    cache.invalidate(&user.uid).await;

    let stored = data
        .get_profile(&user.uid)
        .await?
        .filter(|p| p.onboarding_completed)
        .ok_or(OnboardingError::VerificationFailed)?;

    log::info!(
        "Onboarding saved for uid={} in {}ms",
        user.uid,
        (Utc::now() - started).num_milliseconds()
    );
    Ok(stored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::backend::{IdentityService, MemoryBackend, MockRemoteDataService};

    fn filled() -> OnboardingDraft {
        OnboardingDraft {
            nickname: "  Ace ".into(),
            college: " MIT ".into(),
            experience_level: Some(ExperienceLevel::Expert),
            interests: vec![Interest::Fitness],
            bio: "   ".into(),
        }
    }

    #[test]
    fn test_can_proceed_per_step() {
        let mut draft = OnboardingDraft::default();
        assert!(!draft.can_proceed(1));
        draft.nickname = "  ".into();
        assert!(!draft.can_proceed(1));
        draft.nickname = "Ace".into();
        assert!(draft.can_proceed(1));
        assert!(!draft.can_proceed(2));
        assert!(!draft.can_proceed(3));
        draft.experience_level = Some(ExperienceLevel::Beginner);
        assert!(draft.can_proceed(3));
        assert!(!draft.can_proceed(4));
        draft.toggle_interest(Interest::Fun);
        assert!(draft.can_proceed(4));
        draft.toggle_interest(Interest::Fun);
        assert!(!draft.can_proceed(4));
        assert!(!draft.can_proceed(5));
    }

    #[test]
    fn test_can_reach_requires_earlier_steps() {
        let mut draft = OnboardingDraft::default();
        assert!(draft.can_reach(1));
        assert!(!draft.can_reach(2));
        assert!(!draft.can_reach(4));
        draft.nickname = "Ace".into();
        draft.college = "MIT".into();
        assert!(draft.can_reach(3));
        assert!(!draft.can_reach(4));
        draft.experience_level = Some(ExperienceLevel::Beginner);
        assert!(draft.can_reach(4));
    }

    #[test]
    fn test_to_profile_trims_and_defaults_bio() {
        let profile = filled().to_profile().unwrap();
        assert_eq!(profile.name, "Ace");
        assert_eq!(profile.college, "MIT");
        assert_eq!(profile.bio, DEFAULT_BIO);
    }

    #[test]
    fn test_to_profile_reports_first_incomplete_step() {
        let mut draft = filled();
        draft.college.clear();
        assert!(matches!(draft.to_profile(), Err(OnboardingError::Incomplete(2))));
    }

    #[test]
    fn test_wizard_follows_draft() {
        let draft: SharedDraft = Rc::new(RefCell::new(OnboardingDraft::default()));
        let completed = Rc::new(RefCell::new(false));
        let flag = completed.clone();
        let mut wizard = onboarding_wizard(draft.clone(), WizardLabels::default(), false, move |_| {
            *flag.borrow_mut() = true;
        })
        .unwrap();

        assert!(!wizard.go_next());
        draft.borrow_mut().nickname = "Ace".into();
        assert!(wizard.go_next());
        assert_eq!(wizard.current_content(), Some(&OnboardingStep::College));

        *draft.borrow_mut() = filled();
        assert!(wizard.go_next());
        assert!(wizard.go_next());
        assert!(wizard.is_last_step());
        assert!(wizard.advance());
        assert!(wizard.is_completed());
        assert!(*completed.borrow());
    }

    #[tokio::test]
    async fn test_complete_onboarding_persists_and_invalidates_cache() {
        let backend = MemoryBackend::new();
        let cache = ProfileCache::default();
        let user = backend.sign_up("a@b.co", "secret1", "Ace").await.unwrap();
        cache.put(&user.uid, false).await;

        let stored = complete_onboarding(&backend, &cache, &user, filled().to_profile().unwrap())
            .await
            .unwrap();
        assert!(stored.onboarding_completed);
        assert_eq!(stored.experience_level, Some(ExperienceLevel::Expert));
        assert_eq!(cache.get(&user.uid).await, None);
    }

    #[tokio::test]
    async fn test_missing_read_back_is_an_error() {
        let mut data = MockRemoteDataService::new();
        data.expect_complete_onboarding().returning(|_, _| Ok(()));
        data.expect_get_profile().returning(|_| Ok(None));

        let user = AuthUser {
            uid: "u1".into(),
            email: "a@b.co".into(),
            display_name: None,
        };
        let result = complete_onboarding(
            &data,
            &ProfileCache::default(),
            &user,
            filled().to_profile().unwrap(),
        )
        .await;
        assert!(matches!(result, Err(OnboardingError::VerificationFailed)));
    }

    #[tokio::test]
    async fn test_write_failure_surfaces() {
        let mut data = MockRemoteDataService::new();
        data.expect_complete_onboarding()
            .returning(|_, _| Err(DataError::PermissionDenied("users/u1".into())));

        let user = AuthUser {
            uid: "u1".into(),
            email: "a@b.co".into(),
            display_name: None,
        };
        let result = complete_onboarding(
            &data,
            &ProfileCache::default(),
            &user,
            filled().to_profile().unwrap(),
        )
        .await;
        assert!(matches!(result, Err(OnboardingError::Data(DataError::PermissionDenied(_)))));
    }
}
