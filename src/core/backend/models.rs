//! Record types owned by the remote data service: users, dares, proofs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bio used when a user leaves theirs blank.
pub const DEFAULT_BIO: &str = "Dare enthusiast | Challenge seeker | Always up for an adventure 🔥";

/// Join date shown for profiles without one.
pub const DEFAULT_JOIN_DATE: &str = "Recently";

// ============================================================================
// Users
// ============================================================================

/// Signed-in identity, as reported by the identity service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
}

/// Gamification counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserStats {
    pub dares_completed: u32,
    pub rank: u32,
    pub coins: u64,
    pub streak: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 4] = [
        ExperienceLevel::Beginner,
        ExperienceLevel::Intermediate,
        ExperienceLevel::Advanced,
        ExperienceLevel::Expert,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ExperienceLevel::Beginner => "Beginner",
            ExperienceLevel::Intermediate => "Intermediate",
            ExperienceLevel::Advanced => "Advanced",
            ExperienceLevel::Expert => "Expert",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ExperienceLevel::Beginner => "New to dares",
            ExperienceLevel::Intermediate => "Done a few challenges",
            ExperienceLevel::Advanced => "Regular dare taker",
            ExperienceLevel::Expert => "Dare legend",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interest {
    Social,
    Fun,
    Creative,
    Extreme,
    Fitness,
    Knowledge,
    Skill,
    Kindness,
}

impl Interest {
    pub const ALL: [Interest; 8] = [
        Interest::Social,
        Interest::Fun,
        Interest::Creative,
        Interest::Extreme,
        Interest::Fitness,
        Interest::Knowledge,
        Interest::Skill,
        Interest::Kindness,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Interest::Social => "Social",
            Interest::Fun => "Fun",
            Interest::Creative => "Creative",
            Interest::Extreme => "Extreme",
            Interest::Fitness => "Fitness",
            Interest::Knowledge => "Knowledge",
            Interest::Skill => "Skill",
            Interest::Kindness => "Kindness",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Interest::Social => "🎉",
            Interest::Fun => "😄",
            Interest::Creative => "🎨",
            Interest::Extreme => "🔥",
            Interest::Fitness => "💪",
            Interest::Knowledge => "🧠",
            Interest::Skill => "⚡",
            Interest::Kindness => "❤️",
        }
    }
}

/// Stored user document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub uid: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub college: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub join_date: String,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub experience_level: Option<ExperienceLevel>,
    #[serde(default)]
    pub interests: Vec<Interest>,
    #[serde(default)]
    pub onboarding_completed: bool,
    #[serde(default)]
    pub stats: UserStats,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Fresh profile written at sign-up.
    pub fn new_for(user: &AuthUser) -> Self {
        Self {
            uid: user.uid.clone(),
            name: user.display_name.clone().unwrap_or_default(),
            email: user.email.clone(),
            college: String::new(),
            bio: String::new(),
            join_date: Utc::now().format("%b %Y").to_string(),
            profile_image: None,
            experience_level: None,
            interests: Vec::new(),
            onboarding_completed: false,
            stats: UserStats::default(),
            updated_at: Utc::now(),
        }
    }

    /// Profile shown when no document exists or it cannot be read.
    pub fn fallback_for(user: &AuthUser) -> Self {
        Self {
            name: user
                .display_name
                .clone()
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "User".to_string()),
            bio: DEFAULT_BIO.to_string(),
            join_date: DEFAULT_JOIN_DATE.to_string(),
            ..Self::new_for(user)
        }
    }
}

/// Fields written when onboarding completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingProfile {
    pub name: String,
    pub college: String,
    pub experience_level: ExperienceLevel,
    pub interests: Vec<Interest>,
    pub bio: String,
}

// ============================================================================
// Dares
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DareCategory {
    Social,
    Fun,
    Creative,
    Extreme,
}

impl DareCategory {
    pub const ALL: [DareCategory; 4] = [
        DareCategory::Social,
        DareCategory::Fun,
        DareCategory::Creative,
        DareCategory::Extreme,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DareCategory::Social => "Social",
            DareCategory::Fun => "Fun",
            DareCategory::Creative => "Creative",
            DareCategory::Extreme => "Extreme",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Extreme,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Extreme,
    ];

    /// Coin reward for completing a dare of this difficulty.
    pub fn coins(self) -> u64 {
        match self {
            Difficulty::Easy => 50,
            Difficulty::Medium => 150,
            Difficulty::Hard => 300,
            Difficulty::Extreme => 500,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Extreme => "Extreme",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeLimit {
    #[serde(rename = "24h")]
    Hours24,
    #[serde(rename = "48h")]
    Hours48,
    #[serde(rename = "1w")]
    Week,
}

impl TimeLimit {
    pub const ALL: [TimeLimit; 3] = [TimeLimit::Hours24, TimeLimit::Hours48, TimeLimit::Week];

    pub fn label(self) -> &'static str {
        match self {
            TimeLimit::Hours24 => "24 hours",
            TimeLimit::Hours48 => "48 hours",
            TimeLimit::Week => "1 week",
        }
    }
}

/// Moderation status shared by dares and proofs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatus {
    pub fn label(self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Approved => "approved",
            ReviewStatus::Rejected => "rejected",
        }
    }
}

pub type DareStatus = ReviewStatus;
pub type ProofStatus = ReviewStatus;

/// Stored dare document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dare {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: DareCategory,
    pub difficulty: Difficulty,
    pub coins: u64,
    pub time_limit: TimeLimit,
    pub requirements: String,
    pub created_by: String,
    pub created_by_name: String,
    pub status: DareStatus,
    pub participants: u32,
    pub completions: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Dare fields supplied by the creator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDare {
    pub title: String,
    pub description: String,
    pub category: DareCategory,
    pub difficulty: Difficulty,
    pub time_limit: TimeLimit,
    pub requirements: String,
    pub created_by: String,
    pub created_by_name: String,
}

/// Filter for dare listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DareQuery {
    pub created_by: Option<String>,
    pub status: Option<DareStatus>,
}

// ============================================================================
// Proofs
// ============================================================================

/// Stored proof-of-completion submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proof {
    pub id: String,
    pub dare_id: String,
    pub user_id: String,
    pub description: String,
    pub file_name: String,
    pub file_type: String,
    pub file_size: u64,
    pub status: ProofStatus,
    pub created_at: DateTime<Utc>,
}

/// Proof fields supplied by the submitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProof {
    pub dare_id: String,
    pub user_id: String,
    pub description: String,
    pub file_name: String,
    pub file_type: String,
    pub file_size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: Option<&str>) -> AuthUser {
        AuthUser {
            uid: "u1".into(),
            email: "a@b.co".into(),
            display_name: name.map(String::from),
        }
    }

    #[test]
    fn test_difficulty_coins() {
        assert_eq!(Difficulty::Easy.coins(), 50);
        assert_eq!(Difficulty::Medium.coins(), 150);
        assert_eq!(Difficulty::Hard.coins(), 300);
        assert_eq!(Difficulty::Extreme.coins(), 500);
    }

    #[test]
    fn test_fallback_profile_defaults() {
        let profile = UserProfile::fallback_for(&user(None));
        assert_eq!(profile.name, "User");
        assert_eq!(profile.bio, DEFAULT_BIO);
        assert_eq!(profile.join_date, DEFAULT_JOIN_DATE);
        assert_eq!(profile.stats, UserStats::default());

        let named = UserProfile::fallback_for(&user(Some("Priya")));
        assert_eq!(named.name, "Priya");
    }

    #[test]
    fn test_time_limit_serde_names() {
        assert_eq!(serde_json::to_string(&TimeLimit::Hours24).unwrap(), "\"24h\"");
        let parsed: TimeLimit = serde_json::from_str("\"1w\"").unwrap();
        assert_eq!(parsed, TimeLimit::Week);
    }

    #[test]
    fn test_stats_use_camel_case() {
        let json = serde_json::to_value(UserStats {
            dares_completed: 2,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(json["daresCompleted"], 2);
    }
}
