//! Leaderboard ranking over submitted proofs.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::core::backend::{DataError, DareQuery, Proof, RemoteDataService, ReviewStatus, UserProfile};

/// Name shown for proofs whose author has no profile.
const UNKNOWN_PLAYER: &str = "Anonymous";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Timeframe {
    Today,
    #[default]
    Week,
    Month,
    All,
}

impl Timeframe {
    pub const ALL: [Timeframe; 4] = [
        Timeframe::Today,
        Timeframe::Week,
        Timeframe::Month,
        Timeframe::All,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Timeframe::Today => "Today",
            Timeframe::Week => "This Week",
            Timeframe::Month => "This Month",
            Timeframe::All => "All Time",
        }
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    /// Earliest instant inside the window, `None` for all time.
    pub fn since(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Timeframe::Today => now
                .date_naive()
                .and_hms_opt(0, 0, 0)
                .map(|midnight| midnight.and_utc()),
            Timeframe::Week => Some(now - Duration::days(7)),
            Timeframe::Month => Some(now - Duration::days(30)),
            Timeframe::All => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    /// 1-based.
    pub rank: usize,
    pub uid: String,
    pub name: String,
    pub college: String,
    pub score: u64,
    pub dares: u32,
}

/// Aggregate `proofs` per user and rank them: score desc, then dare count
/// desc, then name asc. Rejected proofs do not count. Proofs for dares that
/// no longer exist count as a dare worth no coins.
pub fn rank_entries(
    proofs: &[Proof],
    rewards: &HashMap<String, u64>,
    profiles: &HashMap<String, UserProfile>,
) -> Vec<LeaderboardEntry> {
    let mut totals: HashMap<&str, (u64, u32)> = HashMap::new();
    for proof in proofs.iter().filter(|p| p.status != ReviewStatus::Rejected) {
        let entry = totals.entry(proof.user_id.as_str()).or_default();
        entry.0 += rewards.get(&proof.dare_id).copied().unwrap_or(0);
        entry.1 += 1;
    }

    let mut entries: Vec<LeaderboardEntry> = totals
        .into_iter()
        .map(|(uid, (score, dares))| {
            let profile = profiles.get(uid);
            LeaderboardEntry {
                rank: 0,
                uid: uid.to_string(),
                name: profile
                    .map(|p| p.name.clone())
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| UNKNOWN_PLAYER.to_string()),
                college: profile.map(|p| p.college.clone()).unwrap_or_default(),
                score,
                dares,
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then(b.dares.cmp(&a.dares))
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.uid.cmp(&b.uid))
    });
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.rank = i + 1;
    }
    entries
}

/// Ranked entries for `timeframe`, measured back from `now`.
pub async fn load_leaderboard(
    data: &dyn RemoteDataService,
    timeframe: Timeframe,
    now: DateTime<Utc>,
) -> Result<Vec<LeaderboardEntry>, DataError> {
    let proofs = data.list_proofs(timeframe.since(now)).await?;
    let rewards = data
        .list_dares(DareQuery::default())
        .await?
        .into_iter()
        .map(|d| (d.id, d.coins))
        .collect();
    let profiles = data
        .list_profiles()
        .await?
        .into_iter()
        .map(|p| (p.uid.clone(), p))
        .collect();

    let entries = rank_entries(&proofs, &rewards, &profiles);
    tracing::debug!(
        ?timeframe,
        entries = entries.len(),
        proofs = proofs.len(),
        "Leaderboard ranked"
    );
    Ok(entries)
}
