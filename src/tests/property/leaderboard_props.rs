//! Property-based tests for leaderboard ranking.

use std::collections::HashMap;

use chrono::Utc;
use proptest::prelude::*;

use crate::core::backend::{Proof, ReviewStatus};
use crate::core::leaderboard::rank_entries;

fn arb_status() -> impl Strategy<Value = ReviewStatus> {
    prop_oneof![
        Just(ReviewStatus::Pending),
        Just(ReviewStatus::Approved),
        Just(ReviewStatus::Rejected),
    ]
}

/// (user index, dare index, status) triples.
fn arb_proofs() -> impl Strategy<Value = Vec<(usize, usize, ReviewStatus)>> {
    prop::collection::vec((0usize..6, 0usize..5, arb_status()), 0..40)
}

fn proof(i: usize, user: usize, dare: usize, status: ReviewStatus) -> Proof {
    Proof {
        id: format!("p{i}"),
        dare_id: format!("d{dare}"),
        user_id: format!("u{user}"),
        description: String::new(),
        file_name: String::new(),
        file_type: String::new(),
        file_size: 0,
        status,
        created_at: Utc::now(),
    }
}

proptest! {
    #[test]
    fn ranks_are_dense_and_sorted(
        raw in arb_proofs(),
        coins in prop::collection::vec(0u64..500, 5),
    ) {
        let proofs: Vec<Proof> = raw
            .iter()
            .enumerate()
            .map(|(i, (u, d, s))| proof(i, *u, *d, *s))
            .collect();
        // The last dare was deleted: no reward entry.
        let rewards: HashMap<String, u64> = coins
            .iter()
            .take(4)
            .enumerate()
            .map(|(i, c)| (format!("d{i}"), *c))
            .collect();

        let entries = rank_entries(&proofs, &rewards, &HashMap::new());

        for (i, entry) in entries.iter().enumerate() {
            prop_assert_eq!(entry.rank, i + 1);
        }
        for pair in entries.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(a.score > b.score || (a.score == b.score && a.dares >= b.dares));
        }

        let counted = raw.iter().filter(|(_, _, s)| *s != ReviewStatus::Rejected).count();
        let total: u32 = entries.iter().map(|e| e.dares).sum();
        prop_assert_eq!(total as usize, counted);
    }
}
