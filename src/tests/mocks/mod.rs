//! Mock implementations for testing
//!
//! Preconfigured [`MockRemoteDataService`] doubles for failure paths the
//! in-process backend cannot produce.

#![allow(dead_code)]

pub use crate::core::backend::MockRemoteDataService;
use crate::core::backend::{DataError, UserProfile};

/// Data service whose every profile lookup fails.
pub fn unreachable_profiles() -> MockRemoteDataService {
    let mut data = MockRemoteDataService::new();
    data.expect_profile_exists()
        .returning(|_| Err(DataError::Backend("connection reset".into())));
    data.expect_get_profile()
        .returning(|_| Err(DataError::Backend("connection reset".into())));
    data
}

/// Data service that accepts onboarding writes but never shows them on
/// read-back.
pub fn write_only_profiles() -> MockRemoteDataService {
    let mut data = MockRemoteDataService::new();
    data.expect_complete_onboarding().times(1).returning(|_, _| Ok(()));
    data.expect_get_profile().returning(|_| Ok(None));
    data
}

/// Data service holding exactly `profile`.
pub fn single_profile(profile: UserProfile) -> MockRemoteDataService {
    let mut data = MockRemoteDataService::new();
    let uid = profile.uid.clone();
    data.expect_profile_exists()
        .returning(move |id| Ok(id == uid));
    data.expect_get_profile()
        .returning(move |id| Ok((id == profile.uid).then(|| profile.clone())));
    data
}
