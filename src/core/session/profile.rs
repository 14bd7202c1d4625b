//! Profile loading for the signed-in user.

use crate::core::backend::{AuthUser, RemoteDataService, UserProfile};

/// Stored profile for `user`, or a fallback built from the identity when
/// the document is missing or unreadable. Never fails.
pub async fn load_profile(data: &dyn RemoteDataService, user: &AuthUser) -> UserProfile {
    match data.get_profile(&user.uid).await {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            log::debug!("No profile stored for uid={}, using fallback", user.uid);
            UserProfile::fallback_for(user)
        }
        Err(e) => {
            log::warn!("Failed to load profile for uid={}: {e}", user.uid);
            UserProfile::fallback_for(user)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::backend::{DataError, MockRemoteDataService, DEFAULT_BIO};

    fn user() -> AuthUser {
        AuthUser {
            uid: "u1".into(),
            email: "a@b.co".into(),
            display_name: Some("Priya".into()),
        }
    }

    #[tokio::test]
    async fn test_stored_profile_is_returned() {
        let mut stored = UserProfile::new_for(&user());
        stored.bio = "climber".into();
        let returned = stored.clone();

        let mut data = MockRemoteDataService::new();
        data.expect_get_profile()
            .returning(move |_| Ok(Some(returned.clone())));

        assert_eq!(load_profile(&data, &user()).await, stored);
    }

    #[tokio::test]
    async fn test_missing_profile_falls_back() {
        let mut data = MockRemoteDataService::new();
        data.expect_get_profile().returning(|_| Ok(None));

        let profile = load_profile(&data, &user()).await;
        assert_eq!(profile.name, "Priya");
        assert_eq!(profile.bio, DEFAULT_BIO);
    }

    #[tokio::test]
    async fn test_read_failure_falls_back() {
        let mut data = MockRemoteDataService::new();
        data.expect_get_profile()
            .returning(|_| Err(DataError::PermissionDenied("users/u1".into())));

        let profile = load_profile(&data, &user()).await;
        assert_eq!(profile.join_date, "Recently");
        assert_eq!(profile.stats.coins, 0);
    }
}
