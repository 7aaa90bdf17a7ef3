use chrono::{DateTime, Utc};

use crate::facts::{SsoProvider, SsoSession};

/// Deterministically validate a workspace SSO session.
///
/// A session is valid when it was issued by the workspace's configured
/// provider and `now` is strictly before `valid_until`. Only call this when
/// the workspace has a provider; without one SSO does not apply at all.
pub fn is_sso_session_valid(
    session: Option<&SsoSession>,
    provider: &SsoProvider,
    now: DateTime<Utc>,
) -> bool {
    let Some(session) = session else {
        return false;
    };
    if session.provider_id != provider.provider_id {
        return false;
    }
    now < session.valid_until
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use warden_core::{SsoProviderId, UserId};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn provider() -> SsoProvider {
        SsoProvider {
            provider_id: SsoProviderId::new("provider-id"),
        }
    }

    fn session(provider_id: &str, valid_until: DateTime<Utc>) -> SsoSession {
        SsoSession {
            user_id: UserId::new("user-id"),
            provider_id: SsoProviderId::new(provider_id),
            valid_until,
        }
    }

    #[test]
    fn absent_session_is_invalid() {
        assert!(!is_sso_session_valid(None, &provider(), now()));
    }

    #[test]
    fn future_session_is_valid() {
        let s = session("provider-id", now() + Duration::hours(1));
        assert!(is_sso_session_valid(Some(&s), &provider(), now()));
    }

    #[test]
    fn expired_session_is_invalid() {
        let s = session("provider-id", now() - Duration::hours(1));
        assert!(!is_sso_session_valid(Some(&s), &provider(), now()));
    }

    #[test]
    fn expiry_boundary_is_exclusive() {
        let at_now = session("provider-id", now());
        assert!(!is_sso_session_valid(Some(&at_now), &provider(), now()));

        let just_after = session("provider-id", now() + Duration::microseconds(1));
        assert!(is_sso_session_valid(Some(&just_after), &provider(), now()));
    }

    #[test]
    fn session_from_other_provider_is_invalid() {
        let s = session("other-provider", now() + Duration::hours(1));
        assert!(!is_sso_session_valid(Some(&s), &provider(), now()));
    }
}
