//! Property-based tests for session tokens

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use quillfeed::backend::auth::sessions::{IdentityClaim, TokenService, VerifyError};
use quillfeed::shared::UserId;

fn service() -> TokenService {
    TokenService::new(b"proptest-secret")
}

fn instant(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).single().unwrap()
}

proptest! {
    #[test]
    fn test_token_verifies_until_expiry(
        email in "[a-z]{1,12}@[a-z]{1,8}\\.[a-z]{2,4}",
        issued in 1_600_000_000i64..1_900_000_000i64,
        ttl_secs in 1i64..=259_200i64,
        elapsed_fraction in 0.0f64..1.0f64,
    ) {
        let service = service();
        let claim = IdentityClaim::new(UserId::new(), email);
        let ttl = Duration::seconds(ttl_secs);
        let token = service.issue_at(&claim, ttl, instant(issued)).unwrap();

        let elapsed = ((ttl_secs as f64) * elapsed_fraction) as i64;
        let elapsed = elapsed.min(ttl_secs - 1);
        prop_assert_eq!(service.verify_at(&token, instant(issued + elapsed)), Ok(claim));
        prop_assert_eq!(
            service.verify_at(&token, instant(issued + ttl_secs)),
            Err(VerifyError::Expired)
        );
    }

    #[test]
    fn test_swapped_payload_fails_signature(seed in 0u32..1000) {
        let service = service();
        let now = instant(1_700_000_000 + i64::from(seed));
        let mine = service
            .issue_at(&IdentityClaim::new(UserId::new(), "a@x.com"), Duration::hours(1), now)
            .unwrap();
        let theirs = service
            .issue_at(&IdentityClaim::new(UserId::new(), "b@x.com"), Duration::hours(1), now)
            .unwrap();

        let mine: Vec<&str> = mine.split('.').collect();
        let theirs: Vec<&str> = theirs.split('.').collect();
        let forged = format!("{}.{}.{}", mine[0], theirs[1], mine[2]);

        prop_assert_eq!(service.verify_at(&forged, now), Err(VerifyError::BadSignature));
    }

    #[test]
    fn test_arbitrary_strings_never_verify(token in "\\PC{0,64}") {
        prop_assert!(service().verify_at(&token, instant(1_700_000_000)).is_err());
    }
}
