/**
 * Session Tokens
 *
 * Issues and verifies the signed, time-bounded tokens handed out at login.
 * Tokens are HS256 JWTs carrying the user id (`sub`), the email, and the
 * issue/expiry instants. Nothing is stored server side: validity is
 * recomputed from the token and the shared secret on every request, so the
 * only way a token stops working is by expiring.
 *
 * The secret is handed to [`TokenService::new`] once at startup. Expiry is
 * checked here rather than by `jsonwebtoken` so that the clock can be
 * injected (`issue_at` / `verify_at`) and so that a token is rejected as
 * soon as `now >= exp`, with no leeway.
 */

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::UserId;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// User ID
    sub: String,
    /// Email
    email: String,
    /// Issued at time (Unix timestamp)
    iat: i64,
    /// Expiration time (Unix timestamp)
    exp: i64,
}

/// Identity carried inside a session token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityClaim {
    pub user_id: UserId,
    pub email: String,
}

impl IdentityClaim {
    pub fn new(user_id: UserId, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
        }
    }
}

/// Reasons a presented token is refused
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum VerifyError {
    #[error("token is malformed")]
    MalformedToken,
    #[error("token signature does not match")]
    BadSignature,
    #[error("token has expired")]
    Expired,
}

/// Reasons a token could not be issued
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token lifetime must be positive")]
    InvalidTtl,
    #[error("failed to sign token: {0}")]
    Encode(#[from] jsonwebtoken::errors::Error),
}

/// Signs and verifies session tokens with a shared secret
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &ALGORITHM)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// Create a token service from the shared signing secret.
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        // Expiry is enforced in `verify_at` against an injectable clock
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["sub", "exp"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issue a token for `claim` valid for `ttl` from now.
    pub fn issue(&self, claim: &IdentityClaim, ttl: Duration) -> Result<String, TokenError> {
        self.issue_at(claim, ttl, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(
        &self,
        claim: &IdentityClaim,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        if ttl <= Duration::zero() {
            return Err(TokenError::InvalidTtl);
        }
        let expires = now.checked_add_signed(ttl).ok_or(TokenError::InvalidTtl)?;

        let claims = Claims {
            sub: claim.user_id.to_string(),
            email: claim.email.clone(),
            iat: now.timestamp(),
            exp: expires.timestamp(),
        };

        Ok(encode(&Header::new(ALGORITHM), &claims, &self.encoding)?)
    }

    /// Verify a token against the current time.
    pub fn verify(&self, token: &str) -> Result<IdentityClaim, VerifyError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token as if the current time were `now`.
    ///
    /// The signature is checked before anything in the payload is trusted;
    /// expiry is checked last.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<IdentityClaim, VerifyError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature => VerifyError::BadSignature,
                ErrorKind::ExpiredSignature => VerifyError::Expired,
                _ => VerifyError::MalformedToken,
            }
        })?;
        let claims = data.claims;

        if now.timestamp() >= claims.exp {
            return Err(VerifyError::Expired);
        }

        let user_id = UserId::parse(&claims.sub).map_err(|_| VerifyError::MalformedToken)?;
        Ok(IdentityClaim::new(user_id, claims.email))
    }
}
