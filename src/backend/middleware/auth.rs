/**
 * Authentication Gate
 *
 * Runs on every request. It looks for an `Authorization: Bearer <token>`
 * header, verifies the token, and records the result as an [`AuthOutcome`]
 * in the request extensions. The gate never rejects a request: a missing,
 * malformed, forged or expired token simply yields
 * [`AuthOutcome::Unauthenticated`], and each operation decides for itself
 * whether it needs an authenticated caller.
 */

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::backend::auth::sessions::TokenService;
use crate::backend::error::ApiError;
use crate::shared::UserId;

/// Authentication state of a single request
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AuthOutcome {
    /// No usable token was presented
    #[default]
    Unauthenticated,
    /// A valid token was presented for this user
    Authenticated { user_id: UserId, email: String },
}

impl AuthOutcome {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            Self::Authenticated { user_id, .. } => Some(user_id),
            Self::Unauthenticated => None,
        }
    }

    /// The authenticated user, or `NotAuthenticated` for anonymous callers.
    pub fn require(&self) -> Result<&UserId, ApiError> {
        self.user_id().ok_or(ApiError::NotAuthenticated)
    }
}

/// Derive the outcome for a set of request headers.
pub fn authenticate(tokens: &TokenService, headers: &HeaderMap) -> AuthOutcome {
    let Some(header) = headers.get(AUTHORIZATION) else {
        return AuthOutcome::Unauthenticated;
    };
    let Ok(value) = header.to_str() else {
        tracing::debug!("Authorization header is not valid UTF-8");
        return AuthOutcome::Unauthenticated;
    };
    let Some(token) = value.strip_prefix("Bearer ").map(str::trim).filter(|t| !t.is_empty()) else {
        tracing::debug!("Authorization header is not a bearer token");
        return AuthOutcome::Unauthenticated;
    };

    match tokens.verify(token) {
        Ok(claim) => AuthOutcome::Authenticated {
            user_id: claim.user_id,
            email: claim.email,
        },
        Err(e) => {
            tracing::debug!("Ignoring rejected token: {}", e);
            AuthOutcome::Unauthenticated
        }
    }
}

/// Authentication gate middleware
///
/// Attaches an [`AuthOutcome`] to the request and always forwards it.
pub async fn auth_gate(
    State(tokens): State<Arc<TokenService>>,
    mut request: Request,
    next: Next,
) -> Response {
    let outcome = authenticate(&tokens, request.headers());
    request.extensions_mut().insert(outcome);
    next.run(request).await
}

impl<S> FromRequestParts<S> for AuthOutcome
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Routes mounted without the gate see an anonymous caller
        Ok(parts
            .extensions
            .get::<AuthOutcome>()
            .cloned()
            .unwrap_or_default())
    }
}
