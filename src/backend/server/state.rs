/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct holds:
 * - The token service, shared with the auth gate
 * - The auth and feed operation services
 *
 * Everything in it is immutable after startup and cheap to clone; the
 * stores behind the services do their own locking.
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::auth::service::AuthService;
use crate::backend::auth::sessions::TokenService;
use crate::backend::feed::service::FeedService;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Token issuer/verifier built from the configured secret
    pub tokens: Arc<TokenService>,

    /// Signup, login and status operations
    pub auth: AuthService,

    /// Post operations
    pub feed: FeedService,
}

/// Lets the auth gate extract the token service directly.
impl FromRef<AppState> for Arc<TokenService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

impl FromRef<AppState> for AuthService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth.clone()
    }
}

impl FromRef<AppState> for FeedService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.feed.clone()
    }
}
