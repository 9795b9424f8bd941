/**
 * Authentication Operations
 *
 * Signup, login and the status operations for the signed-in user. REST
 * handlers are thin wrappers around these; every operation takes the
 * request's [`AuthOutcome`] explicitly and returns a typed [`ApiError`].
 *
 * # Login
 *
 * 1. Normalise the email and look the user up
 * 2. Verify the password against the stored digest (awaited)
 * 3. Issue a token carrying the user id and email
 *
 * An unknown email and a wrong password produce the same
 * `InvalidCredentials` error; only the logs tell them apart.
 */

use std::sync::Arc;

use chrono::Duration;

use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::sessions::{IdentityClaim, TokenService};
use crate::backend::auth::users::{NewUser, User, UserStore};
use crate::backend::error::ApiError;
use crate::backend::middleware::auth::AuthOutcome;
use crate::shared::validation::{normalize_email, validate_signup, validate_status};
use crate::shared::UserId;

/// Signup input
#[derive(Debug, Clone)]
pub struct SignupInput {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// Result of a successful login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginResult {
    pub token: String,
    pub user_id: UserId,
}

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    tokens: Arc<TokenService>,
    token_ttl: Duration,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: PasswordHasher,
        tokens: Arc<TokenService>,
        token_ttl: Duration,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
            token_ttl,
        }
    }

    /// Register a new user.
    ///
    /// # Errors
    ///
    /// * `Validation` - bad email, short password, empty name, or the email
    ///   is already registered
    pub async fn signup(&self, input: SignupInput) -> Result<User, ApiError> {
        let email = normalize_email(&input.email);
        let errors = validate_signup(&email, &input.password, &input.name);
        if !errors.is_empty() {
            tracing::debug!("Signup rejected: {} invalid field(s)", errors.len());
            return Err(ApiError::Validation(errors));
        }

        if self.users.find_by_email(&email).await?.is_some() {
            tracing::warn!("Signup attempted for existing email: {}", email);
            return Err(ApiError::invalid_field("email", "E-Mail address already exists!"));
        }

        let password_hash = self.hasher.hash(&input.password).await?;
        let user = self
            .users
            .create(NewUser {
                email,
                name: input.name.trim().to_string(),
                password_hash,
            })
            .await?;

        tracing::info!("User created: {} ({})", user.id, user.email);
        Ok(user)
    }

    /// Exchange credentials for a session token.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, ApiError> {
        let email = normalize_email(email);

        let Some(user) = self.users.find_by_email(&email).await? else {
            tracing::warn!("Login failed, no user with email: {}", email);
            return Err(ApiError::InvalidCredentials);
        };

        if !self.hasher.verify(password, &user.password_hash).await {
            tracing::warn!("Login failed, wrong password for user: {}", user.id);
            return Err(ApiError::InvalidCredentials);
        }

        let token = self
            .tokens
            .issue(&IdentityClaim::new(user.id, user.email.clone()), self.token_ttl)?;

        tracing::info!("User logged in: {} ({})", user.id, user.email);
        Ok(LoginResult {
            token,
            user_id: user.id,
        })
    }

    /// Load the signed-in user.
    pub async fn user(&self, outcome: &AuthOutcome) -> Result<User, ApiError> {
        let user_id = outcome.require()?;
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApiError::not_found("User not found."))
    }

    /// Status line of the signed-in user.
    pub async fn status(&self, outcome: &AuthOutcome) -> Result<String, ApiError> {
        Ok(self.user(outcome).await?.status)
    }

    /// Replace the signed-in user's status line.
    pub async fn update_status(&self, outcome: &AuthOutcome, status: &str) -> Result<User, ApiError> {
        let mut user = self.user(outcome).await?;

        let errors = validate_status(status);
        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }

        user.status = status.trim().to_string();
        let user = self.users.save(&user).await?;
        tracing::info!("Status updated for user: {}", user.id);
        Ok(user)
    }
}
