/**
 * Login Handler
 *
 * `POST /auth/login` exchanges an email and password for a session token.
 *
 * # Security
 *
 * - Unknown email and wrong password both return the same 401 body
 * - Passwords are never logged or returned in responses
 */

use axum::{extract::{rejection::JsonRejection, State}, response::Json};

use crate::backend::auth::handlers::types::{LoginRequest, LoginResponse};
use crate::backend::auth::service::AuthService;
use crate::backend::error::ApiError;

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - unknown email or wrong password
/// * `500 Internal Server Error` - store or token failure
///
/// # Example Response
///
/// ```json
/// {
///   "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///   "userId": "123e4567-e89b-12d3-a456-426614174000"
/// }
/// ```
pub async fn login(
    State(auth): State<AuthService>,
    request: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(request) = request?;
    let result = auth.login(&request.email, &request.password).await?;

    Ok(Json(LoginResponse {
        token: result.token,
        user_id: result.user_id.to_string(),
    }))
}
