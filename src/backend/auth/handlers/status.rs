/**
 * Status Handlers
 *
 * `GET /auth/status` and `PATCH /auth/status` read and replace the
 * signed-in user's status line. Both need a valid bearer token.
 */

use axum::{extract::{rejection::JsonRejection, State}, response::Json};

use crate::backend::auth::handlers::types::{MessageResponse, StatusResponse, UpdateStatusRequest};
use crate::backend::auth::service::AuthService;
use crate::backend::error::ApiError;
use crate::backend::middleware::auth::AuthOutcome;

/// Get the signed-in user's status
///
/// # Errors
///
/// * `401 Unauthorized` - no valid token
/// * `404 Not Found` - the token's user no longer exists
pub async fn get_status(
    State(auth): State<AuthService>,
    outcome: AuthOutcome,
) -> Result<Json<StatusResponse>, ApiError> {
    let status = auth.status(&outcome).await?;
    Ok(Json(StatusResponse { status }))
}

/// Replace the signed-in user's status
///
/// # Errors
///
/// * `401 Unauthorized` - no valid token
/// * `404 Not Found` - the token's user no longer exists
/// * `422 Unprocessable Entity` - empty status or malformed body
pub async fn update_status(
    State(auth): State<AuthService>,
    outcome: AuthOutcome,
    request: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    outcome.require()?;
    let Json(request) = request?;
    auth.update_status(&outcome, &request.status).await?;
    Ok(Json(MessageResponse::new("User updated.")))
}
