/**
 * Signup Handler
 *
 * `PUT /auth/signup` creates a user. The response carries the new user's
 * id; clients log in separately to obtain a token.
 */

use axum::{extract::{rejection::JsonRejection, State}, http::StatusCode, response::Json};

use crate::backend::auth::handlers::types::{SignupRequest, SignupResponse};
use crate::backend::auth::service::{AuthService, SignupInput};
use crate::backend::error::ApiError;

/// Signup handler
///
/// # Errors
///
/// * `422 Unprocessable Entity` - invalid email, password shorter than five
///   characters, empty name, or email already registered
/// * `500 Internal Server Error` - hashing or store failure
///
/// # Example Request
///
/// ```http
/// PUT /auth/signup HTTP/1.1
/// Content-Type: application/json
///
/// { "email": "a@x.com", "name": "Ann", "password": "secret1" }
/// ```
pub async fn signup(
    State(auth): State<AuthService>,
    request: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SignupResponse>), ApiError> {
    let Json(request) = request?;
    let user = auth
        .signup(SignupInput {
            email: request.email,
            name: request.name,
            password: request.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User created!".to_string(),
            user_id: user.id.to_string(),
        }),
    ))
}
