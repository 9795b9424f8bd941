/**
 * Authentication Handler Types
 *
 * Request and response bodies for the `/auth` endpoints. Field names are
 * camelCase on the wire.
 */

use serde::{Deserialize, Serialize};

/// Sign up request
#[derive(Deserialize, Serialize, Debug)]
pub struct SignupRequest {
    pub email: String,
    pub name: String,
    /// Plaintext password (hashed before storage)
    pub password: String,
}

/// Sign up response
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub message: String,
    pub user_id: String,
}

/// Login request
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
///
/// The token is sent back as `Authorization: Bearer <token>` on later
/// requests.
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user_id: String,
}

/// Current status of the signed-in user
#[derive(Serialize, Deserialize, Debug)]
pub struct StatusResponse {
    pub status: String,
}

/// New status for the signed-in user
#[derive(Deserialize, Serialize, Debug)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Plain acknowledgement
#[derive(Serialize, Deserialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
