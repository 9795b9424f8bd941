/**
 * Error Conversion
 *
 * This module turns an [`ApiError`] into the two client-facing shapes the
 * service exposes.
 *
 * # REST Response Format
 *
 * ```json
 * {
 *   "message": "Validation failed.",
 *   "data": [{ "field": "title", "message": "Title is invalid." }]
 * }
 * ```
 *
 * # GraphQL-style Format
 *
 * ```json
 * {
 *   "message": "Not authorized!",
 *   "code": 403
 * }
 * ```
 *
 * `data` is omitted whenever the error carries no field details.
 */

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::backend::error::types::ApiError;
use crate::shared::FieldError;

/// JSON body of a REST error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<FieldError>>,
}

/// Error entry in a GraphQL-style response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphQlError {
    pub message: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<FieldError>>,
}

impl ApiError {
    /// Format this error the way a GraphQL resolver reports it
    pub fn to_graphql(&self) -> GraphQlError {
        GraphQlError {
            message: self.message(),
            code: self.status_code().as_u16(),
            data: self.data().map(<[FieldError]>::to_vec),
        }
    }
}

impl IntoResponse for ApiError {
    /// Convert an API error into an HTTP response
    ///
    /// Server-side failures are logged here with their full cause; the
    /// client only sees the generic message.
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let body = ErrorBody {
            message: self.message(),
            data: self.data().map(<[FieldError]>::to_vec),
        };

        (status, Json(body)).into_response()
    }
}
