use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use strum_macros::{AsRefStr, Display};

/// Message of every failure under the collapsed error policy.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred, please try again later.";

/// Machine-readable failure class, rendered as `NOT_FOUND`, `CONFLICT`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotFound,
    ValidationError,
    BadRequest,
    Conflict,
    InternalError,
}

/// Error payload written by controllers
///
/// The collapsed form only carries `error`; the typed form adds the code, the
/// numeric status and a timestamp.
///
/// # Example
/// ```
/// use axum::http::StatusCode;
/// use healthplan::common::ErrorBody;
///
/// let body = ErrorBody::generic(StatusCode::NOT_FOUND);
/// assert_eq!(
///     serde_json::to_value(&body).unwrap(),
///     serde_json::json!({ "error": "An error occurred, please try again later." })
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    #[serde(skip)]
    http_status: StatusCode,
}

impl ErrorBody {
    pub fn generic(status: StatusCode) -> Self {
        Self {
            error: GENERIC_ERROR_MESSAGE.to_string(),
            code: None,
            status_code: None,
            timestamp: None,
            http_status: status,
        }
    }

    pub fn typed(status: StatusCode, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: Some(code.to_string()),
            status_code: Some(status.as_u16()),
            timestamp: Some(chrono::Utc::now().to_rfc3339()),
            http_status: status,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.http_status
    }
}

impl IntoResponse for ErrorBody {
    fn into_response(self) -> Response {
        (self.http_status, Json(self)).into_response()
    }
}
