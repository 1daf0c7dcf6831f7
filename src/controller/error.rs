use crate::common::{ErrorBody, ErrorCode};
use crate::repository::RepositoryError;
use crate::service::ServiceError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use strum_macros::{Display, EnumString};

/// The six routes of an entity controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Operation {
    ListAll,
    GetOne,
    Create,
    Update,
    Delete,
    ListPaged,
}

impl Operation {
    /// Status of any failure under [`ErrorPolicy::Collapsed`]
    pub fn failure_status(self) -> StatusCode {
        match self {
            Operation::ListAll | Operation::GetOne | Operation::ListPaged => StatusCode::NOT_FOUND,
            Operation::Create | Operation::Update | Operation::Delete => StatusCode::BAD_REQUEST,
        }
    }
}

/// How controller failures are turned into responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ErrorPolicy {
    /// One generic payload; 404 for reads, 400 for writes and deletes
    #[default]
    Collapsed,
    /// Status and code follow the failure's cause
    Typed,
}

#[derive(Debug, thiserror::Error)]
pub enum Cause {
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Path, query or body could not be read
    #[error("Rejected request: {0}")]
    Rejected(String),

    #[error("Entity has no identifier")]
    MissingIdentifier,
}

/// A failed controller operation
#[derive(Debug, thiserror::Error)]
#[error("{operation} on {entity} failed: {cause}")]
pub struct ControllerError {
    pub operation: Operation,
    pub entity: &'static str,
    pub policy: ErrorPolicy,
    #[source]
    pub cause: Cause,
}

impl ControllerError {
    fn classify(&self) -> (StatusCode, ErrorCode, String) {
        const SANITIZED: &str = "An internal error occurred";

        match &self.cause {
            Cause::Service(ServiceError::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, ErrorCode::NotFound, self.cause.to_string())
            }
            Cause::Service(ServiceError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, ErrorCode::ValidationError, msg.clone())
            }
            Cause::Service(ServiceError::Conflict(msg)) => {
                (StatusCode::CONFLICT, ErrorCode::Conflict, msg.clone())
            }
            Cause::Service(ServiceError::Repository(RepositoryError::InvalidSortProperty(_))) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadRequest, self.cause.to_string())
            }
            Cause::Rejected(msg) => (StatusCode::BAD_REQUEST, ErrorCode::BadRequest, msg.clone()),
            Cause::Service(ServiceError::Repository(_)) | Cause::MissingIdentifier => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalError,
                SANITIZED.to_string(),
            ),
        }
    }
}

impl IntoResponse for ControllerError {
    fn into_response(self) -> Response {
        match &self.cause {
            Cause::Service(ServiceError::Repository(_)) | Cause::MissingIdentifier => {
                tracing::error!(
                    operation = %self.operation,
                    entity = self.entity,
                    error = %self.cause,
                    "Controller operation failed"
                );
            }
            _ => {
                tracing::warn!(
                    operation = %self.operation,
                    entity = self.entity,
                    error = %self.cause,
                    "Controller operation failed"
                );
            }
        }

        match self.policy {
            ErrorPolicy::Collapsed => ErrorBody::generic(self.operation.failure_status()),
            ErrorPolicy::Typed => {
                let (status, code, message) = self.classify();
                ErrorBody::typed(status, code, message)
            }
        }
        .into_response()
    }
}
