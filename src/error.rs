use crate::config::ConfigError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HealthPlanError>;

/// Wiring and bootstrap failures
///
/// Request-level failures never surface as this type; they are handled by
/// [`ControllerError`](crate::controller::ControllerError).
#[derive(Debug, Error)]
pub enum HealthPlanError {
    #[error("Dependency not found: {type_name}")]
    DependencyNotFound { type_name: String },

    #[error("Failed to downcast type: {type_name}")]
    DowncastFailed { type_name: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl axum::response::IntoResponse for HealthPlanError {
    fn into_response(self) -> axum::response::Response {
        tracing::error!(error = %self, "Service wiring error");
        (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            self.to_string(),
        )
            .into_response()
    }
}
