use axum::{Json, http::StatusCode, response::IntoResponse, response::Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use loadsim_core::CoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ApiError {
    /// HTTP status this error maps to.
    ///
    /// Invalid policy names are client errors; a missing active task id
    /// is an internal consistency violation; a launch failure means the
    /// agent could not take the work right now.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Core(CoreError::InvalidPolicy(_)) => StatusCode::BAD_REQUEST,
            ApiError::Core(CoreError::NotFound(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Core(CoreError::LaunchFailed(_)) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(%self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use loadsim_model::InvalidPolicy;

    #[test]
    fn invalid_policy_is_client_error() {
        let err = ApiError::Core(CoreError::InvalidPolicy(InvalidPolicy("bogus".into())));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_is_internal() {
        let err = ApiError::Core(CoreError::NotFound("task-1".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn launch_failed_is_unavailable() {
        let err = ApiError::Core(CoreError::LaunchFailed("no runtime".into()));
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
