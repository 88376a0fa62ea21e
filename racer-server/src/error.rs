//! API error type and the bridge to the blocking stores

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use racer_core::{StoreError, StoreResult};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The blocking store call panicked or was cancelled
    #[error("store task failed: {0}")]
    TaskFailed(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Store(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::TaskFailed(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        (status, self.to_string()).into_response()
    }
}

/// Run a store call on the blocking pool
///
/// Stores may sleep to simulate latency, so they never run on a runtime
/// worker thread.
pub async fn call_store<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> StoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    let result = tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::TaskFailed(e.to_string()))?;
    Ok(result?)
}
