//! Error types shared by the dashboard state and the HTTP layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Errors that can occur while operating on dashboard state
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Caller supplied a value the operation does not accept
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The referenced item does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// A state mutex was poisoned by a panicking holder
    #[error("failed to lock {0} state")]
    LockPoisoned(&'static str),

    /// Reading or writing the data directory failed
    #[error("storage error: {0}")]
    Storage(String),

    /// No async runtime was available to schedule the tick source
    #[error("runtime error: {0}")]
    Runtime(String),
}

impl DashboardError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::LockPoisoned(_) | Self::Storage(_) | Self::Runtime(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<anyhow::Error> for DashboardError {
    fn from(err: anyhow::Error) -> Self {
        Self::Storage(format!("{:#}", err))
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}

pub type DashboardResult<T> = Result<T, DashboardError>;
