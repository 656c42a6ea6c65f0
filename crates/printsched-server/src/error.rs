//! Maps the scheduler's internal error taxonomy onto HTTP statuses at one
//! boundary function (spec §7), the same shape as the teacher's single
//! `match` from domain error to process exit code.

use crate::types::ErrorResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use printsched_persist::PersistError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    InputInvalid(String),
    #[error("snapshot unavailable: {0}")]
    SnapshotUnavailable(String),
    #[error("nuclear wipe failed: {0}")]
    NuclearWipeFailed(String),
}

impl From<PersistError> for ApiError {
    fn from(err: PersistError) -> Self {
        match err {
            PersistError::SnapshotUnavailable(msg) => ApiError::SnapshotUnavailable(msg),
            PersistError::NuclearWipeFailed(msg) => ApiError::NuclearWipeFailed(msg),
            PersistError::WriteFailed { stage_id, reason } => {
                ApiError::SnapshotUnavailable(format!("stage {stage_id}: {reason}"))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InputInvalid(_) => StatusCode::BAD_REQUEST,
            ApiError::SnapshotUnavailable(_) | ApiError::NuclearWipeFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = ErrorResponse {
            ok: false,
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
