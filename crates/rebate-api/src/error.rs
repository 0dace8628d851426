use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rebate_types::{EpochId, RebateError};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Rebate(#[from] RebateError),

    #[error("missing or empty x-caller header")]
    MissingCaller,

    #[error("epoch {0} not found")]
    EpochNotFound(EpochId),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Rebate(e) => e.kind(),
            ApiError::MissingCaller => "MissingCaller",
            ApiError::EpochNotFound(_) => "EpochNotFound",
            ApiError::Internal(_) => "Internal",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Rebate(e) => match e {
                RebateError::Unauthorized { .. } => StatusCode::FORBIDDEN,
                RebateError::InvalidEpochId { .. } | RebateError::EpochNotEnded { .. } => {
                    StatusCode::CONFLICT
                }
                RebateError::MalformedAllocationData { .. }
                | RebateError::InvalidAmount(_)
                | RebateError::AmountOverflow => StatusCode::BAD_REQUEST,
                RebateError::NothingToClaim(_) => StatusCode::UNPROCESSABLE_ENTITY,
                RebateError::TransferFailed(_) => StatusCode::BAD_GATEWAY,
                RebateError::ClaimRejected { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::MissingCaller => StatusCode::UNAUTHORIZED,
            ApiError::EpochNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(kind = self.kind(), error = %self, "request failed");
        }
        let body = serde_json::json!({
            "error": self.kind(),
            "message": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}
