//! Error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use statehouse_core::budget::BudgetError;
use statehouse_shared::AppError;
use tracing::error;

/// Handler error rendered as `{"error", "message"}` JSON.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<BudgetError> for ApiError {
    fn from(err: BudgetError) -> Self {
        let app = match &err {
            BudgetError::Fetch(_) | BudgetError::Timeout(_) => {
                AppError::ExternalService(err.to_string())
            }
            BudgetError::UnknownTaxonomy(_) => AppError::Validation(err.to_string()),
            BudgetError::GroupNotFound { .. } => AppError::NotFound(err.to_string()),
            BudgetError::Cancelled => AppError::Internal(err.to_string()),
        };
        Self(app)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        }

        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": self.0.to_string(),
            })),
        )
            .into_response()
    }
}
