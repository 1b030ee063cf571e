//! Error handling for the application

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::pricing::responses::PricingErrorResponse;
use crate::pricing::PricingError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Pricing(PricingError::InvalidArgument {
                parameter,
                constraint,
            }) => {
                tracing::warn!("Rejected pricing input: {}", self);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    PricingErrorResponse {
                        error_type: "invalid_argument".to_string(),
                        message: self.to_string(),
                        details: Some(json!({
                            "parameter": parameter,
                            "constraint": constraint,
                        })),
                    },
                )
            }
            AppError::Pricing(PricingError::NotFound { entity, id }) => (
                StatusCode::NOT_FOUND,
                PricingErrorResponse {
                    error_type: "not_found".to_string(),
                    message: self.to_string(),
                    details: Some(json!({ "entity": entity, "id": id })),
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
