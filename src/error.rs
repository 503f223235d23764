//! Error handling for the application

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::pricing::responses::PricingErrorResponse;
use crate::pricing::PricingError;
use crate::whatsapp::WhatsappError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found")]
    NotFound,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    #[error("WhatsApp error: {0}")]
    Whatsapp(#[from] WhatsappError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status_and_type(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Pricing(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.error_type()),
            AppError::Whatsapp(WhatsappError::QrCode(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "qr_code")
            }
            AppError::Whatsapp(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.error_type()),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status_and_type();

        let message = if status.is_server_error() {
            tracing::error!("{}", self);
            "Internal error".to_string()
        } else {
            tracing::debug!("Rejected request: {}", self);
            self.to_string()
        };

        let body = PricingErrorResponse {
            error_type: error_type.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
