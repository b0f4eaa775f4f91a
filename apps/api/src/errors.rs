use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::assistant::gateway::GatewayError;
use crate::assistant::validation::{FieldIssue, ValidationError};

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    Validation {
        message: String,
        details: Vec<FieldIssue>,
    },

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    ProviderAuth(String),

    #[error("{0}")]
    Provider(String),

    #[error("{0}")]
    Configuration(String),
}

impl AppError {
    /// 400 for a body that failed to deserialize (bad JSON, wrong types, missing fields).
    pub fn invalid_body(message: &str, rejection: JsonRejection) -> Self {
        AppError::Validation {
            message: message.to_string(),
            details: vec![FieldIssue::new("body", rejection.body_text())],
        }
    }

    /// 400 for a path segment that does not parse (e.g. a non-numeric id).
    pub fn invalid_path(message: &str, rejection: PathRejection) -> Self {
        AppError::Validation {
            message: message.to_string(),
            details: vec![FieldIssue::new("path", rejection.body_text())],
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        let message = match &e {
            ValidationError::MissingTag(_) => e.to_string(),
            _ => "Invalid input format".to_string(),
        };
        AppError::Validation {
            message,
            details: e.details(),
        }
    }
}

impl From<GatewayError> for AppError {
    fn from(e: GatewayError) -> Self {
        match e {
            GatewayError::ProviderAuth(msg) => AppError::ProviderAuth(msg),
            other @ GatewayError::Provider(_) => AppError::Provider(other.to_string()),
            other @ GatewayError::Configuration => AppError::Configuration(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::Validation { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::ProviderAuth(msg) => {
                tracing::error!("Provider auth error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "PROVIDER_AUTH_ERROR")
            }
            AppError::Provider(msg) => {
                tracing::error!("Provider error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "PROVIDER_ERROR")
            }
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIGURATION_ERROR")
            }
        };

        let mut body = json!({
            "error": self.to_string(),
            "code": code,
        });
        if let AppError::Validation { details, .. } = &self {
            if !details.is_empty() {
                body["details"] = json!(details);
            }
        }

        (status, Json(body)).into_response()
    }
}
