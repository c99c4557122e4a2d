// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum AppError {
    #[error("missing authentication header")]
    MissingAuthHeader,
    #[error("invalid authentication scheme")]
    InvalidAuthScheme,
    /// Deliberately carries no detail about which check failed.
    #[error("unauthorized")]
    Unauthorized,
    #[error("cluster not found")]
    ClusterNotFound,
    #[error("cluster already exists")]
    ClusterExists,
    #[error("validation error: {0}")]
    ValidationError(String),
    #[error("internal server error")]
    InternalServerError,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::MissingAuthHeader => (
                StatusCode::BAD_REQUEST,
                "missing authentication header".to_string(),
            ),
            Self::InvalidAuthScheme => (
                StatusCode::BAD_REQUEST,
                "invalid authentication scheme".to_string(),
            ),
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            Self::ClusterNotFound => (StatusCode::NOT_FOUND, "cluster not found".to_string()),
            Self::ClusterExists => (StatusCode::CONFLICT, "cluster already exists".to_string()),
            Self::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_string(),
            ),
        };

        let body = Json(json!({"code": status.as_u16(), "message": message}));

        (status, body).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(source: validator::ValidationErrors) -> Self {
        tracing::debug!("[api] validation failed: {}", source);
        AppError::ValidationError(source.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("[api] rejected request body: {}", rejection);
        AppError::ValidationError(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}
