// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::{error, warn};

use crate::cloud::RenderError;
use crate::pipeline::PipelineError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,
}

#[derive(Debug, Clone)]
pub enum ApiError {
    NotFound(String),
    IndexOutOfRange { index: String, len: Option<usize> },
    InvalidRequest(String),
    ServiceUnavailable(String),
    InternalError(String),
}

impl ApiError {
    pub fn to_response(&self) -> ErrorResponse {
        let (error_type, details) = match self {
            ApiError::NotFound(_) => ("not_found", None),
            ApiError::IndexOutOfRange { index, len } => {
                let mut details = HashMap::new();
                details.insert(
                    "index".to_string(),
                    serde_json::Value::String(index.clone()),
                );
                if let Some(len) = len {
                    details.insert(
                        "item_count".to_string(),
                        serde_json::Value::Number((*len).into()),
                    );
                }
                ("not_found", Some(details))
            }
            ApiError::InvalidRequest(_) => ("invalid_request", None),
            ApiError::ServiceUnavailable(_) => ("service_unavailable", None),
            ApiError::InternalError(_) => ("internal_error", None),
        };

        ErrorResponse {
            error_type: error_type.to_string(),
            message: self.to_string(),
            details,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::NotFound(_) | ApiError::IndexOutOfRange { .. } => 404,
            ApiError::InvalidRequest(_) => 400,
            ApiError::ServiceUnavailable(_) => 503,
            ApiError::InternalError(_) => 500,
        }
    }
}

impl From<PipelineError> for ApiError {
    fn from(error: PipelineError) -> Self {
        match error {
            PipelineError::Fetch(e) => ApiError::ServiceUnavailable(e.to_string()),
            PipelineError::IndexOutOfRange { index, len } => ApiError::IndexOutOfRange {
                index: index.to_string(),
                len: Some(len),
            },
            e @ (PipelineError::NoItems { .. } | PipelineError::EmptyCorpus { .. }) => {
                ApiError::NotFound(e.to_string())
            }
            PipelineError::Render(e @ RenderError::InvalidConfig(_)) => {
                ApiError::InvalidRequest(e.to_string())
            }
            other => ApiError::InternalError(other.to_string()),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::IndexOutOfRange { index, len: Some(len) } => {
                write!(f, "Item index {} out of range ({} items)", index, len)
            }
            ApiError::IndexOutOfRange { index, len: None } => {
                write!(f, "Item index {} out of range", index)
            }
            ApiError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            ApiError::ServiceUnavailable(msg) => write!(f, "Service unavailable: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!("Request failed with {}: {}", status, self);
        } else {
            warn!("Request rejected with {}: {}", status, self);
        }
        (status, Json(self.to_response())).into_response()
    }
}
