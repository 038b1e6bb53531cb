// ABOUTME: Unified error type for the nutrition facts server with HTTP status mapping
// ABOUTME: Wraps normalization, upstream and input failures into a JSON error envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Error handling
//!
//! Handlers and clients return [`AppResult`]. An [`AppError`] pairs a stable
//! [`ErrorCode`] with a message and renders as
//!
//! ```json
//! { "error": { "code": "RESOURCE_NOT_FOUND", "message": "...", "resource_id": "42" } }
//! ```

use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use nutrition_core::NormalizeError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;
use tracing::{debug, error};

type BoxedSource = Box<dyn StdError + Send + Sync>;

/// Stable, client-visible error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Malformed query, id or portion
    InvalidInput,
    /// Food id unknown upstream
    ResourceNotFound,
    /// Upstream unreachable or answered with an unexpected status
    ExternalServiceError,
    /// Upstream quota exhausted
    ExternalRateLimited,
    /// Upstream record matched no known category shape
    UpstreamShapeUnrecognized,
    /// Upstream record lacks data its category requires
    UpstreamDataIncomplete,
    /// Server misconfiguration
    ConfigError,
    /// Anything else
    InternalError,
}

impl ErrorCode {
    /// HTTP status returned for this code
    #[must_use]
    pub const fn status_code(self) -> StatusCode {
        match self {
            Self::InvalidInput => StatusCode::BAD_REQUEST,
            Self::ResourceNotFound => StatusCode::NOT_FOUND,
            Self::ExternalServiceError
            | Self::UpstreamShapeUnrecognized
            | Self::UpstreamDataIncomplete => StatusCode::BAD_GATEWAY,
            Self::ExternalRateLimited => StatusCode::SERVICE_UNAVAILABLE,
            Self::ConfigError | Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP status as a number
    #[must_use]
    pub const fn http_status(self) -> u16 {
        self.status_code().as_u16()
    }

    /// Short description used as the display prefix
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidInput => "Invalid input",
            Self::ResourceNotFound => "Not found",
            Self::ExternalServiceError => "Food database unavailable",
            Self::ExternalRateLimited => "Food database quota exceeded",
            Self::UpstreamShapeUnrecognized => "The food record has an unrecognized format",
            Self::UpstreamDataIncomplete => "The food record is missing required data",
            Self::ConfigError => "Configuration error",
            Self::InternalError => "Internal server error",
        }
    }
}

/// Application error
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Id of the resource the request was about
    pub resource_id: Option<String>,
    /// Structured details for the client
    pub details: Option<Value>,
    /// Underlying cause
    #[source]
    pub source: Option<BoxedSource>,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Error with a code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            resource_id: None,
            details: None,
            source: None,
        }
    }

    /// Attach the id of the resource involved
    #[must_use]
    pub fn with_resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    /// Attach structured details
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Attach the underlying cause
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// HTTP status as a number
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// Named resource does not exist
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResourceNotFound, format!("{} not found", resource.into()))
    }

    /// Caller input rejected
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Startup or client construction failed
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Upstream request failed
    #[must_use]
    pub fn external_service(service: &str, message: impl fmt::Display) -> Self {
        Self::new(ErrorCode::ExternalServiceError, format!("{service}: {message}"))
    }

    /// Upstream quota exhausted
    #[must_use]
    pub fn external_rate_limited(service: &str, limit_per_minute: u32) -> Self {
        Self::new(
            ErrorCode::ExternalRateLimited,
            format!("{service}: more than {limit_per_minute} requests per minute"),
        )
        .with_details(json!({ "limit_per_minute": limit_per_minute }))
    }
}

/// JSON body of an error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error payload
    pub error: ErrorBody,
}

/// Payload of [`ErrorResponse`]
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Stable error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Resource id when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    /// Structured details when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self {
            error: ErrorBody {
                code: error.code,
                message: error.message,
                resource_id: error.resource_id,
                details: error.details,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.code.status_code();
        if status.is_server_error() {
            error!(code = ?self.code, error = %self, "Request failed");
        } else {
            debug!(code = ?self.code, error = %self, "Request rejected");
        }
        (status, Json(ErrorResponse::from(self))).into_response()
    }
}

impl From<NormalizeError> for AppError {
    fn from(error: NormalizeError) -> Self {
        let code = match &error {
            NormalizeError::UnrecognizedShape { .. } => ErrorCode::UpstreamShapeUnrecognized,
            NormalizeError::MissingPortionData { .. } => ErrorCode::UpstreamDataIncomplete,
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::new(ErrorCode::InternalError, format!("{error:#}"))
    }
}
