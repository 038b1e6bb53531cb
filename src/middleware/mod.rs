// ABOUTME: HTTP middleware for request tracing and cross-origin access
// ABOUTME: Provides request ID generation, request spans, and CORS configuration

/// CORS configuration
pub mod cors;
/// Request id generation and request spans
pub mod tracing;

pub use self::cors::setup_cors;
pub use self::tracing::{create_request_span, RequestIdGenerator};
