// ABOUTME: In-process HTTP helpers for driving the axum router in integration tests
// ABOUTME: Sends one request through the full middleware stack and buffers the response

use axum::{
    body::{to_bytes, Body},
    http::{request::Builder, HeaderMap, Method, Request, Response, StatusCode},
    Router,
};
use serde::de::DeserializeOwned;
use tower::ServiceExt;

/// Request under construction
pub struct AxumTestRequest {
    builder: Builder,
}

impl AxumTestRequest {
    fn with_method(method: Method, uri: &str) -> Self {
        Self {
            builder: Request::builder().method(method).uri(uri),
        }
    }

    /// GET request
    pub fn get(uri: &str) -> Self {
        Self::with_method(Method::GET, uri)
    }

    /// CORS preflight request
    #[allow(dead_code)]
    pub fn options(uri: &str) -> Self {
        Self::with_method(Method::OPTIONS, uri)
    }

    /// Add a request header
    #[allow(dead_code)]
    pub fn header(self, name: &str, value: &str) -> Self {
        Self {
            builder: self.builder.header(name, value),
        }
    }

    /// Run the request through `app`
    pub async fn send(self, app: Router) -> AxumTestResponse {
        let request = self.builder.body(Body::empty()).expect("valid test request");
        let response = app.oneshot(request).await.expect("router is infallible");
        AxumTestResponse::buffer(response).await
    }
}

/// Fully buffered response
pub struct AxumTestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl AxumTestResponse {
    async fn buffer(response: Response<Body>) -> Self {
        let (parts, body) = response.into_parts();
        let body = to_bytes(body, usize::MAX)
            .await
            .expect("readable response body");
        Self {
            status: parts.status,
            headers: parts.headers,
            body: body.to_vec(),
        }
    }

    /// Status code as a number
    pub const fn status(&self) -> u16 {
        self.status.as_u16()
    }

    /// Header value, if present and valid UTF-8
    #[allow(dead_code)]
    pub fn header(&self, name: &str) -> Option<String> {
        let value = self.headers.get(name)?;
        value.to_str().ok().map(str::to_owned)
    }

    /// Body decoded as JSON
    pub fn json<T: DeserializeOwned>(self) -> T {
        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!(
                "response body is not JSON ({e}): {}",
                String::from_utf8_lossy(&self.body)
            )
        })
    }
}
