//! HTTP client for the Tokoku backend API
//!
//! JSON helpers used by the route handlers, plus a raw `forward` used by the
//! host router's backend-proxy rule.

use std::time::Duration;

use axum::{
    body::Body,
    http::{
        header::{CONTENT_LENGTH, HOST},
        HeaderMap, HeaderName, HeaderValue, Method, Request, Response, StatusCode,
    },
    response::IntoResponse,
    Json,
};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use url::Url;

/// Headers that describe a single hop and must not be forwarded
const HOP_BY_HOP_HEADERS: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Error type for backend calls
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend URL cannot carry a path: {0}")]
    InvalidBaseUrl(String),

    #[error("Backend returned a non-JSON body (status {0})")]
    InvalidBody(StatusCode),

    #[error("Failed to read request body: {0}")]
    RequestBody(String),
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Status and JSON body of a backend response
#[derive(Debug, Clone)]
pub struct BackendResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl BackendResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Non-empty `message` field of the body, if any
    pub fn message(&self) -> Option<&str> {
        self.body
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.trim().is_empty())
    }

    /// `message` from the body, or `fallback` when the backend sent none
    pub fn message_or(&self, fallback: &str) -> String {
        self.message().unwrap_or(fallback).to_string()
    }
}

impl IntoResponse for BackendResponse {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Client for the backend API
#[derive(Clone)]
pub struct BackendClient {
    http: Client,
    base_url: Url,
}

impl BackendClient {
    /// Create a client rooted at `base_url` with a per-request timeout
    pub fn new(base_url: Url, timeout: Duration) -> BackendResult<Self> {
        if base_url.cannot_be_a_base() {
            return Err(BackendError::InvalidBaseUrl(base_url.to_string()));
        }

        let http = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .build()?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build a backend URL from path segments. Segments are percent-encoded,
    /// so a path parameter can never climb out of its position.
    pub fn endpoint(&self, segments: &[&str]) -> BackendResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| BackendError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET a JSON resource. `query` is appended verbatim.
    pub async fn get_json(
        &self,
        segments: &[&str],
        query: Option<&str>,
    ) -> BackendResult<BackendResponse> {
        let mut url = self.endpoint(segments)?;
        url.set_query(query);

        let request = self
            .http
            .get(url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json");

        Self::execute(request).await
    }

    /// Send a JSON body with the given method
    pub async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
    ) -> BackendResult<BackendResponse> {
        let url = self.endpoint(segments)?;

        let request = self
            .http
            .request(method, url)
            .header("Accept", "application/json")
            .json(body);

        Self::execute(request).await
    }

    /// Check that the backend answers at all (any status counts)
    pub async fn ping(&self) -> bool {
        self.http.get(self.base_url.clone()).send().await.is_ok()
    }

    async fn execute(request: reqwest::RequestBuilder) -> BackendResult<BackendResponse> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        let body = serde_json::from_str(&text).map_err(|_| BackendError::InvalidBody(status))?;

        Ok(BackendResponse { status, body })
    }

    /// Forward a request to an absolute URL and relay the response.
    ///
    /// Method, headers (minus hop-by-hop and `Host`) and body are passed on
    /// unchanged; the original host travels in `x-forwarded-host`.
    pub async fn forward(
        &self,
        request: Request<Body>,
        target: Url,
        body_limit: usize,
    ) -> BackendResult<Response<Body>> {
        let (parts, body) = request.into_parts();
        let body = axum::body::to_bytes(body, body_limit)
            .await
            .map_err(|e| BackendError::RequestBody(e.to_string()))?;

        let mut headers = parts.headers;
        if let Some(host) = headers.remove(HOST) {
            headers.insert(HeaderName::from_static("x-forwarded-host"), host);
        }
        strip_hop_by_hop(&mut headers);

        let upstream = self
            .http
            .request(parts.method, target)
            .headers(headers)
            .body(body)
            .send()
            .await?;

        let status = upstream.status();
        let mut response_headers = upstream.headers().clone();
        strip_hop_by_hop(&mut response_headers);
        response_headers.remove(CONTENT_LENGTH);
        let bytes = upstream.bytes().await?;

        let mut response = Response::new(Body::from(bytes));
        *response.status_mut() = status;
        *response.headers_mut() = response_headers;
        Ok(response)
    }
}

/// Remove hop-by-hop headers, including any named in `Connection`
pub fn strip_hop_by_hop(headers: &mut HeaderMap) {
    let listed: Vec<HeaderName> = headers
        .get_all("connection")
        .iter()
        .filter_map(|value: &HeaderValue| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .filter_map(|name| HeaderName::from_bytes(name.trim().as_bytes()).ok())
        .collect();

    for name in listed {
        headers.remove(name);
    }
    for name in HOP_BY_HOP_HEADERS {
        headers.remove(*name);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn client(base: &str) -> BackendClient {
        BackendClient::new(Url::parse(base).unwrap(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let root = client("http://localhost:8080");
        assert_eq!(
            root.endpoint(&["api", "order", "abc-123"]).unwrap().as_str(),
            "http://localhost:8080/api/order/abc-123"
        );
        let escaped = root.endpoint(&["api", "order", "../admin"]).unwrap();
        assert!(escaped.as_str().starts_with("http://localhost:8080/api/order/"));
        assert_eq!(escaped.path_segments().map(|s| s.count()), Some(3));

        let nested = client("http://backend.internal/tokoku/");
        assert_eq!(
            nested.endpoint(&["api", "checkout"]).unwrap().as_str(),
            "http://backend.internal/tokoku/api/checkout"
        );
    }

    #[test]
    fn test_strip_hop_by_hop() {
        let mut headers = HeaderMap::new();
        headers.insert("connection", HeaderValue::from_static("keep-alive, x-trace"));
        headers.insert("keep-alive", HeaderValue::from_static("timeout=5"));
        headers.insert("x-trace", HeaderValue::from_static("1"));
        headers.insert("transfer-encoding", HeaderValue::from_static("chunked"));
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        strip_hop_by_hop(&mut headers);

        assert_eq!(headers.len(), 1);
        assert!(headers.contains_key("content-type"));
    }

    #[test]
    fn test_response_message_fallback() {
        let response = BackendResponse {
            status: StatusCode::NOT_FOUND,
            body: json!({ "message": "" }),
        };
        assert_eq!(response.message_or("Gagal"), "Gagal");

        let response = BackendResponse {
            status: StatusCode::NOT_FOUND,
            body: json!({ "message": "Toko tidak ada" }),
        };
        assert_eq!(response.message_or("Gagal"), "Toko tidak ada");
    }

    #[tokio::test]
    async fn test_get_json_passes_query_verbatim() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/public/stores")
            .match_query(Matcher::Exact("domain=tokobunga.id&page=2".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success":true,"data":[]}"#)
            .create_async()
            .await;

        let response = client(&server.url())
            .get_json(&["api", "public", "stores"], Some("domain=tokobunga.id&page=2"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(response.is_success());
        assert_eq!(response.body, json!({ "success": true, "data": [] }));
    }

    #[tokio::test]
    async fn test_send_json_returns_error_status_with_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/checkout")
            .match_body(Matcher::Json(json!({ "items": [1] })))
            .with_status(422)
            .with_body(r#"{"success":false,"message":"Stok habis"}"#)
            .create_async()
            .await;

        let response = client(&server.url())
            .send_json(Method::POST, &["api", "checkout"], &json!({ "items": [1] }))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.message(), Some("Stok habis"));
    }

    #[tokio::test]
    async fn test_non_json_body_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/order/1")
            .with_status(502)
            .with_body("<html>Bad Gateway</html>")
            .create_async()
            .await;

        let result = client(&server.url()).get_json(&["api", "order", "1"], None).await;
        assert!(matches!(
            result,
            Err(BackendError::InvalidBody(StatusCode::BAD_GATEWAY))
        ));
    }

    #[tokio::test]
    async fn test_forward_relays_method_body_and_status() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/api/products/7")
            .match_query(Matcher::Exact("x=1".into()))
            .match_header("x-forwarded-host", "aidareu.com")
            .match_header("authorization", "Bearer token")
            .match_body(r#"{"name":"Mawar"}"#)
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"ok":true}"#)
            .create_async()
            .await;

        let request = Request::builder()
            .method(Method::PUT)
            .uri("/api/proxy/products/7?x=1")
            .header("host", "aidareu.com")
            .header("authorization", "Bearer token")
            .header("connection", "keep-alive")
            .body(Body::from(r#"{"name":"Mawar"}"#))
            .unwrap();

        let target = Url::parse(&format!("{}/api/products/7?x=1", server.url())).unwrap();
        let response = client("http://localhost:8080")
            .forward(request, target, 1024)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], br#"{"ok":true}"#);
    }

    #[tokio::test]
    async fn test_forward_rejects_oversized_body() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/proxy/upload")
            .body(Body::from(vec![0u8; 64]))
            .unwrap();

        let target = Url::parse("http://localhost:9/api/upload").unwrap();
        let result = client("http://localhost:8080")
            .forward(request, target, 16)
            .await;

        assert!(matches!(result, Err(BackendError::RequestBody(_))));
    }
}
