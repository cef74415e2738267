//! # ApiClient — the one request helper every page goes through
//!
//! Builds the URL from the configured origin, sends through a [`Transport`],
//! and interprets the raw response with a fixed policy:
//!
//! | Order | Condition | Result |
//! |-------|-----------|--------|
//! | 1 | status 401 | unauthorized hook runs once, [`ApiError::Unauthorized`] |
//! | 2 | body empty or not JSON | [`ApiError::Parse`] with status and reason phrase |
//! | 3 | any other non-2xx | [`ApiError::Application`] with the server `message` verbatim, else a generic message carrying the status |
//! | 4 | 2xx | the parsed JSON value |
//!
//! 401 is checked first because the server does not promise a JSON body or a
//! `message` field on it. Typed endpoint methods (see [`crate::endpoints`]) add
//! one more rule on top: the envelope's `status` must be `"success"`.

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::transport::{ApiRequest, HttpTransport, Method, RawResponse, RequestBody, Transport};

const UNAUTHORIZED: u16 = 401;

/// Side effect run when any request comes back 401.
pub type UnauthorizedHook = Rc<dyn Fn()>;

/// Credentialed JSON client for the recommendation API.
#[derive(Clone)]
pub struct ApiClient<T: Transport = HttpTransport> {
    transport: T,
    base_url: String,
    on_unauthorized: Option<UnauthorizedHook>,
}

impl ApiClient<HttpTransport> {
    /// Client over the default HTTP transport.
    pub fn http(base_url: impl Into<String>) -> Self {
        Self::new(HttpTransport::new(), base_url)
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            on_unauthorized: None,
        }
    }

    /// Install the session-expired side effect.
    pub fn with_unauthorized_hook(mut self, hook: impl Fn() + 'static) -> Self {
        self.on_unauthorized = Some(Rc::new(hook));
        self
    }

    /// Absolute URL for an endpoint path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// URL for a server-hosted file such as a profile photo. Absolute, data
    /// and blob URLs pass through.
    pub fn media_url(&self, path: &str) -> String {
        const PASS_THROUGH: [&str; 4] = ["http://", "https://", "data:", "blob:"];
        if PASS_THROUGH.iter().any(|p| path.starts_with(p)) {
            return path.to_string();
        }
        if path.starts_with('/') {
            self.url(path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Send a request and return the parsed JSON body.
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> Result<Value, ApiError> {
        let raw = self.send(method, path, body).await?;
        self.interpret(raw)
    }

    /// Send a request whose success body is binary (e.g. a PDF).
    pub async fn call_binary(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> Result<Vec<u8>, ApiError> {
        let raw = self.send(method, path, body).await?;
        if raw.status == UNAUTHORIZED {
            return Err(self.unauthorized(path, &raw.body));
        }
        if !raw.is_success() {
            let message = serde_json::from_slice::<Value>(&raw.body)
                .ok()
                .as_ref()
                .and_then(server_message);
            return Err(match message {
                Some(message) => ApiError::Application {
                    status: raw.status,
                    message,
                },
                None => ApiError::request_failed(raw.status),
            });
        }
        Ok(raw.body)
    }

    /// Send, interpret, and require a `"success"` envelope decoding into `R`.
    pub(crate) async fn request<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
        fallback: &str,
    ) -> Result<R, ApiError> {
        let value = self.call(method, path, body).await?;
        expect_success(value, fallback)
    }

    /// Apply the response policy to a raw response.
    pub fn interpret(&self, raw: RawResponse) -> Result<Value, ApiError> {
        if raw.status == UNAUTHORIZED {
            return Err(self.unauthorized("response", &raw.body));
        }

        let text = String::from_utf8_lossy(&raw.body);
        let parsed = if text.trim().is_empty() {
            None
        } else {
            serde_json::from_str::<Value>(&text).ok()
        };
        let Some(value) = parsed else {
            tracing::error!("Non-JSON response ({}): {}", raw.status, text);
            return Err(ApiError::parse(raw.status, &raw.status_text));
        };

        if !raw.is_success() {
            return Err(match server_message(&value) {
                Some(message) => ApiError::Application {
                    status: raw.status,
                    message,
                },
                None => ApiError::request_failed(raw.status),
            });
        }

        Ok(value)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> Result<RawResponse, ApiError> {
        let request = ApiRequest {
            method,
            url: self.url(path),
            body,
        };
        tracing::debug!("{:?} {}", request.method, request.url);
        self.transport.send(request).await
    }

    fn unauthorized(&self, what: &str, body: &[u8]) -> ApiError {
        tracing::warn!("Unauthorized {what}, session expired");
        if let Some(hook) = &self.on_unauthorized {
            hook();
        }
        let message = serde_json::from_slice::<Value>(body)
            .ok()
            .as_ref()
            .and_then(server_message);
        ApiError::Unauthorized { message }
    }
}

/// The envelope's `message` field, if it is a string.
fn server_message(value: &Value) -> Option<String> {
    value.get("message").and_then(Value::as_str).map(String::from)
}

/// Require `status == "success"` and decode the envelope into `R`.
pub(crate) fn expect_success<R: DeserializeOwned>(value: Value, fallback: &str) -> Result<R, ApiError> {
    if value.get("status").and_then(Value::as_str) != Some("success") {
        return Err(ApiError::Rejected {
            message: server_message(&value).unwrap_or_else(|| fallback.to_string()),
        });
    }
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use serde_json::json;

    use super::*;
    use crate::testing::StubTransport;

    fn client_with_counter() -> (ApiClient<StubTransport>, StubTransport, Rc<Cell<u32>>) {
        let stub = StubTransport::new();
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let client = ApiClient::new(stub.clone(), "http://api.test/")
            .with_unauthorized_hook(move || counter.set(counter.get() + 1));
        (client, stub, hits)
    }

    #[tokio::test]
    async fn test_builds_url_from_base() {
        let (client, stub, _) = client_with_counter();
        stub.push_json(200, json!({"status": "success"}));

        client
            .call(Method::Get, "/api/user/searches", RequestBody::Empty)
            .await
            .unwrap();

        let requests = stub.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "http://api.test/api/user/searches");
        assert_eq!(requests[0].method, Method::Get);
    }

    #[test]
    fn test_media_url() {
        let (client, _, _) = client_with_counter();
        assert_eq!(
            client.media_url("/static/uploads/7.jpg"),
            "http://api.test/static/uploads/7.jpg"
        );
        assert_eq!(client.media_url("uploads/7.jpg"), "http://api.test/uploads/7.jpg");
        assert_eq!(client.media_url("https://cdn.test/a.jpg"), "https://cdn.test/a.jpg");
        assert_eq!(client.media_url("data:image/jpeg;base64,AA"), "data:image/jpeg;base64,AA");
    }

    #[tokio::test]
    async fn test_error_message_is_surfaced_verbatim() {
        let (client, stub, hits) = client_with_counter();
        for (status, message) in [(400, "Email already exists"), (404, "User not found"), (500, "boom: ☃")] {
            stub.push_json(status, json!({"status": "error", "message": message}));
            let err = client
                .call(Method::Post, "/api/auth/signup", RequestBody::Empty)
                .await
                .unwrap_err();
            assert_eq!(
                err,
                ApiError::Application {
                    status,
                    message: message.to_string()
                }
            );
            assert_eq!(err.to_string(), message);
        }
        assert_eq!(hits.get(), 0);
    }

    #[tokio::test]
    async fn test_error_without_message_carries_status() {
        let (client, stub, _) = client_with_counter();
        stub.push_json(503, json!({"status": "error"}));
        let err = client
            .call(Method::Get, "/api/user/profile", RequestBody::Empty)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Request failed with status 503");
    }

    #[tokio::test]
    async fn test_unauthorized_runs_hook_once_before_parsing() {
        let (client, stub, hits) = client_with_counter();
        stub.push_raw(401, "UNAUTHORIZED", b"<html>login</html>".to_vec());

        let err = client
            .call(Method::Get, "/api/user/saved-jobs", RequestBody::Empty)
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::Unauthorized { message: None });
        assert_eq!(hits.get(), 1);
    }

    #[tokio::test]
    async fn test_unauthorized_keeps_server_reason() {
        let (client, stub, hits) = client_with_counter();
        stub.push_json(401, json!({"status": "error", "message": "Invalid credentials"}));

        let err = client
            .call(Method::Post, "/api/auth/login", RequestBody::Empty)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Unauthorized {
                message: Some("Invalid credentials".to_string())
            }
        );
        assert_eq!(err.to_string(), "Session expired. Please login again.");
        assert_eq!(hits.get(), 1);
    }

    #[tokio::test]
    async fn test_non_json_body_is_parse_error() {
        let (client, stub, _) = client_with_counter();
        stub.push_raw(502, "Bad Gateway", b"<html>upstream down</html>".to_vec());
        let err = client
            .call(Method::Get, "/api/user/searches", RequestBody::Empty)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Parse {
                status: 502,
                status_text: "Bad Gateway".to_string()
            }
        );

        stub.push_raw(200, "", Vec::new());
        let err = client
            .call(Method::Get, "/api/user/searches", RequestBody::Empty)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Server error: Invalid response");
    }

    #[tokio::test]
    async fn test_transport_failure_is_distinct() {
        let (client, stub, hits) = client_with_counter();
        stub.push_error(ApiError::Transport("connection refused".to_string()));
        let err = client
            .call(Method::Get, "/api/user/profile", RequestBody::Empty)
            .await
            .unwrap_err();
        assert!(err.is_transport());
        assert_eq!(hits.get(), 0);
    }

    #[tokio::test]
    async fn test_binary_call() {
        let (client, stub, hits) = client_with_counter();
        stub.push_raw(200, "OK", b"%PDF-1.4".to_vec());
        let bytes = client
            .call_binary(Method::Post, "/api/export/pdf", RequestBody::Empty)
            .await
            .unwrap();
        assert_eq!(bytes, b"%PDF-1.4");

        stub.push_json(500, json!({"status": "error", "message": "reportlab missing"}));
        let err = client
            .call_binary(Method::Post, "/api/export/pdf", RequestBody::Empty)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "reportlab missing");

        stub.push_raw(401, "UNAUTHORIZED", Vec::new());
        let err = client
            .call_binary(Method::Post, "/api/export/pdf", RequestBody::Empty)
            .await
            .unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_expect_success() {
        let err = expect_success::<Value>(json!({"status": "error"}), "Failed to login").unwrap_err();
        assert_eq!(
            err,
            ApiError::Rejected {
                message: "Failed to login".to_string()
            }
        );

        let err = expect_success::<Value>(
            json!({"status": "pending", "message": "Try later"}),
            "Failed to login",
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Try later");
    }
}
