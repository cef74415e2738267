//! # Transport seam — raw HTTP exchange
//!
//! [`Transport`] moves one [`ApiRequest`] over the wire and hands back the raw
//! [`RawResponse`] (status, reason phrase, body bytes). It knows nothing about
//! the API's JSON envelope; interpretation lives in [`crate::ApiClient`].
//!
//! [`HttpTransport`] is the production implementation on top of `reqwest`:
//!
//! - **WASM**: requests go through the browser `fetch` with credentials set to
//!   `include`, so the session cookie travels with every call.
//! - **Native**: a client-side cookie store plays the same role.
//!
//! Tests use `crate::testing::StubTransport` instead.

use std::future::Future;

use serde_json::Value;

use crate::error::ApiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// One file in a multipart body.
#[derive(Clone, Debug, PartialEq)]
pub struct FilePart {
    /// Form field name (`file`, `photo`).
    pub field: String,
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl FilePart {
    pub fn new(
        field: impl Into<String>,
        file_name: impl Into<String>,
        mime: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            field: field.into(),
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(Vec<FilePart>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub body: RequestBody,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Async interface for sending a request and reading the whole response.
pub trait Transport {
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<RawResponse, ApiError>>;
}

/// `reqwest`-backed transport.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .unwrap_or_default();
        #[cfg(target_arch = "wasm32")]
        let client = reqwest::Client::new();

        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &request.url);
        #[cfg(target_arch = "wasm32")]
        {
            builder = builder.fetch_credentials_include();
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(parts) => {
                let mut form = reqwest::multipart::Form::new();
                for part in parts {
                    let file = reqwest::multipart::Part::bytes(part.bytes)
                        .file_name(part.file_name)
                        .mime_str(&part.mime)
                        .map_err(|e| ApiError::Encode(e.to_string()))?;
                    form = form.part(part.field, file);
                }
                builder.multipart(form)
            }
        };

        let response = builder.send().await.map_err(|e| {
            tracing::error!("Request to {} failed: {}", request.url, e);
            ApiError::Transport(e.to_string())
        })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(RawResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body: body.to_vec(),
        })
    }
}
