//! # API crate — HTTP client for the job recommendation server
//!
//! Every page of the web app talks to the server through this crate. It owns
//! the request helper, the error taxonomy, and one typed method per endpoint.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`client`] | — | [`ApiClient`]: URL building, response interpretation, the 401 hook |
//! | [`endpoints`] | — | Request/response shapes and `ApiClient` methods for each route |
//! | [`error`] | — | [`ApiError`]: unauthorized, application, rejected, parse, decode, transport |
//! | [`transport`] | — | [`Transport`] seam and the `reqwest`-backed [`HttpTransport`] |
//! | [`testing`] | `testing` / tests | [`testing::StubTransport`] replaying queued responses |
//!
//! ## Endpoints
//!
//! - **Auth**: `login`, `signup`, `logout`, `forgot_password`, `reset_password`
//! - **Recommendations**: `recommend_chat`, `recommend_form`, `recommend_cv`
//! - **Profile**: `profile`, `update_profile`, `upload_photo`, `change_password`
//! - **History and bookmarks**: `searches`, `search_results`, `saved_jobs`, `save_job`, `remove_saved_job`
//! - **Export**: `export_pdf`
//!
//! Every request carries the session cookie; none carries a bearer token.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod transport;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use client::{ApiClient, UnauthorizedHook};
pub use endpoints::{paths, FormProfile, ProfileUpdate, Recommendations};
pub use error::{ApiError, SESSION_EXPIRED};
pub use transport::{ApiRequest, FilePart, HttpTransport, Method, RawResponse, RequestBody, Transport};

pub use store::{Job, SavedJob, SearchRecord, User};
