//! Page handlers with the rendering stripped away.
//!
//! Each function runs local validation, calls the server through
//! [`ApiClient`], and updates the cached [`Session`]. Components call these and
//! turn the result into a toast or a navigation, which keeps every rule here
//! testable against a stub transport and in-memory storage.

use api::{ApiClient, ApiError, FilePart, FormProfile, ProfileUpdate, Transport};
use store::config::Limits;
use store::{Job, KeyValueStore, SavedJob, SearchRecord, Session, User};
use thiserror::Error;

use crate::format::export_user_name;
use crate::validation::{self, ValidationError};

/// Outcome of a failed handler.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActionError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ActionError {
    /// Text for the transient notice, or `None` when one was already shown.
    ///
    /// Network failures and malformed payloads fall back to the page's generic
    /// message; server messages are shown verbatim.
    pub fn notice(&self, fallback: &str) -> Option<String> {
        match self {
            Self::Invalid(e) => Some(e.to_string()),
            Self::Api(ApiError::Unauthorized { .. }) => None,
            Self::Api(ApiError::Application { message, .. } | ApiError::Rejected { message }) => {
                Some(message.clone())
            }
            Self::Api(e @ ApiError::Parse { .. }) => Some(e.to_string()),
            Self::Api(ApiError::Transport(_) | ApiError::Decode(_) | ApiError::Encode(_)) => {
                Some(fallback.to_string())
            }
        }
    }

    /// The server's reason for a 401, such as a rejected password on login.
    pub fn unauthorized_reason(&self) -> Option<&str> {
        match self {
            Self::Api(ApiError::Unauthorized { message }) => message.as_deref(),
            _ => None,
        }
    }
}

pub type ActionResult<T> = Result<T, ActionError>;

/// Fields of the sign-up form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SignupForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm: String,
}

/// Fields of the change-password form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PasswordForm {
    pub current: String,
    pub new_password: String,
    pub confirm: String,
}

/// A file picked by the user, before upload.
#[derive(Clone, Debug, PartialEq)]
pub struct PickedFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

pub async fn login<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T>,
    session: &Session<S>,
    email: &str,
    password: &str,
    remember: bool,
) -> ActionResult<User> {
    validation::validate_login(email, password)?;
    let user = client.login(email.trim(), password).await?;
    session.store_user(&user, remember);
    tracing::info!("Logged in as {}", user.email);
    Ok(user)
}

pub async fn signup<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T>,
    session: &Session<S>,
    limits: &Limits,
    form: &SignupForm,
) -> ActionResult<User> {
    validation::validate_signup(
        &form.full_name,
        &form.email,
        &form.password,
        &form.confirm,
        limits.min_password_len,
    )?;
    let user = client
        .signup(form.email.trim(), &form.password, form.full_name.trim())
        .await?;
    session.store_user(&user, true);
    Ok(user)
}

/// End the server session if possible, then forget everything locally.
pub async fn logout<T: Transport, S: KeyValueStore>(client: &ApiClient<T>, session: &Session<S>) {
    if let Err(e) = client.logout().await {
        tracing::warn!("Logout request failed: {e}");
    }
    session.clear();
}

pub async fn forgot_password<T: Transport>(client: &ApiClient<T>, email: &str) -> ActionResult<String> {
    if email.trim().is_empty() {
        return Err(ValidationError::MissingFields.into());
    }
    Ok(client.forgot_password(email.trim()).await?)
}

pub async fn reset_password<T: Transport>(
    client: &ApiClient<T>,
    limits: &Limits,
    token: &str,
    new_password: &str,
    confirm: &str,
) -> ActionResult<String> {
    if token.trim().is_empty() {
        return Err(ValidationError::MissingResetToken.into());
    }
    validation::validate_new_password(new_password, confirm, limits.min_password_len)?;
    Ok(client.reset_password(token.trim(), new_password).await?)
}

/// Cache fresh results and report how many arrived.
fn keep_results<S: KeyValueStore>(session: &Session<S>, jobs: &[Job]) -> usize {
    session.store_jobs(jobs);
    jobs.len()
}

pub async fn recommend_chat<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T>,
    session: &Session<S>,
    limits: &Limits,
    message: &str,
) -> ActionResult<usize> {
    validation::validate_chat_message(message, limits.min_chat_chars)?;
    let found = client.recommend_chat(message.trim()).await?;
    Ok(keep_results(session, &found.jobs))
}

pub async fn recommend_form<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T>,
    session: &Session<S>,
    profile: &FormProfile,
) -> ActionResult<usize> {
    let found = client.recommend_form(profile).await?;
    Ok(keep_results(session, &found.jobs))
}

pub async fn recommend_cv<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T>,
    session: &Session<S>,
    file: Option<PickedFile>,
) -> ActionResult<usize> {
    let file = file.ok_or(ValidationError::NoFile)?;
    validation::validate_cv_file(&file.name, &file.mime)?;
    let mime = validation::cv_mime(&file.name, &file.mime);
    let found = client
        .recommend_cv(FilePart::new("file", file.name, mime, file.bytes))
        .await?;
    Ok(keep_results(session, &found.jobs))
}

pub async fn load_history<T: Transport>(client: &ApiClient<T>) -> ActionResult<Vec<SearchRecord>> {
    Ok(client.searches().await?)
}

/// Load a past search into the results cache.
pub async fn open_search<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T>,
    session: &Session<S>,
    search_id: i64,
) -> ActionResult<usize> {
    let jobs = client.search_results(search_id).await?;
    Ok(keep_results(session, &jobs))
}

pub async fn save_job<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T>,
    session: &Session<S>,
    job_id: Option<i64>,
) -> ActionResult<Option<i64>> {
    if !session.is_logged_in() {
        return Err(ValidationError::LoginRequired.into());
    }
    let job_id = job_id.ok_or(ValidationError::MissingJobId)?;
    Ok(client.save_job(job_id).await?)
}

pub async fn load_saved_jobs<T: Transport>(client: &ApiClient<T>) -> ActionResult<Vec<SavedJob>> {
    Ok(client.saved_jobs().await?)
}

pub async fn remove_saved_job<T: Transport>(client: &ApiClient<T>, saved_id: i64) -> ActionResult<()> {
    Ok(client.remove_saved_job(saved_id).await?)
}

/// Drop the card for `saved_id`; returns whether one was removed.
pub fn drop_saved(jobs: &mut Vec<SavedJob>, saved_id: i64) -> bool {
    match jobs.iter().position(|j| j.saved_id == saved_id) {
        Some(index) => {
            jobs.remove(index);
            true
        }
        None => false,
    }
}

/// Marks `id` as the one request in flight for a list of cards. Returns false
/// while another request holds the slot.
pub fn claim(slot: &mut Option<i64>, id: i64) -> bool {
    if slot.is_some() {
        return false;
    }
    *slot = Some(id);
    true
}

/// Fetch the profile and refresh the cached identity with it.
pub async fn load_profile<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T>,
    session: &Session<S>,
) -> ActionResult<User> {
    let profile = client.profile().await?;
    session.update_user(|cached| {
        cached.full_name = profile.full_name.clone();
        cached.email = profile.email.clone();
        cached.profile_photo = profile.profile_photo.clone();
    });
    Ok(profile)
}

pub async fn update_profile<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T>,
    session: &Session<S>,
    update: &ProfileUpdate,
) -> ActionResult<Option<User>> {
    if update.email.trim().is_empty() {
        return Err(ValidationError::MissingFields.into());
    }
    client.update_profile(update).await?;
    Ok(session.update_user(|cached| {
        cached.full_name = Some(update.full_name.clone());
        cached.email = update.email.clone();
    }))
}

/// Upload an already-cropped JPEG and point the cached user at it.
pub async fn upload_photo<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T>,
    session: &Session<S>,
    jpeg: Vec<u8>,
) -> ActionResult<String> {
    let url = client
        .upload_photo(FilePart::new("photo", "profile.jpg", "image/jpeg", jpeg))
        .await?;
    session.update_user(|cached| cached.profile_photo = Some(url.clone()));
    Ok(url)
}

pub async fn change_password<T: Transport>(
    client: &ApiClient<T>,
    limits: &Limits,
    form: &PasswordForm,
) -> ActionResult<()> {
    if form.current.is_empty() {
        return Err(ValidationError::MissingFields.into());
    }
    validation::validate_new_password(&form.new_password, &form.confirm, limits.min_password_len)?;
    Ok(client.change_password(&form.current, &form.new_password).await?)
}

/// Render the cached results to PDF under the current user's name.
pub async fn export_pdf<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T>,
    session: &Session<S>,
    jobs: &[Job],
) -> ActionResult<Vec<u8>> {
    let name = export_user_name(session.current_user().as_ref());
    Ok(client.export_pdf(jobs, &name).await?)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use api::testing::StubTransport;
    use api::{Method, RequestBody};
    use serde_json::json;
    use store::{MemoryStorage, PersistencePolicy};

    use super::*;

    struct Fixture {
        client: ApiClient<StubTransport>,
        stub: StubTransport,
        session: Session<MemoryStorage>,
        expired: Rc<Cell<u32>>,
        limits: Limits,
    }

    fn fixture() -> Fixture {
        let stub = StubTransport::new();
        let session = Session::new(
            MemoryStorage::new(),
            MemoryStorage::new(),
            PersistencePolicy::Mirrored,
        );
        let expired = Rc::new(Cell::new(0));
        let hook_session = session.clone();
        let counter = expired.clone();
        let client = ApiClient::new(stub.clone(), "http://api.test").with_unauthorized_hook(move || {
            hook_session.clear();
            counter.set(counter.get() + 1);
        });
        Fixture {
            client,
            stub,
            session,
            expired,
            limits: Limits::default(),
        }
    }

    fn user_json() -> serde_json::Value {
        json!({"id": 7, "email": "ada@example.com", "full_name": "Ada Lovelace", "profile_photo": null})
    }

    fn logged_in(f: &Fixture) {
        f.session.store_user(
            &serde_json::from_value::<User>(user_json()).unwrap(),
            false,
        );
    }

    #[tokio::test]
    async fn test_short_chat_message_sends_nothing() {
        let f = fixture();
        let err = recommend_chat(&f.client, &f.session, &f.limits, &"a".repeat(49))
            .await
            .unwrap_err();
        assert_eq!(
            err.notice("unused").as_deref(),
            Some("Please provide more details (at least 50 characters)")
        );
        assert_eq!(f.stub.request_count(), 0);
    }

    #[tokio::test]
    async fn test_chat_results_are_cached() {
        let f = fixture();
        f.stub.push_json(
            200,
            json!({"status": "success", "search_id": 3, "jobs": [
                {"id": 1, "title": "Rust Engineer", "company": "Ferris", "match_score": 92},
                {"id": 2, "title": "Backend Dev", "company": "Crab", "match_score": 71}
            ]}),
        );
        let count = recommend_chat(&f.client, &f.session, &f.limits, &"I build web services ".repeat(4))
            .await
            .unwrap();
        assert_eq!(count, 2);
        let cached = f.session.job_results();
        assert_eq!(cached.len(), 2);
        assert_eq!(cached[0].title, "Rust Engineer");
        assert_eq!(cached[1].id, Some(2));
    }

    #[tokio::test]
    async fn test_login_caches_user() {
        let f = fixture();
        f.stub
            .push_json(200, json!({"status": "success", "user": user_json()}));
        let user = login(&f.client, &f.session, " ada@example.com ", "pw", false)
            .await
            .unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(f.session.current_user(), Some(user));
        let request = f.stub.last_request().unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(
            request.body,
            RequestBody::Json(json!({"email": "ada@example.com", "password": "pw"}))
        );
    }

    #[tokio::test]
    async fn test_login_missing_fields() {
        let f = fixture();
        let err = login(&f.client, &f.session, "", "", true).await.unwrap_err();
        assert_eq!(err, ActionError::Invalid(ValidationError::MissingFields));
        assert_eq!(f.stub.request_count(), 0);
    }

    #[tokio::test]
    async fn test_server_message_is_shown_verbatim() {
        let f = fixture();
        f.stub.push_json(400, json!({"status": "error", "message": "Email already registered"}));
        let form = SignupForm {
            full_name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "password123".to_string(),
            confirm: "password123".to_string(),
        };
        let err = signup(&f.client, &f.session, &f.limits, &form).await.unwrap_err();
        assert_eq!(err.notice("Failed to sign up").as_deref(), Some("Email already registered"));
        assert!(!f.session.is_logged_in());
    }

    #[tokio::test]
    async fn test_signup_password_mismatch_is_local() {
        let f = fixture();
        let form = SignupForm {
            full_name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "password123".to_string(),
            confirm: "password124".to_string(),
        };
        let err = signup(&f.client, &f.session, &f.limits, &form).await.unwrap_err();
        assert_eq!(err.notice("x").as_deref(), Some("Passwords do not match"));
        assert_eq!(f.stub.request_count(), 0);
    }

    #[tokio::test]
    async fn test_rejected_login_keeps_server_reason() {
        let f = fixture();
        f.stub.push_json(401, json!({"status": "error", "message": "Invalid credentials"}));

        let err = login(&f.client, &f.session, "ada@example.com", "wrong-pass", false)
            .await
            .unwrap_err();

        assert_eq!(f.expired.get(), 1);
        assert_eq!(err.notice("Failed to login"), None);
        assert_eq!(err.unauthorized_reason(), Some("Invalid credentials"));
        assert!(!f.session.is_logged_in());
    }

    #[tokio::test]
    async fn test_unauthorized_clears_session_once_without_extra_notice() {
        let f = fixture();
        logged_in(&f);
        f.session.store_jobs(&[Job::default()]);
        f.stub.push_json(401, json!({"status": "error", "message": "Login required"}));

        let err = load_history(&f.client).await.unwrap_err();

        assert_eq!(f.expired.get(), 1);
        assert_eq!(err.notice("Failed to load history"), None);
        assert!(!f.session.is_logged_in());
        assert!(f.session.job_results().is_empty());
    }

    #[tokio::test]
    async fn test_network_failure_uses_fallback() {
        let f = fixture();
        f.stub.push_error(ApiError::Transport("connection refused".to_string()));
        let err = load_saved_jobs(&f.client).await.unwrap_err();
        assert_eq!(
            err.notice("Failed to load saved jobs").as_deref(),
            Some("Failed to load saved jobs")
        );
        assert_eq!(f.expired.get(), 0);
    }

    #[tokio::test]
    async fn test_non_json_reply_reports_status_text() {
        let f = fixture();
        f.stub.push_raw(502, "Bad Gateway", b"<html>".to_vec());
        let err = load_history(&f.client).await.unwrap_err();
        assert_eq!(err.notice("x").as_deref(), Some("Server error: Bad Gateway"));
    }

    #[tokio::test]
    async fn test_save_requires_login() {
        let f = fixture();
        let err = save_job(&f.client, &f.session, Some(4)).await.unwrap_err();
        assert_eq!(err.notice("x").as_deref(), Some("Please login to save jobs"));
        assert_eq!(f.stub.request_count(), 0);
    }

    #[tokio::test]
    async fn test_save_job_posts_result_id() {
        let f = fixture();
        logged_in(&f);
        f.stub
            .push_json(200, json!({"status": "success", "saved_id": 12}));
        let saved = save_job(&f.client, &f.session, Some(4)).await.unwrap();
        assert_eq!(saved, Some(12));
        assert_eq!(
            f.stub.last_request().unwrap().body,
            RequestBody::Json(json!({"job_result_id": 4}))
        );
    }

    #[tokio::test]
    async fn test_remove_saved_job_drops_exactly_one_card() {
        let f = fixture();
        f.stub.push_json(200, json!({"status": "success"}));
        let mut jobs: Vec<SavedJob> = [1, 2, 3]
            .into_iter()
            .map(|saved_id| SavedJob {
                saved_id,
                ..SavedJob::default()
            })
            .collect();

        remove_saved_job(&f.client, 2).await.unwrap();
        assert!(drop_saved(&mut jobs, 2));

        assert_eq!(jobs.iter().map(|j| j.saved_id).collect::<Vec<_>>(), vec![1, 3]);
        assert!(!drop_saved(&mut jobs, 2));
        let request = f.stub.last_request().unwrap();
        assert_eq!(request.method, Method::Delete);
        assert_eq!(request.url, "http://api.test/api/user/saved-job/2");
    }

    #[test]
    fn test_claim_allows_one_request_at_a_time() {
        let mut removing = None;
        assert!(claim(&mut removing, 2));
        assert!(!claim(&mut removing, 2));
        assert!(!claim(&mut removing, 3));
        assert_eq!(removing, Some(2));

        removing = None;
        assert!(claim(&mut removing, 3));
    }

    #[tokio::test]
    async fn test_open_search_replaces_cache() {
        let f = fixture();
        f.session.store_jobs(&[Job::default(), Job::default(), Job::default()]);
        f.stub.push_json(
            200,
            json!({"status": "success", "jobs": [{"id": 9, "title": "Data Engineer"}]}),
        );
        let count = open_search(&f.client, &f.session, 5).await.unwrap();
        assert_eq!(count, 1);
        assert_eq!(f.session.job_results()[0].title, "Data Engineer");
        assert_eq!(f.stub.last_request().unwrap().url, "http://api.test/api/search/5/results");
    }

    #[tokio::test]
    async fn test_cv_requires_file_and_type() {
        let f = fixture();
        let err = recommend_cv(&f.client, &f.session, None).await.unwrap_err();
        assert_eq!(err.notice("x").as_deref(), Some("Please upload your CV"));

        let png = PickedFile {
            name: "me.png".to_string(),
            mime: "image/png".to_string(),
            bytes: vec![1, 2, 3],
        };
        let err = recommend_cv(&f.client, &f.session, Some(png)).await.unwrap_err();
        assert_eq!(err.notice("x").as_deref(), Some("Please upload a PDF or DOCX file"));
        assert_eq!(f.stub.request_count(), 0);
    }

    #[tokio::test]
    async fn test_cv_upload_is_multipart_file_field() {
        let f = fixture();
        f.stub.push_json(200, json!({"status": "success", "jobs": []}));
        let cv = PickedFile {
            name: "cv.docx".to_string(),
            mime: String::new(),
            bytes: vec![0x50, 0x4b],
        };
        assert_eq!(recommend_cv(&f.client, &f.session, Some(cv)).await.unwrap(), 0);
        match f.stub.last_request().unwrap().body {
            RequestBody::Multipart(parts) => {
                assert_eq!(parts.len(), 1);
                assert_eq!(parts[0].field, "file");
                assert_eq!(parts[0].mime, validation::DOCX_MIME);
            }
            other => panic!("expected multipart, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_profile_refreshes_cached_identity() {
        let f = fixture();
        logged_in(&f);
        f.stub.push_json(
            200,
            json!({"status": "success", "user": {
                "id": 7, "email": "ada@new.org", "full_name": "Ada King", "profile_photo": "/p/7.jpg"
            }}),
        );
        load_profile(&f.client, &f.session).await.unwrap();
        let cached = f.session.current_user().unwrap();
        assert_eq!(cached.email, "ada@new.org");
        assert_eq!(cached.profile_photo.as_deref(), Some("/p/7.jpg"));
    }

    #[tokio::test]
    async fn test_update_profile_and_photo() {
        let f = fixture();
        logged_in(&f);
        f.stub.push_json(200, json!({"status": "success"}));
        let update = ProfileUpdate {
            full_name: "Ada King".to_string(),
            email: "ada@king.org".to_string(),
        };
        let user = update_profile(&f.client, &f.session, &update).await.unwrap().unwrap();
        assert_eq!(user.display_name(), "Ada King");

        f.stub
            .push_json(200, json!({"status": "success", "photo_url": "/uploads/7.jpg"}));
        let url = upload_photo(&f.client, &f.session, vec![0xff, 0xd8]).await.unwrap();
        assert_eq!(url, "/uploads/7.jpg");
        assert_eq!(
            f.session.current_user().unwrap().profile_photo.as_deref(),
            Some("/uploads/7.jpg")
        );
    }

    #[tokio::test]
    async fn test_change_password_checks_confirmation() {
        let f = fixture();
        let form = PasswordForm {
            current: "old-password".to_string(),
            new_password: "new-password".to_string(),
            confirm: "new-passw0rd".to_string(),
        };
        let err = change_password(&f.client, &f.limits, &form).await.unwrap_err();
        assert_eq!(err.notice("x").as_deref(), Some("New passwords do not match"));
        assert_eq!(f.stub.request_count(), 0);
    }

    #[tokio::test]
    async fn test_reset_password_needs_token() {
        let f = fixture();
        let err = reset_password(&f.client, &f.limits, "", "password123", "password123")
            .await
            .unwrap_err();
        assert_eq!(err, ActionError::Invalid(ValidationError::MissingResetToken));

        f.stub
            .push_json(200, json!({"status": "success", "message": "Password reset successfully"}));
        let message = reset_password(&f.client, &f.limits, "tok", "password123", "password123")
            .await
            .unwrap();
        assert_eq!(message, "Password reset successfully");
    }

    #[tokio::test]
    async fn test_export_uses_fallback_name() {
        let f = fixture();
        f.stub.push_raw(200, "OK", b"%PDF-1.4".to_vec());
        let bytes = export_pdf(&f.client, &f.session, &[]).await.unwrap();
        assert_eq!(bytes, b"%PDF-1.4");
        assert_eq!(
            f.stub.last_request().unwrap().body,
            RequestBody::Json(json!({"jobs": [], "user_name": "User"}))
        );
    }

    #[tokio::test]
    async fn test_logout_clears_even_when_server_fails() {
        let f = fixture();
        logged_in(&f);
        f.stub.push_error(ApiError::Transport("offline".to_string()));
        logout(&f.client, &f.session).await;
        assert!(!f.session.is_logged_in());
    }
}
