//! Typed wrappers, one per API endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use store::{Job, SavedJob, SearchRecord, User};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::transport::{FilePart, Method, RequestBody, Transport};

pub mod paths {
    pub const LOGIN: &str = "/api/auth/login";
    pub const SIGNUP: &str = "/api/auth/signup";
    pub const LOGOUT: &str = "/api/auth/logout";
    pub const FORGOT_PASSWORD: &str = "/api/auth/forgot-password";
    pub const RESET_PASSWORD: &str = "/api/auth/reset-password";
    pub const RECOMMEND_CHAT: &str = "/api/recommend/chat";
    pub const RECOMMEND_FORM: &str = "/api/recommend/form";
    pub const RECOMMEND_CV: &str = "/api/recommend/cv";
    pub const PROFILE: &str = "/api/user/profile";
    pub const UPLOAD_PHOTO: &str = "/api/user/upload-photo";
    pub const CHANGE_PASSWORD: &str = "/api/user/change-password";
    pub const SEARCHES: &str = "/api/user/searches";
    pub const SAVED_JOBS: &str = "/api/user/saved-jobs";
    pub const SAVE_JOB: &str = "/api/user/save-job";
    pub const EXPORT_PDF: &str = "/api/export/pdf";

    pub fn search_results(search_id: i64) -> String {
        format!("/api/search/{search_id}/results")
    }

    pub fn saved_job(saved_id: i64) -> String {
        format!("/api/user/saved-job/{saved_id}")
    }
}

#[derive(Debug, Clone, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
struct SignupRequest<'a> {
    email: &'a str,
    password: &'a str,
    full_name: &'a str,
}

#[derive(Debug, Clone, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

/// Structured search form as the recommendation endpoint expects it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormProfile {
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub email: String,
    pub job_title: String,
    pub skills: Vec<String>,
    pub experience: String,
    #[serde(rename = "workMode")]
    pub work_mode: String,
    pub salary: String,
    pub industry: String,
    pub location: String,
    pub notes: String,
}

/// Editable profile fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    pub full_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
struct PasswordChange<'a> {
    current_password: &'a str,
    new_password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
struct PasswordReset<'a> {
    token: &'a str,
    new_password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
struct EmailOnly<'a> {
    email: &'a str,
}

#[derive(Debug, Clone, Serialize)]
struct SaveJobRequest {
    job_result_id: i64,
}

#[derive(Debug, Clone, Serialize)]
struct PdfExportRequest<'a> {
    jobs: &'a [Job],
    user_name: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct UserEnvelope {
    user: User,
}

/// Result of any recommendation endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Recommendations {
    #[serde(default, deserialize_with = "store::models::null_as_default")]
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub search_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
struct SearchesEnvelope {
    #[serde(default, deserialize_with = "store::models::null_as_default")]
    searches: Vec<SearchRecord>,
}

#[derive(Debug, Clone, Deserialize)]
struct SavedJobsEnvelope {
    #[serde(default, deserialize_with = "store::models::null_as_default")]
    jobs: Vec<SavedJob>,
}

#[derive(Debug, Clone, Deserialize)]
struct PhotoEnvelope {
    photo_url: String,
}

#[derive(Debug, Clone, Deserialize)]
struct SavedEnvelope {
    #[serde(default)]
    saved_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
struct MessageEnvelope {
    #[serde(default)]
    message: Option<String>,
}

fn json<T: Serialize>(body: &T) -> Result<RequestBody, ApiError> {
    serde_json::to_value(body)
        .map(RequestBody::Json)
        .map_err(|e| ApiError::Encode(e.to_string()))
}

impl<T: Transport> ApiClient<T> {
    /// Log in with email and password.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let body = json(&Credentials { email, password })?;
        let envelope: UserEnvelope = self
            .request(Method::Post, paths::LOGIN, body, "Failed to login")
            .await?;
        Ok(envelope.user)
    }

    /// Create an account; the server starts a session for it.
    pub async fn signup(&self, email: &str, password: &str, full_name: &str) -> Result<User, ApiError> {
        let body = json(&SignupRequest {
            email,
            password,
            full_name,
        })?;
        let envelope: UserEnvelope = self
            .request(Method::Post, paths::SIGNUP, body, "Failed to sign up")
            .await?;
        Ok(envelope.user)
    }

    /// End the server session.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let _: Value = self
            .request(Method::Post, paths::LOGOUT, RequestBody::Empty, "Failed to logout")
            .await?;
        Ok(())
    }

    /// Ask for a reset link; returns the server's message.
    pub async fn forgot_password(&self, email: &str) -> Result<String, ApiError> {
        let body = json(&EmailOnly { email })?;
        let envelope: MessageEnvelope = self
            .request(Method::Post, paths::FORGOT_PASSWORD, body, "Failed to send reset link")
            .await?;
        Ok(envelope
            .message
            .unwrap_or_else(|| "If the email exists, a reset link has been sent".to_string()))
    }

    /// Set a new password using an emailed token.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<String, ApiError> {
        let body = json(&PasswordReset { token, new_password })?;
        let envelope: MessageEnvelope = self
            .request(Method::Post, paths::RESET_PASSWORD, body, "Failed to reset password")
            .await?;
        Ok(envelope
            .message
            .unwrap_or_else(|| "Password reset successfully".to_string()))
    }

    /// Recommendations from free-text chat input.
    pub async fn recommend_chat(&self, message: &str) -> Result<Recommendations, ApiError> {
        let body = json(&ChatRequest { message })?;
        self.request(
            Method::Post,
            paths::RECOMMEND_CHAT,
            body,
            "Failed to get recommendations",
        )
        .await
    }

    /// Recommendations from the structured search form.
    pub async fn recommend_form(&self, profile: &FormProfile) -> Result<Recommendations, ApiError> {
        let body = json(profile)?;
        self.request(
            Method::Post,
            paths::RECOMMEND_FORM,
            body,
            "Failed to get recommendations",
        )
        .await
    }

    /// Recommendations from an uploaded CV, sent as multipart field `file`.
    pub async fn recommend_cv(&self, mut cv: FilePart) -> Result<Recommendations, ApiError> {
        cv.field = "file".to_string();
        self.request(
            Method::Post,
            paths::RECOMMEND_CV,
            RequestBody::Multipart(vec![cv]),
            "Failed to analyze CV",
        )
        .await
    }

    /// The logged-in user's profile.
    pub async fn profile(&self) -> Result<User, ApiError> {
        let envelope: UserEnvelope = self
            .request(Method::Get, paths::PROFILE, RequestBody::Empty, "Failed to load profile")
            .await?;
        Ok(envelope.user)
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<(), ApiError> {
        let body = json(update)?;
        let _: Value = self
            .request(Method::Put, paths::PROFILE, body, "Failed to update profile")
            .await?;
        Ok(())
    }

    /// Upload a profile photo (multipart field `photo`); returns its URL.
    pub async fn upload_photo(&self, mut photo: FilePart) -> Result<String, ApiError> {
        photo.field = "photo".to_string();
        let envelope: PhotoEnvelope = self
            .request(
                Method::Post,
                paths::UPLOAD_PHOTO,
                RequestBody::Multipart(vec![photo]),
                "Failed to upload photo",
            )
            .await?;
        Ok(envelope.photo_url)
    }

    pub async fn change_password(&self, current_password: &str, new_password: &str) -> Result<(), ApiError> {
        let body = json(&PasswordChange {
            current_password,
            new_password,
        })?;
        let _: Value = self
            .request(Method::Post, paths::CHANGE_PASSWORD, body, "Failed to change password")
            .await?;
        Ok(())
    }

    /// Past searches, newest first as the server orders them.
    pub async fn searches(&self) -> Result<Vec<SearchRecord>, ApiError> {
        let envelope: SearchesEnvelope = self
            .request(Method::Get, paths::SEARCHES, RequestBody::Empty, "Failed to load history")
            .await?;
        Ok(envelope.searches)
    }

    /// Jobs stored for one past search.
    pub async fn search_results(&self, search_id: i64) -> Result<Vec<Job>, ApiError> {
        let recommendations: Recommendations = self
            .request(
                Method::Get,
                &paths::search_results(search_id),
                RequestBody::Empty,
                "Failed to load results",
            )
            .await?;
        Ok(recommendations.jobs)
    }

    pub async fn saved_jobs(&self) -> Result<Vec<SavedJob>, ApiError> {
        let envelope: SavedJobsEnvelope = self
            .request(Method::Get, paths::SAVED_JOBS, RequestBody::Empty, "Failed to load saved jobs")
            .await?;
        Ok(envelope.jobs)
    }

    /// Bookmark a job result; returns the new saved id when the server sends it.
    pub async fn save_job(&self, job_result_id: i64) -> Result<Option<i64>, ApiError> {
        let body = json(&SaveJobRequest { job_result_id })?;
        let envelope: SavedEnvelope = self
            .request(Method::Post, paths::SAVE_JOB, body, "Failed to save job")
            .await?;
        Ok(envelope.saved_id)
    }

    pub async fn remove_saved_job(&self, saved_id: i64) -> Result<(), ApiError> {
        let _: Value = self
            .request(
                Method::Delete,
                &paths::saved_job(saved_id),
                RequestBody::Empty,
                "Failed to remove job",
            )
            .await?;
        Ok(())
    }

    /// Render the given jobs to a PDF on the server.
    pub async fn export_pdf(&self, jobs: &[Job], user_name: &str) -> Result<Vec<u8>, ApiError> {
        let body = json(&PdfExportRequest { jobs, user_name })?;
        self.call_binary(Method::Post, paths::EXPORT_PDF, body).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::testing::StubTransport;

    fn client() -> (ApiClient<StubTransport>, StubTransport) {
        let stub = StubTransport::new();
        (ApiClient::new(stub.clone(), ""), stub)
    }

    fn sent_json(stub: &StubTransport) -> Value {
        match stub.last_request().map(|r| r.body) {
            Some(RequestBody::Json(value)) => value,
            other => panic!("expected a JSON body, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_login_returns_user() {
        let (client, stub) = client();
        stub.push_json(
            200,
            json!({
                "status": "success",
                "message": "Login successful",
                "user": {"id": 5, "email": "a@b.c", "full_name": "A B", "profile_photo": null}
            }),
        );

        let user = client.login("a@b.c", "hunter22").await.unwrap();
        assert_eq!(user.id, 5);
        assert_eq!(user.full_name.as_deref(), Some("A B"));
        assert_eq!(sent_json(&stub), json!({"email": "a@b.c", "password": "hunter22"}));
        assert_eq!(stub.last_request().unwrap().url, paths::LOGIN);
    }

    #[tokio::test]
    async fn test_form_payload_field_names() {
        let (client, stub) = client();
        stub.push_json(200, json!({"status": "success", "jobs": null, "search_id": 9}));

        let profile = FormProfile {
            full_name: "Ada".to_string(),
            job_title: "Engineer".to_string(),
            skills: vec!["rust".to_string()],
            work_mode: "remote".to_string(),
            location: "Remote".to_string(),
            ..FormProfile::default()
        };
        let recommendations = client.recommend_form(&profile).await.unwrap();
        assert!(recommendations.jobs.is_empty());
        assert_eq!(recommendations.search_id, Some(9));

        let body = sent_json(&stub);
        assert_eq!(body["fullName"], "Ada");
        assert_eq!(body["workMode"], "remote");
        assert_eq!(body["job_title"], "Engineer");
        assert_eq!(body["skills"], json!(["rust"]));
    }

    #[tokio::test]
    async fn test_cv_upload_is_multipart_field_file() {
        let (client, stub) = client();
        stub.push_json(200, json!({"status": "success", "jobs": [{"id": 1, "title": "Dev"}]}));

        let cv = FilePart::new("cv", "me.pdf", "application/pdf", b"%PDF".to_vec());
        let recommendations = client.recommend_cv(cv).await.unwrap();
        assert_eq!(recommendations.jobs.len(), 1);

        match stub.last_request().unwrap().body {
            RequestBody::Multipart(parts) => {
                assert_eq!(parts.len(), 1);
                assert_eq!(parts[0].field, "file");
                assert_eq!(parts[0].file_name, "me.pdf");
            }
            other => panic!("expected multipart, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rejected_envelope_uses_fallback() {
        let (client, stub) = client();
        stub.push_json(200, json!({"status": "error"}));
        let err = client.save_job(3).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to save job");
    }

    #[tokio::test]
    async fn test_path_parameters() {
        let (client, stub) = client();
        stub.push_json(200, json!({"status": "success", "message": "Job removed from saved"}));
        client.remove_saved_job(12).await.unwrap();
        let request = stub.last_request().unwrap();
        assert_eq!(request.method, Method::Delete);
        assert_eq!(request.url, "/api/user/saved-job/12");

        stub.push_json(200, json!({"status": "success", "jobs": []}));
        client.search_results(4).await.unwrap();
        assert_eq!(stub.last_request().unwrap().url, "/api/search/4/results");
    }

    #[tokio::test]
    async fn test_rows_with_null_columns_still_decode() {
        let (client, stub) = client();
        stub.push_json(
            200,
            json!({"status": "success", "jobs": [
                {"id": 1, "title": "Backend", "company": "Acme", "description": "APIs", "match_score": 80},
                {"id": 2, "title": "Frontend", "company": "Acme", "description": null, "location": null}
            ]}),
        );
        let jobs = client.search_results(4).await.unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[1].description, "");

        stub.push_json(
            200,
            json!({"status": "success", "jobs": [
                {"saved_id": 3, "job_title": "QA", "match_score": null, "saved_at": null}
            ]}),
        );
        let saved = client.saved_jobs().await.unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].match_score, 0.0);
    }

    #[tokio::test]
    async fn test_export_pdf_body() {
        let (client, stub) = client();
        stub.push_raw(200, "OK", b"%PDF".to_vec());
        let jobs = vec![Job {
            title: "Dev".to_string(),
            ..Job::default()
        }];
        let pdf = client.export_pdf(&jobs, "Ada").await.unwrap();
        assert_eq!(pdf, b"%PDF");

        let body = sent_json(&stub);
        assert_eq!(body["user_name"], "Ada");
        assert_eq!(body["jobs"][0]["title"], "Dev");
    }

    #[tokio::test]
    async fn test_decode_error_on_wrong_shape() {
        let (client, stub) = client();
        stub.push_json(200, json!({"status": "success", "user": "nobody"}));
        let err = client.profile().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
