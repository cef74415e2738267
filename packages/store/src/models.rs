//! # Domain models for users, job postings and searches
//!
//! These are the JSON payloads the recommendation API returns and that the
//! client caches in browser storage. They are `Serialize + Deserialize` so the
//! same types flow from the HTTP layer into [`crate::Session`] and back out to
//! the PDF export request.
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`User`] | The cached session identity written after login or signup. |
//! | [`Job`] | One ranked job posting from a recommendation or a past search. |
//! | [`SearchRecord`] | One entry of the user's search history. |
//! | [`SavedJob`] | A job the user bookmarked, joined with its posting. |
//!
//! The API is not strict about field names or types (rows come straight from
//! the database), so deserialization is lenient: legacy aliases are accepted,
//! missing or null fields default, and skill lists may arrive as a string.

use serde::{Deserialize, Deserializer, Serialize};

/// The locally cached user record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub profile_photo: Option<String>,
}

impl User {
    /// Full name, falling back to email if no name is set.
    pub fn display_name(&self) -> &str {
        match self.full_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.email,
        }
    }
}

/// Initials of each whitespace-separated word, capped at two characters.
pub fn initials_of(name: &str) -> String {
    let initials: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect();
    if initials.is_empty() {
        "U".to_string()
    } else {
        initials
    }
}

/// A job posting with its server-computed match score.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Id of the stored job result, used when saving the job.
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default", alias = "job_title")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "skills_list")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default", alias = "match")]
    pub match_score: f64,
    #[serde(default, alias = "linkedin")]
    pub url: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
}

/// One entry of the search history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchRecord {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub search_type: String,
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
}

/// How a past search was submitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchKind {
    Form,
    Chat,
    Cv,
    Other,
}

impl SearchRecord {
    pub fn kind(&self) -> SearchKind {
        match self.search_type.as_str() {
            "form" => SearchKind::Form,
            "chat" => SearchKind::Chat,
            "cv" => SearchKind::Cv,
            _ => SearchKind::Other,
        }
    }
}

/// A bookmarked job joined with its stored posting.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SavedJob {
    pub saved_id: i64,
    #[serde(default, deserialize_with = "null_as_default", alias = "title")]
    pub job_title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "skills_list")]
    pub skills: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub match_score: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub saved_at: String,
}

/// Reads an explicit `null` as the type's default, as a missing key would be.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `["a", "b"]`, `"a, b"`, a JSON-encoded list inside a string, or null.
fn skills_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        List(Vec<String>),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(Raw::List(list)) => list,
        Some(Raw::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.starts_with('[') {
                serde_json::from_str(trimmed).unwrap_or_default()
            } else {
                trimmed
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_display_name_falls_back_to_email() {
        let mut user = User {
            id: 1,
            email: "ada@example.com".to_string(),
            full_name: None,
            profile_photo: None,
        };
        assert_eq!(user.display_name(), "ada@example.com");

        user.full_name = Some("Ada Lovelace".to_string());
        assert_eq!(user.display_name(), "Ada Lovelace");
        assert_eq!(initials_of(user.display_name()), "AL");
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials_of("grace brewster murray hopper"), "GB");
        assert_eq!(initials_of("linus"), "L");
        assert_eq!(initials_of("   "), "U");
    }

    #[test]
    fn test_job_accepts_legacy_fields() {
        let job: Job = serde_json::from_str(
            r#"{"job_title": "Rust Engineer", "match": 91, "linkedin": "https://example.com/j/1", "skills": "rust, wasm ,"}"#,
        )
        .unwrap();
        assert_eq!(job.title, "Rust Engineer");
        assert_eq!(job.match_score, 91.0);
        assert_eq!(job.url.as_deref(), Some("https://example.com/j/1"));
        assert_eq!(job.skills, vec!["rust", "wasm"]);
        assert!(job.id.is_none());
    }

    #[test]
    fn test_saved_job_skills_as_json_string() {
        let saved: SavedJob = serde_json::from_str(
            r#"{"saved_id": 7, "job_title": "SRE", "skills": "[\"linux\", \"k8s\"]", "skills_extra": 1}"#,
        )
        .unwrap();
        assert_eq!(saved.saved_id, 7);
        assert_eq!(saved.skills, vec!["linux", "k8s"]);
    }

    #[test]
    fn test_search_kind() {
        let search: SearchRecord =
            serde_json::from_str(r#"{"id": 3, "search_type": "cv", "keywords": null}"#).unwrap();
        assert_eq!(search.kind(), SearchKind::Cv);
        assert!(search.keywords.is_none());
    }

    #[test]
    fn test_job_row_with_nulls_uses_defaults() {
        let jobs: Vec<Job> = serde_json::from_str(
            r#"[
                {"id": 1, "title": "Backend", "company": "Acme", "location": "Berlin",
                 "description": "APIs", "match_score": 88},
                {"id": 2, "title": "Frontend", "company": null, "location": null,
                 "description": null, "match_score": null, "skills": null}
            ]"#,
        )
        .unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[1].title, "Frontend");
        assert_eq!(jobs[1].location, "");
        assert_eq!(jobs[1].description, "");
        assert_eq!(jobs[1].match_score, 0.0);
        assert!(jobs[1].skills.is_empty());
    }

    #[test]
    fn test_saved_job_and_search_with_nulls() {
        let saved: SavedJob = serde_json::from_str(
            r#"{"saved_id": 4, "job_title": "QA", "description": null, "location": null,
                "match_score": null, "saved_at": null}"#,
        )
        .unwrap();
        assert_eq!(saved.saved_id, 4);
        assert_eq!(saved.match_score, 0.0);
        assert_eq!(saved.saved_at, "");

        let search: SearchRecord = serde_json::from_str(
            r#"{"id": 9, "search_type": null, "created_at": null}"#,
        )
        .unwrap();
        assert_eq!(search.kind(), SearchKind::Other);
        assert_eq!(search.created_at, "");
    }
}
