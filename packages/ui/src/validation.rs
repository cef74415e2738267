//! Local form checks that run before any request is sent.

use thiserror::Error;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("New passwords do not match")]
    NewPasswordMismatch,
    #[error("Password must be at least {0} characters")]
    PasswordTooShort(usize),
    #[error("Please provide more details (at least {0} characters)")]
    MessageTooShort(usize),
    #[error("Please upload your CV")]
    NoFile,
    #[error("Please upload a PDF or DOCX file")]
    UnsupportedFileType,
    #[error("Please choose an image file")]
    NotAnImage,
    #[error("File size must be less than {0}MB")]
    FileTooLarge(u64),
    #[error("Please login to save jobs")]
    LoginRequired,
    #[error("This job cannot be saved")]
    MissingJobId,
    #[error("Reset link is invalid or incomplete")]
    MissingResetToken,
}

pub fn validate_login(email: &str, password: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    Ok(())
}

pub fn validate_signup(
    name: &str,
    email: &str,
    password: &str,
    confirm: &str,
    min_len: usize,
) -> Result<(), ValidationError> {
    if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    if password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    check_length(password, min_len)
}

/// New password + confirmation, as on the profile and reset pages.
pub fn validate_new_password(
    new_password: &str,
    confirm: &str,
    min_len: usize,
) -> Result<(), ValidationError> {
    if new_password != confirm {
        return Err(ValidationError::NewPasswordMismatch);
    }
    check_length(new_password, min_len)
}

fn check_length(password: &str, min_len: usize) -> Result<(), ValidationError> {
    if password.chars().count() < min_len {
        return Err(ValidationError::PasswordTooShort(min_len));
    }
    Ok(())
}

/// Free-text search input must carry enough detail to match on.
pub fn validate_chat_message(message: &str, min_chars: usize) -> Result<(), ValidationError> {
    if message.trim().chars().count() < min_chars {
        return Err(ValidationError::MessageTooShort(min_chars));
    }
    Ok(())
}

/// Accept PDF or DOCX by MIME type, falling back to the extension when the
/// browser reports no useful type.
pub fn validate_cv_file(file_name: &str, mime: &str) -> Result<(), ValidationError> {
    match mime {
        PDF_MIME | DOCX_MIME => Ok(()),
        "" | "application/octet-stream" => {
            let lower = file_name.to_ascii_lowercase();
            if lower.ends_with(".pdf") || lower.ends_with(".docx") {
                Ok(())
            } else {
                Err(ValidationError::UnsupportedFileType)
            }
        }
        _ => Err(ValidationError::UnsupportedFileType),
    }
}

/// MIME type to send for a CV, derived from the extension when missing.
pub fn cv_mime(file_name: &str, mime: &str) -> String {
    if !mime.is_empty() && mime != "application/octet-stream" {
        return mime.to_string();
    }
    if file_name.to_ascii_lowercase().ends_with(".docx") {
        DOCX_MIME.to_string()
    } else {
        PDF_MIME.to_string()
    }
}

pub fn validate_photo(size: u64, mime: &str, max_bytes: u64) -> Result<(), ValidationError> {
    if !mime.is_empty() && !mime.starts_with("image/") {
        return Err(ValidationError::NotAnImage);
    }
    if size > max_bytes {
        return Err(ValidationError::FileTooLarge(max_bytes / (1024 * 1024)));
    }
    Ok(())
}

/// Comma-separated skills, trimmed, empties dropped.
pub fn parse_skills(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Live state of a "confirm password" field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfirmState {
    Empty,
    Mismatch,
    Match,
}

impl ConfirmState {
    pub fn of(password: &str, confirm: &str) -> Self {
        if confirm.is_empty() {
            Self::Empty
        } else if password == confirm {
            Self::Match
        } else {
            Self::Mismatch
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            Self::Empty => "",
            Self::Mismatch => "input-mismatch",
            Self::Match => "input-match",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_requires_both_fields() {
        assert_eq!(validate_login("  ", "pw"), Err(ValidationError::MissingFields));
        assert_eq!(validate_login("a@b.c", ""), Err(ValidationError::MissingFields));
        assert!(validate_login("a@b.c", "pw").is_ok());
    }

    #[test]
    fn test_signup_rules_in_order() {
        assert_eq!(
            validate_signup("", "a@b.c", "password1", "password1", 8),
            Err(ValidationError::MissingFields)
        );
        assert_eq!(
            validate_signup("Ada", "a@b.c", "password1", "password2", 8),
            Err(ValidationError::PasswordMismatch)
        );
        assert_eq!(
            validate_signup("Ada", "a@b.c", "short", "short", 8),
            Err(ValidationError::PasswordTooShort(8))
        );
        assert!(validate_signup("Ada", "a@b.c", "longenough", "longenough", 8).is_ok());
    }

    #[test]
    fn test_new_password() {
        assert_eq!(
            validate_new_password("abcdefgh", "abcdefgX", 8),
            Err(ValidationError::NewPasswordMismatch)
        );
        assert_eq!(
            validate_new_password("abc", "abc", 8).unwrap_err().to_string(),
            "Password must be at least 8 characters"
        );
    }

    #[test]
    fn test_chat_message_length_ignores_padding() {
        let padded = format!("{}{}", " ".repeat(20), "x".repeat(49));
        assert_eq!(
            validate_chat_message(&padded, 50),
            Err(ValidationError::MessageTooShort(50))
        );
        assert!(validate_chat_message(&"x".repeat(50), 50).is_ok());
    }

    #[test]
    fn test_cv_file_types() {
        assert!(validate_cv_file("cv.pdf", PDF_MIME).is_ok());
        assert!(validate_cv_file("cv.docx", DOCX_MIME).is_ok());
        assert!(validate_cv_file("CV.DOCX", "").is_ok());
        assert_eq!(
            validate_cv_file("cv.png", "image/png"),
            Err(ValidationError::UnsupportedFileType)
        );
        assert_eq!(
            validate_cv_file("cv.doc", "application/octet-stream"),
            Err(ValidationError::UnsupportedFileType)
        );
        assert_eq!(cv_mime("cv.docx", ""), DOCX_MIME);
        assert_eq!(cv_mime("cv.pdf", PDF_MIME), PDF_MIME);
    }

    #[test]
    fn test_photo_limits() {
        let max = 5 * 1024 * 1024;
        assert!(validate_photo(1024, "image/jpeg", max).is_ok());
        assert_eq!(
            validate_photo(max + 1, "image/png", max).unwrap_err().to_string(),
            "File size must be less than 5MB"
        );
        assert_eq!(validate_photo(10, "text/plain", max), Err(ValidationError::NotAnImage));
    }

    #[test]
    fn test_parse_skills() {
        assert_eq!(parse_skills(" rust, ,wasm,  sql "), vec!["rust", "wasm", "sql"]);
        assert!(parse_skills("").is_empty());
    }

    #[test]
    fn test_confirm_state() {
        assert_eq!(ConfirmState::of("secret", ""), ConfirmState::Empty);
        assert_eq!(ConfirmState::of("secret", "secre"), ConfirmState::Mismatch);
        assert_eq!(ConfirmState::of("secret", "secret"), ConfirmState::Match);
    }
}
