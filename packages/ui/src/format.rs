//! Display helpers shared by the cards and pages.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use store::User;

/// Color band for a match score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchTier {
    Excellent,
    Strong,
    Fair,
    Low,
}

impl MatchTier {
    pub fn of(score: f64) -> Self {
        if score >= 90.0 {
            Self::Excellent
        } else if score >= 80.0 {
            Self::Strong
        } else if score >= 70.0 {
            Self::Fair
        } else {
            Self::Low
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Excellent => "#22c55e",
            Self::Strong => "#3b82f6",
            Self::Fair => "#eab308",
            Self::Low => "#6b7280",
        }
    }
}

/// `87` for whole scores, `87.5` otherwise.
pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{score:.0}")
    } else {
        format!("{:.1}", score)
    }
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.naive_local());
    }
    const FORMATS: [&str; 3] = [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%a, %d %b %Y %H:%M:%S GMT",
    ];
    FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(raw, f).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// `January 5, 2024, 09:30 AM`; unparsable input is shown as-is.
pub fn format_search_date(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format("%B %-d, %Y, %I:%M %p").to_string(),
        None => raw.to_string(),
    }
}

/// `1/5/2024`; unparsable input is shown as-is.
pub fn format_saved_date(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format("%-m/%-d/%Y").to_string(),
        None => raw.to_string(),
    }
}

/// Heading for a history card, e.g. `Chat Search`.
pub fn search_label(search_type: &str) -> String {
    let mut chars = search_type.chars();
    let kind = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => "Unknown".to_string(),
    };
    format!("{kind} Search")
}

/// Name printed on the PDF export.
pub fn export_user_name(user: Option<&User>) -> String {
    match user {
        Some(u) => u.display_name().to_string(),
        None => "User".to_string(),
    }
}

/// `job_recommendations_2024-01-05.pdf` from an ISO date or timestamp.
pub fn pdf_file_name(iso_date: &str) -> String {
    let day = iso_date.split('T').next().unwrap_or(iso_date);
    format!("job_recommendations_{day}.pdf")
}
