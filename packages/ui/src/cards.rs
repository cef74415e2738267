//! Cards for recommendation results, bookmarks and past searches.
//!
//! Cards never reach for page state: each action is an [`EventHandler`] prop
//! carrying the id the page needs.

use dioxus::prelude::*;
use store::{Job, SavedJob, SearchKind, SearchRecord};

use crate::format::{format_saved_date, format_score, format_search_date, search_label, MatchTier};
use crate::icons::{
    FaArrowUpRightFromSquare, FaBookmark, FaBriefcase, FaCalendar, FaDollarSign, FaFileLines,
    FaGlobe, FaLocationDot, FaMagnifyingGlass, FaMessage, FaTrashCan, FaUpload,
};
use crate::Icon;

#[component]
fn MatchBadge(score: f64) -> Element {
    let color = MatchTier::of(score).color();
    rsx! {
        div {
            class: "match-badge",
            div { class: "match-score", style: "color: {color};", "{format_score(score)}%" }
            p { class: "match-label", "Match" }
        }
    }
}

#[component]
fn SkillList(skills: Vec<String>) -> Element {
    rsx! {
        div {
            class: "skill-list",
            for skill in skills {
                span { class: "badge", "{skill}" }
            }
        }
    }
}

#[component]
fn ViewJobLink(url: Option<String>) -> Element {
    let href = url.filter(|u| !u.is_empty()).unwrap_or_else(|| "#".to_string());
    rsx! {
        a {
            href: "{href}",
            target: "_blank",
            rel: "noopener noreferrer",
            class: "btn btn-primary",
            Icon { icon: FaBriefcase, width: 14, height: 14 }
            "View Job"
            Icon { icon: FaArrowUpRightFromSquare, width: 12, height: 12 }
        }
    }
}

/// One recommendation. The save button only shows for logged-in users.
#[component]
pub fn JobCard(
    job: Job,
    can_save: bool,
    #[props(default)] saving: bool,
    on_save: EventHandler<Option<i64>>,
) -> Element {
    let salary = job.salary.clone().filter(|s| !s.is_empty()).unwrap_or_else(|| "Not specified".to_string());
    let platform = job.platform.clone().unwrap_or_else(|| "Unknown".to_string());
    let job_id = job.id;

    rsx! {
        div {
            class: "card job-card",
            div {
                class: "job-card-header",
                div {
                    h3 { class: "job-title", "{job.title}" }
                    p { class: "job-company", "{job.company}" }
                }
                MatchBadge { score: job.match_score }
            }
            div {
                class: "job-meta",
                span { Icon { icon: FaLocationDot, width: 14, height: 14 } "{job.location}" }
                span { Icon { icon: FaDollarSign, width: 14, height: 14 } "{salary}" }
                span { Icon { icon: FaGlobe, width: 14, height: 14 } "{platform}" }
            }
            p { class: "job-description", "{job.description}" }
            SkillList { skills: job.skills.clone() }
            div {
                class: "card-actions",
                ViewJobLink { url: job.url.clone() }
                if can_save {
                    button {
                        class: "btn btn-outline",
                        disabled: saving,
                        onclick: move |_| on_save.call(job_id),
                        Icon { icon: FaBookmark, width: 14, height: 14 }
                        if saving { "Saving..." } else { "Save Job" }
                    }
                }
            }
        }
    }
}

/// A bookmarked job with a remove button.
#[component]
pub fn SavedJobCard(
    job: SavedJob,
    #[props(default)] removing: bool,
    on_remove: EventHandler<i64>,
) -> Element {
    let platform = job.platform.clone().unwrap_or_else(|| "Unknown".to_string());
    let saved_on = format_saved_date(&job.saved_at);
    let saved_id = job.saved_id;

    rsx! {
        div {
            class: "card job-card",
            div {
                class: "job-card-header",
                div {
                    h3 { class: "job-title", "{job.job_title}" }
                    p { class: "job-company", "{job.company}" }
                }
                MatchBadge { score: job.match_score }
            }
            div {
                class: "job-meta",
                span { Icon { icon: FaLocationDot, width: 14, height: 14 } "{job.location}" }
                span { Icon { icon: FaGlobe, width: 14, height: 14 } "{platform}" }
                span { Icon { icon: FaCalendar, width: 14, height: 14 } "Saved: {saved_on}" }
            }
            p { class: "job-description", "{job.description}" }
            SkillList { skills: job.skills.clone() }
            if let Some(notes) = job.notes.clone().filter(|n| !n.is_empty()) {
                p { class: "job-notes", strong { "Notes: " } "{notes}" }
            }
            div {
                class: "card-actions",
                ViewJobLink { url: job.url.clone() }
                button {
                    class: "btn btn-outline",
                    disabled: removing,
                    onclick: move |_| on_remove.call(saved_id),
                    Icon { icon: FaTrashCan, width: 14, height: 14 }
                    if removing { "Removing..." } else { "Remove" }
                }
            }
        }
    }
}

/// One entry of the search history.
#[component]
pub fn SearchCard(
    search: SearchRecord,
    #[props(default)] opening: bool,
    on_view: EventHandler<i64>,
) -> Element {
    let label = search_label(&search.search_type);
    let when = format_search_date(&search.created_at);
    let keywords = search
        .keywords
        .clone()
        .filter(|k| !k.is_empty())
        .unwrap_or_else(|| "N/A".to_string());
    let search_id = search.id;

    rsx! {
        div {
            class: "card search-card",
            div {
                class: "search-card-body",
                div {
                    class: "search-card-title",
                    match search.kind() {
                        SearchKind::Form => rsx! { Icon { icon: FaFileLines, width: 18, height: 18 } },
                        SearchKind::Chat => rsx! { Icon { icon: FaMessage, width: 18, height: 18 } },
                        SearchKind::Cv => rsx! { Icon { icon: FaUpload, width: 18, height: 18 } },
                        SearchKind::Other => rsx! { Icon { icon: FaMagnifyingGlass, width: 18, height: 18 } },
                    }
                    span { "{label}" }
                }
                p { class: "search-keywords", strong { "Keywords: " } "{keywords}" }
                p { class: "search-date", "{when}" }
            }
            button {
                class: "btn btn-primary",
                disabled: opening,
                onclick: move |_| on_view.call(search_id),
                if opening { "Loading..." } else { "View Results" }
            }
        }
    }
}
