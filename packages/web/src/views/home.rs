use dioxus::prelude::*;
use ui::icons::{FaFileLines, FaMessage, FaUpload};
use ui::{use_auth, Icon};

use crate::Route;

/// Landing page with the three ways to get recommendations.
#[component]
pub fn Home() -> Element {
    let auth = use_auth();
    let greeting = match auth().user {
        Some(user) => format!("Welcome back, {}", user.display_name()),
        None => "Find jobs that fit you".to_string(),
    };

    rsx! {
        section {
            class: "hero",
            h1 { "{greeting}" }
            p { "Describe yourself, fill in a profile, or upload your CV. We match you against fresh postings." }
            if !auth().is_logged_in() {
                div {
                    class: "hero-actions",
                    Link { to: Route::Signup {}, class: "btn btn-primary", "Get started" }
                    Link { to: Route::Login {}, class: "btn btn-outline", "I have an account" }
                }
            }
        }
        section {
            class: "paths",
            Link {
                to: Route::Chat {},
                class: "card path-card",
                Icon { icon: FaMessage, width: 28, height: 28 }
                h3 { "AI Chat" }
                p { "Tell us about your experience in your own words." }
            }
            Link {
                to: Route::Structured {},
                class: "card path-card",
                Icon { icon: FaFileLines, width: 28, height: 28 }
                h3 { "Structured Search" }
                p { "Fill in title, skills, and preferences." }
            }
            Link {
                to: Route::Upload {},
                class: "card path-card",
                Icon { icon: FaUpload, width: 28, height: 28 }
                h3 { "Upload CV" }
                p { "Let us read your PDF or DOCX resume." }
            }
        }
    }
}
