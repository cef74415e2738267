//! Page shell shared by every route, plus the login gate.

use dioxus::prelude::*;
use ui::icons::FaBriefcase;
use ui::{use_auth, Icon, Navbar, UserMenu};

use crate::Route;

#[component]
pub fn AppLayout() -> Element {
    let auth = use_auth();
    let logged_in = auth().is_logged_in();

    rsx! {
        Navbar {
            Link {
                to: Route::Home {},
                class: "brand",
                Icon { icon: FaBriefcase, width: 20, height: 20 }
                "JobMatch"
            }
            div {
                class: "nav-links",
                Link { to: Route::Home {}, active_class: "active", "Home" }
                if logged_in {
                    Link { to: Route::Chat {}, active_class: "active", "AI Chat" }
                    Link { to: Route::Structured {}, active_class: "active", "Search" }
                    Link { to: Route::Upload {}, active_class: "active", "Upload CV" }
                    Link { to: Route::History {}, active_class: "active", "History" }
                    Link { to: Route::SavedJobs {}, active_class: "active", "Saved" }
                    Link { to: Route::Profile {}, active_class: "active", "Profile" }
                }
            }
            div {
                class: "nav-user",
                if logged_in {
                    UserMenu {}
                } else {
                    Link { to: Route::Login {}, class: "btn btn-outline", "Login" }
                    Link { to: Route::Signup {}, class: "btn btn-primary", "Sign Up" }
                }
            }
        }
        main {
            class: "page",
            Outlet::<Route> {}
        }
    }
}

/// Renders nested routes only for a cached user. Visitors without one are
/// sent to the login page on arrival; a session that expires later is left to
/// the unauthorized hook's own redirect.
#[component]
pub fn RequireLogin() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let arrived_logged_in = use_hook(|| auth.peek().is_logged_in());

    use_effect(move || {
        if !arrived_logged_in {
            nav.replace(Route::Login {});
        }
    });

    if auth().is_logged_in() {
        rsx! { Outlet::<Route> {} }
    } else {
        rsx! {}
    }
}

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        div {
            class: "empty-state",
            h2 { "Page not found" }
            p { "Nothing lives at /{path}." }
            Link { to: Route::Home {}, class: "btn btn-primary", "Back to home" }
        }
    }
}
