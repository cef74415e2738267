use dioxus::prelude::*;
use store::models::initials_of;

use crate::auth::{use_auth, use_services, LogoutButton};

#[component]
pub fn Navbar(children: Element) -> Element {
    rsx! {
        nav {
            class: "navbar",
            {children}
        }
    }
}

/// Avatar for the logged-in user: the profile photo, or initials on a
/// colored disc when there is none.
#[component]
pub fn Avatar(name: String, photo: Option<String>, #[props(default = 36)] size: u32) -> Element {
    let style = format!("width: {size}px; height: {size}px;");
    match photo.filter(|p| !p.is_empty()) {
        Some(src) => rsx! {
            img { class: "avatar", style: "{style}", src: "{src}", alt: "{name}" }
        },
        None => {
            let initials = initials_of(&name);
            rsx! {
                div { class: "avatar avatar-initials", style: "{style}", "{initials}" }
            }
        }
    }
}

/// Right-hand side of the navbar when logged in.
#[component]
pub fn UserMenu() -> Element {
    let auth = use_auth();
    let services = use_services();
    let Some(user) = auth().user else {
        return rsx! {};
    };

    rsx! {
        div {
            class: "user-menu",
            Avatar {
                name: user.display_name().to_string(),
                photo: user.profile_photo.as_deref().map(|p| services.client.media_url(p)),
            }
            span { class: "user-name", "{user.display_name()}" }
            LogoutButton { class: "btn btn-outline" }
        }
    }
}
