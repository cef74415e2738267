use dioxus::prelude::*;

use store::ClientConfig;
use ui::{AuthProvider, ToastProvider};
use views::{
    AppLayout, Chat, ForgotPassword, History, Home, Login, NotFound, Profile, RequireLogin,
    ResetPassword, Results, SavedJobs, Signup, Structured, Upload,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(AppLayout)]
        #[route("/")]
        Home {},
        #[route("/login")]
        Login {},
        #[route("/signup")]
        Signup {},
        #[route("/forgot-password")]
        ForgotPassword {},
        #[route("/reset-password?:token")]
        ResetPassword { token: String },
        #[route("/results")]
        Results {},
        #[layout(RequireLogin)]
            #[route("/chat")]
            Chat {},
            #[route("/search")]
            Structured {},
            #[route("/upload")]
            Upload {},
            #[route("/history")]
            History {},
            #[route("/saved")]
            SavedJobs {},
            #[route("/profile")]
            Profile {},
        #[end_layout]
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

const FAVICON: Asset = asset!("/assets/favicon.svg");
const MAIN_CSS: Asset = asset!("/assets/main.css");

/// Settings baked into the bundle at build time.
const CONFIG_TOML: &str = include_str!("../jobmatch.toml");

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = use_hook(|| ClientConfig::from_toml_or_default(CONFIG_TOML));
    let toast_ms = config.ui.toast_ms;

    rsx! {
        // Global app resources
        document::Link { rel: "icon", href: FAVICON }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        ToastProvider {
            duration_ms: toast_ms,
            AuthProvider {
                config,
                Router::<Route> {}
            }
        }
    }
}
