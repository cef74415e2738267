//! Authentication context, shared services and hooks for the UI.

use std::rc::Rc;

use api::{ApiClient, HttpTransport};
use dioxus::core::spawn_forever;
use dioxus::prelude::*;
use store::{ClientConfig, PersistencePolicy, Session, User};

use crate::platform::{navigate_to, resolve_base_url, sleep_ms};
use crate::toast::use_toasts;

pub const LOGIN_PATH: &str = "/login";

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformStorage = store::BrowserStorage;
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type PlatformStorage = store::MemoryStorage;

pub type AppSession = Session<PlatformStorage>;
pub type AppClient = ApiClient<HttpTransport>;

/// Build the session accessor for the current platform.
pub fn make_session(policy: PersistencePolicy) -> AppSession {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        Session::new(
            store::BrowserStorage::local(),
            store::BrowserStorage::session(),
            policy,
        )
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        Session::new(store::MemoryStorage::new(), store::MemoryStorage::new(), policy)
    }
}

/// Everything a page needs to talk to the server and the cache.
#[derive(Clone)]
pub struct AppServices {
    pub client: AppClient,
    pub session: AppSession,
    pub config: Rc<ClientConfig>,
}

/// Authentication state for the application.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
}

impl AuthState {
    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

pub fn use_services() -> AppServices {
    use_context::<AppServices>()
}

/// Provider component for the API client, session cache and auth state.
///
/// Must sit inside a `ToastProvider`. Any 401 from the server clears the
/// session, raises the expiry notice, and sends the browser to the login page.
#[component]
pub fn AuthProvider(config: ClientConfig, children: Element) -> Element {
    let toasts = use_toasts();
    let session = use_hook(|| make_session(config.session.persistence));
    let auth_state = use_signal({
        let session = session.clone();
        move || AuthState {
            user: session.current_user(),
        }
    });

    let services = use_hook(|| {
        let hook_session = session.clone();
        let redirect_ms = config.ui.session_expired_redirect_ms;
        let base_url = resolve_base_url(&config.api.base_url);
        tracing::info!("API server: {base_url}");

        let client = ApiClient::http(base_url).with_unauthorized_hook(move || {
            let mut auth_state = auth_state;
            hook_session.clear();
            auth_state.set(AuthState::default());
            toasts.error(api::SESSION_EXPIRED);
            spawn_forever(async move {
                sleep_ms(redirect_ms).await;
                navigate_to(LOGIN_PATH);
            });
        });

        AppServices {
            client,
            session: session.clone(),
            config: Rc::new(config.clone()),
        }
    });

    use_context_provider(|| services);
    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let mut auth_state = use_auth();
    let services = use_services();
    let mut busy = use_signal(|| false);

    let onclick = move |_| {
        let services = services.clone();
        async move {
            if busy() {
                return;
            }
            busy.set(true);
            crate::actions::logout(&services.client, &services.session).await;
            busy.set(false);
            auth_state.set(AuthState::default());
            navigate_to(LOGIN_PATH);
        }
    };

    rsx! {
        button {
            class: "{class}",
            disabled: busy(),
            onclick: onclick,
            "{label}"
        }
    }
}
