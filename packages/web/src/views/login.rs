//! Login page view with email/password form.

use dioxus::prelude::*;
use ui::platform::sleep_ms;
use ui::{actions, use_auth, use_services, use_toasts, AuthState};

use crate::Route;

/// Login page component.
#[component]
pub fn Login() -> Element {
    let services = use_services();
    let toasts = use_toasts();
    let mut auth = use_auth();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut remember = use_signal(|| false);
    let mut loading = use_signal(|| false);

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let services = services.clone();
        spawn(async move {
            loading.set(true);
            let result = actions::login(
                &services.client,
                &services.session,
                &email(),
                &password(),
                remember(),
            )
            .await;
            loading.set(false);

            match result {
                Ok(user) => {
                    auth.set(AuthState { user: Some(user) });
                    toasts.success("Login successful!");
                    sleep_ms(services.config.ui.redirect_delay_ms).await;
                    nav.push(Route::Home {});
                }
                Err(e) => match e.unauthorized_reason() {
                    Some(reason) => toasts.error(reason),
                    None => toasts.failure(&e, "Failed to login"),
                },
            }
        });
    };

    rsx! {
        div {
            class: "auth-page",
            h1 { "Welcome back" }
            p { class: "muted", "Sign in to see your recommendations" }

            form {
                class: "auth-form",
                onsubmit: handle_login,

                input {
                    r#type: "email",
                    placeholder: "Email",
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }
                input {
                    r#type: "password",
                    placeholder: "Password",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }
                div {
                    class: "form-row",
                    label {
                        input {
                            r#type: "checkbox",
                            checked: remember(),
                            onchange: move |evt: FormEvent| remember.set(evt.checked()),
                        }
                        " Remember me"
                    }
                    Link { to: Route::ForgotPassword {}, "Forgot password?" }
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Signing in..." } else { "Sign in" }
                }
            }

            p {
                class: "muted",
                "Don't have an account? "
                Link { to: Route::Signup {}, "Sign up" }
            }
        }
    }
}
