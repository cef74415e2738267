//! Sign-up page view with email/password form.

use dioxus::prelude::*;
use ui::actions::{self, SignupForm};
use ui::platform::sleep_ms;
use ui::validation::ConfirmState;
use ui::{use_auth, use_services, use_toasts, AuthState};

use crate::Route;

/// Sign-up page component.
#[component]
pub fn Signup() -> Element {
    let services = use_services();
    let toasts = use_toasts();
    let mut auth = use_auth();
    let nav = use_navigator();
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);
    let mut loading = use_signal(|| false);

    let min_len = services.config.limits.min_password_len;
    let confirm_state = ConfirmState::of(&password(), &confirm_password());

    let handle_signup = move |evt: FormEvent| {
        evt.prevent_default();
        let services = services.clone();
        spawn(async move {
            let form = SignupForm {
                full_name: name(),
                email: email(),
                password: password(),
                confirm: confirm_password(),
            };
            loading.set(true);
            let result =
                actions::signup(&services.client, &services.session, &services.config.limits, &form)
                    .await;
            loading.set(false);

            match result {
                Ok(user) => {
                    auth.set(AuthState { user: Some(user) });
                    toasts.success("Account created successfully!");
                    sleep_ms(services.config.ui.redirect_delay_ms).await;
                    nav.push(Route::Home {});
                }
                Err(e) => toasts.failure(&e, "Failed to sign up"),
            }
        });
    };

    rsx! {
        div {
            class: "auth-page",
            h1 { "Create Account" }
            p { class: "muted", "Start getting matched in minutes" }

            form {
                class: "auth-form",
                onsubmit: handle_signup,

                input {
                    r#type: "text",
                    placeholder: "Full name",
                    value: name(),
                    oninput: move |evt: FormEvent| name.set(evt.value()),
                }
                input {
                    r#type: "email",
                    placeholder: "Email",
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }
                input {
                    r#type: "password",
                    placeholder: "Password (min {min_len} characters)",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }
                input {
                    class: confirm_state.class(),
                    r#type: "password",
                    placeholder: "Confirm password",
                    value: confirm_password(),
                    oninput: move |evt: FormEvent| confirm_password.set(evt.value()),
                }
                if confirm_state == ConfirmState::Mismatch {
                    p { class: "field-hint error", "Passwords do not match" }
                }

                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Creating account..." } else { "Sign up" }
                }
            }

            p {
                class: "muted",
                "Already have an account? "
                Link { to: Route::Login {}, "Sign in" }
            }
        }
    }
}
