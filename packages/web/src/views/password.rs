use dioxus::prelude::*;
use ui::platform::sleep_ms;
use ui::{actions, use_services, use_toasts};

use crate::Route;

#[component]
pub fn ForgotPassword() -> Element {
    let services = use_services();
    let toasts = use_toasts();
    let mut email = use_signal(String::new);
    let mut loading = use_signal(|| false);
    let mut sent = use_signal(|| None::<String>);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let services = services.clone();
        spawn(async move {
            loading.set(true);
            let result = actions::forgot_password(&services.client, &email()).await;
            loading.set(false);
            match result {
                Ok(message) => {
                    toasts.success(message.clone());
                    sent.set(Some(message));
                }
                Err(e) => toasts.failure(&e, "Failed to send reset link"),
            }
        });
    };

    rsx! {
        div {
            class: "auth-page",
            h1 { "Forgot password" }
            if let Some(message) = sent() {
                p { class: "notice", "{message}" }
            } else {
                p { class: "muted", "We will email you a link to choose a new password." }
                form {
                    class: "auth-form",
                    onsubmit: handle_submit,
                    input {
                        r#type: "email",
                        placeholder: "Email",
                        value: email(),
                        oninput: move |evt: FormEvent| email.set(evt.value()),
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: loading(),
                        if loading() { "Sending..." } else { "Send reset link" }
                    }
                }
            }
            p {
                class: "muted",
                Link { to: Route::Login {}, "Back to sign in" }
            }
        }
    }
}

/// Target of the emailed reset link, `/reset-password?token=...`.
#[component]
pub fn ResetPassword(token: String) -> Element {
    let services = use_services();
    let toasts = use_toasts();
    let nav = use_navigator();
    let mut new_password = use_signal(String::new);
    let mut confirm = use_signal(String::new);
    let mut loading = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let services = services.clone();
        let token = token.clone();
        spawn(async move {
            loading.set(true);
            let result = actions::reset_password(
                &services.client,
                &services.config.limits,
                &token,
                &new_password(),
                &confirm(),
            )
            .await;
            loading.set(false);
            match result {
                Ok(message) => {
                    toasts.success(message);
                    sleep_ms(services.config.ui.redirect_delay_ms).await;
                    nav.push(Route::Login {});
                }
                Err(e) => toasts.failure(&e, "Failed to reset password"),
            }
        });
    };

    rsx! {
        div {
            class: "auth-page",
            h1 { "Choose a new password" }
            form {
                class: "auth-form",
                onsubmit: handle_submit,
                input {
                    r#type: "password",
                    placeholder: "New password",
                    value: new_password(),
                    oninput: move |evt: FormEvent| new_password.set(evt.value()),
                }
                input {
                    r#type: "password",
                    placeholder: "Confirm new password",
                    value: confirm(),
                    oninput: move |evt: FormEvent| confirm.set(evt.value()),
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Saving..." } else { "Reset password" }
                }
            }
        }
    }
}
