use dioxus::prelude::*;
use ui::platform::sleep_ms;
use ui::{actions, use_services, use_toasts};

use crate::Route;

/// Free-text description of the user's background.
#[component]
pub fn Chat() -> Element {
    let services = use_services();
    let toasts = use_toasts();
    let nav = use_navigator();
    let mut message = use_signal(String::new);
    let mut loading = use_signal(|| false);

    let min_chars = services.config.limits.min_chat_chars;
    let typed = message().chars().count();
    let too_short = typed < min_chars;

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let services = services.clone();
        spawn(async move {
            loading.set(true);
            let result = actions::recommend_chat(
                &services.client,
                &services.session,
                &services.config.limits,
                &message(),
            )
            .await;
            loading.set(false);
            match result {
                Ok(count) => {
                    tracing::info!("Chat search returned {count} jobs");
                    toasts.success("Analysis complete! Redirecting to results...");
                    sleep_ms(services.config.ui.redirect_delay_ms).await;
                    nav.push(Route::Results {});
                }
                Err(e) => toasts.failure(&e, "Failed to process request"),
            }
        });
    };

    rsx! {
        div {
            class: "form-page",
            h1 { "Tell us about yourself" }
            p { class: "muted", "Your experience, the skills you use, and the kind of role you want." }
            form {
                class: "card",
                onsubmit: handle_submit,
                textarea {
                    rows: "10",
                    placeholder: "I am a backend developer with five years of experience...",
                    value: message(),
                    oninput: move |evt: FormEvent| message.set(evt.value()),
                }
                div {
                    class: "form-row",
                    span {
                        class: if too_short { "char-count short" } else { "char-count" },
                        "{typed} / {min_chars} characters minimum"
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: loading() || too_short,
                        if loading() { "Analyzing..." } else { "Find Jobs" }
                    }
                }
            }
        }
    }
}
