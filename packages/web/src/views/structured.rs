use api::FormProfile;
use dioxus::prelude::*;
use ui::platform::sleep_ms;
use ui::validation::parse_skills;
use ui::{actions, use_auth, use_services, use_toasts};

use crate::Route;

const EXPERIENCE_LEVELS: [&str; 5] = ["Entry Level", "1-3 years", "3-5 years", "5-10 years", "10+ years"];
const WORK_MODES: [&str; 3] = ["Remote", "Hybrid", "On-site"];

#[component]
fn TextField(label: String, value: Signal<String>, #[props(default)] placeholder: String) -> Element {
    let mut value = value;
    rsx! {
        label {
            class: "field",
            span { "{label}" }
            input {
                r#type: "text",
                placeholder: "{placeholder}",
                value: value(),
                oninput: move |evt: FormEvent| value.set(evt.value()),
            }
        }
    }
}

#[component]
fn SelectField(label: String, value: Signal<String>, options: Vec<&'static str>) -> Element {
    let mut value = value;
    rsx! {
        label {
            class: "field",
            span { "{label}" }
            select {
                value: value(),
                onchange: move |evt: FormEvent| value.set(evt.value()),
                option { value: "", "Select..." }
                for opt in options {
                    option { value: opt, "{opt}" }
                }
            }
        }
    }
}

/// Structured profile form.
#[component]
pub fn Structured() -> Element {
    let services = use_services();
    let toasts = use_toasts();
    let auth = use_auth();
    let nav = use_navigator();

    let cached_email = auth().user.map(|u| u.email).unwrap_or_default();
    let full_name = use_signal(String::new);
    let email = use_signal(move || cached_email);
    let job_title = use_signal(String::new);
    let skills = use_signal(String::new);
    let experience = use_signal(String::new);
    let work_mode = use_signal(String::new);
    let salary = use_signal(String::new);
    let industry = use_signal(String::new);
    let mut notes = use_signal(String::new);
    let mut loading = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let services = services.clone();
        spawn(async move {
            let profile = FormProfile {
                full_name: full_name(),
                email: email(),
                job_title: job_title(),
                skills: parse_skills(&skills()),
                experience: experience(),
                work_mode: work_mode(),
                salary: salary(),
                industry: industry(),
                location: "Remote".to_string(),
                notes: notes(),
            };
            loading.set(true);
            let result = actions::recommend_form(&services.client, &services.session, &profile).await;
            loading.set(false);
            match result {
                Ok(count) => {
                    if count == 0 {
                        tracing::warn!("Form search returned no jobs");
                    }
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
            h1 { "Structured Search" }
            form {
                class: "card form-grid",
                onsubmit: handle_submit,
                TextField { label: "Full name", value: full_name }
                TextField { label: "Email", value: email }
                TextField { label: "Desired position", value: job_title, placeholder: "Backend Engineer" }
                TextField { label: "Skills", value: skills, placeholder: "Rust, SQL, Docker" }
                SelectField { label: "Experience", value: experience, options: EXPERIENCE_LEVELS.to_vec() }
                SelectField { label: "Work mode", value: work_mode, options: WORK_MODES.to_vec() }
                TextField { label: "Expected salary", value: salary }
                TextField { label: "Industry", value: industry }
                label {
                    class: "field wide",
                    span { "Notes" }
                    textarea {
                        rows: "4",
                        value: notes(),
                        oninput: move |evt: FormEvent| notes.set(evt.value()),
                    }
                }
                button {
                    class: "btn btn-primary wide",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Analyzing..." } else { "Get Recommendations" }
                }
            }
        }
    }
}
