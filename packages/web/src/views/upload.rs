use dioxus::html::FileData;
use dioxus::html::HasFileData;
use dioxus::prelude::*;
use ui::actions::{self, PickedFile};
use ui::icons::{FaCloudArrowUp, FaFileLines, FaXmark};
use ui::platform::{read_file, sleep_ms};
use ui::validation::validate_cv_file;
use ui::{use_services, use_toasts, Icon, Toasts};

use crate::Route;

/// Check and read a candidate CV; rejected files never reach the page state.
async fn accept(file: FileData, toasts: Toasts, mut picked: Signal<Option<PickedFile>>) {
    if let Err(e) = validate_cv_file(&file.name(), &file.content_type().unwrap_or_default()) {
        toasts.error(e.to_string());
        return;
    }
    match read_file(file).await {
        Ok(cv) => picked.set(Some(cv)),
        Err(e) => {
            tracing::error!("Failed to read CV: {e}");
            toasts.error("Could not read that file");
        }
    }
}

/// CV upload with click-to-browse and drag-and-drop.
#[component]
pub fn Upload() -> Element {
    let services = use_services();
    let toasts = use_toasts();
    let nav = use_navigator();
    let mut picked = use_signal(|| None::<PickedFile>);
    let mut dragging = use_signal(|| false);
    let mut loading = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let services = services.clone();
        let cv = picked.peek().clone();
        spawn(async move {
            loading.set(true);
            let result = actions::recommend_cv(&services.client, &services.session, cv).await;
            loading.set(false);
            match result {
                Ok(_) => {
                    toasts.success("Analysis complete! Redirecting to results...");
                    sleep_ms(services.config.ui.redirect_delay_ms).await;
                    nav.push(Route::Results {});
                }
                Err(e) => toasts.failure(&e, "Failed to process request"),
            }
        });
    };

    let picked_name = picked.read().as_ref().map(|cv| cv.name.clone());

    rsx! {
        div {
            class: "form-page",
            h1 { "Upload your CV" }
            p { class: "muted", "PDF or DOCX. We extract your skills and experience to match you." }
            form {
                class: "card",
                onsubmit: handle_submit,
                label {
                    class: if dragging() { "dropzone dragging" } else { "dropzone" },
                    ondragover: move |evt: DragEvent| {
                        evt.prevent_default();
                        dragging.set(true);
                    },
                    ondragleave: move |_| dragging.set(false),
                    ondrop: move |evt: DragEvent| {
                        evt.prevent_default();
                        dragging.set(false);
                        if let Some(file) = evt.files().into_iter().next() {
                            spawn(accept(file, toasts, picked));
                        }
                    },
                    Icon { icon: FaCloudArrowUp, width: 36, height: 36 }
                    p { "Drag your CV here or click to browse" }
                    input {
                        r#type: "file",
                        accept: ".pdf,.docx",
                        class: "hidden",
                        onchange: move |evt: FormEvent| {
                            if let Some(file) = evt.files().into_iter().next() {
                                spawn(accept(file, toasts, picked));
                            }
                        },
                    }
                }
                if let Some(name) = picked_name {
                    div {
                        class: "file-chip",
                        Icon { icon: FaFileLines, width: 16, height: 16 }
                        span { "{name}" }
                        button {
                            r#type: "button",
                            class: "icon-btn",
                            onclick: move |_| picked.set(None),
                            Icon { icon: FaXmark, width: 14, height: 14 }
                        }
                    }
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Analyzing..." } else { "Analyze CV" }
                }
            }
        }
    }
}
