use dioxus::prelude::*;
use ui::format::pdf_file_name;
use ui::icons::FaDownload;
use ui::platform::{download, today_iso};
use ui::{actions, use_auth, use_services, use_toasts, Icon, JobCard};

use crate::Route;

/// The most recent recommendations, read from the cache.
#[component]
pub fn Results() -> Element {
    let services = use_services();
    let toasts = use_toasts();
    let auth = use_auth();
    let jobs = use_signal({
        let session = services.session.clone();
        move || session.job_results()
    });
    let mut saving = use_signal(|| None::<i64>);
    let mut exporting = use_signal(|| false);

    let save = {
        let services = services.clone();
        move |job_id: Option<i64>| {
            let services = services.clone();
            spawn(async move {
                saving.set(job_id);
                let result = actions::save_job(&services.client, &services.session, job_id).await;
                saving.set(None);
                match result {
                    Ok(_) => toasts.success("Job saved successfully!"),
                    Err(e) => toasts.failure(&e, "Failed to save job"),
                }
            });
        }
    };

    let export = move |_| {
        let services = services.clone();
        spawn(async move {
            exporting.set(true);
            let result = actions::export_pdf(&services.client, &services.session, &jobs()).await;
            exporting.set(false);
            match result {
                Ok(bytes) => match download(&bytes, "application/pdf", &pdf_file_name(&today_iso())) {
                    Ok(()) => toasts.success("PDF downloaded successfully!"),
                    Err(e) => {
                        tracing::error!("PDF download failed: {e}");
                        toasts.error("Failed to export PDF");
                    }
                },
                Err(e) => toasts.failure(&e, "Failed to export PDF"),
            }
        });
    };

    if jobs().is_empty() {
        return rsx! {
            div {
                class: "empty-state",
                h2 { "No recommendations found" }
                p { "Run a search to see jobs matched to you." }
                Link { to: Route::Structured {}, class: "btn btn-primary", "Go to Search" }
            }
        };
    }

    let can_save = auth().is_logged_in();
    rsx! {
        div {
            class: "page-header",
            h1 { "Your Job Matches" }
            button {
                class: "btn btn-outline",
                disabled: exporting(),
                onclick: export,
                Icon { icon: FaDownload, width: 14, height: 14 }
                if exporting() { "Generating..." } else { "Export to PDF" }
            }
        }
        div {
            class: "card-list",
            for (index, job) in jobs().into_iter().enumerate() {
                JobCard {
                    key: "{index}",
                    saving: job.id.is_some() && saving() == job.id,
                    job: job.clone(),
                    can_save,
                    on_save: save.clone(),
                }
            }
        }
    }
}
