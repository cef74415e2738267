use dioxus::prelude::*;
use store::SavedJob;
use ui::platform::confirm;
use ui::{actions, use_services, use_toasts, SavedJobCard};

use crate::Route;

#[component]
pub fn SavedJobs() -> Element {
    let services = use_services();
    let toasts = use_toasts();
    let mut saved = use_signal(|| None::<Vec<SavedJob>>);
    let mut removing = use_signal(|| None::<i64>);

    use_future({
        let services = services.clone();
        move || {
            let services = services.clone();
            async move {
                match actions::load_saved_jobs(&services.client).await {
                    Ok(jobs) => saved.set(Some(jobs)),
                    Err(e) => {
                        toasts.failure(&e, "Failed to load saved jobs");
                        saved.set(Some(Vec::new()));
                    }
                }
            }
        }
    });

    let remove = move |saved_id: i64| {
        if removing.read().is_some() || !confirm("Remove this job from saved?") {
            return;
        }
        if !actions::claim(&mut removing.write(), saved_id) {
            return;
        }
        let services = services.clone();
        spawn(async move {
            let result = actions::remove_saved_job(&services.client, saved_id).await;
            removing.set(None);
            match result {
                Ok(()) => {
                    if let Some(jobs) = saved.write().as_mut() {
                        actions::drop_saved(jobs, saved_id);
                    }
                    toasts.success("Job removed from saved");
                }
                Err(e) => toasts.failure(&e, "Failed to remove job"),
            }
        });
    };

    rsx! {
        div {
            class: "page-header",
            h1 { "Saved Jobs" }
        }
        match saved() {
            None => rsx! { p { class: "muted", "Loading..." } },
            Some(jobs) if jobs.is_empty() => rsx! {
                div {
                    class: "empty-state",
                    h2 { "No saved jobs" }
                    p { "Bookmark jobs from your results to keep them here." }
                    Link { to: Route::Home {}, class: "btn btn-primary", "Find jobs" }
                }
            },
            Some(jobs) => rsx! {
                div {
                    class: "card-list",
                    for job in jobs {
                        SavedJobCard {
                            key: "{job.saved_id}",
                            job: job.clone(),
                            removing: removing() == Some(job.saved_id),
                            on_remove: remove.clone(),
                        }
                    }
                }
            },
        }
    }
}
