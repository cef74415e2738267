use dioxus::prelude::*;
use ui::{actions, use_services, use_toasts, SearchCard};

use crate::Route;

/// Past searches, each reopenable as a results page.
#[component]
pub fn History() -> Element {
    let services = use_services();
    let toasts = use_toasts();
    let nav = use_navigator();
    let mut opening = use_signal(|| None::<i64>);

    let searches = use_resource({
        let services = services.clone();
        move || {
            let services = services.clone();
            async move {
                match actions::load_history(&services.client).await {
                    Ok(searches) => searches,
                    Err(e) => {
                        toasts.failure(&e, "Failed to load history");
                        Vec::new()
                    }
                }
            }
        }
    });

    let view_results = move |search_id: i64| {
        if !actions::claim(&mut opening.write(), search_id) {
            return;
        }
        let services = services.clone();
        spawn(async move {
            let result = actions::open_search(&services.client, &services.session, search_id).await;
            opening.set(None);
            match result {
                Ok(_) => {
                    nav.push(Route::Results {});
                }
                Err(e) => toasts.failure(&e, "Failed to load results"),
            }
        });
    };

    rsx! {
        div {
            class: "page-header",
            h1 { "Search History" }
        }
        match searches() {
            None => rsx! { p { class: "muted", "Loading..." } },
            Some(list) if list.is_empty() => rsx! {
                div {
                    class: "empty-state",
                    h2 { "No searches yet" }
                    p { "Your searches will show up here." }
                    Link { to: Route::Home {}, class: "btn btn-primary", "Start searching" }
                }
            },
            Some(list) => rsx! {
                div {
                    class: "card-list",
                    for search in list {
                        SearchCard {
                            key: "{search.id}",
                            search: search.clone(),
                            opening: opening() == Some(search.id),
                            on_view: view_results.clone(),
                        }
                    }
                }
            },
        }
    }
}
