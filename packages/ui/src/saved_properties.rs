use api::{QueryKey, QueryView};
use dioxus::prelude::*;

use crate::query::{use_queries, use_query};

/// The session user's saved properties, loaded under `("saved", ())`.
///
/// Removing one calls the delete endpoint and then invalidates the
/// `"saved"` resource — the list refetches on the next observation rather
/// than being patched in place.
#[component]
pub fn SavedProperties(on_open: EventHandler<i64>) -> Element {
    let queries = use_queries();
    let mut reload = use_signal(|| 0u32);

    let api = queries.api();
    let saved = use_query(move || {
        // Subscribe to the reload counter so invalidation re-observes
        let _generation = reload();
        let api = api.clone();
        (QueryKey::new("saved", &()), move || {
            let api = api.clone();
            async move { api.saved_properties().await }
        })
    });

    let remove = move |property_id: i64| {
        let queries = queries.clone();
        spawn(async move {
            match queries.api().remove_saved(property_id).await {
                Ok(()) => {
                    queries.invalidate("saved");
                    reload += 1;
                }
                Err(e) => tracing::error!("failed to remove saved property: {e}"),
            }
        });
    };

    match saved() {
        QueryView::Loading => rsx! {
            p { "Loading saved properties…" }
        },
        QueryView::Error(message) => rsx! {
            p { class: "error-text", "Error loading saved properties: {message}" }
        },
        QueryView::Ready(saved) if saved.is_empty() => rsx! {
            p { "No saved properties." }
        },
        QueryView::Ready(saved) => rsx! {
            div {
                class: "saved-properties",
                h3 { "Your Saved Properties" }
                for entry in saved {
                    div {
                        key: "{entry.property.id}",
                        class: "saved-property-row",
                        a {
                            href: "#",
                            onclick: {
                                let id = entry.property.id;
                                move |evt: MouseEvent| {
                                    evt.prevent_default();
                                    on_open.call(id);
                                }
                            },
                            "{entry.property.title}"
                        }
                        button {
                            class: "saved-property-remove",
                            onclick: {
                                let remove = remove.clone();
                                let id = entry.property.id;
                                move |_| remove(id)
                            },
                            "Remove"
                        }
                    }
                }
            }
        },
    }
}
