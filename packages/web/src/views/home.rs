use api::{Filters, QueryKey, QueryView};
use dioxus::prelude::*;
use ui::{use_api, use_query, FiltersSidebar, PropertyCard};

use crate::Route;

/// Listing page: filter sidebar plus the property grid. The list query is
/// keyed by the current filters, so editing a filter issues a new query
/// under a new key while previous results stay cached.
#[component]
pub fn Home() -> Element {
    let api = use_api();
    let nav = use_navigator();
    let mut filters = use_signal(Filters::new);

    let listing = use_query(move || {
        let api = api.clone();
        let filters = filters();
        (QueryKey::new("properties", &filters), move || {
            let api = api.clone();
            let filters = filters.clone();
            async move { api.list_properties(&filters).await }
        })
    });

    rsx! {
        div {
            class: "home-view",
            FiltersSidebar {
                onchange: move |next| filters.set(next),
            }
            section {
                class: "property-grid",
                match listing() {
                    QueryView::Loading => rsx! {
                        p { "Loading…" }
                    },
                    QueryView::Error(message) => rsx! {
                        p { class: "error-text", "Error: {message}" }
                    },
                    QueryView::Ready(page) if page.results.is_empty() => rsx! {
                        p { "No properties found." }
                    },
                    QueryView::Ready(page) => rsx! {
                        for property in page.results {
                            PropertyCard {
                                key: "{property.id}",
                                property: property.clone(),
                                on_view: move |id| {
                                    nav.push(Route::PropertyDetail { id });
                                },
                            }
                        }
                    },
                }
            }
        }
    }
}
