use api::{Property, QueryKey, QueryView};
use dioxus::prelude::*;
use ui::{format_inr, use_queries, use_session, InquiryForm, ReviewList, Session};

use crate::Route;

/// Property detail page. Guarded on session presence: anonymous viewers
/// are sent to the login page; while the session is still unknown a
/// placeholder renders so the guard never fires on a half-initialized
/// state.
#[component]
pub fn PropertyDetail(id: i64) -> Element {
    let session = use_session();
    let queries = use_queries();
    let nav = use_navigator();
    let mut property = use_signal(|| QueryView::<Property>::Loading);

    let loader_session = session.clone();
    let _loader = use_resource(move || {
        let queries = queries.clone();
        // Reactive read: the query is only enabled once authenticated
        let authenticated = loader_session.state().is_authenticated();
        async move {
            if !authenticated {
                return;
            }
            let api = queries.api();
            let view = queries
                .query(QueryKey::new("property", &id), move || {
                    let api = api.clone();
                    async move { api.property(id).await }
                })
                .await;
            property.set(view);
        }
    });

    match session.state() {
        Session::Unknown => rsx! {
            p { "Checking session…" }
        },
        Session::Anonymous => {
            nav.replace(Route::Login {});
            rsx! {
                p { "Redirecting to login…" }
            }
        }
        Session::Authenticated(_) => rsx! {
            div {
                class: "property-detail",
                match property() {
                    QueryView::Loading => rsx! {
                        p { "Loading…" }
                    },
                    QueryView::Error(message) => rsx! {
                        p { class: "error-text", "Error: {message}" }
                    },
                    QueryView::Ready(property) => rsx! {
                        if let Some(image_url) = &property.image_url {
                            img {
                                class: "property-detail-image",
                                src: "{image_url}",
                                alt: "{property.title}",
                            }
                        }
                        h1 { "{property.title}" }
                        p { class: "property-card-price", "{format_inr(property.price)}" }
                        if let Some(description) = &property.description {
                            p { "{description}" }
                        }
                    },
                }
                ReviewList { property_id: id }
                InquiryForm { property_id: id }
            }
        },
    }
}
