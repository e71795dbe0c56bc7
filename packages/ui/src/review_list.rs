use api::{QueryKey, QueryView};
use dioxus::prelude::*;

use crate::icons::FaStar;
use crate::query::{use_api, use_query};
use crate::Icon;

/// Reviews for one property, loaded through the query cache under
/// `("reviews", property_id)`.
#[component]
pub fn ReviewList(property_id: i64) -> Element {
    let api = use_api();

    let reviews = use_query(move || {
        let api = api.clone();
        (QueryKey::new("reviews", &property_id), move || {
            let api = api.clone();
            async move { api.reviews(property_id).await }
        })
    });

    match reviews() {
        QueryView::Loading => rsx! {
            p { "Loading reviews…" }
        },
        QueryView::Error(message) => rsx! {
            p { class: "error-text", "Error loading reviews: {message}" }
        },
        QueryView::Ready(reviews) if reviews.is_empty() => rsx! {
            p { "No reviews yet." }
        },
        QueryView::Ready(reviews) => rsx! {
            div {
                class: "review-list",
                h3 { "Reviews" }
                for review in reviews {
                    div {
                        key: "{review.id}",
                        class: "review",
                        p { class: "review-author", "{review.reviewer.username}" }
                        p {
                            class: "review-rating",
                            Icon { icon: FaStar, width: 12, height: 12 }
                            " {review.rating}/5"
                        }
                        p { "{review.review_text}" }
                    }
                }
            }
        },
    }
}
