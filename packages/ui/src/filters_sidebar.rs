use api::Filters;
use dioxus::prelude::*;

/// Sidebar of list filters. Keeps its own field buffers and emits the
/// combined [`Filters`] on every change; the listing view owns the query.
#[component]
pub fn FiltersSidebar(onchange: EventHandler<Filters>) -> Element {
    let mut filters = use_signal(Filters::new);

    let mut apply = move |name: &'static str, raw: String| {
        let mut next = filters();
        match name {
            // Numeric filters: ignore anything that doesn't parse
            "bedrooms" | "min_rent" | "max_rent" => {
                if raw.is_empty() {
                    next.remove(name);
                } else if let Ok(n) = raw.parse::<i64>() {
                    next.set(name, n);
                }
            }
            _ => next.set(name, raw),
        }
        filters.set(next.clone());
        onchange.call(next);
    };

    rsx! {
        aside {
            class: "filters-sidebar",
            h3 { "Filters" }
            label {
                span { "City" }
                input {
                    r#type: "text",
                    placeholder: "Enter city name",
                    oninput: move |evt| apply("city", evt.value()),
                }
            }
            label {
                span { "Bedrooms" }
                input {
                    r#type: "number",
                    min: "0",
                    oninput: move |evt| apply("bedrooms", evt.value()),
                }
            }
            label {
                span { "Min rent" }
                input {
                    r#type: "number",
                    min: "0",
                    oninput: move |evt| apply("min_rent", evt.value()),
                }
            }
            label {
                span { "Max rent" }
                input {
                    r#type: "number",
                    min: "0",
                    oninput: move |evt| apply("max_rent", evt.value()),
                }
            }
        }
    }
}
