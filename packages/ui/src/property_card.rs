use api::Property;
use dioxus::prelude::*;

/// Format a rupee amount with Indian digit grouping (12,34,567).
pub fn format_inr(amount: f64) -> String {
    let rupees = amount.round() as i64;
    let digits = rupees.abs().to_string();

    let (head, tail) = if digits.len() > 3 {
        digits.split_at(digits.len() - 3)
    } else {
        ("", digits.as_str())
    };

    // After the last group of three, groups of two
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    if end > 0 {
        groups.push(&head[..end]);
    }
    groups.reverse();

    let mut out = String::from(if rupees < 0 { "-₹" } else { "₹" });
    if groups.is_empty() {
        out.push_str(tail);
    } else {
        out.push_str(&groups.join(","));
        out.push(',');
        out.push_str(tail);
    }
    out
}

/// Listing card: image (when present), title, price, clamped description,
/// and a detail link via `on_view`.
#[component]
pub fn PropertyCard(property: Property, on_view: EventHandler<i64>) -> Element {
    let id = property.id;

    rsx! {
        div {
            class: "property-card",
            if let Some(image_url) = &property.image_url {
                img {
                    class: "property-card-image",
                    src: "{image_url}",
                    alt: "{property.title}",
                }
            }
            div {
                class: "property-card-body",
                h2 { class: "property-card-title", "{property.title}" }
                p { class: "property-card-price", "{format_inr(property.price)}" }
                if let Some(description) = &property.description {
                    p { class: "property-card-description", "{description}" }
                }
                button {
                    class: "property-card-link",
                    onclick: move |_| on_view.call(id),
                    "View details"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_inr_grouping() {
        assert_eq!(format_inr(999.0), "₹999");
        assert_eq!(format_inr(1000.0), "₹1,000");
        assert_eq!(format_inr(15000.0), "₹15,000");
        assert_eq!(format_inr(1234567.0), "₹12,34,567");
        assert_eq!(format_inr(12345678.0), "₹1,23,45,678");
    }

    #[test]
    fn test_format_inr_rounds_and_signs() {
        assert_eq!(format_inr(18500.4), "₹18,500");
        assert_eq!(format_inr(0.0), "₹0");
        assert_eq!(format_inr(-2500.0), "-₹2,500");
    }
}
