use dioxus::prelude::*;

use crate::icons::FaHouse;
use crate::Icon;

/// Top navigation bar: brand on the left, page links (supplied by the
/// app, which owns the route table) on the right.
#[component]
pub fn Navbar(children: Element) -> Element {
    rsx! {
        header {
            class: "navbar",
            div {
                class: "navbar-brand",
                Icon { icon: FaHouse, width: 18, height: 18 }
                span { "Rently" }
            }
            nav {
                class: "navbar-links",
                {children}
            }
        }
    }
}
