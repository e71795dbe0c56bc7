//! Page chrome shared by every route: navbar, content slot, footer.

use dioxus::prelude::*;
use ui::{use_session, LogoutButton, Navbar, Session};

use crate::Route;

/// Layout wrapper for all routes. The navbar's right side depends on the
/// session: links to login/register when anonymous, the username and a
/// logout button when authenticated.
#[component]
pub fn Shell() -> Element {
    let session = use_session();
    let nav = use_navigator();

    rsx! {
        div {
            class: "app-shell",
            Navbar {
                Link { class: "navbar-link", to: Route::Home {}, "Home" }
                Link { class: "navbar-link", to: Route::Dashboard {}, "Dashboard" }
                match session.state() {
                    Session::Authenticated(user) => rsx! {
                        Link { class: "navbar-link", to: Route::CreateProperty {}, "List a property" }
                        span { class: "navbar-user", "{user.username}" }
                        LogoutButton {
                            on_logged_out: move |_| {
                                nav.push(Route::Home {});
                            }
                        }
                    },
                    _ => rsx! {
                        Link { class: "navbar-link", to: Route::Login {}, "Login" }
                        Link { class: "navbar-link", to: Route::Register {}, "Register" }
                    },
                }
            }
            main {
                class: "app-content",
                Outlet::<Route> {}
            }
            footer {
                class: "app-footer",
                "© Rently. All rights reserved."
            }
        }
    }
}
