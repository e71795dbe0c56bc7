use dioxus::prelude::*;
use ui::{use_session, SavedProperties, Session};

use crate::Route;

/// Public dashboard: browsable without logging in. Authenticated users
/// additionally see their saved properties.
#[component]
pub fn Dashboard() -> Element {
    let session = use_session();
    let nav = use_navigator();

    rsx! {
        div {
            class: "dashboard-view",
            h1 { "Welcome to the Dashboard" }
            p {
                "This dashboard is public. You can browse here without logging in."
            }
            match session.state() {
                Session::Unknown => rsx! {
                    p { "Checking session…" }
                },
                Session::Authenticated(user) => rsx! {
                    p { class: "dashboard-greeting", "You are logged in as {user.username}." }
                    SavedProperties {
                        on_open: move |id| {
                            nav.push(Route::PropertyDetail { id });
                        },
                    }
                },
                Session::Anonymous => rsx! {
                    p {
                        "To access your account features, please "
                        Link { to: Route::Login {}, "log in" }
                        "."
                    }
                },
            }
        }
    }
}
