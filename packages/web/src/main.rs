use dioxus::prelude::*;

use ui::{QueryProvider, SessionProvider};
use views::{CreateProperty, Dashboard, Home, Login, PropertyDetail, Register, Shell};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
    #[route("/")]
    Home {},
    #[route("/login")]
    Login {},
    #[route("/register")]
    Register {},
    #[route("/properties/create")]
    CreateProperty {},
    #[route("/properties/:id")]
    PropertyDetail { id: i64 },
    #[route("/dashboard")]
    Dashboard {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        QueryProvider {
            SessionProvider {
                Router::<Route> {}
            }
        }
    }
}
