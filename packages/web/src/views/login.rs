//! Login page view with username/password form.

use dioxus::prelude::*;
use ui::{use_api, use_session};

use crate::Route;

/// Login page component.
///
/// On success the token is saved, the session is refreshed explicitly
/// (no page reload), and the user lands back on the listing page. Any
/// failure shows one generic message — the backend's 400 body for bad
/// credentials is deliberately not echoed here.
#[component]
pub fn Login() -> Element {
    let api = use_api();
    let session = use_session();
    let nav = use_navigator();

    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // Already logged in — nothing to do here
    if session.state().is_authenticated() {
        nav.replace(Route::Home {});
    }

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let api = api.clone();
        let session = session.clone();
        spawn(async move {
            error.set(None);
            loading.set(true);
            match api.login(&username(), &password()).await {
                Ok(token) => {
                    api.tokens().save(&token);
                    session.refresh().await;
                    nav.push(Route::Home {});
                }
                Err(e) => {
                    tracing::debug!("login failed: {e}");
                    error.set(Some(
                        "Login failed. Please check your credentials.".to_string(),
                    ));
                }
            }
            loading.set(false);
        });
    };

    rsx! {
        div {
            class: "auth-view",
            form {
                class: "auth-form",
                onsubmit: handle_login,

                h1 { "Sign in to your account" }

                if let Some(message) = error() {
                    div { class: "form-error", "{message}" }
                }

                label {
                    span { "Username" }
                    input {
                        r#type: "text",
                        required: true,
                        autofocus: true,
                        value: username(),
                        oninput: move |evt| username.set(evt.value()),
                    }
                }
                label {
                    span { "Password" }
                    input {
                        r#type: "password",
                        required: true,
                        value: password(),
                        oninput: move |evt| password.set(evt.value()),
                    }
                }
                button {
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Signing in…" } else { "Sign In" }
                }
                p {
                    class: "auth-alternate",
                    "Don't have an account? "
                    Link { to: Route::Register {}, "Register" }
                }
            }
        }
    }
}
