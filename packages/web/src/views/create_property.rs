//! Property creation form, owners only in practice (the backend enforces
//! permissions; the client only guards on having a session at all).

use api::{ImageFile, NewProperty};
use dioxus::prelude::*;
use ui::{use_queries, use_session, Session};

use crate::Route;

#[component]
pub fn CreateProperty() -> Element {
    let session = use_session();
    let queries = use_queries();
    let nav = use_navigator();

    let mut form = use_signal(NewProperty::default);
    let mut images = use_signal(Vec::<ImageFile>::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut submitting = use_signal(|| false);

    let handle_files = move |evt: FormEvent| async move {
        let Some(engine) = evt.files() else {
            return;
        };
        let mut picked = Vec::new();
        for name in engine.files() {
            if let Some(bytes) = engine.read_file(&name).await {
                picked.push(ImageFile { name, bytes });
            }
        }
        images.set(picked);
    };

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let queries = queries.clone();
        spawn(async move {
            error.set(None);
            submitting.set(true);
            match queries.api().create_property(&form(), images()).await {
                Ok(()) => {
                    // The listing the new property belongs in is now stale
                    queries.invalidate("properties");
                    nav.push(Route::Home {});
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            submitting.set(false);
        });
    };

    let mut edit = move |apply: fn(&mut NewProperty, String), value: String| {
        form.with_mut(|f| apply(f, value));
    };

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
                class: "auth-view",
                form {
                    class: "auth-form",
                    onsubmit: handle_submit,

                    h1 { "List a property" }

                    if let Some(message) = error() {
                        div { class: "form-error", "{message}" }
                    }

                    label {
                        span { "Title" }
                        input {
                            r#type: "text",
                            required: true,
                            value: form().title,
                            oninput: move |evt| edit(|f, v| f.title = v, evt.value()),
                        }
                    }
                    label {
                        span { "Description" }
                        textarea {
                            value: form().description,
                            oninput: move |evt| edit(|f, v| f.description = v, evt.value()),
                        }
                    }
                    label {
                        span { "Monthly rent (₹)" }
                        input {
                            r#type: "number",
                            required: true,
                            min: "0",
                            value: form().price,
                            oninput: move |evt| edit(|f, v| f.price = v, evt.value()),
                        }
                    }
                    label {
                        span { "City" }
                        input {
                            r#type: "text",
                            required: true,
                            value: form().city,
                            oninput: move |evt| edit(|f, v| f.city = v, evt.value()),
                        }
                    }
                    label {
                        span { "Images" }
                        input {
                            r#type: "file",
                            accept: "image/*",
                            multiple: true,
                            onchange: handle_files,
                        }
                    }
                    if !images().is_empty() {
                        p { class: "form-hint", "{images().len()} image(s) attached" }
                    }
                    button {
                        r#type: "submit",
                        disabled: submitting(),
                        if submitting() { "Creating…" } else { "Create" }
                    }
                }
            }
        },
    }
}
