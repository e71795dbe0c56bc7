//! Registration page view.
//!
//! Field values are forwarded raw; required-ness is enforced by native
//! form constraints. Backend validation failures come back flattened into
//! a single string and are shown inline without navigating away.

use api::{ApiError, RegistrationForm};
use dioxus::prelude::*;
use ui::use_queries;

use crate::Route;

#[component]
pub fn Register() -> Element {
    let queries = use_queries();
    let nav = use_navigator();

    // Select fields start on the same defaults the <select> elements show
    let mut form = use_signal(|| RegistrationForm {
        user_type: "tenant".to_string(),
        gender: "male".to_string(),
        ..Default::default()
    });
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let mut edit = move |apply: fn(&mut RegistrationForm, String), value: String| {
        form.with_mut(|f| apply(f, value));
    };

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        let queries = queries.clone();
        spawn(async move {
            error.set(None);
            loading.set(true);
            match queries.api().register(&form()).await {
                Ok(()) => {
                    nav.push(Route::Login {});
                }
                Err(ApiError::Validation(message)) => error.set(Some(message)),
                Err(e) => {
                    tracing::debug!("registration failed: {e}");
                    error.set(Some(
                        "Registration failed. Please check your details.".to_string(),
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
                onsubmit: handle_register,

                h1 { "Create your account" }

                if let Some(message) = error() {
                    div { class: "form-error", "{message}" }
                }

                label {
                    span { "Username" }
                    input {
                        r#type: "text",
                        required: true,
                        autofocus: true,
                        value: form().username,
                        oninput: move |evt| edit(|f, v| f.username = v, evt.value()),
                    }
                }
                label {
                    span { "Email" }
                    input {
                        r#type: "email",
                        required: true,
                        value: form().email,
                        oninput: move |evt| edit(|f, v| f.email = v, evt.value()),
                    }
                }
                div {
                    class: "form-row",
                    label {
                        span { "First Name" }
                        input {
                            r#type: "text",
                            required: true,
                            value: form().first_name,
                            oninput: move |evt| edit(|f, v| f.first_name = v, evt.value()),
                        }
                    }
                    label {
                        span { "Last Name" }
                        input {
                            r#type: "text",
                            required: true,
                            value: form().last_name,
                            oninput: move |evt| edit(|f, v| f.last_name = v, evt.value()),
                        }
                    }
                }
                label {
                    span { "Phone Number" }
                    input {
                        r#type: "text",
                        required: true,
                        value: form().phone_number,
                        oninput: move |evt| edit(|f, v| f.phone_number = v, evt.value()),
                    }
                }
                label {
                    span { "User Type" }
                    select {
                        value: form().user_type,
                        onchange: move |evt| edit(|f, v| f.user_type = v, evt.value()),
                        option { value: "tenant", "Tenant" }
                        option { value: "owner", "Owner" }
                        option { value: "both", "Both" }
                    }
                }
                label {
                    span { "Date of Birth" }
                    input {
                        r#type: "date",
                        required: true,
                        value: form().date_of_birth,
                        oninput: move |evt| edit(|f, v| f.date_of_birth = v, evt.value()),
                    }
                }
                label {
                    span { "Gender" }
                    select {
                        value: form().gender,
                        onchange: move |evt| edit(|f, v| f.gender = v, evt.value()),
                        option { value: "male", "Male" }
                        option { value: "female", "Female" }
                        option { value: "other", "Other" }
                    }
                }
                label {
                    span { "Occupation" }
                    input {
                        r#type: "text",
                        required: true,
                        value: form().occupation,
                        oninput: move |evt| edit(|f, v| f.occupation = v, evt.value()),
                    }
                }
                label {
                    span { "Password" }
                    input {
                        r#type: "password",
                        required: true,
                        value: form().password,
                        oninput: move |evt| edit(|f, v| f.password = v, evt.value()),
                    }
                }
                label {
                    span { "Confirm Password" }
                    input {
                        r#type: "password",
                        required: true,
                        value: form().password_confirm,
                        oninput: move |evt| edit(|f, v| f.password_confirm = v, evt.value()),
                    }
                }
                button {
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Registering…" } else { "Register" }
                }
                p {
                    class: "auth-alternate",
                    "Already have an account? "
                    Link { to: Route::Login {}, "Login" }
                }
            }
        }
    }
}
