use dioxus::prelude::*;

use crate::query::use_queries;

/// Inquiry form shown on the property detail page. Sends the message to
/// `inquiries/` and surfaces the outcome inline.
#[component]
pub fn InquiryForm(property_id: i64) -> Element {
    let queries = use_queries();
    let mut message = use_signal(String::new);
    let mut status = use_signal(|| Option::<Result<(), String>>::None);
    let mut sending = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let api = queries.api();
        spawn(async move {
            sending.set(true);
            status.set(None);
            match api.submit_inquiry(property_id, &message()).await {
                Ok(()) => {
                    message.set(String::new());
                    status.set(Some(Ok(())));
                }
                Err(e) => status.set(Some(Err(e.to_string()))),
            }
            sending.set(false);
        });
    };

    rsx! {
        form {
            class: "inquiry-form",
            onsubmit: handle_submit,
            h3 { "Send Inquiry" }
            match status() {
                Some(Ok(())) => rsx! { p { class: "form-success", "Inquiry sent." } },
                Some(Err(message)) => rsx! { p { class: "error-text", "{message}" } },
                None => rsx! {},
            }
            textarea {
                placeholder: "Your message",
                required: true,
                value: message(),
                oninput: move |evt| message.set(evt.value()),
            }
            button {
                r#type: "submit",
                disabled: sending(),
                if sending() { "Sending…" } else { "Send" }
            }
        }
    }
}
