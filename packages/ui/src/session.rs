//! Session context: who is logged in, if anyone.
//!
//! Three states: [`Session::Unknown`] until the initial `auth/profile/`
//! fetch resolves, then [`Session::Authenticated`] or
//! [`Session::Anonymous`]. Any failure degrades to `Anonymous` — being
//! unable to reach the backend looks like "not logged in", never a crash.
//!
//! The handle is read-only for views except for [`SessionHandle::refresh`],
//! which re-runs the profile fetch. Login flows save the token and then
//! call `refresh()` instead of relying on a full page reload to pick the
//! new identity up.

use std::sync::Arc;

use api::{ApiClient, ApiError, User};
use dioxus::prelude::*;

use crate::query::use_queries;

/// Authentication state for the application.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Session {
    /// Initial state, before the profile fetch resolves.
    #[default]
    Unknown,
    Authenticated(User),
    Anonymous,
}

impl Session {
    pub fn user(&self) -> Option<&User> {
        match self {
            Session::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }
}

/// Handle to the session state, available through [`use_session`].
#[derive(Clone)]
pub struct SessionHandle {
    state: Signal<Session>,
    api: Arc<ApiClient>,
}

impl SessionHandle {
    /// Current session state.
    pub fn state(&self) -> Session {
        (self.state)()
    }

    pub fn user(&self) -> Option<User> {
        self.state().user().cloned()
    }

    /// Re-run the profile fetch and update the session accordingly.
    /// A 401 (or any other failure) lands in `Anonymous`.
    pub async fn refresh(&self) {
        let mut state = self.state;
        match self.api.profile().await {
            Ok(user) => state.set(Session::Authenticated(user)),
            Err(ApiError::AuthExpired) => state.set(Session::Anonymous),
            Err(e) => {
                tracing::warn!("profile fetch failed: {e}");
                state.set(Session::Anonymous);
            }
        }
    }

    /// Forget the stored token and drop to `Anonymous`. Does not call the
    /// backend — the token is the only session artifact to discard.
    pub fn logout(&self) {
        let mut state = self.state;
        self.api.tokens().clear();
        state.set(Session::Anonymous);
    }
}

/// Get the current session handle.
pub fn use_session() -> SessionHandle {
    use_context::<SessionHandle>()
}

/// Provider component that initializes the session state.
///
/// Must sit inside a [`crate::QueryProvider`]. Issues the "who am I"
/// request once on mount.
#[component]
pub fn SessionProvider(children: Element) -> Element {
    let state = use_signal(Session::default);
    let queries = use_queries();

    let handle = use_context_provider(|| SessionHandle {
        state,
        api: queries.api(),
    });

    let _init = use_resource(move || {
        let session = handle.clone();
        async move {
            session.refresh().await;
        }
    });

    rsx! {
        {children}
    }
}

/// Button that logs the current user out.
#[component]
pub fn LogoutButton(on_logged_out: EventHandler<()>) -> Element {
    let session = use_session();
    let queries = use_queries();

    rsx! {
        button {
            class: "navbar-link navbar-logout",
            onclick: move |_| {
                session.logout();
                // Cached saved-properties etc. belong to the old session
                queries.clear_cache();
                on_logged_out.call(());
            },
            "Logout"
        }
    }
}
