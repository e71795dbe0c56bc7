//! This crate contains all shared UI for the workspace: the session and
//! query providers, the hooks views use to talk to the backend, and the
//! components that appear on more than one page.

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod query;
pub use query::{make_token_store, use_api, use_queries, use_query, Queries, QueryProvider};

mod session;
pub use session::{use_session, LogoutButton, Session, SessionHandle, SessionProvider};

mod layout;
pub use layout::Navbar;

mod property_card;
pub use property_card::{format_inr, PropertyCard};

mod filters_sidebar;
pub use filters_sidebar::FiltersSidebar;

mod review_list;
pub use review_list::ReviewList;

mod inquiry_form;
pub use inquiry_form::InquiryForm;

mod saved_properties;
pub use saved_properties::SavedProperties;
