//! # API crate — data layer for the Rently client
//!
//! Everything between the views and the backend lives here: the entity
//! models exchanged over the wire, the HTTP client adapter that attaches
//! the session token, the typed endpoint wrappers, and the query cache
//! that deduplicates and stores fetch results.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | Plain serde records: `User`, `Property`, `Review`, `Filters`, pagination envelope |
//! | [`error`] | [`ApiError`] taxonomy and validation-body flattening |
//! | [`client`] | [`ApiClient`] — base address, default headers, token attachment, 401 handling |
//! | [`endpoints`] | Typed wrappers for every backend endpoint the client consumes |
//! | [`cache`] | [`QueryCache`] — keyed query states, in-flight deduplication, staleness |
//! | [`config`] | [`ApiConfig`] — backend base address |
//!
//! ## Authentication-failure contract
//!
//! The transport never mutates anything behind the caller's back. A 401 is
//! classified into the tagged [`ApiError::AuthExpired`] variant; the
//! [`ApiClient`] then clears the stored token (so later requests go out
//! anonymous) and returns the error *unchanged* to the caller. No redirect
//! happens at this layer — each view decides how to react.

pub mod cache;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod models;

pub use cache::{QueryCache, QueryKey, QueryState, QueryView};
pub use client::ApiClient;
pub use config::ApiConfig;
pub use endpoints::{ImageFile, NewProperty, RegistrationForm};
pub use error::ApiError;
pub use models::{
    FilterValue, Filters, Page, Property, Review, Reviewer, SavedProperty, User, UserType,
};
