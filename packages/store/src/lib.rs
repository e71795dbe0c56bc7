//! # Credential store — the single piece of client-persisted state
//!
//! Rently keeps exactly one thing in browser storage: the opaque session
//! token handed out by `auth/login/`. This crate defines the [`TokenStore`]
//! trait and its two implementations:
//!
//! - [`LocalStore`] (web platform): browser `localStorage` under a single
//!   well-known key.
//! - [`MemoryStore`]: in-process fallback for native targets and tests.
//!
//! There is no client-side expiry. A token stays put until `clear()` is
//! called — by an explicit logout, or by the API client after the backend
//! rejects a request with 401.

mod token;
pub use token::{TokenStore, TOKEN_KEY};

mod memory;
pub use memory::MemoryStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStore;
