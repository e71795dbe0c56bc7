//! `localStorage`-backed TokenStore for the web platform.
//!
//! Storage failures degrade to "no token" on reads and are ignored on
//! writes — a browser with storage disabled behaves like a logged-out
//! session rather than crashing the app. Writes from multiple tabs sharing
//! the same storage are not coordinated; last write wins.

use crate::token::{TokenStore, TOKEN_KEY};

/// Browser localStorage TokenStore.
///
/// Zero-size struct; the storage handle is looked up per operation
/// because `web_sys::Storage` is not `Send` and the lookup is cheap.
#[derive(Clone, Debug, Default)]
pub struct LocalStore;

impl LocalStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl TokenStore for LocalStore {
    fn get(&self) -> Option<String> {
        Self::storage()?.get_item(TOKEN_KEY).ok()?
    }

    fn save(&self, token: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(TOKEN_KEY, token);
        }
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(TOKEN_KEY);
        }
    }
}
