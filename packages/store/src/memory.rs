use std::sync::{Arc, Mutex};

use crate::token::TokenStore;

/// In-memory TokenStore for testing and native fallback.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    token: Arc<Mutex<Option<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryStore {
    fn get(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    fn save(&self, token: &str) {
        *self.token.lock().unwrap() = Some(token.to_string());
    }

    fn clear(&self) {
        *self.token.lock().unwrap() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_get() {
        let store = MemoryStore::new();
        assert!(store.get().is_none());

        store.save("abc123");
        assert_eq!(store.get().as_deref(), Some("abc123"));
    }

    #[test]
    fn test_save_overwrites() {
        let store = MemoryStore::new();
        store.save("first");
        store.save("second");
        assert_eq!(store.get().as_deref(), Some("second"));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let store = MemoryStore::new();
        store.save("abc123");

        store.clear();
        assert!(store.get().is_none());

        // Clearing again does nothing
        store.clear();
        assert!(store.get().is_none());
    }

    #[test]
    fn test_clones_share_state() {
        let store = MemoryStore::new();
        let other = store.clone();

        store.save("shared");
        assert_eq!(other.get().as_deref(), Some("shared"));

        other.clear();
        assert!(store.get().is_none());
    }
}
