/// Storage key for the session token.
pub const TOKEN_KEY: &str = "rently-token";

/// Interface for persisting the session token.
///
/// All methods are synchronous — browser `localStorage` is a synchronous
/// API, and the in-memory fallback has no reason to be anything else.
/// Passwords never pass through this trait; the token obtained from
/// `auth/login/` is the only credential the client holds onto.
pub trait TokenStore: Send + Sync {
    /// Return the stored token, or `None` if absent.
    fn get(&self) -> Option<String>;

    /// Persist a token, replacing any previous one.
    fn save(&self, token: &str);

    /// Remove the stored token. Idempotent.
    fn clear(&self);
}
