//! # HTTP client adapter
//!
//! [`ApiClient`] wraps every outgoing request with the configured base
//! address and a JSON content type, and attaches the session token from
//! the [`TokenStore`] as `Authorization: Token <token>` when one is
//! present.
//!
//! ## Response observation
//!
//! The transport classifies every non-success response into a tagged
//! [`ApiError`] (see [`crate::error::classify`]). A 401 becomes
//! [`ApiError::AuthExpired`]; the client then clears the stored token in
//! [`ApiClient::fail`] — an explicit, documented reaction at this layer,
//! not a hidden interceptor effect — and propagates the error unchanged.
//! No redirect happens here; the calling view decides how to react.

use std::sync::Arc;

use reqwest::{header, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use store::TokenStore;

use crate::config::ApiConfig;
use crate::error::{classify, ApiError};

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// Build a client against a base address. The base is normalized to
    /// end with a slash so relative paths join cleanly.
    pub fn new(config: ApiConfig, tokens: Arc<dyn TokenStore>) -> Self {
        let mut base = config.base_url;
        if !base.ends_with('/') {
            base.push('/');
        }
        Self {
            http: reqwest::Client::new(),
            base,
            tokens,
        }
    }

    /// The credential store this client reads the token from.
    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    /// Absolute URL for a path relative to the base address.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path.trim_start_matches('/'))
    }

    /// Start a JSON request: base address, JSON content type, and the
    /// Authorization header when a token is stored.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.bare_request(method, path)
            .header(header::CONTENT_TYPE, "application/json")
    }

    /// Start a request without forcing a content type (multipart bodies
    /// set their own boundary header).
    pub fn bare_request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self.http.request(method, self.url(path));
        if let Some(token) = self.tokens.get() {
            builder = builder.header(header::AUTHORIZATION, format!("Token {token}"));
        }
        builder
    }

    /// Map a non-success response to an error. On 401 the stored token is
    /// cleared so subsequent requests go out anonymous; the error is still
    /// returned to the caller as-is.
    pub fn fail(&self, status: u16, body: &str) -> ApiError {
        let err = classify(status, body);
        if matches!(err, ApiError::AuthExpired) {
            tracing::debug!("backend rejected token, clearing stored credential");
            self.tokens.clear();
        }
        err
    }

    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()))
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(self.fail(status.as_u16(), &body))
        }
    }

    /// Like [`execute`](Self::execute) but discards the response body.
    pub(crate) async fn execute_empty(&self, builder: RequestBuilder) -> Result<(), ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(self.fail(status.as_u16(), &body))
        }
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, ApiError> {
        let mut builder = self.request(Method::GET, path);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        self.execute(builder).await
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.execute(self.request(Method::POST, path).json(body))
            .await
    }

    pub(crate) async fn post_json_empty<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        self.execute_empty(self.request(Method::POST, path).json(body))
            .await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute_empty(self.request(Method::DELETE, path)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::MemoryStore;

    fn client_with(tokens: MemoryStore) -> ApiClient {
        ApiClient::new(
            ApiConfig::new("http://localhost:8000/api/v1/"),
            Arc::new(tokens),
        )
    }

    #[test]
    fn test_authorization_header_attached_when_token_present() {
        let tokens = MemoryStore::new();
        tokens.save("s3cr3t");
        let client = client_with(tokens);

        let request = client
            .request(Method::GET, "auth/profile/")
            .build()
            .unwrap();
        let auth = request.headers().get(header::AUTHORIZATION).unwrap();
        assert_eq!(auth.to_str().unwrap(), "Token s3cr3t");
    }

    #[test]
    fn test_no_authorization_header_without_token() {
        let client = client_with(MemoryStore::new());

        let request = client.request(Method::GET, "properties/").build().unwrap();
        assert!(request.headers().get(header::AUTHORIZATION).is_none());
    }

    #[test]
    fn test_json_content_type_by_default() {
        let client = client_with(MemoryStore::new());

        let request = client.request(Method::GET, "properties/").build().unwrap();
        assert_eq!(
            request
                .headers()
                .get(header::CONTENT_TYPE)
                .unwrap()
                .to_str()
                .unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_url_joining() {
        // Base without trailing slash is normalized
        let client = ApiClient::new(
            ApiConfig::new("http://localhost:8000/api/v1"),
            Arc::new(MemoryStore::new()),
        );
        assert_eq!(
            client.url("auth/login/"),
            "http://localhost:8000/api/v1/auth/login/"
        );
        // Leading slash on the path does not escape the base
        assert_eq!(
            client.url("/properties/"),
            "http://localhost:8000/api/v1/properties/"
        );
    }

    #[test]
    fn test_401_clears_stored_token() {
        let tokens = MemoryStore::new();
        tokens.save("expired-token");
        let client = client_with(tokens.clone());

        let err = client.fail(401, r#"{"detail": "Invalid token."}"#);
        assert_eq!(err, ApiError::AuthExpired);
        assert!(tokens.get().is_none());
    }

    #[test]
    fn test_other_failures_leave_token_alone() {
        let tokens = MemoryStore::new();
        tokens.save("still-good");
        let client = client_with(tokens.clone());

        let err = client.fail(500, "boom");
        assert!(matches!(err, ApiError::Status { status: 500, .. }));
        assert_eq!(tokens.get().as_deref(), Some("still-good"));
    }
}
