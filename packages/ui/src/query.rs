//! Query context and hooks.
//!
//! [`QueryProvider`] builds one [`ApiClient`] and one [`QueryCache`] for
//! the whole app and exposes them through the [`Queries`] context value.
//! Views run reads through [`Queries::query`], which deduplicates and
//! caches by [`QueryKey`]; mutations are plain `ApiClient` calls followed
//! by an explicit [`Queries::invalidate`] on the affected resources.

use std::future::Future;
use std::sync::Arc;

use api::{ApiClient, ApiConfig, QueryCache, QueryKey, QueryView};
use dioxus::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use store::TokenStore;

/// Create a platform-appropriate credential store.
///
/// - **Web** (WASM + `web` feature): browser localStorage
/// - **Native** (tests, tooling): in-memory
pub fn make_token_store() -> Arc<dyn TokenStore> {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        Arc::new(store::LocalStore::new())
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        Arc::new(store::MemoryStore::new())
    }
}

/// App-wide handle to the API client and the query cache.
#[derive(Clone)]
pub struct Queries {
    api: Arc<ApiClient>,
    cache: Arc<QueryCache>,
}

impl Queries {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api: Arc::new(api),
            cache: Arc::new(QueryCache::new()),
        }
    }

    pub fn api(&self) -> Arc<ApiClient> {
        self.api.clone()
    }

    /// Run a typed read through the cache. The fetcher is only called when
    /// the key has no fresh cached value and no request in flight; its
    /// result is stored as JSON and deserialized into `T` on the way out.
    pub async fn query<T, F, Fut>(&self, key: QueryKey, fetch: F) -> QueryView<T>
    where
        T: Serialize + DeserializeOwned,
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, api::ApiError>>,
    {
        let state = self
            .cache
            .fetch(&key, || async {
                let typed = fetch().await?;
                serde_json::to_value(typed).map_err(|e| api::ApiError::Decode(e.to_string()))
            })
            .await;
        QueryView::from_state(state)
    }

    /// Mark every cached query for a resource stale; it refetches on next
    /// observation.
    pub fn invalidate(&self, resource: &str) {
        self.cache.invalidate(resource);
    }

    /// Drop all cached data. Used on logout.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

/// Get the app-wide [`Queries`] handle.
pub fn use_queries() -> Queries {
    use_context::<Queries>()
}

/// Run a cached query from a component.
///
/// `source` is the reactive part: it reads whatever signals the key
/// depends on and returns the [`QueryKey`] plus the fetcher for it.
/// Whenever one of those signals changes, the query re-runs under the new
/// key. The returned signal starts at [`QueryView::Loading`]; once loaded,
/// the previous value stays visible while a changed or invalidated key
/// refetches.
pub fn use_query<T, F, Fut>(
    mut source: impl FnMut() -> (QueryKey, F) + 'static,
) -> Signal<QueryView<T>>
where
    T: Serialize + DeserializeOwned + 'static,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<T, api::ApiError>> + 'static,
{
    let queries = use_queries();
    let mut view = use_signal(|| QueryView::<T>::Loading);

    let _loader = use_resource(move || {
        let queries = queries.clone();
        let (key, fetch) = source();
        async move {
            view.set(queries.query(key, fetch).await);
        }
    });

    view
}

/// Shorthand for the API client alone.
pub fn use_api() -> Arc<ApiClient> {
    use_queries().api()
}

/// Provider component for the query context. Wrap the app with this once.
#[component]
pub fn QueryProvider(children: Element) -> Element {
    use_context_provider(|| {
        Queries::new(ApiClient::new(ApiConfig::default(), make_token_store()))
    });

    rsx! {
        {children}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn queries() -> Queries {
        Queries::new(ApiClient::new(
            ApiConfig::new("http://localhost:8000/api/v1/"),
            Arc::new(store::MemoryStore::new()),
        ))
    }

    #[tokio::test]
    async fn test_query_returns_typed_view() {
        let queries = queries();
        let view = queries
            .query(QueryKey::new("numbers", &()), || async {
                Ok(vec![1i64, 2, 3])
            })
            .await;
        assert_eq!(view, QueryView::Ready(vec![1i64, 2, 3]));
    }

    #[tokio::test]
    async fn test_query_serves_repeat_reads_from_cache() {
        let queries = queries();
        let calls = Arc::new(AtomicUsize::new(0));
        let key = QueryKey::new("numbers", &());

        for _ in 0..2 {
            let calls = calls.clone();
            let view = queries
                .query(key.clone(), move || {
                    let calls = calls.clone();
                    async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Ok(vec![7i64])
                    }
                })
                .await;
            assert_eq!(view, QueryView::Ready(vec![7i64]));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
