//! # Query cache — keyed fetch results with in-flight deduplication
//!
//! A query is identified by a [`QueryKey`]: a resource name plus the
//! canonical serialization of its parameters. For each key the cache holds
//! one observable [`QueryState`] — pending, error, or success — and
//! guarantees that concurrent [`fetch`](QueryCache::fetch) calls sharing a
//! key perform exactly one underlying request, with every caller observing
//! the same eventual result.
//!
//! ## Ordering
//!
//! Every issued request carries a per-key sequence number. A completion
//! whose sequence is older than the latest issued for that key is not
//! written into the cache, so a slow response can never overwrite the
//! result of a request issued after it. The awaiting caller still receives
//! its own result.
//!
//! ## Staleness
//!
//! Mutations do not update cached values. Callers mark the affected
//! resource stale with [`invalidate`](QueryCache::invalidate); the stale
//! value stays visible until the next [`fetch`](QueryCache::fetch) for
//! that key refetches it. There are no automatic retries, but an `Error`
//! state is re-attempted on the next observation rather than pinned
//! forever.
//!
//! ## Locking
//!
//! Interior state lives behind a `std::sync::Mutex` that is never held
//! across an await; waiting on an in-flight request uses a
//! `tokio::sync::watch` channel, which works on both native and wasm32
//! targets. If the task driving a request is dropped mid-flight (the user
//! navigated away), the channel closes and the next waiter takes over the
//! fetch.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::watch;

use crate::error::ApiError;

/// Identifier for a cached query: resource name + canonical parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    resource: String,
    params: String,
}

impl QueryKey {
    /// Build a key from a resource name and any serializable parameters.
    /// `Filters` serializes from an ordered map, so equal filter sets
    /// produce equal keys regardless of insertion order.
    pub fn new<P: Serialize>(resource: &str, params: &P) -> Self {
        Self {
            resource: resource.to_string(),
            params: serde_json::to_string(params).unwrap_or_default(),
        }
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }
}

/// Observable state of a query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState {
    Pending,
    Error(String),
    Success(Value),
}

type Outcome = Option<QueryState>;

#[derive(Debug)]
struct Entry {
    state: QueryState,
    stale: bool,
    /// Sequence of the most recently issued request for this key.
    issued_seq: u64,
    /// Present while a request is in flight; waiters subscribe here.
    inflight: Option<watch::Receiver<Outcome>>,
}

impl Default for Entry {
    fn default() -> Self {
        Self {
            state: QueryState::Pending,
            stale: false,
            issued_seq: 0,
            inflight: None,
        }
    }
}

enum Role {
    /// Fresh cached success — no request needed.
    Fresh(QueryState),
    /// Someone else is fetching; wait for their outcome.
    Wait(watch::Receiver<Outcome>),
    /// We own the request for this sequence number.
    Run(u64, watch::Sender<Outcome>),
}

#[derive(Debug, Default)]
pub struct QueryCache {
    entries: Mutex<HashMap<QueryKey, Entry>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a query: serve a fresh cached success, join an in-flight
    /// request, or issue a new one via `fetcher`.
    ///
    /// `fetcher` is a factory rather than a future because a waiter may
    /// need to re-issue the request if the original fetcher's task was
    /// dropped before completing.
    pub async fn fetch<F, Fut>(&self, key: &QueryKey, fetcher: F) -> QueryState
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<Value, ApiError>>,
    {
        loop {
            let role = {
                let mut entries = self.entries.lock().unwrap();
                let entry = entries.entry(key.clone()).or_default();
                match &entry.state {
                    QueryState::Success(_) if !entry.stale => Role::Fresh(entry.state.clone()),
                    _ => Self::acquire(entry),
                }
            };

            match role {
                Role::Fresh(state) => return state,
                Role::Run(seq, tx) => return self.run(key, seq, tx, &fetcher).await,
                Role::Wait(rx) => {
                    if let Some(state) = self.wait(key, rx).await {
                        return state;
                    }
                    // Fetcher dropped mid-flight; take over.
                }
            }
        }
    }

    /// Issue a request for `key` even if one is already in flight.
    ///
    /// Used for explicit refreshes. The forced request gets a newer
    /// sequence number, so if the superseded request completes later its
    /// result is discarded rather than overwriting the fresher one.
    pub async fn refetch<F, Fut>(&self, key: &QueryKey, fetcher: F) -> QueryState
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<Value, ApiError>>,
    {
        let (seq, tx) = {
            let mut entries = self.entries.lock().unwrap();
            let entry = entries.entry(key.clone()).or_default();
            Self::issue(entry)
        };
        self.run(key, seq, tx, &fetcher).await
    }

    /// Current state of a key, without triggering a fetch.
    pub fn peek(&self, key: &QueryKey) -> Option<QueryState> {
        self.entries
            .lock()
            .unwrap()
            .get(key)
            .map(|entry| entry.state.clone())
    }

    /// Mark every entry for a resource stale. The cached values remain
    /// visible until the next fetch refetches them.
    pub fn invalidate(&self, resource: &str) {
        let mut entries = self.entries.lock().unwrap();
        for (key, entry) in entries.iter_mut() {
            if key.resource == resource {
                entry.stale = true;
            }
        }
    }

    /// Mark a single entry stale.
    pub fn invalidate_key(&self, key: &QueryKey) {
        if let Some(entry) = self.entries.lock().unwrap().get_mut(key) {
            entry.stale = true;
        }
    }

    /// Drop every cached entry (used on logout, where cached private data
    /// must not leak into the next session).
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }

    fn acquire(entry: &mut Entry) -> Role {
        if let Some(rx) = &entry.inflight {
            Role::Wait(rx.clone())
        } else {
            let (seq, tx) = Self::issue(entry);
            Role::Run(seq, tx)
        }
    }

    fn issue(entry: &mut Entry) -> (u64, watch::Sender<Outcome>) {
        entry.issued_seq += 1;
        if !matches!(entry.state, QueryState::Success(_)) {
            entry.state = QueryState::Pending;
        }
        let (tx, rx) = watch::channel(None);
        entry.inflight = Some(rx);
        (entry.issued_seq, tx)
    }

    async fn run<F, Fut>(
        &self,
        key: &QueryKey,
        seq: u64,
        tx: watch::Sender<Outcome>,
        fetcher: &F,
    ) -> QueryState
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<Value, ApiError>>,
    {
        let state = match fetcher().await {
            Ok(value) => QueryState::Success(value),
            Err(e) => QueryState::Error(e.to_string()),
        };

        {
            let mut entries = self.entries.lock().unwrap();
            if let Some(entry) = entries.get_mut(key) {
                let ours = tx.subscribe();
                if entry
                    .inflight
                    .as_ref()
                    .is_some_and(|rx| rx.same_channel(&ours))
                {
                    entry.inflight = None;
                }
                if seq == entry.issued_seq {
                    entry.state = state.clone();
                    entry.stale = false;
                }
                // seq < issued_seq: a newer request owns this entry now;
                // the stale completion is discarded.
            }
        }

        let _ = tx.send(Some(state.clone()));
        state
    }

    /// Wait for an in-flight request to publish its outcome. Returns
    /// `None` if the fetching task was dropped before completing, after
    /// clearing the dangling in-flight marker.
    async fn wait(&self, key: &QueryKey, mut rx: watch::Receiver<Outcome>) -> Option<QueryState> {
        loop {
            {
                let current = rx.borrow_and_update();
                if let Some(state) = current.as_ref() {
                    return Some(state.clone());
                }
            }
            if rx.changed().await.is_err() {
                let mut entries = self.entries.lock().unwrap();
                if let Some(entry) = entries.get_mut(key) {
                    if entry
                        .inflight
                        .as_ref()
                        .is_some_and(|r| r.same_channel(&rx))
                    {
                        entry.inflight = None;
                    }
                }
                return None;
            }
        }
    }
}

/// A query state after typed deserialization, for view consumption.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryView<T> {
    Loading,
    Error(String),
    Ready(T),
}

impl<T: DeserializeOwned> QueryView<T> {
    pub fn from_state(state: QueryState) -> Self {
        match state {
            QueryState::Pending => QueryView::Loading,
            QueryState::Error(message) => QueryView::Error(message),
            QueryState::Success(value) => match serde_json::from_value(value) {
                Ok(typed) => QueryView::Ready(typed),
                Err(e) => QueryView::Error(format!("unexpected response: {e}")),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Filters;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::oneshot;

    fn counting_fetcher(
        calls: Arc<AtomicUsize>,
        value: Value,
    ) -> impl Fn() -> std::pin::Pin<Box<dyn Future<Output = Result<Value, ApiError>> + Send>> + Clone
    {
        move || {
            calls.fetch_add(1, Ordering::SeqCst);
            let value = value.clone();
            Box::pin(async move { Ok(value) })
        }
    }

    #[test]
    fn test_key_depends_on_params() {
        let mut pune = Filters::new();
        pune.set("city", "Pune");

        let filtered = QueryKey::new("properties", &pune);
        let unfiltered = QueryKey::new("properties", &Filters::new());
        assert_ne!(filtered, unfiltered);
        assert_eq!(filtered.resource(), "properties");
    }

    #[test]
    fn test_key_ignores_insertion_order() {
        let mut a = Filters::new();
        a.set("city", "Pune");
        a.set("bedrooms", 2i64);

        let mut b = Filters::new();
        b.set("bedrooms", 2i64);
        b.set("city", "Pune");

        assert_eq!(QueryKey::new("properties", &a), QueryKey::new("properties", &b));
    }

    #[test]
    fn test_key_depends_on_resource() {
        assert_ne!(QueryKey::new("properties", &()), QueryKey::new("saved", &()));
    }

    #[test]
    fn test_peek_unknown_key() {
        let cache = QueryCache::new();
        assert!(cache.peek(&QueryKey::new("properties", &())).is_none());
    }

    #[tokio::test]
    async fn test_concurrent_fetches_share_one_call() {
        let cache = QueryCache::new();
        let key = QueryKey::new("properties", &());
        let calls = Arc::new(AtomicUsize::new(0));
        let (gate_tx, gate_rx) = oneshot::channel::<()>();
        let gate_rx = Arc::new(tokio::sync::Mutex::new(Some(gate_rx)));

        let fetcher = {
            let calls = calls.clone();
            let gate_rx = gate_rx.clone();
            move || {
                let calls = calls.clone();
                let gate_rx = gate_rx.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    if let Some(gate) = gate_rx.lock().await.take() {
                        let _ = gate.await;
                    }
                    Ok(json!({"count": 1}))
                }
            }
        };

        let first = cache.fetch(&key, fetcher.clone());
        let second = cache.fetch(&key, fetcher.clone());
        let release = async move {
            let _ = gate_tx.send(());
        };

        let (a, b, ()) = tokio::join!(first, second, release);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(a, b);
        assert!(matches!(a, QueryState::Success(_)));
    }

    #[tokio::test]
    async fn test_fresh_success_served_from_cache() {
        let cache = QueryCache::new();
        let key = QueryKey::new("properties", &());
        let calls = Arc::new(AtomicUsize::new(0));
        let fetcher = counting_fetcher(calls.clone(), json!([1, 2, 3]));

        cache.fetch(&key, fetcher.clone()).await;
        let state = cache.fetch(&key, fetcher).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(state, QueryState::Success(json!([1, 2, 3])));
    }

    #[tokio::test]
    async fn test_invalidate_marks_stale_and_refetches() {
        let cache = QueryCache::new();
        let key = QueryKey::new("saved", &());
        let calls = Arc::new(AtomicUsize::new(0));

        cache
            .fetch(&key, counting_fetcher(calls.clone(), json!(["old"])))
            .await;
        cache.invalidate("saved");

        // Stale value stays visible until re-observed
        assert_eq!(cache.peek(&key), Some(QueryState::Success(json!(["old"]))));

        let state = cache
            .fetch(&key, counting_fetcher(calls.clone(), json!(["new"])))
            .await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(state, QueryState::Success(json!(["new"])));
    }

    #[tokio::test]
    async fn test_invalidate_other_resource_is_noop() {
        let cache = QueryCache::new();
        let key = QueryKey::new("properties", &());
        let calls = Arc::new(AtomicUsize::new(0));

        cache
            .fetch(&key, counting_fetcher(calls.clone(), json!([])))
            .await;
        cache.invalidate("saved");
        cache
            .fetch(&key, counting_fetcher(calls.clone(), json!([])))
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_error_is_retried_on_next_fetch() {
        let cache = QueryCache::new();
        let key = QueryKey::new("reviews", &42i64);

        let failing = || async { Err(ApiError::Network("connection refused".into())) };
        let state = cache.fetch(&key, failing).await;
        assert!(matches!(state, QueryState::Error(_)));

        let calls = Arc::new(AtomicUsize::new(0));
        let state = cache
            .fetch(&key, counting_fetcher(calls.clone(), json!([])))
            .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(state, QueryState::Success(_)));
    }

    #[tokio::test]
    async fn test_stale_completion_does_not_overwrite_newer() {
        let cache = Arc::new(QueryCache::new());
        let key = QueryKey::new("properties", &());
        let calls = Arc::new(AtomicUsize::new(0));
        let (gate_tx, gate_rx) = oneshot::channel::<()>();
        let gate_rx = Arc::new(tokio::sync::Mutex::new(Some(gate_rx)));

        // Slow request: started first, completes last
        let slow = {
            let cache = cache.clone();
            let key = key.clone();
            let calls = calls.clone();
            tokio::spawn(async move {
                cache
                    .fetch(&key, move || {
                        let calls = calls.clone();
                        let gate_rx = gate_rx.clone();
                        async move {
                            calls.fetch_add(1, Ordering::SeqCst);
                            if let Some(gate) = gate_rx.lock().await.take() {
                                let _ = gate.await;
                            }
                            Ok(json!("stale"))
                        }
                    })
                    .await
            })
        };

        // Let the slow fetcher start before forcing a newer request
        while calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        let newer = cache
            .refetch(&key, || async { Ok(json!("fresh")) })
            .await;
        assert_eq!(newer, QueryState::Success(json!("fresh")));

        // Release the slow request; its caller sees its own result, but
        // the cache keeps the fresher one.
        let _ = gate_tx.send(());
        let stale = slow.await.unwrap();
        assert_eq!(stale, QueryState::Success(json!("stale")));
        assert_eq!(cache.peek(&key), Some(QueryState::Success(json!("fresh"))));
    }

    #[tokio::test]
    async fn test_waiter_takes_over_when_fetcher_is_dropped() {
        let cache = Arc::new(QueryCache::new());
        let key = QueryKey::new("properties", &());
        let calls = Arc::new(AtomicUsize::new(0));

        // A fetcher that never completes
        let hung = {
            let cache = cache.clone();
            let key = key.clone();
            let calls = calls.clone();
            tokio::spawn(async move {
                cache
                    .fetch(&key, move || {
                        let calls = calls.clone();
                        async move {
                            calls.fetch_add(1, Ordering::SeqCst);
                            std::future::pending::<()>().await;
                            unreachable!()
                        }
                    })
                    .await
            })
        };

        while calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }
        hung.abort();
        let _ = hung.await;

        // The dangling in-flight marker is cleared and the fetch re-issued
        let state = cache
            .fetch(&key, counting_fetcher(calls.clone(), json!("recovered")))
            .await;
        assert_eq!(state, QueryState::Success(json!("recovered")));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_clear_drops_entries() {
        let cache = QueryCache::new();
        let key = QueryKey::new("saved", &());
        cache
            .fetch(&key, || async { Ok(json!(["private"])) })
            .await;

        cache.clear();
        assert!(cache.peek(&key).is_none());
    }

    #[test]
    fn test_query_view_deserializes_success() {
        let state = QueryState::Success(json!({"username": "asha"}));
        let view: QueryView<crate::models::Reviewer> = QueryView::from_state(state);
        match view {
            QueryView::Ready(reviewer) => assert_eq!(reviewer.username, "asha"),
            other => panic!("expected Ready, got {other:?}"),
        }
    }

    #[test]
    fn test_query_view_reports_shape_mismatch() {
        let state = QueryState::Success(json!("not an object"));
        let view: QueryView<crate::models::Reviewer> = QueryView::from_state(state);
        assert!(matches!(view, QueryView::Error(_)));
    }

    #[test]
    fn test_query_view_pending_is_loading() {
        let view: QueryView<Vec<i64>> = QueryView::from_state(QueryState::Pending);
        assert_eq!(view, QueryView::Loading);
    }
}
