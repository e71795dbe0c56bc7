//! # Entity models exchanged with the backend
//!
//! All records here are plain serde types. The client never owns or
//! mutates them beyond local caching — a `Property` changes only through
//! an explicit create/update request, a `Review` is read-only, and a
//! `User` is fetched once per session and held in the session context.
//!
//! [`Filters`] is the one client-side type with behavior: it is an ordered
//! map of filter name to value, so its serialization is canonical and can
//! double as part of a cache key.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Account type reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Tenant,
    Owner,
    Both,
}

/// The authenticated user, as returned by `auth/profile/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub user_type: UserType,
}

/// A rental listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: i64,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// The author of a review. The backend nests this under `reviewer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reviewer {
    pub username: String,
}

/// A review left on a property. Read-only from the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub rating: i32,
    pub review_text: String,
    pub reviewer: Reviewer,
}

/// Link between the session user and a property they saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedProperty {
    pub property: Property,
}

/// Backend pagination envelope for list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub results: Vec<T>,
    pub count: i64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
}

/// A single filter value: string, number, boolean, or a list thereof.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Str(String),
    Num(f64),
    Bool(bool),
    List(Vec<FilterValue>),
}

impl FilterValue {
    /// Render the value the way it appears in a URL query string.
    /// Lists flatten to comma-separated scalars (only reached for
    /// nested lists; top-level lists become repeated pairs).
    fn to_query_value(&self) -> String {
        match self {
            FilterValue::Str(s) => s.clone(),
            FilterValue::Num(n) => {
                if n.fract() == 0.0 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
            FilterValue::Bool(b) => b.to_string(),
            FilterValue::List(items) => items
                .iter()
                .map(FilterValue::to_query_value)
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::Str(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        FilterValue::Str(s)
    }
}

impl From<f64> for FilterValue {
    fn from(n: f64) -> Self {
        FilterValue::Num(n)
    }
}

impl From<i64> for FilterValue {
    fn from(n: i64) -> Self {
        FilterValue::Num(n as f64)
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        FilterValue::Bool(b)
    }
}

/// Parameters for a property list query.
///
/// Backed by a `BTreeMap` so iteration order (and therefore the serialized
/// form used in cache keys) is deterministic. Known backend filter names
/// include `city`, `locality`, `bedrooms`, `bathrooms`, `min_rent`,
/// `max_rent`, `min_area`, `max_area`, `furnishing` and `amenities`, but
/// the map is open-ended — unknown names are passed through as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filters(BTreeMap<String, FilterValue>);

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Set a filter. An empty string value removes the filter instead,
    /// so clearing a text input drops the parameter from the query.
    pub fn set(&mut self, name: &str, value: impl Into<FilterValue>) {
        let value = value.into();
        if matches!(&value, FilterValue::Str(s) if s.is_empty()) {
            self.0.remove(name);
        } else {
            self.0.insert(name.to_string(), value);
        }
    }

    pub fn remove(&mut self, name: &str) {
        self.0.remove(name);
    }

    pub fn get(&self, name: &str) -> Option<&FilterValue> {
        self.0.get(name)
    }

    /// URL query pairs for the list endpoint. Top-level list values become
    /// repeated pairs, e.g. `amenities=gym&amenities=parking`.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for (name, value) in &self.0 {
            match value {
                FilterValue::List(items) => {
                    for item in items {
                        pairs.push((name.clone(), item.to_query_value()));
                    }
                }
                other => pairs.push((name.clone(), other.to_query_value())),
            }
        }
        pairs
    }
}
