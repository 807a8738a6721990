//! Query cache
//!
//! Holds the last fetched value of each query so repeated reads don't hit the
//! backend, and lets mutations patch or invalidate what they changed. One
//! cache exists per browser session.

use std::future::Future;
use std::sync::Arc;

use dashmap::DashMap;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use shared::types::QueryKey;

use crate::error::ApiResult;

/// A query name plus its optional parameter (e.g. a storage id)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub query: QueryKey,
    pub param: Option<String>,
}

impl CacheKey {
    pub fn new(query: QueryKey) -> Self {
        Self { query, param: None }
    }

    pub fn with_param(query: QueryKey, param: impl Into<String>) -> Self {
        Self {
            query,
            param: Some(param.into()),
        }
    }
}

impl From<QueryKey> for CacheKey {
    fn from(query: QueryKey) -> Self {
        Self::new(query)
    }
}

/// Per-session query cache
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: DashMap<CacheKey, Value>,
    disabled: bool,
}

impl QueryCache {
    pub fn new(enabled: bool) -> Self {
        Self {
            entries: DashMap::new(),
            disabled: !enabled,
        }
    }

    pub fn get<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        let entry = self.entries.get(key)?;
        match serde_json::from_value(entry.value().clone()) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(query = %key.query, error = %e, "dropping undecodable cache entry");
                drop(entry);
                self.entries.remove(key);
                None
            }
        }
    }

    pub fn set<T: Serialize>(&self, key: CacheKey, value: &T) {
        if self.disabled {
            return;
        }
        match serde_json::to_value(value) {
            Ok(json) => {
                self.entries.insert(key, json);
            }
            Err(e) => tracing::warn!(query = %key.query, error = %e, "value not cached"),
        }
    }

    /// Return the cached value or run `fetch` and remember its result.
    /// Failures are not cached.
    pub async fn get_or_fetch<T, F, Fut>(&self, key: CacheKey, fetch: F) -> ApiResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApiResult<T>>,
    {
        if let Some(hit) = self.get(&key) {
            tracing::trace!(query = %key.query, "cache hit");
            return Ok(hit);
        }
        let value = fetch().await?;
        self.set(key, &value);
        Ok(value)
    }

    /// Apply `patch` to every cached list stored under `query`, whatever its
    /// parameter. Returns how many entries were rewritten.
    pub fn patch_list<T, F>(&self, query: QueryKey, patch: F) -> usize
    where
        T: Serialize + DeserializeOwned,
        F: Fn(&mut Vec<T>),
    {
        let mut patched = 0;
        for mut entry in self.entries.iter_mut() {
            if entry.key().query != query {
                continue;
            }
            let Ok(mut list) = serde_json::from_value::<Vec<T>>(entry.value().clone()) else {
                continue;
            };
            patch(&mut list);
            if let Ok(json) = serde_json::to_value(&list) {
                *entry.value_mut() = json;
                patched += 1;
            }
        }
        patched
    }

    /// Drop every entry stored under `query`; the next read refetches it
    pub fn invalidate(&self, query: QueryKey) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| key.query != query);
        let removed = before - self.entries.len();
        tracing::debug!(query = %query, removed, "cache invalidated");
        removed
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Caches of every live session, keyed by bearer token
#[derive(Debug, Default)]
pub struct CacheRegistry {
    sessions: DashMap<String, Arc<QueryCache>>,
    enabled: bool,
}

impl CacheRegistry {
    pub fn new(enabled: bool) -> Self {
        Self {
            sessions: DashMap::new(),
            enabled,
        }
    }

    pub fn for_session(&self, token: &str) -> Arc<QueryCache> {
        self.sessions
            .entry(token.to_string())
            .or_insert_with(|| Arc::new(QueryCache::new(self.enabled)))
            .clone()
    }

    /// Forget a session, e.g. after the backend rejected its token
    pub fn forget(&self, token: &str) {
        self.sessions.remove(token);
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}
