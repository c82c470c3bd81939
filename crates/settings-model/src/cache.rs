//! Single-value cache for descriptor values
//!
//! Holds one value plus a validity flag. Writes never store the written value;
//! they invalidate so the next read confirms what the store actually holds.

use crate::safe::Failure;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// When a fetched value is reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CachePolicy {
    /// Fetch once, reuse until the next write or invalidation
    #[default]
    FetchOnce,

    /// Never mark the cache valid: every read goes to the store
    AlwaysRefetch,
}

#[derive(Debug)]
struct CacheState<T> {
    value: Option<T>,
    valid: bool,
}

/// Cached value of one setting
#[derive(Debug)]
pub struct ValueCache<T> {
    policy: CachePolicy,
    state: Mutex<CacheState<T>>,
}

impl<T: Clone> ValueCache<T> {
    /// Create empty, invalid cache
    #[inline]
    #[must_use]
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            policy,
            state: Mutex::new(CacheState {
                value: None,
                valid: false,
            }),
        }
    }

    /// Policy in effect
    #[inline]
    #[must_use]
    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Return the cached value, fetching when invalid
    ///
    /// A failed fetch leaves the cache untouched. The lock is not held while
    /// `fetch` runs, so the fetch may read this cache again.
    ///
    /// # Errors
    /// Returns the failure produced by `fetch`
    pub fn get_or_fetch<F>(&self, fetch: F) -> Result<T, Failure>
    where
        F: FnOnce() -> Result<T, Failure>,
    {
        {
            let state = self.state.lock();
            if state.valid {
                if let Some(value) = &state.value {
                    return Ok(value.clone());
                }
            }
        }

        let value = fetch()?;
        let mut state = self.state.lock();
        state.value = Some(value.clone());
        state.valid = self.policy == CachePolicy::FetchOnce;
        Ok(value)
    }

    /// Force the next read to fetch
    #[inline]
    pub fn invalidate(&self) {
        self.state.lock().valid = false;
    }

    /// Whether the next read would be served from the cache
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.state.lock().valid
    }

    /// Last fetched value, valid or not
    #[must_use]
    pub fn last_fetched(&self) -> Option<T> {
        self.state.lock().value.clone()
    }
}
