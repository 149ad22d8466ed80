//! Per-session list caches.
//!
//! A cache holds lists keyed by scope (an identity or event id). Writers
//! capture the generation before their remote call and hand it back with the
//! result; if the session was torn down in between, the write is dropped.

use log::warn;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Something holding data that belongs to the signed-in identity.
pub trait SessionScoped: Send + Sync {
    fn clear_session_data(&self);
}

#[derive(Debug)]
struct CacheState<T> {
    generation: u64,
    lists: HashMap<String, Vec<T>>,
}

#[derive(Debug)]
pub struct SessionCache<T> {
    name: &'static str,
    state: RwLock<CacheState<T>>,
}

impl<T: Clone> SessionCache<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: RwLock::new(CacheState {
                generation: 0,
                lists: HashMap::new(),
            }),
        }
    }

    pub fn generation(&self) -> u64 {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .generation
    }

    pub fn get(&self, scope: &str) -> Option<Vec<T>> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .lists
            .get(scope)
            .cloned()
    }

    /// Stores `items` for `scope` unless the cache was cleared since
    /// `generation`. Returns whether the write was applied.
    pub fn replace(&self, generation: u64, scope: &str, items: Vec<T>) -> bool {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.generation != generation {
            warn!("Discarding stale {} result for {}", self.name, scope);
            return false;
        }
        state.lists.insert(scope.to_string(), items);
        true
    }

    /// Applies `f` to the list of `scope` (created empty if absent) unless
    /// the cache was cleared since `generation`.
    pub fn update<F>(&self, generation: u64, scope: &str, f: F) -> bool
    where
        F: FnOnce(&mut Vec<T>),
    {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.generation != generation {
            warn!("Discarding stale {} update for {}", self.name, scope);
            return false;
        }
        f(state.lists.entry(scope.to_string()).or_default());
        true
    }

    pub fn remove_scope(&self, scope: &str) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .lists
            .remove(scope);
    }

    /// Drops every list and invalidates in-flight writers.
    pub fn clear(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.generation += 1;
        state.lists.clear();
    }
}
