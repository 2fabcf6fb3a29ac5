//! Bounded memo of successful generations, keyed by exact prompt text.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// FIFO cache with a fixed capacity. Only successful generations are
/// inserted; failures are always retried on the next request.
pub struct PromptCache {
    capacity: usize,
    inner: Mutex<CacheInner>,
}

#[derive(Default)]
struct CacheInner {
    entries: HashMap<String, String>,
    order: VecDeque<String>,
}

impl PromptCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(CacheInner::default()),
        }
    }

    pub fn get(&self, prompt: &str) -> Option<String> {
        let inner = self.inner.lock().expect("prompt cache mutex poisoned");
        inner.entries.get(prompt).cloned()
    }

    /// Inserts a generation, evicting the oldest entry at capacity.
    /// Re-inserting an existing prompt updates the value in place without
    /// touching eviction order.
    pub fn insert(&self, prompt: &str, text: &str) {
        let mut inner = self.inner.lock().expect("prompt cache mutex poisoned");
        if inner.entries.contains_key(prompt) {
            inner.entries.insert(prompt.to_string(), text.to_string());
            return;
        }
        if inner.order.len() == self.capacity {
            if let Some(evicted) = inner.order.pop_front() {
                inner.entries.remove(&evicted);
            }
        }
        inner.order.push_back(prompt.to_string());
        inner.entries.insert(prompt.to_string(), text.to_string());
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("prompt cache mutex poisoned").entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
