//! Per-origin robots policy cache
//!
//! Policies are resolved at most once per origin and never expire; the cache
//! lives exactly as long as the frontier that owns it.

use crate::robots::RobotsPolicy;
use crate::url::Origin;
use std::collections::HashMap;

/// Resolved robots policies keyed by origin
#[derive(Debug, Default)]
pub struct RobotsCache {
    policies: HashMap<Origin, RobotsPolicy>,
}

impl RobotsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached policy for an origin, if it has been resolved
    pub fn get(&self, origin: &Origin) -> Option<&RobotsPolicy> {
        self.policies.get(origin)
    }

    /// Stores a freshly resolved policy and returns a reference to it
    ///
    /// An existing entry is kept: a policy is immutable once resolved.
    pub fn insert(&mut self, origin: Origin, policy: RobotsPolicy) -> &RobotsPolicy {
        self.policies.entry(origin).or_insert(policy)
    }

    /// Number of origins resolved so far
    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}
