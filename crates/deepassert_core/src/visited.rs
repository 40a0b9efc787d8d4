//! Cycle breaking for a single traversal.

use std::collections::HashSet;

use deepassert_reflect::{NodeId, Value};

/// Identities of the objects reached during one traversal.
///
/// Every recorded handle is kept alive until the tracker is dropped, so an
/// address freed by a temporary node cannot be handed out again and mistaken
/// for a visited one within the same run.
///
/// Reaching an object and testing it are tracked apart: an object whose test
/// was deferred stays eligible for a test until one runs.
#[derive(Default)]
pub struct VisitedNodes {
    ids: HashSet<NodeId>,
    deferred: HashSet<NodeId>,
    retained: Vec<Value>,
}

impl VisitedNodes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `value` and returns `true` if it had not been seen before.
    ///
    /// Null and primitives have no identity and always report as new.
    pub fn mark(&mut self, value: &Value) -> bool {
        let Some(id) = value.identity() else {
            return true;
        };
        if !self.ids.insert(id) {
            return false;
        }
        self.retained.push(value.clone());
        true
    }

    pub fn contains(&self, value: &Value) -> bool {
        value.identity().is_some_and(|id| self.ids.contains(&id))
    }

    /// Records that the test of `value` was skipped at the path it was
    /// first reached through.
    pub fn defer_test(&mut self, value: &Value) {
        if let Some(id) = value.identity() {
            self.deferred.insert(id);
        }
    }

    pub fn is_test_deferred(&self, value: &Value) -> bool {
        value.identity().is_some_and(|id| self.deferred.contains(&id))
    }

    /// Records that `value` has been tested.
    pub fn complete_test(&mut self, value: &Value) {
        if let Some(id) = value.identity() {
            self.deferred.remove(&id);
        }
    }

    /// Number of distinct objects recorded.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
