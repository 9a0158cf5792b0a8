use std::fmt;

use super::result::{ReadinessResult, ReadinessResults};

/// A named, pure predicate over a snapshot of kind `K`.
pub struct Condition<K> {
    pub name: &'static str,
    pub check: fn(&K) -> ReadinessResult,
}

impl<K> Clone for Condition<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Condition<K> {}

impl<K> fmt::Debug for Condition<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Condition").field("name", &self.name).finish()
    }
}

/// Ordered readiness chain for one resource kind.
///
/// Evaluation runs the conditions top to bottom and stops at the first one
/// that is not ok. The checker carries no state between calls, so the same
/// instance can be shared across threads and snapshots.
pub struct StateChecker<K> {
    conditions: Vec<Condition<K>>,
}

impl<K> Clone for StateChecker<K> {
    fn clone(&self) -> Self {
        Self {
            conditions: self.conditions.clone(),
        }
    }
}

impl<K> fmt::Debug for StateChecker<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.conditions.iter().map(|c| c.name))
            .finish()
    }
}

impl<K> StateChecker<K> {
    pub fn new(conditions: impl Into<Vec<Condition<K>>>) -> Self {
        Self {
            conditions: conditions.into(),
        }
    }

    pub fn conditions(&self) -> &[Condition<K>] {
        &self.conditions
    }

    /// True iff every condition is ok for `state`.
    pub fn ready(&self, state: &K) -> bool {
        self.ready_details(state).0
    }

    /// Verdict plus the last evaluated result: the first failure, or the
    /// final condition when all pass.
    pub fn ready_status(&self, state: &K) -> (bool, ReadinessResult) {
        let (ok, results) = self.ready_details(state);
        let last = results.into_inner().pop().unwrap_or_else(|| {
            ReadinessResult {
                ok: true,
                description: "No conditions to evaluate".into(),
                message: None,
            }
        });
        (ok, last)
    }

    /// Verdict plus the trail up to and including the first failure.
    pub fn ready_details(&self, state: &K) -> (bool, ReadinessResults) {
        let mut results = ReadinessResults::default();
        for condition in &self.conditions {
            let result = (condition.check)(state);
            tracing::trace!(
                condition = condition.name,
                ok = result.ok,
                "evaluated readiness condition"
            );
            let ok = result.ok;
            results.push(result);
            if !ok {
                tracing::debug!(
                    evaluated = results.len(),
                    total = self.conditions.len(),
                    failed = condition.name,
                    "readiness chain stopped"
                );
                return (false, results);
            }
        }
        tracing::debug!(
            total = self.conditions.len(),
            "readiness chain passed"
        );
        (true, results)
    }
}
