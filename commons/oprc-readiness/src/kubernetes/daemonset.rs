use k8s_openapi::api::apps::v1::DaemonSet;

use super::qualified_name;
use crate::checker::{Condition, ReadinessResult, StateChecker};

static CONDITIONS: &[Condition<DaemonSet>] = &[
    Condition {
        name: "scheduled",
        check: daemonset_scheduled,
    },
    Condition {
        name: "ready",
        check: daemonset_ready,
    },
];

/// Scheduled -> Ready.
pub fn checker() -> StateChecker<DaemonSet> {
    StateChecker::new(CONDITIONS)
}

// An absent status means the controller has not reconciled the object yet.
fn daemonset_scheduled(ds: &DaemonSet) -> ReadinessResult {
    let mut result = ReadinessResult::waiting(format!(
        "Waiting for daemonSet \"{}\" to be scheduled",
        qualified_name(ds)
    ));
    result.ok = ds
        .status
        .as_ref()
        .is_some_and(|s| s.current_number_scheduled >= 0);
    result
}

fn daemonset_ready(ds: &DaemonSet) -> ReadinessResult {
    let mut result = ReadinessResult::waiting(format!(
        "Waiting for daemonSet \"{}\" to be ready",
        qualified_name(ds)
    ));
    result.ok = ds.status.as_ref().is_some_and(|s| {
        s.desired_number_scheduled > 0
            && s.number_available.unwrap_or(0) == s.desired_number_scheduled
    });
    result
}
