use chrono::SecondsFormat;
use k8s_openapi::api::core::v1::{ContainerStatus, Pod, PodCondition};

use super::qualified_name;
use crate::checker::{Condition, Message, ReadinessResult, StateChecker};

const POD_SCHEDULED: &str = "PodScheduled";
const POD_INITIALIZED: &str = "Initialized";
const POD_READY: &str = "Ready";
const POD_SUCCEEDED: &str = "Succeeded";
const CONDITION_TRUE: &str = "True";

/// Transient waiting reason while the runtime creates the container.
const CONTAINER_CREATING: &str = "ContainerCreating";

const IMAGE_PULL_PREFIX: &str =
    "rpc error: code = Unknown desc = Error response from daemon: ";
const MANIFEST_UNKNOWN_SUFFIX: &str = ": manifest unknown";

/// Rendered in place of a missing `finishedAt`.
const ZERO_TIME: &str = "0001-01-01T00:00:00Z";

static CONDITIONS: &[Condition<Pod>] = &[
    Condition {
        name: "scheduled",
        check: pod_scheduled,
    },
    Condition {
        name: "initialized",
        check: pod_initialized,
    },
    Condition {
        name: "ready",
        check: pod_ready,
    },
];

/// Scheduled -> Initialized -> Ready.
pub fn checker() -> StateChecker<Pod> {
    StateChecker::new(CONDITIONS)
}

pub(crate) fn pod_scheduled(pod: &Pod) -> ReadinessResult {
    let mut result = ReadinessResult::waiting(format!(
        "Waiting for Pod \"{}\" to be scheduled",
        qualified_name(pod)
    ));

    let Some(scheduled) = find_condition(pod, POD_SCHEDULED) else {
        return result;
    };
    if is_true(scheduled) {
        result.ok = true;
    } else if let Some(msg) = status_from_condition(scheduled) {
        // No node yet, so there is nothing to learn from container statuses.
        result.message = Some(Message::status(msg));
    }
    result
}

pub(crate) fn pod_initialized(pod: &Pod) -> ReadinessResult {
    let name = qualified_name(pod);
    let mut result = ReadinessResult::waiting(format!(
        "Waiting for Pod \"{name}\" to be initialized"
    ));

    let Some(initialized) = find_condition(pod, POD_INITIALIZED) else {
        return result;
    };
    if is_true(initialized) {
        result.ok = true;
        return result;
    }

    let errs = container_status_errors(pod);
    if !errs.is_empty() || has_message(initialized) {
        let msg = pod_error(Some(initialized), &errs, &name);
        result.message = Some(Message::warning(msg));
    }
    result
}

pub(crate) fn pod_ready(pod: &Pod) -> ReadinessResult {
    let name = qualified_name(pod);
    let mut result = ReadinessResult::waiting(format!(
        "Waiting for Pod \"{name}\" to be ready"
    ));

    // A Pod that ran to completion never reports Ready=True.
    let phase = pod.status.as_ref().and_then(|s| s.phase.as_deref());
    if phase == Some(POD_SUCCEEDED) {
        result.ok = true;
        return result;
    }

    let ready = find_condition(pod, POD_READY);
    if ready.is_some_and(is_true) {
        result.ok = true;
        return result;
    }

    let errs = container_status_errors(pod);
    if !errs.is_empty() || ready.is_some_and(has_message) {
        result.message = Some(Message::warning(pod_error(ready, &errs, &name)));
    }
    result
}

fn find_condition<'a>(
    pod: &'a Pod,
    type_: &str,
) -> Option<&'a PodCondition> {
    pod.status
        .as_ref()?
        .conditions
        .as_ref()?
        .iter()
        .find(|c| c.type_ == type_)
}

fn is_true(condition: &PodCondition) -> bool {
    condition.status == CONDITION_TRUE
}

fn has_message(condition: &PodCondition) -> bool {
    condition.message.as_deref().is_some_and(|m| !m.is_empty())
}

/// The condition's message, only when it also carries a reason.
fn status_from_condition(condition: &PodCondition) -> Option<&str> {
    let reason = condition.reason.as_deref().unwrap_or_default();
    let message = condition.message.as_deref().unwrap_or_default();
    if reason.is_empty() || message.is_empty() {
        return None;
    }
    Some(message)
}

fn pod_error(
    condition: Option<&PodCondition>,
    errs: &[String],
    name: &str,
) -> String {
    let mut msg = format!("[Pod {name}]: ");
    if let Some(status) = condition.and_then(status_from_condition) {
        msg.push_str(status);
    }
    msg.push_str(&errs.join("\n"));
    msg
}

/// Diagnostic fragments for every container that is not ready, in status order.
pub(crate) fn container_status_errors(pod: &Pod) -> Vec<String> {
    let statuses = pod
        .status
        .as_ref()
        .and_then(|s| s.container_statuses.as_deref())
        .unwrap_or_default();

    let mut errs = Vec::new();
    for status in statuses.iter().filter(|s| !s.ready) {
        errs.extend(container_waiting_error(status));
        errs.extend(container_terminated_error(status));
        container_last_termination(status, &mut errs);
    }
    errs
}

fn container_waiting_error(status: &ContainerStatus) -> Option<String> {
    let waiting = status.state.as_ref()?.waiting.as_ref()?;
    let reason = waiting.reason.as_deref().unwrap_or_default();
    if reason == CONTAINER_CREATING {
        return None;
    }
    let message = waiting.message.as_deref().unwrap_or_default();
    Some(format!("[{reason}] {}", trim_image_pull_msg(message)))
}

fn container_terminated_error(status: &ContainerStatus) -> Option<String> {
    let terminated = status.state.as_ref()?.terminated.as_ref()?;
    let reason = terminated.reason.as_deref().filter(|r| !r.is_empty())?;
    match terminated.message.as_deref() {
        Some(message) if !message.is_empty() => {
            Some(format!("[{reason}] {}", trim_image_pull_msg(message)))
        }
        _ => Some(format!(
            "Container \"{}\" completed with exit code {}",
            status.name, terminated.exit_code
        )),
    }
}

/// The previous run survives behind a generic back-off waiting message, so
/// it is the only place the real crash reason shows up.
fn container_last_termination(
    status: &ContainerStatus,
    errs: &mut Vec<String>,
) {
    let Some(terminated) =
        status.last_state.as_ref().and_then(|s| s.terminated.as_ref())
    else {
        return;
    };

    let at = match &terminated.finished_at {
        Some(t) => t.0.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        None => ZERO_TIME.to_string(),
    };
    errs.push(format!(
        "Container \"{}\" terminated at {at} ({}: exit code {})",
        status.name,
        terminated.reason.as_deref().unwrap_or_default(),
        terminated.exit_code
    ));

    let message = terminated.message.as_deref().unwrap_or_default();
    if !message.is_empty() {
        errs.push(message.to_string());
    }
}

/// Strips container-runtime boilerplate around image pull failures.
pub(crate) fn trim_image_pull_msg(msg: &str) -> &str {
    let msg = msg.strip_prefix(IMAGE_PULL_PREFIX).unwrap_or(msg);
    msg.strip_suffix(MANIFEST_UNKNOWN_SUFFIX).unwrap_or(msg)
}
