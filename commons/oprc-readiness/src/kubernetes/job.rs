use k8s_openapi::api::batch::v1::{Job, JobCondition};

use super::qualified_name;
use crate::checker::{Condition, Message, ReadinessResult, StateChecker};

const JOB_COMPLETE: &str = "Complete";
const JOB_FAILED: &str = "Failed";
const CONDITION_TRUE: &str = "True";

const BACKOFF_LIMIT_EXCEEDED: &str = "BackoffLimitExceeded";
const DEADLINE_EXCEEDED: &str = "DeadlineExceeded";

static CONDITIONS: &[Condition<Job>] = &[
    Condition {
        name: "started",
        check: job_started,
    },
    Condition {
        name: "complete",
        check: job_complete,
    },
];

/// Started -> Complete.
pub fn checker() -> StateChecker<Job> {
    StateChecker::new(CONDITIONS)
}

/// The controller has populated at least one pod count.
fn job_started(job: &Job) -> ReadinessResult {
    let mut result = ReadinessResult::waiting(format!(
        "Waiting for Job \"{}\" to start",
        qualified_name(job)
    ));
    if let Some(status) = &job.status {
        result.ok = [status.active, status.succeeded, status.failed]
            .iter()
            .any(|count| count.unwrap_or(0) > 0);
    }
    result
}

fn job_complete(job: &Job) -> ReadinessResult {
    let name = qualified_name(job);
    let mut result = ReadinessResult::waiting(format!(
        "Waiting for Job \"{name}\" to succeed"
    ));
    let conditions = job
        .status
        .as_ref()
        .and_then(|s| s.conditions.as_deref())
        .unwrap_or_default();

    if let Some((failed, limit)) = failures(conditions)
        .find_map(|c| exceeded_limit(c).map(|limit| (c, limit)))
    {
        return result.with_message(Message::warning(limit_message(
            &name, limit, failed,
        )));
    }

    if conditions
        .iter()
        .any(|c| c.type_ == JOB_COMPLETE && c.status == CONDITION_TRUE)
    {
        result.ok = true;
        return result;
    }

    if let Some(failed) = failures(conditions).next() {
        result.message = Some(Message::warning(format!(
            "[Job {name}]: [{}] {}",
            failed.reason.as_deref().unwrap_or_default(),
            failed.message.as_deref().unwrap_or_default()
        )));
    }
    result
}

fn failures(
    conditions: &[JobCondition],
) -> impl Iterator<Item = &JobCondition> {
    conditions
        .iter()
        .filter(|c| c.type_ == JOB_FAILED && c.status == CONDITION_TRUE)
}

/// Human name of the limit behind a terminal failure condition.
fn exceeded_limit(condition: &JobCondition) -> Option<&'static str> {
    match condition.reason.as_deref() {
        Some(BACKOFF_LIMIT_EXCEEDED) => Some("backoff limit exceeded"),
        Some(DEADLINE_EXCEEDED) => Some("active deadline exceeded"),
        _ => None,
    }
}

fn limit_message(name: &str, limit: &str, condition: &JobCondition) -> String {
    match condition.message.as_deref() {
        Some(message) if !message.is_empty() => {
            format!("[Job {name}]: {limit}: {message}")
        }
        _ => format!("[Job {name}]: {limit}"),
    }
}
