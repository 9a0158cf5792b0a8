use k8s_openapi::api::apps::v1::DaemonSet;
use k8s_openapi::api::batch::v1::Job;
use k8s_openapi::api::core::v1::Pod;
use oprc_readiness::workflow::{load_typed, load_workflow, replay, replay_snapshots};
use oprc_readiness::{Checked, Snapshot};
use serde::de::DeserializeOwned;

macro_rules! fixture {
    ($kind:literal, $name:literal) => {
        include_bytes!(concat!("fixtures/", $kind, "/", $name, ".json")).as_slice()
    };
}

fn load_all<K: DeserializeOwned>(workflows: &[&[u8]]) -> Vec<K> {
    workflows
        .iter()
        .flat_map(|raw| load_typed::<K>(raw).unwrap())
        .collect()
}

fn run<K: Checked + DeserializeOwned>(workflows: &[&[u8]]) -> (bool, String) {
    let snapshots = load_all::<K>(workflows);
    let (ready, details) = replay(&K::checker(), &snapshots);
    println!("{details}");
    (ready, details.to_string())
}

#[test]
fn pod_image_pull_error() {
    let (ready, details) = run::<Pod>(&[fixture!("pod", "imagePullError")]);
    assert!(!ready);
    assert!(details.contains(
        "[Pod foo]: containers with unready status: [nginx][ImagePullBackOff] Back-off pulling image \"nginx:1.13-invalid\"\n"
    ));
}

#[test]
fn pod_ready_after_image_pull_error_resolved() {
    let (ready, details) = run::<Pod>(&[
        fixture!("pod", "imagePullError"),
        fixture!("pod", "imagePullErrorResolved"),
    ]);
    assert!(ready);
    assert_eq!(
        details,
        "[true] Waiting for Pod \"foo\" to be scheduled\n\
         [true] Waiting for Pod \"foo\" to be initialized\n\
         [true] Waiting for Pod \"foo\" to be ready\n"
    );
}

#[test]
fn pod_unscheduled() {
    let (ready, details) = run::<Pod>(&[fixture!("pod", "unscheduled")]);
    assert!(!ready);
    assert!(details.contains(
        " Waiting for Pod \"foo\" to be scheduled -- 0/1 nodes are available: 1 Insufficient memory.\n"
    ));
}

#[test]
fn pod_crash_loop_reports_last_termination() {
    let (ready, details) = run::<Pod>(&[fixture!("pod", "crashLoopBackoff")]);
    assert!(!ready);
    assert!(details.contains(
        "[Pod crashloop]: containers with unready status: [crash][CrashLoopBackOff] back-off 1m20s restarting failed container=crash pod=crashloop_default(0c5eddea-a859-4ee2-bb6a-4f4d0b786d85)\n\
         Container \"crash\" terminated at 2024-07-03T17:47:36Z (Error: exit code 1)\n\
         see ya!\n"
    ));
}

#[test]
fn pod_succeeded_is_ready() {
    let (ready, _) = run::<Pod>(&[fixture!("pod", "succeeded")]);
    assert!(ready);
}

#[test]
fn job_backoff_limit_exceeded() {
    let (ready, details) = run::<Job>(&[fixture!("job", "backoffLimitExceeded")]);
    assert!(!ready);
    assert!(details.contains(
        "[false] Waiting for Job \"pi\" to succeed -- [Job pi]: backoff limit exceeded: Job has reached the specified backoff limit\n"
    ));
}

#[test]
fn job_succeeds_after_backoff_limit_resolved() {
    let (ready, details) = run::<Job>(&[
        fixture!("job", "backoffLimitExceeded"),
        fixture!("job", "backoffLimitResolved"),
    ]);
    assert!(ready);
    assert!(!details.contains("backoff limit"));
}

#[test]
fn job_deadline_exceeded() {
    let (ready, details) = run::<Job>(&[fixture!("job", "deadlineExceeded")]);
    assert!(!ready);
    assert!(details.contains("[Job batch/sleepy]: active deadline exceeded"));
}

#[test]
fn daemonset_rollout_becomes_ready_at_full_availability() {
    let snapshots = load_all::<DaemonSet>(&[fixture!("daemonset", "rollout")]);
    let checker = DaemonSet::checker();
    let verdicts: Vec<bool> = snapshots.iter().map(|ds| checker.ready(ds)).collect();
    assert_eq!(verdicts, vec![false, false, true]);

    let (_, partial) = checker.ready_details(&snapshots[1]);
    assert_eq!(
        partial.to_string(),
        "[true] Waiting for daemonSet \"kube-system/fluentd\" to be scheduled\n\
         [false] Waiting for daemonSet \"kube-system/fluentd\" to be ready\n"
    );
}

#[test]
fn untyped_workflow_dispatches_per_entry() {
    let snapshots = load_workflow(fixture!("job", "backoffLimitResolved")).unwrap();
    assert!(snapshots.iter().all(|s| matches!(s, Snapshot::Job(_))));
    let (ready, details) = replay_snapshots(&snapshots);
    assert!(ready);
    assert_eq!(details.len(), 2);
}

#[test]
fn evaluation_is_idempotent_per_snapshot() {
    let snapshots = load_all::<Pod>(&[fixture!("pod", "crashLoopBackoff")]);
    let checker = Pod::checker();
    let first = checker.ready_details(&snapshots[0]);
    let second = checker.ready_details(&snapshots[0]);
    assert_eq!(first, second);
    assert_eq!(first.1.to_string(), second.1.to_string());
}
