pub mod daemonset;
pub mod job;
pub mod pod;

use k8s_openapi::api::apps::v1::DaemonSet;
use k8s_openapi::api::batch::v1::Job;
use k8s_openapi::api::core::v1::Pod;
use kube::ResourceExt;

use crate::checker::{ReadinessResults, StateChecker};

const DEFAULT_NAMESPACE: &str = "default";

/// Display identity of an object: `<namespace>/<name>`, or just `<name>` when
/// the namespace is empty or `default`.
pub fn qualified_name<K: ResourceExt>(obj: &K) -> String {
    let name = obj.name_any();
    match obj.namespace() {
        Some(ns) if !ns.is_empty() && ns != DEFAULT_NAMESPACE => {
            format!("{ns}/{name}")
        }
        _ => name,
    }
}

/// Resource kinds that carry a built-in readiness chain.
pub trait Checked: Sized + 'static {
    const KIND: &'static str;

    fn checker() -> StateChecker<Self>;
}

impl Checked for Pod {
    const KIND: &'static str = "Pod";

    fn checker() -> StateChecker<Self> {
        pod::checker()
    }
}

impl Checked for Job {
    const KIND: &'static str = "Job";

    fn checker() -> StateChecker<Self> {
        job::checker()
    }
}

impl Checked for DaemonSet {
    const KIND: &'static str = "DaemonSet";

    fn checker() -> StateChecker<Self> {
        daemonset::checker()
    }
}

/// A point-in-time observation of one of the supported resource kinds.
#[derive(Clone, Debug)]
pub enum Snapshot {
    Pod(Pod),
    Job(Job),
    DaemonSet(DaemonSet),
}

impl Snapshot {
    pub fn kind(&self) -> &'static str {
        match self {
            Snapshot::Pod(_) => Pod::KIND,
            Snapshot::Job(_) => Job::KIND,
            Snapshot::DaemonSet(_) => DaemonSet::KIND,
        }
    }

    pub fn qualified_name(&self) -> String {
        match self {
            Snapshot::Pod(p) => qualified_name(p),
            Snapshot::Job(j) => qualified_name(j),
            Snapshot::DaemonSet(d) => qualified_name(d),
        }
    }

    /// Run the kind's built-in chain against this snapshot.
    pub fn ready_details(&self) -> (bool, ReadinessResults) {
        match self {
            Snapshot::Pod(p) => Pod::checker().ready_details(p),
            Snapshot::Job(j) => Job::checker().ready_details(j),
            Snapshot::DaemonSet(d) => DaemonSet::checker().ready_details(d),
        }
    }

    pub fn ready(&self) -> bool {
        self.ready_details().0
    }
}

impl From<Pod> for Snapshot {
    fn from(pod: Pod) -> Self {
        Snapshot::Pod(pod)
    }
}

impl From<Job> for Snapshot {
    fn from(job: Job) -> Self {
        Snapshot::Job(job)
    }
}

impl From<DaemonSet> for Snapshot {
    fn from(ds: DaemonSet) -> Self {
        Snapshot::DaemonSet(ds)
    }
}
