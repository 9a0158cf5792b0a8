//! Recorded snapshots of a single resource, e.g. captured with `kubespy record`.
//!
//! A workflow is a JSON array of full objects (`apiVersion`, `kind`,
//! `metadata`, `status`) in observation order.

use k8s_openapi::api::apps::v1::DaemonSet;
use k8s_openapi::api::batch::v1::Job;
use k8s_openapi::api::core::v1::Pod;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::checker::{ReadinessResults, StateChecker};
use crate::errors::ReadinessError;
use crate::kubernetes::Snapshot;

/// Decode one recorded object, dispatching on its `kind`.
pub fn load_state(json: &[u8]) -> Result<Snapshot, ReadinessError> {
    let value: Value = serde_json::from_slice(json)?;
    snapshot_from_value(value)
}

/// Decode a recorded workflow whose entries may be of any supported kind.
pub fn load_workflow(json: &[u8]) -> Result<Vec<Snapshot>, ReadinessError> {
    let values: Vec<Value> = serde_json::from_slice(json)?;
    values.into_iter().map(snapshot_from_value).collect()
}

/// Decode a recorded workflow straight into one kind.
pub fn load_typed<K: DeserializeOwned>(
    json: &[u8],
) -> Result<Vec<K>, ReadinessError> {
    Ok(serde_json::from_slice(json)?)
}

pub fn snapshot_from_value(value: Value) -> Result<Snapshot, ReadinessError> {
    let kind = value
        .get("kind")
        .and_then(Value::as_str)
        .ok_or(ReadinessError::MissingKind)?
        .to_owned();
    let snapshot = match kind.as_str() {
        "Pod" => Snapshot::Pod(serde_json::from_value::<Pod>(value)?),
        "Job" => Snapshot::Job(serde_json::from_value::<Job>(value)?),
        "DaemonSet" => {
            Snapshot::DaemonSet(serde_json::from_value::<DaemonSet>(value)?)
        }
        _ => return Err(ReadinessError::UnsupportedKind(kind)),
    };
    Ok(snapshot)
}

/// Evaluate snapshots in order until one is ready; returns that verdict or
/// the last one seen. An empty workflow is not ready and has an empty trail.
pub fn replay<'a, K: 'a>(
    checker: &StateChecker<K>,
    snapshots: impl IntoIterator<Item = &'a K>,
) -> (bool, ReadinessResults) {
    let mut outcome = (false, ReadinessResults::default());
    for snapshot in snapshots {
        outcome = checker.ready_details(snapshot);
        if outcome.0 {
            break;
        }
    }
    outcome
}

/// Like [`replay`] for snapshots of mixed or unknown kind.
pub fn replay_snapshots<'a>(
    snapshots: impl IntoIterator<Item = &'a Snapshot>,
) -> (bool, ReadinessResults) {
    let mut outcome = (false, ReadinessResults::default());
    for snapshot in snapshots {
        outcome = snapshot.ready_details();
        if outcome.0 {
            break;
        }
    }
    outcome
}
