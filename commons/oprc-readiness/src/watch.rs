use futures_util::{Stream, StreamExt};
use std::pin::pin;

use crate::checker::{ReadinessResults, StateChecker};

/// Drive `checker` over a caller-owned stream of snapshots (e.g. a watcher
/// on one object). Returns at the first ready snapshot, otherwise the last
/// verdict once the stream ends; `None` if the stream yielded nothing.
///
/// Pacing, retries and deadlines belong to the stream and the caller.
#[tracing::instrument(level = "debug", skip_all)]
pub async fn await_ready<K, S>(
    checker: &StateChecker<K>,
    snapshots: S,
) -> Option<(bool, ReadinessResults)>
where
    S: Stream<Item = K>,
{
    let mut snapshots = pin!(snapshots);
    let mut last = None;
    let mut observed = 0usize;
    while let Some(snapshot) = snapshots.next().await {
        observed += 1;
        let (ready, details) = checker.ready_details(&snapshot);
        if let Some(result) = details.last() {
            tracing::debug!(observed, ready, %result, "evaluated snapshot");
        }
        last = Some((ready, details));
        if ready {
            break;
        }
    }
    if last.is_none() {
        tracing::debug!("snapshot stream ended without observations");
    }
    last
}
