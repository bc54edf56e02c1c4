// Snapshot resolver - latest known duration per waiting point as of an instant
use crate::domain::observation::ObservationRecord;
use crate::domain::snapshot::{AsOf, Snapshot, SnapshotEntry};
use chrono::NaiveDateTime;
use std::collections::BTreeMap;

/// Resolve the snapshot for `as_of`.
///
/// For each point the record with the greatest timestamp at or before the
/// bound wins. When several records share that timestamp, the one inserted
/// last wins. Entries come out sorted by point id.
pub fn resolve_snapshot(records: &[ObservationRecord], as_of: AsOf) -> Snapshot {
    let mut latest: BTreeMap<&str, (NaiveDateTime, u32)> = BTreeMap::new();

    for record in records.iter().filter(|r| as_of.includes(r.timestamp)) {
        latest
            .entry(record.point_id.as_str())
            .and_modify(|current| {
                // `>=` so a later insertion replaces an exact tie
                if record.timestamp >= current.0 {
                    *current = (record.timestamp, record.duration_minutes);
                }
            })
            .or_insert((record.timestamp, record.duration_minutes));
    }

    let entries = latest
        .into_iter()
        .map(|(point_id, (_, duration_minutes))| SnapshotEntry {
            point_id: point_id.to_string(),
            duration_minutes,
        })
        .collect();

    Snapshot::from_sorted(entries)
}
