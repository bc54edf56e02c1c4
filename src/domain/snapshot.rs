// Snapshot domain model - latest known duration per waiting point
use chrono::NaiveDateTime;

/// Upper bound of a snapshot query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsOf {
    /// Every record counts, regardless of timestamp.
    Unbounded,
    /// Only records at or before this instant count.
    At(NaiveDateTime),
}

impl AsOf {
    pub fn includes(&self, timestamp: NaiveDateTime) -> bool {
        match self {
            AsOf::Unbounded => true,
            AsOf::At(instant) => timestamp <= *instant,
        }
    }

    pub fn instant(&self) -> Option<NaiveDateTime> {
        match self {
            AsOf::Unbounded => None,
            AsOf::At(instant) => Some(*instant),
        }
    }
}

impl From<Option<NaiveDateTime>> for AsOf {
    fn from(value: Option<NaiveDateTime>) -> Self {
        value.map(AsOf::At).unwrap_or(AsOf::Unbounded)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotEntry {
    pub point_id: String,
    pub duration_minutes: u32,
}

/// Entries are sorted by point id, one per point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    entries: Vec<SnapshotEntry>,
}

impl Snapshot {
    pub(crate) fn from_sorted(entries: Vec<SnapshotEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[SnapshotEntry] {
        &self.entries
    }

    pub fn get(&self, point_id: &str) -> Option<u32> {
        self.entries
            .binary_search_by(|e| e.point_id.as_str().cmp(point_id))
            .ok()
            .map(|idx| self.entries[idx].duration_minutes)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
