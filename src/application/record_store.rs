// Record store port - append-only observation log
use crate::domain::observation::ObservationRecord;

pub trait RecordStore: Send {
    /// Append a record; duplicates of (point, timestamp) are kept.
    fn append(&mut self, record: ObservationRecord);

    /// All records in insertion order.
    fn records(&self) -> &[ObservationRecord];

    fn len(&self) -> usize {
        self.records().len()
    }
}
