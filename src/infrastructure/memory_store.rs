// In-memory record store
use crate::application::record_store::RecordStore;
use crate::domain::observation::ObservationRecord;

#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    records: Vec<ObservationRecord>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for InMemoryRecordStore {
    fn append(&mut self, record: ObservationRecord) {
        self.records.push(record);
    }

    fn records(&self) -> &[ObservationRecord] {
        &self.records
    }
}
