// Palette assigner - stable color slot per waiting point
use crate::domain::observation::ObservationRecord;
use crate::domain::palette::{Palette, PALETTE_SIZE};
use std::collections::{BTreeMap, BTreeSet};

pub fn assign_palette(records: &[ObservationRecord]) -> Palette {
    let point_ids: BTreeSet<&str> = records.iter().map(|r| r.point_id.as_str()).collect();

    let slots: BTreeMap<String, usize> = point_ids
        .into_iter()
        .enumerate()
        .map(|(idx, id)| (id.to_string(), idx % PALETTE_SIZE))
        .collect();

    Palette::from_slots(slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(id: &str) -> ObservationRecord {
        let t = NaiveDate::from_ymd_opt(2024, 9, 1)
            .and_then(|d| d.and_hms_opt(13, 10, 0))
            .unwrap();
        ObservationRecord::new(id, t, 10)
    }

    #[test]
    fn test_slots_follow_lexical_order() {
        let records = vec![record("BN03"), record("BN01"), record("BN02"), record("BN01")];
        let palette = assign_palette(&records);

        assert_eq!(palette.iter().count(), 3);
        assert_eq!(palette.slot_of("BN01"), Some(0));
        assert_eq!(palette.slot_of("BN02"), Some(1));
        assert_eq!(palette.slot_of("BN03"), Some(2));
        assert_eq!(palette.color_of("BN01"), "lightblue");
    }

    #[test]
    fn test_slots_wrap_around_palette_size() {
        let records: Vec<_> = (0..PALETTE_SIZE + 2)
            .map(|i| record(&format!("BN{:02}", i)))
            .collect();
        let palette = assign_palette(&records);

        assert_eq!(palette.slot_of("BN12"), Some(0));
        assert_eq!(palette.slot_of("BN13"), Some(1));
    }

    #[test]
    fn test_unknown_point_gets_fallback_color() {
        let palette = assign_palette(&[record("BN01")]);
        assert_eq!(palette.slot_of("BN99"), None);
        assert_eq!(palette.color_of("BN99"), "lightgray");
    }

    #[test]
    fn test_palette_independent_of_insertion_order() {
        let a = assign_palette(&[record("BN02"), record("BN01")]);
        let b = assign_palette(&[record("BN01"), record("BN02")]);
        assert_eq!(a, b);
    }
}
