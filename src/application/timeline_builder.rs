// Timeline builder - distinct observation instants in ascending order
use crate::domain::observation::ObservationRecord;
use chrono::NaiveDateTime;

pub fn build_timeline(records: &[ObservationRecord]) -> Vec<NaiveDateTime> {
    let mut frames: Vec<NaiveDateTime> = records.iter().map(|r| r.timestamp).collect();
    frames.sort_unstable();
    frames.dedup();
    frames
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn t0() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 9, 1)
            .and_then(|d| d.and_hms_opt(13, 10, 0))
            .unwrap()
    }

    #[test]
    fn test_empty_records_yield_empty_timeline() {
        assert!(build_timeline(&[]).is_empty());
    }

    #[test]
    fn test_timeline_is_sorted_and_distinct() {
        let records = vec![
            ObservationRecord::new("BN01", t0() + Duration::minutes(10), 195),
            ObservationRecord::new("BN02", t0(), 120),
            ObservationRecord::new("BN01", t0() + Duration::minutes(5), 185),
            ObservationRecord::new("BN01", t0(), 335),
            ObservationRecord::new("BN03", t0() + Duration::minutes(10), 90),
        ];

        let frames = build_timeline(&records);

        assert_eq!(
            frames,
            vec![t0(), t0() + Duration::minutes(5), t0() + Duration::minutes(10)]
        );
        assert!(frames.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_timeline_ignores_insertion_order() {
        let a = ObservationRecord::new("BN01", t0(), 1);
        let b = ObservationRecord::new("BN02", t0() + Duration::minutes(5), 2);
        assert_eq!(
            build_timeline(&[a.clone(), b.clone()]),
            build_timeline(&[b, a])
        );
    }
}
