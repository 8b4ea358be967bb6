use std::collections::HashSet;

use crate::analysis::utility::rate;
use crate::records::HypertensionRecord;

/// Returns the total number of people aged 20+ with hypertension across `data`.
pub fn total_num_hypertension(data: &[HypertensionRecord]) -> u64 {
    data.iter().map(|r| u64::from(r.num_hypertension_all)).sum()
}

/// Returns the names of neighbourhoods whose 20+ hypertension rate is at least `threshold`.
///
/// A neighbourhood sitting exactly on the threshold is included.
pub fn high_hypertension_rate(data: &[HypertensionRecord], threshold: f64) -> HashSet<String> {
    data.iter()
        .filter(|r| rate(r.num_hypertension_all, r.num_all) >= threshold)
        .map(|r| r.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, hyp: u32, pop: u32) -> HypertensionRecord {
        HypertensionRecord {
            name: name.into(),
            num_hypertension_all: hyp,
            num_all: pop,
            num_hypertension_20_44: 0,
            num_20_44: 0,
            num_hypertension_45_64: 0,
            num_45_64: 0,
            num_hypertension_65_plus: hyp,
            num_65_plus: pop,
        }
    }

    #[test]
    fn test_total_num_hypertension() {
        let data: Vec<_> = [100, 200, 300, 400, 500]
            .into_iter()
            .enumerate()
            .map(|(i, n)| record(&format!("N{i}"), n, 1000))
            .collect();

        assert_eq!(total_num_hypertension(&data), 1500);
        assert_eq!(total_num_hypertension(&[]), 0);
    }

    #[test]
    fn test_total_does_not_overflow_u32() {
        let data = vec![record("A", u32::MAX, u32::MAX), record("B", u32::MAX, u32::MAX)];
        assert_eq!(total_num_hypertension(&data), 2 * u64::from(u32::MAX));
    }

    #[test]
    fn test_threshold_includes_ties() {
        let data = vec![record("A", 25, 100), record("B", 24, 100), record("C", 30, 100)];

        let result = high_hypertension_rate(&data, 0.25);

        assert_eq!(result, HashSet::from(["A".to_string(), "C".to_string()]));
    }

    #[test]
    fn test_threshold_extremes() {
        let data = vec![record("A", 0, 100), record("B", 100, 100), record("Empty", 0, 0)];

        assert_eq!(high_hypertension_rate(&data, 0.0).len(), 3);
        assert!(high_hypertension_rate(&data, 1.01).is_empty());
    }
}
