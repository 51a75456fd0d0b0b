use super::PriceRecord;
use std::cmp::Ordering;

/// Horizontal axis scaling rules.
#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct ScaleConfig {
    /// Axis ceiling used when nothing is selected.
    pub floor: f64,
    /// Headroom applied above the largest visible maximum.
    pub margin_factor: f64,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            floor: 10.0,
            margin_factor: 1.1,
        }
    }
}

/// Indices of the checked records, sorted by descending `max`.
///
/// The sort is stable, so records sharing a maximum keep their file order.
/// `checked` is indexed like `records`; missing flags count as unchecked.
pub fn active_subset(records: &[PriceRecord], checked: &[bool]) -> Vec<usize> {
    let mut active: Vec<usize> = (0..records.len())
        .filter(|&i| checked.get(i).copied().unwrap_or(false))
        .collect();
    active.sort_by(|&a, &b| {
        records[b]
            .max
            .partial_cmp(&records[a].max)
            .unwrap_or(Ordering::Equal)
    });
    active
}

/// Axis ceiling the chart should settle on for the given active subset.
pub fn scale_target(records: &[PriceRecord], active: &[usize], config: &ScaleConfig) -> f64 {
    active
        .iter()
        .map(|&i| records[i].max)
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))))
        .filter(|&m| m > 0.0)
        .map(|m| m * config.margin_factor)
        .unwrap_or(config.floor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<PriceRecord> {
        vec![
            PriceRecord::new("acqua", 0.20, 1.50),
            PriceRecord::new("latte", 0.90, 2.20),
            PriceRecord::new("benzina", 1.586, 2.158),
            PriceRecord::new("pane", 1.80, 4.50),
            PriceRecord::new("pasta", 0.69, 2.20),
        ]
    }

    #[test]
    fn orders_by_descending_max() {
        let records = sample();
        let active = active_subset(&records, &[true, true, true, false, false]);
        assert_eq!(active, vec![1, 2, 0]);
    }

    #[test]
    fn ties_keep_file_order() {
        let records = sample();
        let active = active_subset(&records, &[false, true, false, false, true]);
        assert_eq!(active, vec![1, 4]);
    }

    #[test]
    fn every_selection_is_non_increasing() {
        let records = sample();
        for mask in 0u32..(1 << records.len()) {
            let checked: Vec<bool> = (0..records.len()).map(|i| mask & (1 << i) != 0).collect();
            let active = active_subset(&records, &checked);
            assert_eq!(active.len(), mask.count_ones() as usize);
            assert!(active
                .windows(2)
                .all(|w| records[w[0]].max >= records[w[1]].max));

            let target = scale_target(&records, &active, &ScaleConfig::default());
            match active.first() {
                Some(&top) => assert!(target >= records[top].max),
                None => assert_eq!(target, 10.0),
            }
        }
    }

    #[test]
    fn scale_uses_margin_or_floor() {
        let records = sample();
        let config = ScaleConfig::default();
        assert_eq!(scale_target(&records, &[], &config), 10.0);
        let target = scale_target(&records, &[1, 2, 0], &config);
        assert!((target - 2.42).abs() < 1e-9);
    }

    #[test]
    fn short_checked_slice_counts_as_unchecked() {
        let records = sample();
        assert_eq!(active_subset(&records, &[false, false, true]), vec![2]);
    }
}
