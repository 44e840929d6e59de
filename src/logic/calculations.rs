/// Arithmetic mean, or `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// The last `n` values of a most-recent-last series, oldest first.
pub fn most_recent(values: &[f64], n: usize) -> &[f64] {
    &values[values.len().saturating_sub(n)..]
}

/// One decimal place, with exact ties rounded away from zero (42.25 -> "42.3").
///
/// `{:.1}` alone rounds ties to even, which would print 42.25 as "42.2".
pub fn fmt_one_decimal(value: f64) -> String {
    format!("{:.1}", (value * 10.0).round() / 10.0)
}

/// Signed change from the first to the last value of a series.
pub fn net_change(values: &[f64]) -> Option<f64> {
    match (values.first(), values.last()) {
        (Some(first), Some(last)) => Some(last - first),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_values() {
        assert_eq!(mean(&[40.0, 42.0, 44.0]), Some(42.0));
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn most_recent_takes_tail() {
        let history = [10.0, 20.0, 30.0, 40.0];
        assert_eq!(most_recent(&history, 3), &[20.0, 30.0, 40.0]);
        assert_eq!(most_recent(&history, 10), &history);
        assert!(most_recent(&[], 3).is_empty());
    }

    #[test]
    fn one_decimal_rounds_ties_up() {
        assert_eq!(fmt_one_decimal(42.25), "42.3");
        assert_eq!(fmt_one_decimal(38.25), "38.3");
        assert_eq!(fmt_one_decimal(22.75), "22.8");
        assert_eq!(fmt_one_decimal(-1.25), "-1.3");
        assert_eq!(fmt_one_decimal(30.0), "30.0");
        assert_eq!(fmt_one_decimal(33.24), "33.2");
    }

    #[test]
    fn net_change_sign() {
        assert_eq!(net_change(&[40.0, 42.0, 44.0]), Some(4.0));
        assert_eq!(net_change(&[50.0, 45.0]), Some(-5.0));
        assert_eq!(net_change(&[]), None);
    }
}
