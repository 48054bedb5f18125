use crate::api::models::AggregatedMetric;

pub fn sum_by<R>(records: &[R], value: impl Fn(&R) -> u64) -> u64 {
    records.iter().map(value).sum()
}

pub fn count_where<R>(records: &[R], pred: impl Fn(&R) -> bool) -> usize {
    records.iter().filter(|r| pred(*r)).count()
}

/// `part` as a percentage of `total`; zero when there is nothing to divide.
pub fn percentage(part: f64, total: f64) -> f64 {
    if total <= 0.0 { 0.0 } else { part / total * 100.0 }
}

/// Each metric's share of the sum of all metric values.
pub fn shares(metrics: &[AggregatedMetric]) -> Vec<(String, f64)> {
    let total: f64 = metrics.iter().map(|m| m.value).sum();
    metrics
        .iter()
        .map(|m| (m.name.clone(), percentage(m.value, total)))
        .collect()
}

pub fn average(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_and_counts() {
        let values = [3u64, 5, 8];
        assert_eq!(sum_by(&values, |v| *v), 16);
        assert_eq!(count_where(&values, |v| *v > 4), 2);
        assert_eq!(sum_by::<u64>(&[], |v| *v), 0);
    }

    #[test]
    fn percentage_of_zero_total() {
        assert_eq!(percentage(5.0, 0.0), 0.0);
        assert_eq!(percentage(1.0, 4.0), 25.0);
    }

    #[test]
    fn shares_add_up() {
        let metrics = [
            AggregatedMetric::new("Suporte", 45.0, "#ef4444"),
            AggregatedMetric::new("Vendas", 15.0, "#10b981"),
        ];
        let s = shares(&metrics);
        assert_eq!(s[0], ("Suporte".to_string(), 75.0));
        assert_eq!(s[1].1, 25.0);
    }

    #[test]
    fn average_of_series() {
        assert_eq!(average(&[]), None);
        assert_eq!(average(&[2.0, 4.0]), Some(3.0));
    }
}
