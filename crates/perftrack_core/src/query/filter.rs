//! Name and period filters over performance records.

use crate::model::record::{Period, PerformanceRecord};

/// Optional name/period constraints; `None` matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub name: Option<String>,
    pub period: Option<Period>,
}

impl RecordFilter {
    /// Returns whether `record` satisfies every set constraint.
    pub fn matches(&self, record: &PerformanceRecord) -> bool {
        self.name
            .as_deref()
            .map_or(true, |name| record.name == name)
            && self.period.map_or(true, |period| record.period == period)
    }

    /// Applies the filter, keeping input order.
    pub fn apply(&self, records: &[PerformanceRecord]) -> Vec<PerformanceRecord> {
        records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect()
    }
}

/// Exact match on employee name.
pub fn filter_by_name(records: &[PerformanceRecord], name: &str) -> Vec<PerformanceRecord> {
    RecordFilter {
        name: Some(name.to_string()),
        period: None,
    }
    .apply(records)
}

/// Exact match on employee name and reporting period.
pub fn filter_by_name_and_period(
    records: &[PerformanceRecord],
    name: &str,
    period: Period,
) -> Vec<PerformanceRecord> {
    RecordFilter {
        name: Some(name.to_string()),
        period: Some(period),
    }
    .apply(records)
}

/// Distinct metric labels in first-seen order.
pub fn distinct_metrics(records: &[PerformanceRecord]) -> Vec<String> {
    let mut metrics: Vec<String> = Vec::new();
    for record in records {
        if !metrics.iter().any(|metric| metric == &record.metric) {
            metrics.push(record.metric.clone());
        }
    }
    metrics
}

#[cfg(test)]
mod tests {
    use super::{distinct_metrics, filter_by_name, filter_by_name_and_period, RecordFilter};
    use crate::model::record::{Period, PerformanceRecord};
    use chrono::NaiveDate;

    fn record(id: i64, name: &str, metric: &str, period: Period) -> PerformanceRecord {
        PerformanceRecord {
            id,
            name: name.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(id as u64),
            metric: metric.to_string(),
            score: id * 10,
            period,
        }
    }

    fn sample() -> Vec<PerformanceRecord> {
        vec![
            record(1, "Alice", "Sales", Period::Daily),
            record(2, "Bob", "Sales", Period::Daily),
            record(3, "Alice", "Attendance", Period::Weekly),
            record(4, "alice", "Sales", Period::Daily),
            record(5, "Alice", "Sales", Period::Daily),
        ]
    }

    #[test]
    fn filter_by_name_is_exact_and_order_preserving() {
        let ids: Vec<i64> = filter_by_name(&sample(), "Alice")
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![1, 3, 5]);
    }

    #[test]
    fn filter_by_name_and_period_requires_both() {
        let ids: Vec<i64> = filter_by_name_and_period(&sample(), "Alice", Period::Daily)
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![1, 5]);
        assert!(filter_by_name_and_period(&sample(), "Bob", Period::Monthly).is_empty());
    }

    #[test]
    fn empty_filter_keeps_everything() {
        assert_eq!(RecordFilter::default().apply(&sample()), sample());
    }

    #[test]
    fn distinct_metrics_keeps_first_seen_order() {
        assert_eq!(distinct_metrics(&sample()), vec!["Sales", "Attendance"]);
    }
}
