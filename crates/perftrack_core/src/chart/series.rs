//! Per-metric chart series.
//!
//! # Invariants
//! - One series per distinct metric, in first-seen order.
//! - Points inside a series are sorted by date; equal dates keep input order.
//! - An empty selection is an error, never an empty chart.

use crate::model::record::{Period, PerformanceRecord, DATE_FORMAT};
use crate::query::filter::{distinct_metrics, filter_by_name_and_period};
use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartError {
    /// No record matches the requested name and period.
    NoData { name: String, period: Period },
}

impl Display for ChartError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoData { name, period } => write!(
                f,
                "No performance data found for {name} for {period} period."
            ),
        }
    }
}

impl Error for ChartError {}

/// How each series is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartStyle {
    /// Connected line with a marker per point.
    #[default]
    Line,
    Bar,
    Scatter,
}

impl ChartStyle {
    pub const ALL: [ChartStyle; 3] = [ChartStyle::Line, ChartStyle::Bar, ChartStyle::Scatter];

    pub fn label(self) -> &'static str {
        match self {
            Self::Line => "Line Chart",
            Self::Bar => "Bar Chart",
            Self::Scatter => "Scatter Plot",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    #[serde(serialize_with = "serialize_date")]
    pub date: NaiveDate,
    pub score: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricSeries {
    pub metric: String,
    pub points: Vec<ChartPoint>,
}

/// Everything a renderer needs to draw one chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub style: ChartStyle,
    pub series: Vec<MetricSeries>,
}

/// Builds the chart for one employee and period out of the full record set.
pub fn build_chart(
    records: &[PerformanceRecord],
    name: &str,
    period: Period,
    style: ChartStyle,
) -> ChartResult<ChartSpec> {
    let selected = filter_by_name_and_period(records, name, period);
    if selected.is_empty() {
        return Err(ChartError::NoData {
            name: name.to_string(),
            period,
        });
    }

    let series = distinct_metrics(&selected)
        .into_iter()
        .map(|metric| {
            let mut points: Vec<ChartPoint> = selected
                .iter()
                .filter(|record| record.metric == metric)
                .map(|record| ChartPoint {
                    date: record.date,
                    score: record.score,
                })
                .collect();
            points.sort_by_key(|point| point.date);
            MetricSeries { metric, points }
        })
        .collect();

    Ok(ChartSpec {
        title: format!("Performance Metrics for {name}"),
        x_label: "Date",
        y_label: "Score",
        style,
        series,
    })
}

fn serialize_date<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&date.format(DATE_FORMAT).to_string())
}
