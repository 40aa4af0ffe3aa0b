//! egui_plot rendering of a `ChartSpec`.

use chrono::{Datelike, NaiveDate};
use eframe::egui;
use egui_plot::{Bar, BarChart, Legend, Line, Plot, Points};
use perftrack_core::{ChartSpec, ChartStyle, MetricSeries, DATE_FORMAT};

const MARKER_RADIUS: f32 = 3.0;
const SCATTER_RADIUS: f32 = 4.5;
/// Share of one day taken by the bars of a single date.
const BAR_GROUP_WIDTH: f64 = 0.8;

/// X coordinate for a date: whole days since 0001-01-01.
pub fn date_to_x(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce())
}

/// Inverse of [`date_to_x`] for axis labels; off-grid values map to `None`.
pub fn x_to_date(x: f64) -> Option<NaiveDate> {
    if (x - x.round()).abs() > 1e-6 {
        return None;
    }
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
}

fn series_points(series: &MetricSeries) -> Vec<[f64; 2]> {
    series
        .points
        .iter()
        .map(|point| [date_to_x(point.date), point.score as f64])
        .collect()
}

/// Horizontal offset of bar group member `index` out of `count`.
pub fn bar_offset(index: usize, count: usize) -> f64 {
    let width = BAR_GROUP_WIDTH / count.max(1) as f64;
    (index as f64 - (count as f64 - 1.0) / 2.0) * width
}

pub fn show_chart(ui: &mut egui::Ui, chart: &ChartSpec) {
    let series_count = chart.series.len();

    Plot::new("performance_chart")
        .legend(Legend::default())
        .x_axis_label(chart.x_label)
        .y_axis_label(chart.y_label)
        .show_grid([true, true])
        .x_axis_formatter(|mark, _range| {
            x_to_date(mark.value)
                .map(|date| date.format(DATE_FORMAT).to_string())
                .unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            for (index, series) in chart.series.iter().enumerate() {
                let points = series_points(series);
                match chart.style {
                    ChartStyle::Line => {
                        plot_ui.line(Line::new(series.metric.clone(), points.clone()));
                        plot_ui.points(
                            Points::new(series.metric.clone(), points).radius(MARKER_RADIUS),
                        );
                    }
                    ChartStyle::Bar => {
                        let width = BAR_GROUP_WIDTH / series_count.max(1) as f64;
                        let offset = bar_offset(index, series_count);
                        let bars: Vec<Bar> = points
                            .into_iter()
                            .map(|[x, y]| Bar::new(x + offset, y).width(width))
                            .collect();
                        plot_ui.bar_chart(BarChart::new(series.metric.clone(), bars));
                    }
                    ChartStyle::Scatter => {
                        plot_ui.points(
                            Points::new(series.metric.clone(), points).radius(SCATTER_RADIUS),
                        );
                    }
                }
            }
        });
}
