//! Main window: entry form, visualization and search controls, results table,
//! export buttons, plus the notice and chart windows.
//!
//! All actions run synchronously on the UI thread; a slow export blocks the
//! window until it finishes.

use crate::api::{self, Notice};
use crate::chart_view::show_chart;
use eframe::egui;
use perftrack_core::{
    ChartSpec, ChartStyle, ExportFormat, Period, PerformanceRecord, RecordInput, DATE_FORMAT,
};
use rusqlite::Connection;

const RESULT_COLUMNS: [&str; 6] = ["ID", "Name", "Date", "Metric", "Score", "Period"];

/// Rows shown under the search box. Owned by the app; replaced per search.
#[derive(Debug, Default)]
pub struct ResultsTable {
    rows: Vec<PerformanceRecord>,
}

impl ResultsTable {
    pub fn replace(&mut self, rows: Vec<PerformanceRecord>) {
        self.rows = rows;
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn rows(&self) -> &[PerformanceRecord] {
        &self.rows
    }

    fn show(&self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .id_salt("results_scroll")
            .max_height(220.0)
            .show(ui, |ui| {
                egui::Grid::new("results_grid")
                    .striped(true)
                    .num_columns(RESULT_COLUMNS.len())
                    .show(ui, |ui| {
                        for column in RESULT_COLUMNS {
                            ui.label(egui::RichText::new(column).strong());
                        }
                        ui.end_row();

                        for row in &self.rows {
                            ui.label(row.id.to_string());
                            ui.label(row.name.as_str());
                            ui.label(row.date.format(DATE_FORMAT).to_string());
                            ui.label(row.metric.as_str());
                            ui.label(row.score.to_string());
                            ui.label(row.period.as_str());
                            ui.end_row();
                        }
                    });
            });
    }
}

/// Raw text of the entry form; parsed only when an action fires.
#[derive(Debug, Default)]
struct RecordForm {
    record_id: String,
    name: String,
    date: String,
    metric: String,
    score: String,
    period: Option<Period>,
}

impl RecordForm {
    fn period(&self) -> Period {
        self.period.unwrap_or(Period::Daily)
    }

    fn to_input(&self) -> RecordInput {
        RecordInput {
            name: self.name.clone(),
            date: self.date.clone(),
            metric: self.metric.clone(),
            score: self.score.clone(),
            period: self.period().as_str().to_string(),
        }
    }
}

/// Desktop application state.
pub struct PerfTrackApp {
    conn: Connection,
    form: RecordForm,
    visualize_name: String,
    chart_style: ChartStyle,
    search_name: String,
    export_path: String,
    results: ResultsTable,
    chart: Option<ChartSpec>,
    notice: Option<Notice>,
}

impl PerfTrackApp {
    /// Takes ownership of the long-lived store connection.
    pub fn new(conn: Connection, default_export_path: String) -> Self {
        Self {
            conn,
            form: RecordForm::default(),
            visualize_name: String::new(),
            chart_style: ChartStyle::default(),
            search_name: String::new(),
            export_path: default_export_path,
            results: ResultsTable::default(),
            chart: None,
            notice: None,
        }
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("record_form")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                ui.label("Record ID (update/delete):");
                ui.text_edit_singleline(&mut self.form.record_id);
                ui.end_row();

                ui.label("Employee Name:");
                ui.text_edit_singleline(&mut self.form.name);
                ui.end_row();

                ui.label("Date (YYYY-MM-DD):");
                ui.text_edit_singleline(&mut self.form.date);
                ui.end_row();

                ui.label("Performance Metric:");
                ui.text_edit_singleline(&mut self.form.metric);
                ui.end_row();

                ui.label("Score:");
                ui.text_edit_singleline(&mut self.form.score);
                ui.end_row();

                ui.label("Period:");
                ui.horizontal(|ui| {
                    let mut period = self.form.period();
                    for option in Period::ALL {
                        ui.radio_value(&mut period, option, option.as_str());
                    }
                    self.form.period = Some(period);
                });
                ui.end_row();
            });

        ui.horizontal(|ui| {
            if ui.button("Add Data").clicked() {
                self.notice = Some(api::add_record(&self.conn, &self.form.to_input()));
            }
            if ui.button("Update Data").clicked() {
                self.notice = Some(api::update_record(
                    &self.conn,
                    &self.form.record_id,
                    &self.form.to_input(),
                ));
            }
            if ui.button("Delete Data").clicked() {
                self.notice = Some(api::delete_record(&self.conn, &self.form.record_id));
            }
        });
    }

    fn show_visualize(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Employee Name for Visualization:");
            ui.text_edit_singleline(&mut self.visualize_name);
        });
        ui.horizontal(|ui| {
            ui.label("Chart Type:");
            for style in ChartStyle::ALL {
                ui.radio_value(&mut self.chart_style, style, style.label());
            }
        });
        if ui.button("Visualize Performance").clicked() {
            // Uses the period selected in the entry form.
            match api::visualize(
                &self.conn,
                &self.visualize_name,
                self.form.period(),
                self.chart_style,
            ) {
                Ok(chart) => self.chart = Some(chart),
                Err(notice) => self.notice = Some(notice),
            }
        }
    }

    fn show_search(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Search Employee Performance:");
            ui.text_edit_singleline(&mut self.search_name);
            if ui.button("Search").clicked() {
                match api::search(&self.conn, &self.search_name) {
                    Ok(rows) => self.results.replace(rows),
                    Err(notice) => {
                        self.results.clear();
                        self.notice = Some(notice);
                    }
                }
            }
        });
        self.results.show(ui);
    }

    fn show_export(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Export Data to:");
            ui.text_edit_singleline(&mut self.export_path);
            for format in ExportFormat::ALL {
                if ui.button(format.label()).clicked() {
                    self.notice = Some(api::export(&self.conn, format, &self.export_path));
                }
            }
        });
    }

    fn show_notice(&mut self, ctx: &egui::Context) {
        let Some(notice) = &self.notice else {
            return;
        };

        let mut dismissed = false;
        egui::Window::new(notice.title.as_str())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                let color = if notice.ok {
                    ui.visuals().text_color()
                } else {
                    ui.visuals().error_fg_color
                };
                ui.colored_label(color, notice.message.as_str());
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });

        if dismissed {
            self.notice = None;
        }
    }

    fn show_chart_window(&mut self, ctx: &egui::Context) {
        let Some(chart) = &self.chart else {
            return;
        };

        let mut open = true;
        egui::Window::new(chart.title.as_str())
            .open(&mut open)
            .default_size([800.0, 480.0])
            .show(ctx, |ui| show_chart(ui, chart));

        if !open {
            self.chart = None;
        }
    }
}

impl eframe::App for PerfTrackApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("main_scroll")
                .show(ui, |ui| {
                    ui.heading("Employee Performance Tracker");
                    ui.separator();
                    self.show_form(ui);
                    ui.separator();
                    self.show_visualize(ui);
                    ui.separator();
                    self.show_search(ui);
                    ui.separator();
                    self.show_export(ui);
                });
        });

        self.show_chart_window(ctx);
        self.show_notice(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::{RecordForm, ResultsTable};
    use perftrack_core::{Period, PerformanceRecord};

    #[test]
    fn form_defaults_to_daily_period() {
        let form = RecordForm::default();
        assert_eq!(form.to_input().period, "Daily");
    }

    #[test]
    fn results_table_replaces_rather_than_appends() {
        let record = PerformanceRecord {
            id: 1,
            name: "Alice".to_string(),
            date: chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            metric: "Sales".to_string(),
            score: 1,
            period: Period::Daily,
        };
        let mut table = ResultsTable::default();
        table.replace(vec![record.clone(), record.clone()]);
        table.replace(vec![record]);
        assert_eq!(table.rows().len(), 1);
    }
}
