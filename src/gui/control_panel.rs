//! Control Panel Widget
//! Left side panel: data source, date range and status filters.

use crate::data::{Outcome, ReportQuery, StatusSelection};
use chrono::NaiveDate;
use egui::{Color32, RichText};

const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// Raw control values, kept as typed text so a half-edited date is not lost.
#[derive(Default, Clone)]
pub struct UserSettings {
    pub source: Option<String>,
    pub start_text: String,
    pub end_text: String,
    pub statuses: StatusSelection,
}

/// Left side control panel with file selection and filter controls.
pub struct ControlPanel {
    pub settings: UserSettings,
    /// Bounds of the loaded dataset, for the reset button and hints.
    pub bounds: Option<(NaiveDate, NaiveDate)>,
    pub row_count: usize,
    pub status: String,
    pub filters_enabled: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            settings: UserSettings::default(),
            bounds: None,
            row_count: 0,
            status: "Ready".to_string(),
            filters_enabled: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the controls for a freshly loaded dataset.
    pub fn update_dataset(
        &mut self,
        source: String,
        row_count: usize,
        bounds: Option<(NaiveDate, NaiveDate)>,
    ) {
        self.settings.source = Some(source);
        self.settings.statuses = StatusSelection::default();
        self.row_count = row_count;
        self.bounds = bounds;
        self.filters_enabled = true;
        self.reset_range();
    }

    /// Forget the dataset after a failed load.
    pub fn clear_dataset(&mut self) {
        self.settings = UserSettings::default();
        self.bounds = None;
        self.row_count = 0;
        self.filters_enabled = false;
    }

    pub fn reset_range(&mut self) {
        let (start, end) = match self.bounds {
            Some((lo, hi)) => (
                lo.format(DATE_INPUT_FORMAT).to_string(),
                hi.format(DATE_INPUT_FORMAT).to_string(),
            ),
            None => (String::new(), String::new()),
        };
        self.settings.start_text = start;
        self.settings.end_text = end;
    }

    /// Snapshot the controls. Blank or unparseable fields are missing endpoints.
    pub fn query(&self) -> ReportQuery {
        ReportQuery {
            start: Self::parse_date_input(&self.settings.start_text),
            end: Self::parse_date_input(&self.settings.end_text),
            statuses: self.settings.statuses,
        }
    }

    pub fn parse_date_input(text: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(text.trim(), DATE_INPUT_FORMAT).ok()
    }

    /// Warn when a typed endpoint lies outside the loaded data. The value is
    /// kept as typed so a reversed range still reports its own error.
    pub fn out_of_bounds_warning(&self) -> Option<String> {
        let (lo, hi) = self.bounds?;
        let outside: Vec<&str> = [
            ("start", &self.settings.start_text),
            ("end", &self.settings.end_text),
        ]
        .into_iter()
        .filter(|(_, text)| {
            Self::parse_date_input(text).is_some_and(|date| date < lo || date > hi)
        })
        .map(|(name, _)| name)
        .collect();

        if outside.is_empty() {
            None
        } else {
            Some(format!(
                "Selected {} outside the data ({lo} to {hi})",
                outside.join(" and ")
            ))
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📱 Phone Verifications")
                    .size(20.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== CSV File Section =====
        ui.label(RichText::new("📁 Verification CSV").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .settings
                        .source
                        .as_deref()
                        .and_then(|p| std::path::Path::new(p).file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.settings.source.is_some() {
                            Color32::WHITE
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = ControlPanelAction::BrowseCsv;
                        }
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        ui.add_enabled_ui(self.filters_enabled, |ui| {
            // ===== Date Range Section =====
            ui.label(RichText::new("📅 Date Range").size(14.0).strong());
            ui.add_space(5.0);

            let label_width = 50.0;
            let mut range_changed = false;
            ui.horizontal(|ui| {
                ui.add_sized([label_width, 20.0], egui::Label::new("Start:"));
                range_changed |= ui
                    .add(
                        egui::TextEdit::singleline(&mut self.settings.start_text)
                            .hint_text("YYYY-MM-DD")
                            .desired_width(110.0),
                    )
                    .changed();
            });
            ui.horizontal(|ui| {
                ui.add_sized([label_width, 20.0], egui::Label::new("End:"));
                range_changed |= ui
                    .add(
                        egui::TextEdit::singleline(&mut self.settings.end_text)
                            .hint_text("YYYY-MM-DD")
                            .desired_width(110.0),
                    )
                    .changed();
            });

            if let Some((lo, hi)) = self.bounds {
                ui.label(
                    RichText::new(format!("Data covers {lo} to {hi}"))
                        .size(11.0)
                        .color(Color32::GRAY),
                );
            }
            if let Some(warning) = self.out_of_bounds_warning() {
                ui.label(
                    RichText::new(format!("⚠ {warning}"))
                        .size(11.0)
                        .color(Color32::from_rgb(243, 156, 18)),
                );
            }
            if ui.small_button("Reset range").clicked() {
                self.reset_range();
                range_changed = true;
            }
            if range_changed {
                action = ControlPanelAction::QueryChanged;
            }

            ui.add_space(15.0);
            ui.separator();
            ui.add_space(10.0);

            // ===== Status Section =====
            ui.label(RichText::new("🎯 Verification Status").size(14.0).strong());
            ui.add_space(5.0);

            let approved = ui
                .checkbox(&mut self.settings.statuses.approved, Outcome::Approved.label())
                .changed();
            let expired = ui
                .checkbox(&mut self.settings.statuses.expired, Outcome::Expired.label())
                .changed();
            if approved || expired {
                action = ControlPanelAction::QueryChanged;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Line =====
        let status_color = if self.status.starts_with("Error") {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    QueryChanged,
}
