//! Phone Verifications Main Application
//! Main window with control panel and report view.

use crate::config::ReportConfig;
use crate::gui::{ControlPanel, ControlPanelAction, ReportView};
use crate::report::{Dataset, Report};
use egui::SidePanel;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Main application window. Every interaction recomputes the report
/// synchronously from the held dataset.
pub struct VerificationsApp {
    dataset: Option<Dataset>,
    control_panel: ControlPanel,
    report_view: ReportView,
}

impl VerificationsApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: &ReportConfig,
        initial_csv: Option<PathBuf>,
    ) -> Self {
        let mut app = Self {
            dataset: None,
            control_panel: ControlPanel::new(),
            report_view: ReportView::new(config.chart.clone()),
        };
        if let Some(path) = initial_csv {
            app.load_csv(&path);
        }
        app
    }

    /// Handle CSV file selection
    fn handle_browse_csv(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.load_csv(&path);
        }
    }

    /// Replace the dataset wholesale. A failed load leaves no dataset behind.
    fn load_csv(&mut self, path: &Path) {
        self.report_view.clear();
        self.dataset = None;

        match Dataset::from_path(path) {
            Ok(dataset) => {
                let bounds = dataset.date_bounds();
                if bounds.is_none() {
                    warn!(path = %path.display(), "no parseable date_created values");
                }
                self.control_panel.update_dataset(
                    dataset.source().to_string(),
                    dataset.len(),
                    bounds,
                );
                self.control_panel
                    .set_status(&format!("Loaded {} rows", dataset.len()));
                self.dataset = Some(dataset);
                self.recompute();
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "failed to load CSV");
                self.control_panel.clear_dataset();
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }

    fn recompute(&mut self) {
        let Some(dataset) = &self.dataset else {
            return;
        };
        let query = self.control_panel.query();
        let result = Report::build(dataset, &query);
        if let Err(e) = &result {
            info!(error = %e, "report query rejected");
        }
        self.report_view.set_result(result);
    }
}

impl eframe::App for VerificationsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::QueryChanged => self.recompute(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Report View
        egui::CentralPanel::default().show(ctx, |ui| {
            self.report_view.show(ui);
        });
    }
}
