//! Report View Widget
//! Central scrollable panel with the status notice, pivot table and chart.

use crate::charts::{ChartPlotter, StackedBarLayout};
use crate::config::ChartConfig;
use crate::data::{FilterError, NoticeLevel};
use crate::report::Report;
use egui::{Color32, RichText, ScrollArea};

const SECTION_SPACING: f32 = 15.0;

/// What the last recomputation produced.
#[derive(Default)]
enum ViewState {
    #[default]
    Empty,
    Ready {
        report: Report,
        layout: StackedBarLayout,
    },
    Rejected(FilterError),
}

pub struct ReportView {
    state: ViewState,
    chart_config: ChartConfig,
}

impl ReportView {
    pub fn new(chart_config: ChartConfig) -> Self {
        Self {
            state: ViewState::Empty,
            chart_config,
        }
    }

    pub fn clear(&mut self) {
        self.state = ViewState::Empty;
    }

    /// Replace the previous cycle's output wholesale.
    pub fn set_result(&mut self, result: Result<Report, FilterError>) {
        self.state = match result {
            Ok(report) => {
                let layout = StackedBarLayout::from_series(&report.series);
                ViewState::Ready { report, layout }
            }
            Err(error) => ViewState::Rejected(error),
        };
    }

    #[cfg(test)]
    fn report(&self) -> Option<&Report> {
        match &self.state {
            ViewState::Ready { report, .. } => Some(report),
            _ => None,
        }
    }

    #[cfg(test)]
    fn error(&self) -> Option<FilterError> {
        match &self.state {
            ViewState::Rejected(error) => Some(*error),
            _ => None,
        }
    }

    fn notice_color(level: NoticeLevel) -> Color32 {
        match level {
            NoticeLevel::Info => Color32::from_rgb(100, 149, 237),
            NoticeLevel::Success => Color32::from_rgb(40, 167, 69),
            NoticeLevel::Warning => Color32::from_rgb(243, 156, 18),
        }
    }

    fn banner(ui: &mut egui::Ui, text: &str, color: Color32) {
        egui::Frame::none()
            .rounding(5.0)
            .stroke(egui::Stroke::new(1.5, color))
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(text).size(13.0).color(color));
            });
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        match &self.state {
            ViewState::Empty => {
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new("Upload your verification CSV file").size(20.0));
                });
            }
            ViewState::Rejected(error) => {
                ui.add_space(SECTION_SPACING);
                Self::banner(ui, &error.to_string(), Color32::from_rgb(220, 53, 69));
            }
            ViewState::Ready { report, layout } => {
                ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        ui.label(
                            RichText::new("📊 Verifications per Country and Date")
                                .size(18.0)
                                .strong(),
                        );
                        ui.label(
                            "Total number of verifications by country for the selected date \
                             range and status filters.",
                        );
                        ui.add_space(8.0);
                        Self::banner(
                            ui,
                            report.notice.message,
                            Self::notice_color(report.notice.level),
                        );
                        ui.add_space(8.0);
                        ChartPlotter::draw_pivot_table(ui, &report.pivot);

                        ui.add_space(SECTION_SPACING);
                        ui.separator();
                        ui.add_space(SECTION_SPACING);

                        ui.label(
                            RichText::new("📈 Daily Approved vs Expired Verifications")
                                .size(18.0)
                                .strong(),
                        );
                        ui.add_space(8.0);
                        ChartPlotter::draw_stacked_chart(ui, layout, &self.chart_config);
                    });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ReportQuery, StatusSelection, VerificationRecord};
    use crate::report::Dataset;
    use chrono::NaiveDate;

    fn dataset() -> Dataset {
        Dataset::new(
            "v",
            vec![VerificationRecord {
                sid: Some("1".into()),
                date_created: NaiveDate::from_ymd_opt(2024, 3, 25),
                status: Some("approved".into()),
                country: Some("US".into()),
            }],
        )
    }

    #[test]
    fn error_replaces_previous_report() {
        let dataset = dataset();
        let mut view = ReportView::new(ChartConfig::default());

        view.set_result(Report::build(&dataset, &dataset.default_query()));
        assert!(view.report().is_some());

        let none = StatusSelection {
            approved: false,
            expired: false,
        };
        let query = ReportQuery {
            statuses: none,
            ..dataset.default_query()
        };
        view.set_result(Report::build(&dataset, &query));
        assert!(view.report().is_none());
        assert_eq!(view.error(), Some(FilterError::EmptyStatusSelection));
    }
}
