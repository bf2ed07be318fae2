//! Chart Plotter Module
//! Draws the pivot grid and the stacked bar chart using egui_plot.

use crate::aggregate::PivotTable;
use crate::charts::layout::StackedBarLayout;
use crate::config::ChartConfig;
use crate::data::Outcome;
use crate::report::text::format_count;
use egui::{Align2, Color32, FontId, RichText};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoint, Text};

pub const LABEL_COLOR: Color32 = Color32::BLACK;
const TICK_AREA_HEIGHT: f32 = 48.0;

/// Creates the report visualizations.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn outcome_color(outcome: Outcome, config: &ChartConfig) -> Color32 {
        let [r, g, b] = match outcome {
            Outcome::Approved => config.approved_color,
            Outcome::Expired => config.expired_color,
        };
        Color32::from_rgb(r, g, b)
    }

    /// Stacked bars, one per date: approved at the base, expired on top.
    pub fn draw_stacked_chart(ui: &mut egui::Ui, layout: &StackedBarLayout, config: &ChartConfig) {
        if layout.is_empty() {
            ui.label(RichText::new("No approved or expired verifications in range").italics());
            return;
        }

        let approved_bars: Vec<Bar> = layout
            .bars
            .iter()
            .map(|bar| {
                let s = &bar.segments[0];
                Bar::new(bar.x, s.height)
                    .width(config.bar_width)
                    .name(format!("{} {}", bar.tick, Outcome::Approved.label()))
            })
            .collect();
        let expired_bars: Vec<Bar> = layout
            .bars
            .iter()
            .map(|bar| {
                let s = &bar.segments[1];
                Bar::new(bar.x, s.height)
                    .width(config.bar_width)
                    .name(format!("{} {}", bar.tick, Outcome::Expired.label()))
            })
            .collect();

        let approved = BarChart::new(approved_bars)
            .name(Outcome::Approved.label())
            .color(Self::outcome_color(Outcome::Approved, config));
        let expired = BarChart::new(expired_bars)
            .name(Outcome::Expired.label())
            .color(Self::outcome_color(Outcome::Expired, config))
            .stack_on(&[&approved]);

        let label_size = config.label_size;
        let response = Plot::new("daily_verifications")
            .height(config.height)
            .legend(Legend::default())
            .y_axis_label("Number of Verifications")
            .show_x(false)
            .allow_scroll(false)
            .include_y(0.0)
            .include_y(layout.max_height() * 1.1)
            .x_axis_formatter(|_mark, _range| String::new())
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(approved);
                plot_ui.bar_chart(expired);

                for bar in &layout.bars {
                    for segment in bar.labels() {
                        plot_ui.text(
                            Text::new(
                                PlotPoint::new(bar.x, segment.label_y()),
                                RichText::new(segment.count.to_string())
                                    .size(label_size)
                                    .color(LABEL_COLOR),
                            )
                            .anchor(Align2::CENTER_CENTER),
                        );
                    }
                }
            });

        Self::draw_rotated_ticks(ui, layout, config, &response.transform);
    }

    /// Day-month tick labels under the plot, rotated for legibility.
    fn draw_rotated_ticks(
        ui: &mut egui::Ui,
        layout: &StackedBarLayout,
        config: &ChartConfig,
        transform: &egui_plot::PlotTransform,
    ) {
        let (rect, _) = ui.allocate_exact_size(
            egui::vec2(ui.available_width(), TICK_AREA_HEIGHT),
            egui::Sense::hover(),
        );
        let painter = ui.painter_at(rect);
        let text_color = ui.visuals().text_color();
        let angle = -config.tick_angle_degrees.to_radians();
        let font = FontId::proportional(config.label_size);

        for bar in &layout.bars {
            let anchor = transform.position_from_point(&PlotPoint::new(bar.x, 0.0));
            let galley = painter.layout_no_wrap(bar.tick.clone(), font.clone(), text_color);
            let width = galley.size().x;
            // Right end of the rotated text sits under the bar.
            let pos = egui::pos2(
                anchor.x - width * angle.cos().abs(),
                rect.top() + 4.0 + width * angle.sin().abs(),
            );
            painter.add(egui::epaint::TextShape::new(pos, galley, text_color).with_angle(angle));
        }
    }

    /// Pivot grid with dates down, countries across, totals last.
    pub fn draw_pivot_table(ui: &mut egui::Ui, pivot: &PivotTable) {
        let header = pivot.header();
        let rows = pivot.rows();
        let last = rows.len().saturating_sub(1);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::ScrollArea::horizontal().show(ui, |ui| {
                    egui::Grid::new("pivot_table")
                        .striped(true)
                        .min_col_width(48.0)
                        .spacing([10.0, 4.0])
                        .show(ui, |ui| {
                            ui.label(RichText::new("Date").strong().size(12.0));
                            for name in &header {
                                ui.label(RichText::new(name).strong().size(12.0));
                            }
                            ui.end_row();

                            for (i, row) in rows.iter().enumerate() {
                                let is_total = i == last;
                                let label = RichText::new(&row.label).size(12.0);
                                ui.label(if is_total { label.strong() } else { label });

                                let totals_col = row.cells.len().saturating_sub(1);
                                for (j, count) in row.cells.iter().enumerate() {
                                    let text = RichText::new(format_count(*count)).size(12.0);
                                    let text = if is_total || j == totals_col {
                                        text.strong()
                                    } else {
                                        text
                                    };
                                    ui.with_layout(
                                        egui::Layout::right_to_left(egui::Align::Center),
                                        |ui| ui.label(text),
                                    );
                                }
                                ui.end_row();
                            }
                        });
                });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_colors_match_legend() {
        let config = ChartConfig::default();
        assert_eq!(
            ChartPlotter::outcome_color(Outcome::Approved, &config),
            Color32::from_rgb(135, 206, 235)
        );
        assert_eq!(
            ChartPlotter::outcome_color(Outcome::Expired, &config),
            Color32::from_rgb(244, 164, 96)
        );
    }
}
