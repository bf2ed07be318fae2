//! Terminal rendering of a report for the `report` subcommand.

use crate::aggregate::{PivotTable, TimeSeries};
use crate::charts::TICK_FORMAT;
use crate::data::Outcome;
use crate::report::Report;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Table};

/// Zero and absent cells both show as a dash.
pub fn format_count(count: u64) -> String {
    if count == 0 {
        "-".to_string()
    } else {
        count.to_string()
    }
}

pub fn pivot_table(pivot: &PivotTable) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(
        std::iter::once("Date".to_string())
            .chain(pivot.header())
            .map(Cell::new),
    );

    for row in pivot.rows() {
        let cells = std::iter::once(Cell::new(&row.label)).chain(
            row.cells
                .iter()
                .map(|c| Cell::new(format_count(*c)).set_alignment(CellAlignment::Right)),
        );
        table.add_row(cells);
    }
    table
}

pub fn series_table(series: &TimeSeries) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Date",
        Outcome::Approved.label(),
        Outcome::Expired.label(),
    ]);

    for point in series.points() {
        table.add_row(vec![
            Cell::new(point.date.format(TICK_FORMAT)),
            Cell::new(point.approved).set_alignment(CellAlignment::Right),
            Cell::new(point.expired).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn render(report: &Report) -> String {
    format!(
        "Verifications per Country and Date\n{}\n{}\n\nDaily Approved vs Expired Verifications\n{}\n",
        report.notice.message,
        pivot_table(&report.pivot),
        series_table(&report.series),
    )
}
