//! Aggregate module - pivot table and daily outcome series

mod pivot;
mod series;

pub use pivot::{PivotRow, PivotTable, TOTAL_LABEL};
pub use series::{SeriesPoint, TimeSeries};
