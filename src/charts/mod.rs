//! Charts module - Chart layout and rendering

mod layout;
mod plotter;

pub use layout::{Segment, StackedBar, StackedBarLayout, TICK_FORMAT};
pub use plotter::ChartPlotter;
