//! GUI module - User interface components

mod app;
mod control_panel;
mod report_view;

pub use app::VerificationsApp;
pub use control_panel::{ControlPanel, ControlPanelAction};
pub use report_view::ReportView;
