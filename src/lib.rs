//! Phone Verifications - CSV report of verification outcomes
//!
//! Loads a CSV of phone-verification events, normalizes dates and statuses,
//! filters by date range and status, and aggregates into a per-country
//! pivot table and a daily approved/expired series.

pub mod aggregate;
pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod report;

pub use config::ReportConfig;
pub use report::{Dataset, Report};
