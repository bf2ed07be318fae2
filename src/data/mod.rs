//! Data module - CSV loading, normalization and filtering

mod filter;
mod loader;
mod normalizer;
mod record;

pub use filter::{
    DateRange, FilterError, FilteredView, NoticeLevel, RangeStatusFilter, ReportQuery,
    StatusNotice, StatusSelection,
};
pub use loader::{DataLoader, LoaderError, REQUIRED_COLUMNS};
pub use normalizer::ColumnNormalizer;
pub use record::{Outcome, VerificationRecord};
