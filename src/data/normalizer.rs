//! Column Normalizer Module
//! Turns the raw text columns into typed verification records.

use crate::data::loader::{DataLoader, LoaderError};
use crate::data::record::VerificationRecord;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use polars::prelude::DataFrame;
use tracing::debug;

const UTC_SUFFIX: &str = " UTC";

const DATETIME_FORMATS: [&str; 8] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
];

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f %z"];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Cleans `date_created` and `status`; passes `sid` and `country` through.
pub struct ColumnNormalizer;

impl ColumnNormalizer {
    /// Normalize every row of a loaded table. Only schema problems fail;
    /// unparseable dates become absent.
    pub fn normalize(df: &DataFrame) -> Result<Vec<VerificationRecord>, LoaderError> {
        DataLoader::validate_schema(df)?;

        let sids = DataLoader::string_column(df, "sid")?;
        let dates = DataLoader::string_column(df, "date_created")?;
        let statuses = DataLoader::string_column(df, "status")?;
        let countries = DataLoader::string_column(df, "country")?;

        let records: Vec<VerificationRecord> = sids
            .into_iter()
            .zip(dates)
            .zip(statuses)
            .zip(countries)
            .map(|(((sid, date), status), country)| VerificationRecord {
                sid,
                date_created: date.as_deref().and_then(Self::parse_date),
                status: status.as_deref().map(Self::normalize_status),
                country,
            })
            .collect();

        let absent = records.iter().filter(|r| r.date_created.is_none()).count();
        debug!(rows = records.len(), absent_dates = absent, "normalized columns");
        Ok(records)
    }

    /// Parse a raw `date_created` value into its calendar date.
    pub fn parse_date(raw: &str) -> Option<NaiveDate> {
        let trimmed = raw.trim();
        let value = trimmed.strip_suffix(UTC_SUFFIX).unwrap_or(trimmed).trim_end();
        if value.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
            return Some(dt.date_naive());
        }

        DATETIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
            .map(|dt| dt.date())
            .or_else(|| {
                OFFSET_FORMATS
                    .iter()
                    .find_map(|fmt| DateTime::parse_from_str(value, fmt).ok())
                    .map(|dt| dt.date_naive())
            })
            .or_else(|| {
                DATE_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
            })
    }

    pub fn normalize_status(raw: &str) -> String {
        raw.trim().to_lowercase()
    }
}
