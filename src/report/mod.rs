//! Report pipeline - runs filter and aggregators for one query

pub mod text;

use crate::aggregate::{PivotTable, TimeSeries};
use crate::data::{
    ColumnNormalizer, DataLoader, FilterError, LoaderError, RangeStatusFilter, ReportQuery,
    StatusNotice, StatusSelection, VerificationRecord,
};
use chrono::NaiveDate;
use std::path::Path;
use tracing::{debug, info};

/// The loaded upload, normalized once. Replaced wholesale on the next load.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    source: String,
    records: Vec<VerificationRecord>,
}

impl Dataset {
    pub fn new(source: impl Into<String>, records: Vec<VerificationRecord>) -> Self {
        Self {
            source: source.into(),
            records,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, LoaderError> {
        let df = DataLoader::load_csv(path)?;
        let records = ColumnNormalizer::normalize(&df)?;
        Ok(Self::new(path.display().to_string(), records))
    }

    pub fn from_bytes(source: impl Into<String>, bytes: Vec<u8>) -> Result<Self, LoaderError> {
        let df = DataLoader::load_bytes(bytes)?;
        let records = ColumnNormalizer::normalize(&df)?;
        Ok(Self::new(source, records))
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn records(&self) -> &[VerificationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest parseable date: the default range.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.records.iter().filter_map(|r| r.date_created);
        let first = dates.next()?;
        Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }

    /// Query covering the whole dataset with both statuses.
    pub fn default_query(&self) -> ReportQuery {
        let bounds = self.date_bounds();
        ReportQuery {
            start: bounds.map(|(lo, _)| lo),
            end: bounds.map(|(_, hi)| hi),
            statuses: StatusSelection::default(),
        }
    }
}

/// Everything one render cycle shows.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub query: ReportQuery,
    pub notice: StatusNotice,
    pub pivot: PivotTable,
    pub series: TimeSeries,
    pub date_filtered_rows: usize,
    pub status_filtered_rows: usize,
}

impl Report {
    /// One full recomputation. Input errors produce no partial report.
    pub fn build(dataset: &Dataset, query: &ReportQuery) -> Result<Self, FilterError> {
        let view = RangeStatusFilter::apply(dataset.records(), query)?;
        let notice = query.statuses.notice()?;

        let pivot = PivotTable::from_records(&view.by_status);
        let series = TimeSeries::from_records(&view.by_date);

        debug!(
            start = %view.range.start(),
            end = %view.range.end(),
            statuses = ?view.allowed,
            "applied report query"
        );
        info!(
            date_rows = view.by_date.len(),
            status_rows = view.by_status.len(),
            dates = pivot.dates().len(),
            countries = pivot.countries().len(),
            "built report"
        );

        Ok(Self {
            query: *query,
            notice,
            date_filtered_rows: view.by_date.len(),
            status_filtered_rows: view.by_status.len(),
            pivot,
            series,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Outcome;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn record(sid: &str, d: Option<u32>, status: &str, country: &str) -> VerificationRecord {
        VerificationRecord {
            sid: Some(sid.into()),
            date_created: d.map(day),
            status: Some(ColumnNormalizer::normalize_status(status)),
            country: Some(country.into()),
        }
    }

    fn scenario() -> Dataset {
        Dataset::new(
            "scenario",
            vec![
                record("1", Some(25), "Approved ", "US"),
                record("2", Some(25), "expired", "US"),
                record("3", Some(25), "expired", "CA"),
            ],
        )
    }

    #[test]
    fn both_statuses() {
        let query = ReportQuery::new(day(25), day(25), StatusSelection::default());
        let report = Report::build(&scenario(), &query).unwrap();

        assert_eq!(report.pivot.count(day(25), "US"), 2);
        assert_eq!(report.pivot.count(day(25), "CA"), 1);
        assert_eq!(report.pivot.row_total(day(25)), 3);
        let rows = report.pivot.rows();
        assert_eq!(rows[0].cells, rows[1].cells);
        assert_eq!(rows[1].label, "Total");

        let point = report.series.get(day(25)).unwrap();
        assert_eq!((point.approved, point.expired), (1, 2));
    }

    #[test]
    fn approved_only_keeps_series() {
        let query = ReportQuery::new(day(25), day(25), StatusSelection::only(Outcome::Approved));
        let report = Report::build(&scenario(), &query).unwrap();

        assert_eq!(report.pivot.count(day(25), "US"), 1);
        assert_eq!(report.pivot.count(day(25), "CA"), 0);
        assert_eq!(report.pivot.grand_total(), 1);
        assert_eq!(report.status_filtered_rows, 1);
        assert_eq!(report.date_filtered_rows, 3);

        let point = report.series.get(day(25)).unwrap();
        assert_eq!((point.approved, point.expired), (1, 2));
    }

    #[test]
    fn input_errors_produce_nothing() {
        let reversed = ReportQuery::new(day(26), day(25), StatusSelection::default());
        assert_eq!(
            Report::build(&scenario(), &reversed).unwrap_err(),
            FilterError::InvalidDateRange
        );

        let none = StatusSelection {
            approved: false,
            expired: false,
        };
        let empty = ReportQuery::new(day(25), day(25), none);
        assert_eq!(
            Report::build(&scenario(), &empty).unwrap_err(),
            FilterError::EmptyStatusSelection
        );
    }

    #[test]
    fn default_query_spans_parseable_dates() {
        let dataset = Dataset::new(
            "bounds",
            vec![
                record("1", Some(20), "approved", "US"),
                record("2", None, "approved", "US"),
                record("3", Some(3), "expired", "US"),
            ],
        );
        assert_eq!(dataset.date_bounds(), Some((day(3), day(20))));
        let query = dataset.default_query();
        assert_eq!((query.start, query.end), (Some(day(3)), Some(day(20))));
    }

    #[test]
    fn dataset_without_dates_has_no_default_range() {
        let dataset = Dataset::new("no dates", vec![record("1", None, "approved", "US")]);
        assert_eq!(dataset.date_bounds(), None);
        assert_eq!(
            Report::build(&dataset, &dataset.default_query()).unwrap_err(),
            FilterError::InvalidDateRange
        );
    }

    fn arb_record() -> impl Strategy<Value = VerificationRecord> {
        (
            prop::option::of(1u32..=28),
            prop::sample::select(vec!["approved", "Expired ", "pending", " APPROVED", "expired"]),
            prop::sample::select(vec!["US", "CA", "MX"]),
        )
            .prop_map(|(d, status, country)| record("s", d, status, country))
    }

    proptest! {
        #[test]
        fn series_ignores_status_selection(
            records in prop::collection::vec(arb_record(), 0..60),
            a in 1u32..=28,
            b in 1u32..=28,
        ) {
            let (start, end) = (day(a.min(b)), day(a.max(b)));
            let dataset = Dataset::new("random", records);
            let selections = [
                StatusSelection::default(),
                StatusSelection::only(Outcome::Approved),
                StatusSelection::only(Outcome::Expired),
            ];

            let mut all_series = Vec::new();
            for statuses in selections {
                let report = Report::build(&dataset, &ReportQuery::new(start, end, statuses)).unwrap();

                for point in report.series.points() {
                    let expected = dataset
                        .records()
                        .iter()
                        .filter(|r| r.date_created == Some(point.date) && r.outcome().is_some())
                        .count() as u64;
                    prop_assert_eq!(point.total(), expected);
                }
                let in_range = dataset
                    .records()
                    .iter()
                    .filter(|r| {
                        r.date_created.is_some_and(|d| d >= start && d <= end) && r.outcome().is_some()
                    })
                    .count() as u64;
                let charted: u64 = report.series.points().iter().map(|p| p.total()).sum();
                prop_assert_eq!(charted, in_range);
                prop_assert_eq!(report.pivot.grand_total(), report.status_filtered_rows as u64);

                all_series.push(report.series);
            }
            prop_assert!(all_series.windows(2).all(|pair| pair[0] == pair[1]));
        }
    }
}
