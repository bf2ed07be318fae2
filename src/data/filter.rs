//! Range/Status Filter Module
//! Validates the user's query and restricts records to it.

use crate::data::record::{Outcome, VerificationRecord};
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterError {
    #[error("Please select a valid date range (start and end).")]
    InvalidDateRange,
    #[error("No statuses selected. Please select at least one status to view the data.")]
    EmptyStatusSelection,
}

/// Inclusive date interval with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, FilterError> {
        if end < start {
            return Err(FilterError::InvalidDateRange);
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Absent dates are never inside any range.
    pub fn contains(&self, date: Option<NaiveDate>) -> bool {
        date.is_some_and(|d| self.start <= d && d <= self.end)
    }
}

/// Severity of the notice shown above the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusNotice {
    pub level: NoticeLevel,
    pub message: &'static str,
}

/// The two status checkboxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSelection {
    pub approved: bool,
    pub expired: bool,
}

impl Default for StatusSelection {
    fn default() -> Self {
        Self {
            approved: true,
            expired: true,
        }
    }
}

impl StatusSelection {
    pub fn only(outcome: Outcome) -> Self {
        Self {
            approved: outcome == Outcome::Approved,
            expired: outcome == Outcome::Expired,
        }
    }

    pub fn is_selected(&self, outcome: Outcome) -> bool {
        match outcome {
            Outcome::Approved => self.approved,
            Outcome::Expired => self.expired,
        }
    }

    /// Allowed outcomes, in display order. Empty selection is an input error.
    pub fn allowed(&self) -> Result<Vec<Outcome>, FilterError> {
        let allowed: Vec<Outcome> = Outcome::ALL
            .into_iter()
            .filter(|o| self.is_selected(*o))
            .collect();
        if allowed.is_empty() {
            Err(FilterError::EmptyStatusSelection)
        } else {
            Ok(allowed)
        }
    }

    pub fn notice(&self) -> Result<StatusNotice, FilterError> {
        match (self.approved, self.expired) {
            (true, true) => Ok(StatusNotice {
                level: NoticeLevel::Info,
                message: "Showing all statuses: approved and expired verifications.",
            }),
            (true, false) => Ok(StatusNotice {
                level: NoticeLevel::Success,
                message: "Showing only approved verifications.",
            }),
            (false, true) => Ok(StatusNotice {
                level: NoticeLevel::Warning,
                message: "Showing only expired verifications.",
            }),
            (false, false) => Err(FilterError::EmptyStatusSelection),
        }
    }
}

/// Immutable snapshot of the controls for one recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReportQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub statuses: StatusSelection,
}

impl ReportQuery {
    pub fn new(start: NaiveDate, end: NaiveDate, statuses: StatusSelection) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            statuses,
        }
    }

    /// Date range first, then statuses.
    pub fn validate(&self) -> Result<(DateRange, Vec<Outcome>), FilterError> {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return Err(FilterError::InvalidDateRange);
        };
        let range = DateRange::new(start, end)?;
        let allowed = self.statuses.allowed()?;
        Ok((range, allowed))
    }
}

/// Records that survived a validated query.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    pub range: DateRange,
    pub allowed: Vec<Outcome>,
    /// Date filter only. Feeds the time series.
    pub by_date: Vec<&'a VerificationRecord>,
    /// Date and status filter. Feeds the pivot table.
    pub by_status: Vec<&'a VerificationRecord>,
}

pub struct RangeStatusFilter;

impl RangeStatusFilter {
    pub fn apply<'a>(
        records: &'a [VerificationRecord],
        query: &ReportQuery,
    ) -> Result<FilteredView<'a>, FilterError> {
        let (range, allowed) = query.validate()?;

        let by_date = Self::by_date(records, &range);
        let by_status = Self::by_status(&by_date, &allowed);

        Ok(FilteredView {
            range,
            allowed,
            by_date,
            by_status,
        })
    }

    pub fn by_date<'a>(
        records: &'a [VerificationRecord],
        range: &DateRange,
    ) -> Vec<&'a VerificationRecord> {
        records
            .iter()
            .filter(|r| range.contains(r.date_created))
            .collect()
    }

    pub fn by_status<'a>(
        records: &[&'a VerificationRecord],
        allowed: &[Outcome],
    ) -> Vec<&'a VerificationRecord> {
        records
            .iter()
            .copied()
            .filter(|r| r.outcome().is_some_and(|o| allowed.contains(&o)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn record(day: Option<u32>, status: &str) -> VerificationRecord {
        VerificationRecord {
            sid: Some(format!("{day:?}-{status}")),
            date_created: day.map(date),
            status: Some(status.to_string()),
            country: Some("US".to_string()),
        }
    }

    #[test]
    fn range_is_inclusive_and_skips_absent_dates() {
        let range = DateRange::new(date(10), date(12)).unwrap();
        assert!(range.contains(Some(date(10))));
        assert!(range.contains(Some(date(12))));
        assert!(!range.contains(Some(date(13))));
        assert!(!range.contains(None));
    }

    #[test]
    fn reversed_range_is_rejected() {
        let query = ReportQuery::new(date(12), date(10), StatusSelection::default());
        assert_eq!(query.validate().unwrap_err(), FilterError::InvalidDateRange);
    }

    #[test]
    fn missing_endpoint_is_rejected() {
        let query = ReportQuery {
            start: Some(date(1)),
            end: None,
            statuses: StatusSelection::default(),
        };
        assert_eq!(query.validate().unwrap_err(), FilterError::InvalidDateRange);
    }

    #[test]
    fn empty_selection_is_rejected() {
        let none = StatusSelection {
            approved: false,
            expired: false,
        };
        let query = ReportQuery::new(date(1), date(2), none);
        assert_eq!(query.validate().unwrap_err(), FilterError::EmptyStatusSelection);
        assert!(none.notice().is_err());
    }

    #[test]
    fn range_error_wins_over_status_error() {
        let none = StatusSelection {
            approved: false,
            expired: false,
        };
        let query = ReportQuery::new(date(2), date(1), none);
        assert_eq!(query.validate().unwrap_err(), FilterError::InvalidDateRange);
    }

    #[test]
    fn pivot_view_respects_checkboxes_but_date_view_does_not() {
        let records = vec![
            record(Some(5), "approved"),
            record(Some(5), "expired"),
            record(Some(5), "pending"),
            record(Some(9), "approved"),
            record(None, "approved"),
        ];
        let query = ReportQuery::new(date(1), date(6), StatusSelection::only(Outcome::Approved));
        let view = RangeStatusFilter::apply(&records, &query).unwrap();

        assert_eq!(view.by_date.len(), 3);
        assert_eq!(view.by_status.len(), 1);
        assert_eq!(view.by_status[0].status.as_deref(), Some("approved"));
        assert_eq!(view.allowed, vec![Outcome::Approved]);
    }

    #[test]
    fn notices_follow_selection() {
        let both = StatusSelection::default().notice().unwrap();
        assert_eq!(both.level, NoticeLevel::Info);
        let approved = StatusSelection::only(Outcome::Approved).notice().unwrap();
        assert_eq!(approved.level, NoticeLevel::Success);
        let expired = StatusSelection::only(Outcome::Expired).notice().unwrap();
        assert_eq!(expired.level, NoticeLevel::Warning);
    }
}
