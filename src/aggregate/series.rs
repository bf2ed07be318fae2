//! Time-Series Aggregator Module
//! Daily approved/expired counts for the stacked bar chart.

use crate::data::{Outcome, VerificationRecord};
use chrono::NaiveDate;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub approved: u64,
    pub expired: u64,
}

impl SeriesPoint {
    fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            approved: 0,
            expired: 0,
        }
    }

    pub fn get(&self, outcome: Outcome) -> u64 {
        match outcome {
            Outcome::Approved => self.approved,
            Outcome::Expired => self.expired,
        }
    }

    pub fn total(&self) -> u64 {
        self.approved + self.expired
    }
}

/// Ascending by date. Dates without any approved or expired record are absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimeSeries {
    points: Vec<SeriesPoint>,
}

impl TimeSeries {
    /// Expects the date-filtered view; status checkboxes do not apply here.
    pub fn from_records(records: &[&VerificationRecord]) -> Self {
        let mut by_date: BTreeMap<NaiveDate, SeriesPoint> = BTreeMap::new();

        for record in records {
            let (Some(date), Some(outcome)) = (record.date_created, record.outcome()) else {
                continue;
            };
            let point = by_date.entry(date).or_insert_with(|| SeriesPoint::empty(date));
            match outcome {
                Outcome::Approved => point.approved += 1,
                Outcome::Expired => point.expired += 1,
            }
        }

        Self {
            points: by_date.into_values().collect(),
        }
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&SeriesPoint> {
        self.points
            .binary_search_by_key(&date, |p| p.date)
            .ok()
            .map(|i| &self.points[i])
    }

    /// Counts for one outcome, aligned with `points()`.
    pub fn series(&self, outcome: Outcome) -> Vec<u64> {
        self.points.iter().map(|p| p.get(outcome)).collect()
    }
}
