//! Pivot Aggregator Module
//! Counts verifications per (date, country) and appends totals.

use crate::data::VerificationRecord;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

/// Label of the synthetic last row and last column.
pub const TOTAL_LABEL: &str = "Total";

/// Dates down, countries across. Zero-filled.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PivotTable {
    dates: Vec<NaiveDate>,
    countries: Vec<String>,
    /// `counts[row][col]` for `dates[row]` and `countries[col]`.
    counts: Vec<Vec<u64>>,
}

/// One rendered line of the table, `Total` included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PivotRow {
    pub label: String,
    /// One cell per country, then the row total.
    pub cells: Vec<u64>,
}

impl PivotTable {
    pub fn from_records(records: &[&VerificationRecord]) -> Self {
        let mut grouped: BTreeMap<NaiveDate, BTreeMap<&str, u64>> = BTreeMap::new();
        let mut countries: BTreeSet<&str> = BTreeSet::new();

        for record in records {
            let (Some(date), Some(country)) = (record.date_created, record.country.as_deref())
            else {
                continue;
            };
            countries.insert(country);
            let count = grouped.entry(date).or_default().entry(country).or_insert(0);
            if record.sid.is_some() {
                *count += 1;
            }
        }

        let countries: Vec<String> = countries.into_iter().map(str::to_string).collect();
        let (dates, counts): (Vec<NaiveDate>, Vec<Vec<u64>>) = grouped
            .into_iter()
            .map(|(date, by_country)| {
                let row = countries
                    .iter()
                    .map(|c| by_country.get(c.as_str()).copied().unwrap_or(0))
                    .collect();
                (date, row)
            })
            .unzip();

        Self {
            dates,
            countries,
            counts,
        }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn count(&self, date: NaiveDate, country: &str) -> u64 {
        let row = self.dates.binary_search(&date).ok();
        let col = self.countries.iter().position(|c| c == country);
        match (row, col) {
            (Some(r), Some(c)) => self.counts[r][c],
            _ => 0,
        }
    }

    pub fn row_total(&self, date: NaiveDate) -> u64 {
        self.dates
            .binary_search(&date)
            .map(|r| self.counts[r].iter().sum())
            .unwrap_or(0)
    }

    pub fn column_total(&self, country: &str) -> u64 {
        self.countries
            .iter()
            .position(|c| c == country)
            .map(|c| self.counts.iter().map(|row| row[c]).sum())
            .unwrap_or(0)
    }

    pub fn grand_total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    /// Column headers: countries, then `Total`.
    pub fn header(&self) -> Vec<String> {
        self.countries
            .iter()
            .cloned()
            .chain(std::iter::once(TOTAL_LABEL.to_string()))
            .collect()
    }

    /// Date rows in ascending order followed by the `Total` row.
    pub fn rows(&self) -> Vec<PivotRow> {
        let mut rows: Vec<PivotRow> = self
            .dates
            .iter()
            .zip(&self.counts)
            .map(|(date, counts)| {
                let mut cells = counts.clone();
                cells.push(counts.iter().sum());
                PivotRow {
                    label: date.format("%Y-%m-%d").to_string(),
                    cells,
                }
            })
            .collect();

        let mut totals: Vec<u64> = self
            .countries
            .iter()
            .map(|c| self.column_total(c))
            .collect();
        totals.push(self.grand_total());
        rows.push(PivotRow {
            label: TOTAL_LABEL.to_string(),
            cells: totals,
        });

        rows
    }
}
