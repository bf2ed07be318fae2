//! Verification Record Module
//! Typed rows produced by the column normalizer.

use chrono::NaiveDate;
use std::fmt;

/// Verification outcomes the report knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Outcome {
    Approved,
    Expired,
}

impl Outcome {
    pub const ALL: [Outcome; 2] = [Outcome::Approved, Outcome::Expired];

    /// Canonical (normalized) status value.
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Approved => "approved",
            Outcome::Expired => "expired",
        }
    }

    /// Label shown in checkboxes and the chart legend.
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Approved => "Approved",
            Outcome::Expired => "Expired",
        }
    }

    /// Match an already normalized status. Anything else is not an outcome.
    pub fn from_status(status: &str) -> Option<Outcome> {
        Self::ALL.into_iter().find(|o| o.as_str() == status)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One normalized row of the uploaded table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationRecord {
    pub sid: Option<String>,
    /// `None` when the raw timestamp could not be parsed.
    pub date_created: Option<NaiveDate>,
    /// Trimmed and lowercased.
    pub status: Option<String>,
    pub country: Option<String>,
}

impl VerificationRecord {
    pub fn outcome(&self) -> Option<Outcome> {
        self.status.as_deref().and_then(Outcome::from_status)
    }
}
