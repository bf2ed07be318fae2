//! Stacked Bar Layout Module
//! Geometry of the daily approved/expired chart, independent of the UI.

use crate::aggregate::TimeSeries;
use crate::data::Outcome;
use chrono::NaiveDate;

/// Tick label format, e.g. `25-Mar`.
pub const TICK_FORMAT: &str = "%d-%b";

#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub outcome: Outcome,
    pub base: f64,
    pub height: f64,
    pub count: u64,
}

impl Segment {
    pub fn top(&self) -> f64 {
        self.base + self.height
    }

    /// Vertical center, where the count label goes.
    pub fn label_y(&self) -> f64 {
        self.base + self.height / 2.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StackedBar {
    pub date: NaiveDate,
    /// Days since the first bar.
    pub x: f64,
    pub tick: String,
    /// Approved first, expired stacked on top.
    pub segments: [Segment; 2],
}

impl StackedBar {
    /// Segments that carry a label (non-zero counts).
    pub fn labels(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|s| s.count > 0)
    }

    pub fn height(&self) -> f64 {
        self.segments[1].top()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StackedBarLayout {
    pub bars: Vec<StackedBar>,
}

impl StackedBarLayout {
    pub fn from_series(series: &TimeSeries) -> Self {
        let Some(first) = series.points().first().map(|p| p.date) else {
            return Self::default();
        };

        let bars = series
            .points()
            .iter()
            .map(|point| {
                let approved = point.approved as f64;
                let expired = point.expired as f64;
                StackedBar {
                    date: point.date,
                    x: (point.date - first).num_days() as f64,
                    tick: point.date.format(TICK_FORMAT).to_string(),
                    segments: [
                        Segment {
                            outcome: Outcome::Approved,
                            base: 0.0,
                            height: approved,
                            count: point.approved,
                        },
                        Segment {
                            outcome: Outcome::Expired,
                            base: approved,
                            height: expired,
                            count: point.expired,
                        },
                    ],
                }
            })
            .collect();

        Self { bars }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn max_height(&self) -> f64 {
        self.bars.iter().map(StackedBar::height).fold(0.0, f64::max)
    }

    /// Tick label for an axis position, if a bar sits there.
    pub fn tick_at(&self, x: f64) -> Option<&str> {
        self.bars
            .iter()
            .find(|b| (b.x - x).abs() < 0.5)
            .map(|b| b.tick.as_str())
    }
}
