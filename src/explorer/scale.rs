//! Plot geometry: canvas layout and the scales mapping commits to pixels.
//!
//! - `TimeScale`: commit timestamp → x, over the padded extent of the
//!   filtered commits
//! - `LinearScale`: hour of day [0, 24] → y, inverted so midnight is at
//!   the bottom
//! - `SqrtScale`: commit size → point radius, area-proportional
//!
//! `PlotScales::for_commits` rebuilds all three whenever the filtered set
//! changes. An empty set has no scales.

use chrono::{DateTime, Duration, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::explorer::aggregate::Commit;

pub const MIN_RADIUS: f64 = 3.0;
pub const MAX_RADIUS: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Canvas size and margins of the scatter plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotLayout {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

impl Default for PlotLayout {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 600.0,
            margin: Margin {
                top: 10.0,
                right: 10.0,
                bottom: 30.0,
                left: 20.0,
            },
        }
    }
}

impl PlotLayout {
    pub fn left(&self) -> f64 {
        self.margin.left
    }

    pub fn right(&self) -> f64 {
        self.width - self.margin.right
    }

    pub fn top(&self) -> f64 {
        self.margin.top
    }

    pub fn bottom(&self) -> f64 {
        self.height - self.margin.bottom
    }
}

/// Linear map from a numeric domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Position of `value` in the domain, 0.0 at the start and 1.0 at the
    /// end. A degenerate domain maps everything to the midpoint.
    fn normalize(&self, value: f64) -> f64 {
        let span = self.domain.1 - self.domain.0;
        if span == 0.0 {
            0.5
        } else {
            (value - self.domain.0) / span
        }
    }

    pub fn map(&self, value: f64) -> f64 {
        self.range.0 + self.normalize(value) * (self.range.1 - self.range.0)
    }

    /// Evenly spaced ticks across the domain, `step` apart.
    pub fn ticks(&self, step: f64) -> Vec<f64> {
        if step <= 0.0 {
            return Vec::new();
        }
        let (lo, hi) = (self.domain.0.min(self.domain.1), self.domain.0.max(self.domain.1));
        let mut ticks = Vec::new();
        let mut value = (lo / step).ceil() * step;
        while value <= hi + f64::EPSILON {
            ticks.push(value);
            value += step;
        }
        ticks
    }
}

/// Square-root scale: equal area steps for equal domain steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SqrtScale {
    inner: LinearScale,
}

impl SqrtScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            inner: LinearScale::new((domain.0.max(0.0).sqrt(), domain.1.max(0.0).sqrt()), range),
        }
    }

    pub fn map(&self, value: f64) -> f64 {
        self.inner.map(value.max(0.0).sqrt())
    }
}

/// Linear map from timestamps onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    inner: LinearScale,
}

impl TimeScale {
    /// Scale over `[start, end]`, padded by 2% of the span on each side
    /// (one hour each side when the span is zero).
    pub fn padded(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>, range: (f64, f64)) -> Self {
        let span = end - start;
        let pad = if span <= Duration::zero() {
            Duration::hours(1)
        } else {
            span / 50
        };
        let (start, end) = (start - pad, end + pad);

        Self {
            start,
            end,
            inner: LinearScale::new(
                (start.timestamp_millis() as f64, end.timestamp_millis() as f64),
                range,
            ),
        }
    }

    pub fn map(&self, value: DateTime<FixedOffset>) -> f64 {
        self.inner.map(value.timestamp_millis() as f64)
    }

    /// `count` evenly spaced tick timestamps strictly inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<DateTime<FixedOffset>> {
        let span = self.end - self.start;
        let divisions = count as i32 + 1;
        (1..divisions).map(|i| self.start + span * i / divisions).collect()
    }
}

/// The three scales of one scatter plot render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotScales {
    pub x: TimeScale,
    pub y: LinearScale,
    pub radius: SqrtScale,
}

impl PlotScales {
    pub fn for_commits(commits: &[Commit], layout: &PlotLayout) -> Option<Self> {
        let start = commits.iter().map(|c| c.datetime).min()?;
        let end = commits.iter().map(|c| c.datetime).max()?;
        let min_lines = commits.iter().map(|c| c.total_lines).min()?;
        let max_lines = commits.iter().map(|c| c.total_lines).max()?;

        Some(Self {
            x: TimeScale::padded(start, end, (layout.left(), layout.right())),
            y: LinearScale::new((0.0, 24.0), (layout.bottom(), layout.top())),
            radius: SqrtScale::new(
                (min_lines as f64, max_lines as f64),
                (MIN_RADIUS, MAX_RADIUS),
            ),
        })
    }

    /// Plotted centre of a commit.
    pub fn position(&self, commit: &Commit) -> (f64, f64) {
        (self.x.map(commit.datetime), self.y.map(commit.hour_frac))
    }

    pub fn radius(&self, commit: &Commit) -> f64 {
        self.radius.map(commit.total_lines as f64)
    }
}
