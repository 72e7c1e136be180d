//! Time filter: a single nullable cutoff timestamp.
//!
//! Commits are sorted ascending by timestamp at aggregation time, so the
//! commits passing the filter always form a prefix and the cutoff index is
//! found by binary search.

use chrono::{DateTime, FixedOffset};

use crate::explorer::aggregate::Commit;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimeFilter {
    cutoff: Option<DateTime<FixedOffset>>,
}

impl TimeFilter {
    pub fn cutoff(&self) -> Option<DateTime<FixedOffset>> {
        self.cutoff
    }

    pub fn set_cutoff(&mut self, cutoff: Option<DateTime<FixedOffset>>) {
        self.cutoff = cutoff;
    }

    /// Number of leading commits at or before the cutoff.
    pub fn filtered_len(&self, commits: &[Commit]) -> usize {
        match self.cutoff {
            Some(cutoff) => commits.partition_point(|commit| commit.datetime <= cutoff),
            None => commits.len(),
        }
    }

    pub fn apply<'a>(&self, commits: &'a [Commit]) -> &'a [Commit] {
        &commits[..self.filtered_len(commits)]
    }
}
