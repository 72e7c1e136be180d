use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::{FileComposition, LanguageShare, SummaryStats};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitSummary {
    pub id: String,
    pub url: String,
    pub author: String,
    pub datetime: DateTime<FixedOffset>,
    pub hour_frac: f64,
    pub total_lines: usize,
    pub file_count: usize,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitListResponse {
    pub commits: Vec<CommitSummary>,
    pub total: usize,
    pub filtered_total: usize,
    pub selected_total: usize,
    pub has_more: bool,
    pub cutoff: Option<DateTime<FixedOffset>>,
    pub summary: SummaryStats,
    pub languages: Vec<LanguageShare>,
    pub files: Vec<FileComposition>,
}
