//! Derived statistics DTOs.
//!
//! - `SummaryStats`: headline counts over the time-filtered commits
//! - `LanguageShare`: one file type's share of the active commit set
//! - `FileComposition`: rows changed per file, with one type tag per row

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub commits: usize,
    pub files: usize,
    pub total_lines: usize,
    /// `None` when there are no rows
    pub longest_line: Option<u32>,
    /// Full weekday name, `None` when there are no rows
    pub busiest_day: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageShare {
    pub file_type: String,
    pub lines: usize,
    /// Fraction of the set's rows, 0.0..=1.0
    pub share: f64,
    /// Display form with one decimal, e.g. "66.7%"
    pub percent: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileComposition {
    pub file: String,
    pub lines: usize,
    /// File type of each changed row, in log order
    pub row_types: Vec<String>,
}
