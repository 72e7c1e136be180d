//! Groups log rows into commits.
//!
//! Each commit owns the rows that share its id, in log order, and takes its
//! metadata (author, date, time, timezone, timestamp) from its first row.
//! The resulting sequence is sorted ascending by timestamp; the scroll
//! timeline relies on index order being chronological order.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, FixedOffset, Timelike};
use serde::Serialize;

use crate::explorer::loader::LogRow;

/// Aggregate of all log rows sharing one commit id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Commit {
    pub id: String,
    pub url: String,
    pub author: String,
    pub date: DateTime<FixedOffset>,
    pub time: String,
    pub timezone: String,
    pub datetime: DateTime<FixedOffset>,
    /// Hour of day plus minutes/60, in the commit's own offset
    pub hour_frac: f64,
    pub total_lines: usize,
    #[serde(skip)]
    pub lines: Vec<LogRow>,
}

impl Commit {
    fn from_rows(id: String, lines: Vec<LogRow>, url_base: &str) -> Option<Self> {
        let first = lines.first()?;
        let datetime = first.datetime;

        Some(Self {
            url: format!("{}{}", url_base, id),
            author: first.author.clone(),
            date: first.date,
            time: first.time.clone(),
            timezone: first.timezone.clone(),
            datetime,
            hour_frac: datetime.hour() as f64 + datetime.minute() as f64 / 60.0,
            total_lines: lines.len(),
            id,
            lines,
        })
    }

    /// Number of distinct files this commit touched.
    pub fn file_count(&self) -> usize {
        self.lines
            .iter()
            .map(|row| row.file.as_str())
            .collect::<HashSet<_>>()
            .len()
    }
}

/// Group rows by commit id (first-seen order) and sort by timestamp.
pub fn aggregate(rows: Vec<LogRow>, url_base: &str) -> Vec<Commit> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<LogRow>)> = Vec::new();

    for row in rows {
        match index.get(&row.commit) {
            Some(&idx) => groups[idx].1.push(row),
            None => {
                index.insert(row.commit.clone(), groups.len());
                groups.push((row.commit.clone(), vec![row]));
            }
        }
    }

    let mut commits: Vec<Commit> = groups
        .into_iter()
        .filter_map(|(id, lines)| Commit::from_rows(id, lines, url_base))
        .collect();

    // Stable, so commits sharing a timestamp keep first-seen order
    commits.sort_by_key(|commit| commit.datetime);
    commits
}
