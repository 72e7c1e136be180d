//! Summary statistics and breakdowns derived from a commit set.
//!
//! All functions are pure: they recompute from the commits they are given
//! on every filter or selection change and keep no state.

use std::collections::{HashMap, HashSet};
use std::fmt::Write;

use chrono::{Datelike, Weekday};

use crate::explorer::aggregate::Commit;
use crate::explorer::views::{Panel, escape};
use crate::models::{FileComposition, LanguageShare, SummaryStats};

/// Categorical palette for file types, assigned in first-seen order.
const PALETTE: [&str; 10] = [
    "#4e79a7", "#f28e2c", "#e15759", "#76b7b2", "#59a14f", "#edc949", "#af7aa1", "#ff9da7",
    "#9c755f", "#bab0ab",
];

pub fn summarize(commits: &[Commit]) -> SummaryStats {
    let rows = || commits.iter().flat_map(|commit| commit.lines.iter());

    let files: HashSet<&str> = rows().map(|row| row.file.as_str()).collect();

    // Changed rows per weekday, first-seen order; the first maximum wins
    let mut per_day: Vec<(Weekday, usize)> = Vec::new();
    for row in rows() {
        let day = row.datetime.weekday();
        match per_day.iter_mut().find(|(d, _)| *d == day) {
            Some((_, count)) => *count += 1,
            None => per_day.push((day, 1)),
        }
    }
    let mut busiest: Option<(Weekday, usize)> = None;
    for &(day, count) in &per_day {
        if busiest.is_none_or(|(_, best)| count > best) {
            busiest = Some((day, count));
        }
    }

    SummaryStats {
        commits: commits.len(),
        files: files.len(),
        total_lines: commits.iter().map(|commit| commit.total_lines).sum(),
        longest_line: rows().map(|row| row.length).max(),
        busiest_day: busiest.map(|(day, _)| weekday_name(day).to_string()),
    }
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Rows per file type, largest first (ties keep first-seen order).
pub fn language_breakdown<'a, I>(commits: I) -> Vec<LanguageShare>
where
    I: IntoIterator<Item = &'a Commit>,
{
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for row in commits.into_iter().flat_map(|commit| commit.lines.iter()) {
        match index.get(&row.file_type) {
            Some(&idx) => counts[idx].1 += 1,
            None => {
                index.insert(row.file_type.clone(), counts.len());
                counts.push((row.file_type.clone(), 1));
            }
        }
    }

    let total: usize = counts.iter().map(|(_, count)| count).sum();
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    counts
        .into_iter()
        .map(|(file_type, lines)| {
            let share = lines as f64 / total as f64;
            LanguageShare {
                file_type,
                lines,
                share,
                percent: format!("{:.1}%", share * 100.0),
            }
        })
        .collect()
}

/// Rows per file, largest first (ties keep first-seen order).
pub fn file_composition(commits: &[Commit]) -> Vec<FileComposition> {
    let mut files: Vec<FileComposition> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for row in commits.iter().flat_map(|commit| commit.lines.iter()) {
        let idx = *index.entry(row.file.as_str()).or_insert_with(|| {
            files.push(FileComposition {
                file: row.file.clone(),
                lines: 0,
                row_types: Vec::new(),
            });
            files.len() - 1
        });
        files[idx].lines += 1;
        files[idx].row_types.push(row.file_type.clone());
    }

    files.sort_by(|a, b| b.lines.cmp(&a.lines));
    files
}

/// Colour per file type, stable for one rendering.
#[derive(Debug, Default)]
pub struct TypePalette {
    assigned: HashMap<String, &'static str>,
}

impl TypePalette {
    pub fn color(&mut self, file_type: &str) -> &'static str {
        let next = PALETTE[self.assigned.len() % PALETTE.len()];
        *self.assigned.entry(file_type.to_string()).or_insert(next)
    }
}

pub fn render_summary(panel: &mut Panel, stats: &SummaryStats) {
    let dash = || "—".to_string();
    let entries = [
        ("Total Commits", stats.commits.to_string()),
        ("Number of Files", stats.files.to_string()),
        ("Total Lines of Code", stats.total_lines.to_string()),
        (
            "Longest Line",
            stats.longest_line.map(|len| len.to_string()).unwrap_or_else(dash),
        ),
        (
            "Day of Most Work",
            stats.busiest_day.clone().unwrap_or_else(dash),
        ),
    ];

    let mut html = String::from(r#"<dl class="stats">"#);
    for (label, value) in entries {
        let _ = write!(html, "<dt>{}</dt><dd>{}</dd>", label, escape(&value));
    }
    html.push_str("</dl>");
    panel.replace(html);
}

pub fn render_languages(panel: &mut Panel, shares: &[LanguageShare]) {
    if shares.is_empty() {
        panel.replace(r#"<p class="empty">No lines in the current selection</p>"#.to_string());
        return;
    }

    let mut html = String::from(r#"<dl class="languages">"#);
    for share in shares {
        let _ = write!(
            html,
            "<dt>{}</dt><dd>{} lines ({})</dd>",
            escape(&share.file_type),
            share.lines,
            share.percent
        );
    }
    html.push_str("</dl>");
    panel.replace(html);
}

pub fn render_files(panel: &mut Panel, files: &[FileComposition]) {
    if files.is_empty() {
        panel.replace(r#"<p class="empty">No files changed</p>"#.to_string());
        return;
    }

    let mut palette = TypePalette::default();
    let mut html = String::from(r#"<dl class="files">"#);
    for file in files {
        let _ = write!(
            html,
            "<div><dt><code>{}</code><small>{} lines</small></dt><dd>",
            escape(&file.file),
            file.lines
        );
        for file_type in &file.row_types {
            let _ = write!(
                html,
                r#"<div class="line" style="background: {}" title="{}"></div>"#,
                palette.color(file_type),
                escape(file_type)
            );
        }
        html.push_str("</dd></div>");
    }
    html.push_str("</dl>");
    panel.replace(html);
}

pub fn render_selection_count(panel: &mut Panel, selected: usize) {
    let text = match selected {
        0 => "No commits selected".to_string(),
        1 => "1 commit selected".to_string(),
        n => format!("{} commits selected", n),
    };
    panel.replace(format!(r#"<span class="selection-count">{}</span>"#, text));
}
