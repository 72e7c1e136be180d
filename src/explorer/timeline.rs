//! Virtualized scroll timeline.
//!
//! The scroll region is as tall as all items together
//! (`commit_count * item_height`) but only a fixed window of items is ever
//! rendered, absolutely positioned at `index * item_height`. The first
//! visible item drives the time filter.

use std::fmt::Write;
use std::ops::Range;

use crate::explorer::aggregate::Commit;
use crate::explorer::views::escape;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTimeline {
    item_height: f64,
    window_size: usize,
    start: usize,
}

impl ScrollTimeline {
    pub fn new(item_height: f64, window_size: usize) -> Self {
        Self {
            item_height,
            window_size,
            start: 0,
        }
    }

    pub fn item_height(&self) -> f64 {
        self.item_height
    }

    pub fn spacer_height(&self, count: usize) -> f64 {
        count as f64 * self.item_height
    }

    /// First visible index for a scroll offset, clamped so a full window
    /// stays visible at the end of the list.
    pub fn window_start(&self, scroll_top: f64, count: usize) -> usize {
        if !scroll_top.is_finite() || scroll_top <= 0.0 || self.item_height <= 0.0 {
            return 0;
        }
        let raw = (scroll_top / self.item_height).floor() as usize;
        raw.min(count.saturating_sub(self.window_size))
    }

    /// Move the window for a scroll offset; returns the new first index.
    pub fn scroll_to(&mut self, scroll_top: f64, count: usize) -> usize {
        self.start = self.window_start(scroll_top, count);
        self.start
    }

    pub fn visible(&self, count: usize) -> Range<usize> {
        let start = self.start.min(count);
        start..(start + self.window_size).min(count)
    }

    pub fn reset(&mut self) {
        self.start = 0;
    }

    /// Markup for the visible window, one absolutely positioned item each.
    pub fn render_items(&self, commits: &[Commit]) -> String {
        let mut html = String::new();
        for index in self.visible(commits.len()) {
            let commit = &commits[index];
            let _ = write!(
                html,
                r#"<div class="item" data-commit="{}" data-index="{index}" style="position: absolute; top: {:.0}px; height: {:.0}px">{}</div>"#,
                escape(&commit.id),
                index as f64 * self.item_height,
                self.item_height,
                narrative(commit, index)
            );
        }
        html
    }
}

/// One sentence describing a commit, linked to its url.
pub fn narrative(commit: &Commit, index: usize) -> String {
    let when = commit.datetime.format("%A, %B %-d, %Y at %-I:%M %p");
    let link_text = if index == 0 {
        "my first commit, and it was glorious"
    } else {
        "another glorious commit"
    };
    let files = commit.file_count();

    format!(
        r#"<p>On {}, I made <a href="{}" target="_blank">{}</a>. I edited {} {} across {} {}.</p>"#,
        when,
        escape(&commit.url),
        link_text,
        commit.total_lines,
        if commit.total_lines == 1 { "line" } else { "lines" },
        files,
        if files == 1 { "file" } else { "files" }
    )
}
