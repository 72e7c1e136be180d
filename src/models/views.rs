//! Rendered view panels returned after every state change.
//!
//! Each markup field replaces the content of the page container with the
//! same name; the page never patches a container incrementally.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    Ready,
    Empty,
    Error,
}

/// Virtualized timeline: the spacer fixes the scroll height, only the
/// visible window of items is rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineWindow {
    pub spacer_height: f64,
    pub item_height: f64,
    pub start: usize,
    pub end: usize,
    pub items: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ViewsResponse {
    pub status: LoadStatus,
    pub message: Option<String>,
    pub total: usize,
    pub filtered: usize,
    pub selected: usize,
    pub cutoff: Option<DateTime<FixedOffset>>,
    pub highlighted: Option<String>,
    pub chart: String,
    pub stats: String,
    pub languages: String,
    pub files: String,
    pub selection_count: String,
    pub timeline: TimelineWindow,
}
