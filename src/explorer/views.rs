//! Views subscribed to the explorer state.
//!
//! Every view owns exactly one [`Panel`] (the handle of the page container
//! it fills) and rebuilds the panel's whole markup when notified of a
//! [`StateEvent`] it cares about. Nothing is appended across renders.
//!
//! - `ChartView`: scatter plot, reacts to every event
//! - `SummaryView`: headline counts over the filtered commits
//! - `LanguageView`: type breakdown over the active set (selection or filter)
//! - `FileView`: per-file composition over the filtered commits
//! - `SelectionCountView`: "N commits selected" readout
//! - `TimelineView`: the visible window of narrative items

use crate::explorer::scatter::{self, ScatterInput};
use crate::explorer::state::{ExplorerState, StateEvent};
use crate::explorer::stats;

pub const CHART: &str = "chart";
pub const STATS: &str = "stats";
pub const LANGUAGES: &str = "languages";
pub const FILES: &str = "files";
pub const SELECTION_COUNT: &str = "selection-count";
pub const TIMELINE_ITEMS: &str = "timeline-items";

/// Markup owned by one view, replaced wholesale on each render.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    id: &'static str,
    markup: String,
    renders: u64,
}

impl Panel {
    pub fn new(id: &'static str) -> Self {
        Self {
            id,
            markup: String::new(),
            renders: 0,
        }
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// How many times the panel has been rebuilt.
    pub fn renders(&self) -> u64 {
        self.renders
    }

    pub fn replace(&mut self, markup: String) {
        self.markup = markup;
        self.renders += 1;
    }
}

/// A subscriber of explorer state changes.
pub trait View: Send + Sync {
    fn panel(&self) -> &Panel;

    /// Whether this view depends on what `event` changed.
    fn wants(&self, _event: StateEvent) -> bool {
        true
    }

    fn render(&mut self, state: &ExplorerState);
}

/// Escape text for HTML element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn error_markup(message: &str) -> String {
    format!(r#"<p class="error">Could not load commit log: {}</p>"#, escape(message))
}

pub struct ChartView {
    panel: Panel,
}

impl Default for ChartView {
    fn default() -> Self {
        Self {
            panel: Panel::new(CHART),
        }
    }
}

impl View for ChartView {
    fn panel(&self) -> &Panel {
        &self.panel
    }

    fn render(&mut self, state: &ExplorerState) {
        if let Some(message) = state.load_error() {
            let text = format!("Could not load commit log: {}", message);
            self.panel.replace(scatter::render_placeholder(state.layout(), &text));
            return;
        }

        scatter::render_scatter(
            &mut self.panel,
            &ScatterInput {
                filtered: state.filtered(),
                scales: state.scales(),
                layout: state.layout(),
                selection: state.selection(),
                highlighted: state.highlighted(),
            },
        );
    }
}

pub struct SummaryView {
    panel: Panel,
}

impl Default for SummaryView {
    fn default() -> Self {
        Self {
            panel: Panel::new(STATS),
        }
    }
}

impl View for SummaryView {
    fn panel(&self) -> &Panel {
        &self.panel
    }

    fn wants(&self, event: StateEvent) -> bool {
        matches!(event, StateEvent::Loaded | StateEvent::FilterChanged)
    }

    fn render(&mut self, state: &ExplorerState) {
        match state.load_error() {
            Some(message) => self.panel.replace(error_markup(message)),
            None => stats::render_summary(&mut self.panel, &stats::summarize(state.filtered())),
        }
    }
}

pub struct LanguageView {
    panel: Panel,
}

impl Default for LanguageView {
    fn default() -> Self {
        Self {
            panel: Panel::new(LANGUAGES),
        }
    }
}

impl View for LanguageView {
    fn panel(&self) -> &Panel {
        &self.panel
    }

    fn wants(&self, event: StateEvent) -> bool {
        event != StateEvent::HighlightChanged
    }

    fn render(&mut self, state: &ExplorerState) {
        match state.load_error() {
            Some(message) => self.panel.replace(error_markup(message)),
            None => {
                let shares = stats::language_breakdown(state.active());
                stats::render_languages(&mut self.panel, &shares);
            }
        }
    }
}

pub struct FileView {
    panel: Panel,
}

impl Default for FileView {
    fn default() -> Self {
        Self {
            panel: Panel::new(FILES),
        }
    }
}

impl View for FileView {
    fn panel(&self) -> &Panel {
        &self.panel
    }

    fn wants(&self, event: StateEvent) -> bool {
        matches!(event, StateEvent::Loaded | StateEvent::FilterChanged)
    }

    fn render(&mut self, state: &ExplorerState) {
        match state.load_error() {
            Some(message) => self.panel.replace(error_markup(message)),
            None => stats::render_files(&mut self.panel, &stats::file_composition(state.filtered())),
        }
    }
}

pub struct SelectionCountView {
    panel: Panel,
}

impl Default for SelectionCountView {
    fn default() -> Self {
        Self {
            panel: Panel::new(SELECTION_COUNT),
        }
    }
}

impl View for SelectionCountView {
    fn panel(&self) -> &Panel {
        &self.panel
    }

    fn wants(&self, event: StateEvent) -> bool {
        event != StateEvent::HighlightChanged
    }

    fn render(&mut self, state: &ExplorerState) {
        stats::render_selection_count(&mut self.panel, state.selection().selected().len());
    }
}

pub struct TimelineView {
    panel: Panel,
}

impl Default for TimelineView {
    fn default() -> Self {
        Self {
            panel: Panel::new(TIMELINE_ITEMS),
        }
    }
}

impl View for TimelineView {
    fn panel(&self) -> &Panel {
        &self.panel
    }

    fn wants(&self, event: StateEvent) -> bool {
        matches!(event, StateEvent::Loaded | StateEvent::FilterChanged)
    }

    fn render(&mut self, state: &ExplorerState) {
        match state.load_error() {
            Some(message) => self.panel.replace(error_markup(message)),
            None if state.commits().is_empty() => self
                .panel
                .replace(r#"<p class="empty">No commits in the log</p>"#.to_string()),
            None => self.panel.replace(state.timeline().render_items(state.commits())),
        }
    }
}

/// One of each view, in page order.
pub fn default_views() -> Vec<Box<dyn View>> {
    vec![
        Box::new(ChartView::default()),
        Box::new(SummaryView::default()),
        Box::new(LanguageView::default()),
        Box::new(FileView::default()),
        Box::new(SelectionCountView::default()),
        Box::new(TimelineView::default()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn panel_replace_counts_renders() {
        let mut panel = Panel::new(CHART);
        panel.replace("a".into());
        panel.replace("b".into());
        assert_eq!(panel.markup(), "b");
        assert_eq!(panel.renders(), 2);
        assert_eq!(panel.id(), "chart");
    }

    #[test]
    fn views_declare_their_events() {
        let summary = SummaryView::default();
        assert!(summary.wants(StateEvent::FilterChanged));
        assert!(!summary.wants(StateEvent::SelectionChanged));

        let languages = LanguageView::default();
        assert!(languages.wants(StateEvent::SelectionChanged));
        assert!(!languages.wants(StateEvent::HighlightChanged));

        assert!(ChartView::default().wants(StateEvent::HighlightChanged));
    }
}
