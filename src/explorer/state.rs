//! The exploration controller.
//!
//! `Explorer` owns the loaded commits, the time filter and the brush
//! selection, which are the only mutable state of a session. Every mutation
//! goes through one of its methods, which updates derived data (filtered
//! prefix, plot scales, selected set) eagerly and then pushes a
//! [`StateEvent`] to each subscribed [`View`].
//!
//! Used by: all `/api/v1` routes through `SharedExplorer`

use std::sync::{Arc, RwLock};
use std::time::Instant;

use chrono::{DateTime, FixedOffset};

use crate::error::{AppError, LoadError, Result};
use crate::explorer::aggregate::{Commit, aggregate};
use crate::explorer::config::ExplorerConfig;
use crate::explorer::filter::TimeFilter;
use crate::explorer::loader::LogRow;
use crate::explorer::scale::{PlotLayout, PlotScales};
use crate::explorer::selection::{Rect, Selection};
use crate::explorer::timeline::ScrollTimeline;
use crate::explorer::views::{self, View};
use crate::models::{LoadStatus, TimelineWindow, ViewsResponse};

/// What changed in the last mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateEvent {
    /// Dataset (re)loaded or failed to load
    Loaded,
    /// Time cutoff moved; filtered set, scales and selection recomputed
    FilterChanged,
    /// Brush region moved
    SelectionChanged,
    /// Hovered / timeline-focused commit changed
    HighlightChanged,
}

pub struct ExplorerState {
    config: ExplorerConfig,
    commits: Vec<Commit>,
    filter: TimeFilter,
    filtered_len: usize,
    scales: Option<PlotScales>,
    selection: Selection,
    highlighted: Option<String>,
    timeline: ScrollTimeline,
    load_error: Option<String>,
}

impl ExplorerState {
    fn new(config: ExplorerConfig) -> Self {
        let timeline = ScrollTimeline::new(config.item_height, config.window_size);
        Self {
            config,
            commits: Vec::new(),
            filter: TimeFilter::default(),
            filtered_len: 0,
            scales: None,
            selection: Selection::default(),
            highlighted: None,
            timeline,
            load_error: None,
        }
    }

    /// All commits, ascending by timestamp.
    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    pub fn filtered(&self) -> &[Commit] {
        &self.commits[..self.filtered_len]
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected(&self) -> Vec<&Commit> {
        self.selection.commits(self.filtered())
    }

    /// The selection when it is non-empty, otherwise the filtered commits.
    pub fn active(&self) -> Vec<&Commit> {
        let selected = self.selected();
        if selected.is_empty() {
            self.filtered().iter().collect()
        } else {
            selected
        }
    }

    pub fn cutoff(&self) -> Option<DateTime<FixedOffset>> {
        self.filter.cutoff()
    }

    pub fn scales(&self) -> Option<&PlotScales> {
        self.scales.as_ref()
    }

    pub fn layout(&self) -> &PlotLayout {
        &self.config.layout
    }

    pub fn highlighted(&self) -> Option<&str> {
        self.highlighted.as_deref()
    }

    pub fn timeline(&self) -> &ScrollTimeline {
        &self.timeline
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn status(&self) -> LoadStatus {
        if self.load_error.is_some() {
            LoadStatus::Error
        } else if self.commits.is_empty() {
            LoadStatus::Empty
        } else {
            LoadStatus::Ready
        }
    }

    /// Recompute everything derived from the cutoff. The brush region is
    /// kept and re-applied against the rebuilt scales.
    fn refilter(&mut self) {
        let filtered = self.filter.apply(&self.commits);
        self.filtered_len = filtered.len();
        self.scales = PlotScales::for_commits(filtered, &self.config.layout);
        self.selection.recompute(filtered, self.scales.as_ref());
    }
}

pub struct Explorer {
    state: ExplorerState,
    views: Vec<Box<dyn View>>,
}

impl Explorer {
    pub fn new(config: ExplorerConfig) -> Self {
        Self::with_views(config, views::default_views())
    }

    pub fn with_views(config: ExplorerConfig, views: Vec<Box<dyn View>>) -> Self {
        let mut explorer = Self {
            state: ExplorerState::new(config),
            views: Vec::with_capacity(views.len()),
        };
        for view in views {
            explorer.subscribe(view);
        }
        explorer
    }

    pub fn state(&self) -> &ExplorerState {
        &self.state
    }

    /// Add a view and render it against the current state.
    pub fn subscribe(&mut self, mut view: Box<dyn View>) {
        view.render(&self.state);
        self.views.push(view);
    }

    /// Replace the dataset, resetting filter, selection and timeline to
    /// full inclusion.
    pub fn load(&mut self, rows: Vec<LogRow>) {
        let start = Instant::now();
        let row_count = rows.len();
        self.state.commits = aggregate(rows, &self.state.config.commit_url_base);
        self.state.filter = TimeFilter::default();
        self.state.selection = Selection::default();
        self.state.highlighted = None;
        self.state.timeline.reset();
        self.state.load_error = None;
        self.state.refilter();

        tracing::info!(
            "Loaded {} rows into {} commits in {:?}",
            row_count,
            self.state.commits.len(),
            start.elapsed()
        );
        self.notify(StateEvent::Loaded);
    }

    /// Put the explorer into its error state for the rest of the session.
    pub fn fail(&mut self, error: &LoadError) {
        tracing::warn!("Commit log unavailable: {}", error);
        self.state.commits.clear();
        self.state.filter = TimeFilter::default();
        self.state.selection = Selection::default();
        self.state.highlighted = None;
        self.state.timeline.reset();
        self.state.load_error = Some(error.to_string());
        self.state.refilter();
        self.notify(StateEvent::Loaded);
    }

    /// Move the time cutoff. `None` includes every commit.
    pub fn set_cutoff(&mut self, cutoff: Option<DateTime<FixedOffset>>) {
        self.state.filter.set_cutoff(cutoff);
        self.state.refilter();
        self.notify(StateEvent::FilterChanged);
    }

    /// Move the brush region. `None` clears the selection.
    pub fn set_region(&mut self, region: Option<Rect>) -> Result<()> {
        if region.is_some_and(|rect| !rect.is_finite()) {
            return Err(AppError::InvalidRequest(
                "selection region must have finite coordinates".to_string(),
            ));
        }

        let state = &mut self.state;
        state.selection.set_region(region);
        state
            .selection
            .recompute(&state.commits[..state.filtered_len], state.scales.as_ref());
        self.notify(StateEvent::SelectionChanged);
        Ok(())
    }

    /// Emphasize one commit in the chart, clearing any previous emphasis.
    pub fn highlight(&mut self, id: Option<&str>) -> Result<()> {
        if let Some(id) = id {
            if self.commit(id).is_none() {
                return Err(AppError::CommitNotFound(id.to_string()));
            }
        }

        self.state.highlighted = id.map(str::to_string);
        self.notify(StateEvent::HighlightChanged);
        Ok(())
    }

    /// Scroll the timeline: the first visible commit becomes both the time
    /// cutoff and the highlighted point. Returns the first visible index.
    pub fn scroll(&mut self, scroll_top: f64) -> usize {
        let count = self.state.commits.len();
        let start = self.state.timeline.scroll_to(scroll_top, count);

        let focus = self
            .state
            .commits
            .get(start)
            .map(|commit| (commit.datetime, commit.id.clone()));
        let (cutoff, highlighted) = focus.unzip();
        self.state.highlighted = highlighted;
        self.set_cutoff(cutoff);
        start
    }

    pub fn commit(&self, id: &str) -> Option<&Commit> {
        self.state.commits.iter().find(|commit| commit.id == id)
    }

    fn notify(&mut self, event: StateEvent) {
        let state = &self.state;
        let mut rendered = 0;
        for view in self.views.iter_mut().filter(|view| view.wants(event)) {
            view.render(state);
            let panel = view.panel();
            tracing::trace!("#{} rendered {} times", panel.id(), panel.renders());
            rendered += 1;
        }
        tracing::debug!(
            "{:?}: {} of {} commits filtered, {} selected, {} views rendered",
            event,
            state.filtered_len,
            state.commits.len(),
            state.selection.selected().len(),
            rendered
        );
    }

    fn markup(&self, id: &str) -> String {
        self.views
            .iter()
            .find(|view| view.panel().id() == id)
            .map(|view| view.panel().markup().to_string())
            .unwrap_or_default()
    }

    /// Current markup of every panel plus the timeline window geometry.
    pub fn views(&self) -> ViewsResponse {
        let state = &self.state;
        let count = state.commits.len();
        let visible = state.timeline.visible(count);

        ViewsResponse {
            status: state.status(),
            message: state.load_error.clone(),
            total: count,
            filtered: state.filtered_len,
            selected: state.selection.selected().len(),
            cutoff: state.cutoff(),
            highlighted: state.highlighted.clone(),
            chart: self.markup(views::CHART),
            stats: self.markup(views::STATS),
            languages: self.markup(views::LANGUAGES),
            files: self.markup(views::FILES),
            selection_count: self.markup(views::SELECTION_COUNT),
            timeline: TimelineWindow {
                spacer_height: state.timeline.spacer_height(count),
                item_height: state.timeline.item_height(),
                start: visible.start,
                end: visible.end,
                items: self.markup(views::TIMELINE_ITEMS),
            },
        }
    }
}

pub type SharedExplorer = Arc<RwLock<Explorer>>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explorer::aggregate::tests::row;
    use crate::explorer::views::Panel;
    use std::sync::Mutex;

    fn rows(count: usize) -> Vec<LogRow> {
        (0..count)
            .map(|i| {
                let day = 1 + i / 24;
                let hour = i % 24;
                row(
                    &format!("c{:03}", i),
                    &format!("f{}.js", i % 7),
                    if i % 3 == 0 { "css" } else { "js" },
                    &format!("2024-01-{:02}T{:02}:00:00+00:00", day, hour),
                )
            })
            .collect()
    }

    fn loaded(count: usize) -> Explorer {
        let mut explorer = Explorer::new(ExplorerConfig::default());
        explorer.load(rows(count));
        explorer
    }

    /// Records which events reached it.
    struct Recorder {
        panel: Panel,
        seen: Arc<Mutex<Vec<usize>>>,
    }

    impl View for Recorder {
        fn panel(&self) -> &Panel {
            &self.panel
        }

        fn render(&mut self, state: &ExplorerState) {
            self.seen.lock().unwrap().push(state.filtered().len());
            self.panel.replace(String::new());
        }
    }

    #[test]
    fn load_resets_to_full_inclusion() {
        let mut explorer = loaded(5);
        explorer.set_cutoff(Some(explorer.state().commits()[1].datetime));
        explorer.set_region(Some(Rect::new(0.0, 0.0, 1000.0, 600.0))).unwrap();

        explorer.load(rows(5));
        let state = explorer.state();
        assert_eq!(state.filtered().len(), 5);
        assert!(state.cutoff().is_none());
        assert!(state.selection().region().is_none());
        assert_eq!(state.status(), LoadStatus::Ready);
    }

    #[test]
    fn subscribers_are_notified_on_every_change() {
        let mut explorer = loaded(4);
        let seen = Arc::new(Mutex::new(Vec::new()));
        explorer.subscribe(Box::new(Recorder {
            panel: Panel::new("recorder"),
            seen: seen.clone(),
        }));

        explorer.set_cutoff(Some(explorer.state().commits()[1].datetime));
        explorer.set_region(None).unwrap();
        explorer.highlight(Some("c000")).unwrap();
        explorer.set_cutoff(None);

        assert_eq!(*seen.lock().unwrap(), vec![4, 2, 2, 2, 4]);
    }

    #[test]
    fn scrolling_notifies_once_with_highlight_in_place() {
        let mut explorer = loaded(30);
        let seen = Arc::new(Mutex::new(Vec::new()));
        explorer.subscribe(Box::new(Recorder {
            panel: Panel::new("recorder"),
            seen: seen.clone(),
        }));

        explorer.scroll(500.0);
        assert_eq!(*seen.lock().unwrap(), vec![30, 6]);
        assert_eq!(explorer.state().highlighted(), Some("c005"));
        assert_eq!(explorer.state().cutoff(), Some(explorer.state().commits()[5].datetime));
    }

    #[test]
    fn active_set_prefers_non_empty_selection() {
        let mut explorer = loaded(6);
        let all: Vec<String> = explorer.state().filtered().iter().map(|c| c.id.clone()).collect();
        let ids = |commits: Vec<&Commit>| commits.iter().map(|c| c.id.clone()).collect::<Vec<_>>();

        // No region
        assert_eq!(ids(explorer.state().active()), all);

        // Region matching nothing
        explorer.set_region(Some(Rect::new(0.0, 0.0, 1.0, 1.0))).unwrap();
        assert!(explorer.state().selected().is_empty());
        assert_eq!(ids(explorer.state().active()), all);

        // Region around the two lowest points (hours 0 and 1)
        let scales = *explorer.state().scales().unwrap();
        let (_, y1) = scales.position(&explorer.state().commits()[1]);
        explorer.set_region(Some(Rect::new(0.0, y1, 1000.0, 600.0))).unwrap();
        assert_eq!(ids(explorer.state().active()), vec!["c000", "c001"]);
        assert_eq!(ids(explorer.state().selected()), vec!["c000", "c001"]);
    }

    #[test]
    fn selection_is_recomputed_when_the_filter_moves() {
        let mut explorer = loaded(6);
        explorer.set_region(Some(Rect::new(0.0, 0.0, 1000.0, 600.0))).unwrap();
        assert_eq!(explorer.state().selected().len(), 6);

        explorer.set_cutoff(Some(explorer.state().commits()[2].datetime));
        assert_eq!(explorer.state().selected().len(), 3);

        explorer.set_cutoff(Some(DateTime::parse_from_rfc3339("1999-01-01T00:00:00Z").unwrap()));
        assert!(explorer.state().filtered().is_empty());
        assert!(explorer.state().selected().is_empty());
        assert!(explorer.state().scales().is_none());
    }

    #[test]
    fn scrolling_to_the_top_filters_and_highlights_first_commit() {
        let mut explorer = loaded(50);
        let first = explorer.state().commits()[0].clone();

        assert_eq!(explorer.scroll(0.0), 0);
        let state = explorer.state();
        assert_eq!(state.cutoff(), Some(first.datetime));
        assert_eq!(state.filtered().len(), 1);
        assert_eq!(state.highlighted(), Some(first.id.as_str()));

        let response = explorer.views();
        assert_eq!(response.chart.matches("highlighted").count(), 1);
        assert!(response.chart.contains(&format!(r#"class="dot highlighted" data-commit="{}""#, first.id)));
        assert_eq!(response.timeline.spacer_height, 5000.0);
        assert_eq!((response.timeline.start, response.timeline.end), (0, 10));
    }

    #[test]
    fn scrolling_is_idempotent_and_clamped() {
        let mut explorer = loaded(50);
        assert_eq!(explorer.scroll(1234.0), 12);
        let first = explorer.views();
        assert_eq!(explorer.scroll(1234.0), 12);
        let second = explorer.views();
        assert_eq!(first.chart, second.chart);
        assert_eq!(first.timeline, second.timeline);

        assert_eq!(explorer.scroll(99_999.0), 40);
        assert_eq!(explorer.state().filtered().len(), 41);
        assert_eq!(explorer.state().highlighted(), Some("c040"));
    }

    #[test]
    fn scrolling_an_empty_log() {
        let mut explorer = loaded(0);
        assert_eq!(explorer.scroll(500.0), 0);
        assert!(explorer.state().cutoff().is_none());
        assert!(explorer.state().highlighted().is_none());
        assert_eq!(explorer.views().status, LoadStatus::Empty);
    }

    #[test]
    fn empty_log_renders_every_view() {
        let explorer = loaded(0);
        let response = explorer.views();
        assert!(response.chart.contains("No commits to display"));
        assert!(response.stats.contains("<dd>0</dd>"));
        assert!(response.languages.contains("empty"));
        assert!(response.files.contains("empty"));
        assert!(response.selection_count.contains("No commits selected"));
        assert!(response.timeline.items.contains("No commits"));
    }

    #[test]
    fn failed_load_shows_error_placeholders() {
        let mut explorer = loaded(3);
        explorer.fail(&LoadError::MissingColumn("datetime"));

        let response = explorer.views();
        assert_eq!(response.status, LoadStatus::Error);
        assert_eq!(response.total, 0);
        assert!(response.chart.contains("placeholder"));
        assert!(response.chart.contains("datetime"));
        assert!(response.stats.contains("error"));
        assert!(response.message.unwrap().contains("datetime"));
    }

    #[test]
    fn highlight_unknown_commit_is_rejected() {
        let mut explorer = loaded(3);
        assert!(matches!(
            explorer.highlight(Some("nope")),
            Err(AppError::CommitNotFound(_))
        ));
        explorer.highlight(Some("c001")).unwrap();
        explorer.highlight(None).unwrap();
        assert!(explorer.state().highlighted().is_none());
    }

    #[test]
    fn non_finite_region_is_rejected() {
        let mut explorer = loaded(3);
        let result = explorer.set_region(Some(Rect::new(f64::NAN, 0.0, 1.0, 1.0)));
        assert!(matches!(result, Err(AppError::InvalidRequest(_))));
    }

    #[test]
    fn three_commit_scenario() {
        let mut explorer = Explorer::new(ExplorerConfig::default());
        explorer.load(vec![
            row("c1", "app.js", "js", "2024-03-01T08:00:00+00:00"),
            row("c2", "style.css", "css", "2024-03-02T14:30:00+00:00"),
            row("c3", "util.js", "js", "2024-03-03T23:00:00+00:00"),
        ]);
        explorer.set_cutoff(Some(explorer.state().commits()[1].datetime));

        let ids: Vec<&str> = explorer.state().filtered().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c2"]);
        let languages = explorer.views().languages;
        let js = languages.find("<dt>js</dt>").unwrap();
        let css = languages.find("<dt>css</dt>").unwrap();
        assert!(js < css);
    }
}
