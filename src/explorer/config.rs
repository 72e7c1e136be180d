use crate::explorer::scale::PlotLayout;

pub const DEFAULT_COMMIT_URL_BASE: &str = "https://github.com/vis-society/lab-7/commit/";
pub const DEFAULT_ITEM_HEIGHT: f64 = 100.0;
pub const DEFAULT_WINDOW_SIZE: usize = 10;

/// Session settings, filled from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplorerConfig {
    pub layout: PlotLayout,
    /// Fixed height of one timeline item, in pixels
    pub item_height: f64,
    /// Number of timeline items rendered at once
    pub window_size: usize,
    /// Prefix joined with a commit id to link to the commit
    pub commit_url_base: String,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            layout: PlotLayout::default(),
            item_height: DEFAULT_ITEM_HEIGHT,
            window_size: DEFAULT_WINDOW_SIZE,
            commit_url_base: DEFAULT_COMMIT_URL_BASE.to_string(),
        }
    }
}
