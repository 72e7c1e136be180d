//! Brush selection over the scatter plot.
//!
//! The region lives in plot-pixel space, so the selected set depends on the
//! scales of the current render and has to be recomputed whenever the
//! filtered commits (and therefore the horizontal scale) change, not only
//! when the region itself moves.

use serde::{Deserialize, Serialize};

use crate::explorer::aggregate::Commit;
use crate::explorer::scale::PlotScales;

/// Axis-aligned rectangle in plot-pixel coordinates. Corners may be given
/// in any order (a brush dragged up-left is still a valid region).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Rect {
    #[cfg(test)]
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Inclusive on every edge.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let (left, right) = (self.x0.min(self.x1), self.x0.max(self.x1));
        let (top, bottom) = (self.y0.min(self.y1), self.y0.max(self.y1));
        (left..=right).contains(&x) && (top..=bottom).contains(&y)
    }

    pub fn is_finite(&self) -> bool {
        [self.x0, self.y0, self.x1, self.y1].iter().all(|v| v.is_finite())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    region: Option<Rect>,
    /// Indices into the filtered commits
    selected: Vec<usize>,
}

impl Selection {
    pub fn region(&self) -> Option<Rect> {
        self.region
    }

    pub fn selected(&self) -> &[usize] {
        &self.selected
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.binary_search(&index).is_ok()
    }

    pub fn set_region(&mut self, region: Option<Rect>) {
        self.region = region;
    }

    /// Re-test every filtered commit against the region using the scales
    /// of the current render.
    pub fn recompute(&mut self, filtered: &[Commit], scales: Option<&PlotScales>) {
        self.selected = match (self.region, scales) {
            (Some(region), Some(scales)) => filtered
                .iter()
                .enumerate()
                .filter(|(_, commit)| {
                    let (x, y) = scales.position(commit);
                    region.contains(x, y)
                })
                .map(|(idx, _)| idx)
                .collect(),
            _ => Vec::new(),
        };
    }

    pub fn commits<'a>(&self, filtered: &'a [Commit]) -> Vec<&'a Commit> {
        self.selected.iter().filter_map(|&idx| filtered.get(idx)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explorer::aggregate::{aggregate, tests::row};
    use crate::explorer::loader::LogRow;
    use crate::explorer::scale::PlotLayout;

    fn rows_for(commit: &str, datetime: &str, count: usize) -> Vec<LogRow> {
        (0..count)
            .map(|i| row(commit, &format!("f{}.js", i), "js", datetime))
            .collect()
    }

    #[test]
    fn rect_contains_edges_in_any_corner_order() {
        let rect = Rect::new(10.0, 40.0, 0.0, 20.0);
        assert!(rect.contains(0.0, 20.0));
        assert!(rect.contains(10.0, 40.0));
        assert!(rect.contains(5.0, 30.0));
        assert!(!rect.contains(10.1, 30.0));
        assert!(!rect.contains(5.0, 19.9));
    }

    #[test]
    fn no_region_selects_nothing() {
        let commits = aggregate(rows_for("a", "2024-03-01T08:00:00+00:00", 1), "");
        let scales = PlotScales::for_commits(&commits, &PlotLayout::default());

        let mut selection = Selection::default();
        selection.set_region(None);
        selection.recompute(&commits, scales.as_ref());
        assert!(selection.selected().is_empty());
    }

    #[test]
    fn full_canvas_selects_all_filtered() {
        let mut rows = rows_for("a", "2024-03-01T00:00:00+00:00", 1);
        rows.extend(rows_for("b", "2024-03-04T23:59:00+00:00", 3));
        rows.extend(rows_for("c", "2024-03-09T12:00:00+00:00", 2));
        let commits = aggregate(rows, "");
        let layout = PlotLayout::default();
        let scales = PlotScales::for_commits(&commits, &layout);

        let mut selection = Selection::default();
        selection.set_region(Some(Rect::new(0.0, 0.0, layout.width, layout.height)));
        selection.recompute(&commits, scales.as_ref());
        assert_eq!(selection.selected(), &[0, 1, 2]);
    }

    #[test]
    fn brush_around_two_lowest_points_ignores_radius() {
        let mut rows = rows_for("early-big", "2024-03-01T01:00:00+00:00", 40);
        rows.extend(rows_for("mid-small", "2024-03-02T02:00:00+00:00", 1));
        rows.extend(rows_for("late-high", "2024-03-03T20:00:00+00:00", 5));
        let commits = aggregate(rows, "");
        let layout = PlotLayout::default();
        let scales = PlotScales::for_commits(&commits, &layout).unwrap();

        let (_, y_low) = scales.position(&commits[1]);
        // Only centres count: the big commit's radius reaches far higher
        let region = Rect::new(layout.left(), y_low - 1.0, layout.right(), layout.bottom());

        let mut selection = Selection::default();
        selection.set_region(Some(region));
        selection.recompute(&commits, Some(&scales));

        let ids: Vec<&str> = selection.commits(&commits).iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["early-big", "mid-small"]);
    }

    #[test]
    fn stale_region_is_reapplied_to_new_scales() {
        let mut rows = rows_for("a", "2024-03-01T12:00:00+00:00", 1);
        rows.extend(rows_for("b", "2024-03-11T12:00:00+00:00", 1));
        let commits = aggregate(rows, "");
        let layout = PlotLayout::default();

        // Brush the right half of the full-range plot: selects b only
        let region = Rect::new(500.0, 0.0, layout.width, layout.height);
        let mut selection = Selection::default();
        selection.set_region(Some(region));
        selection.recompute(&commits, PlotScales::for_commits(&commits, &layout).as_ref());
        assert_eq!(selection.selected(), &[1]);

        // Filter down to a alone: a is now centred, inside the same region
        let filtered = &commits[..1];
        selection.recompute(filtered, PlotScales::for_commits(filtered, &layout).as_ref());
        assert_eq!(selection.selected(), &[0]);
        assert_eq!(selection.region(), Some(region));
    }
}
