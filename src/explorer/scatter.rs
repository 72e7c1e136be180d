//! Scatter plot of commits: date on the x axis, time of day on the y axis,
//! radius by commit size.
//!
//! The chart is rebuilt from scratch on every change of the filtered set;
//! domains, scales and point count all change together, and the dataset is
//! small enough that incremental patching is not worth its complexity.
//!
//! Also provides the hover tooltip content and its viewport-aware placement.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::explorer::aggregate::Commit;
use crate::explorer::scale::{PlotLayout, PlotScales};
use crate::explorer::selection::Selection;
use crate::explorer::views::{Panel, escape};
use crate::models::TooltipContent;

/// Distance between the cursor and the tooltip's nearest corner.
pub const TOOLTIP_OFFSET: f64 = 12.0;

const X_TICKS: usize = 6;
const HOUR_TICK_STEP: f64 = 2.0;

/// Everything one render of the chart reads.
pub struct ScatterInput<'a> {
    pub filtered: &'a [Commit],
    pub scales: Option<&'a PlotScales>,
    pub layout: &'a PlotLayout,
    pub selection: &'a Selection,
    pub highlighted: Option<&'a str>,
}

/// Rebuild the chart panel.
pub fn render_scatter(panel: &mut Panel, input: &ScatterInput<'_>) {
    let layout = input.layout;
    let Some(scales) = input.scales.filter(|_| !input.filtered.is_empty()) else {
        panel.replace(render_placeholder(layout, "No commits to display"));
        return;
    };

    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg class="scatter" viewBox="0 0 {w} {h}" width="{w}" height="{h}">"#,
        w = layout.width,
        h = layout.height
    );

    // Horizontal gridlines, one per hour tick
    svg.push_str(r#"<g class="gridlines">"#);
    for hour in scales.y.ticks(HOUR_TICK_STEP) {
        let y = scales.y.map(hour);
        let _ = write!(
            svg,
            r#"<line x1="{:.2}" x2="{:.2}" y1="{y:.2}" y2="{y:.2}"/>"#,
            layout.left(),
            layout.right()
        );
    }
    svg.push_str("</g>");

    let _ = write!(
        svg,
        r#"<g class="axis x-axis"><line x1="{:.2}" x2="{:.2}" y1="{b:.2}" y2="{b:.2}"/>"#,
        layout.left(),
        layout.right(),
        b = layout.bottom()
    );
    for tick in scales.x.ticks(X_TICKS) {
        let x = scales.x.map(tick);
        let _ = write!(
            svg,
            r#"<text x="{x:.2}" y="{:.2}" text-anchor="middle">{}</text>"#,
            layout.bottom() + 18.0,
            tick.format("%b %-d")
        );
    }
    svg.push_str("</g>");

    let _ = write!(
        svg,
        r#"<g class="axis y-axis"><line x1="{l:.2}" x2="{l:.2}" y1="{:.2}" y2="{:.2}"/>"#,
        layout.top(),
        layout.bottom(),
        l = layout.left()
    );
    for hour in scales.y.ticks(HOUR_TICK_STEP) {
        let _ = write!(
            svg,
            r#"<text x="{:.2}" y="{:.2}" text-anchor="end">{}</text>"#,
            layout.left() - 4.0,
            scales.y.map(hour) + 4.0,
            hour_label(hour)
        );
    }
    svg.push_str("</g>");

    svg.push_str(r#"<g class="dots">"#);
    for index in draw_order(input.filtered) {
        let commit = &input.filtered[index];
        let (cx, cy) = scales.position(commit);

        let mut class = String::from("dot");
        if input.selection.is_selected(index) {
            class.push_str(" selected");
        }
        let highlighted = input.highlighted == Some(commit.id.as_str());
        if highlighted {
            class.push_str(" highlighted");
        }

        let _ = write!(
            svg,
            r#"<circle class="{class}" data-commit="{}" data-index="{index}" cx="{cx:.2}" cy="{cy:.2}" r="{:.2}" fill-opacity="{}"{}/>"#,
            escape(&commit.id),
            scales.radius(commit),
            if highlighted { "1" } else { "0.7" },
            if highlighted { r#" stroke="black" stroke-width="2""# } else { "" }
        );
    }
    svg.push_str("</g>");

    if let Some(region) = input.selection.region() {
        let _ = write!(
            svg,
            r#"<rect class="brush-region" x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}"/>"#,
            region.x0.min(region.x1),
            region.y0.min(region.y1),
            (region.x1 - region.x0).abs(),
            (region.y1 - region.y0).abs()
        );
    }

    svg.push_str("</svg>");
    panel.replace(svg);
}

/// Placeholder chart used for an empty filtered set or a failed load.
pub fn render_placeholder(layout: &PlotLayout, message: &str) -> String {
    format!(
        r#"<svg class="scatter placeholder" viewBox="0 0 {w} {h}" width="{w}" height="{h}"><text x="{:.2}" y="{:.2}" text-anchor="middle">{}</text></svg>"#,
        layout.width / 2.0,
        layout.height / 2.0,
        escape(message),
        w = layout.width,
        h = layout.height
    )
}

/// Indices of `commits` in drawing order: largest first so small commits
/// stay visible on top. Ties keep chronological order.
pub fn draw_order(commits: &[Commit]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..commits.len()).collect();
    order.sort_by(|&a, &b| commits[b].total_lines.cmp(&commits[a].total_lines));
    order
}

fn hour_label(hour: f64) -> String {
    format!("{:02}:00", (hour as u32) % 24)
}

pub fn tooltip_for(commit: &Commit) -> TooltipContent {
    TooltipContent {
        id: commit.id.clone(),
        url: commit.url.clone(),
        date: commit.datetime.format("%A, %B %-d, %Y").to_string(),
        time: commit.datetime.format("%-I:%M %p").to_string(),
        author: commit.author.clone(),
        edited: commit.lines.len(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TooltipPlacement {
    pub left: f64,
    pub top: f64,
    pub flipped_x: bool,
    pub flipped_y: bool,
}

/// Place the tooltip below-right of the cursor, flipping to the left and/or
/// above when it would overflow the viewport, then clamping it inside.
pub fn place_tooltip(cursor: Point, tooltip: Size, viewport: Size) -> TooltipPlacement {
    let (left, flipped_x) = place_axis(cursor.x, tooltip.width, viewport.width);
    let (top, flipped_y) = place_axis(cursor.y, tooltip.height, viewport.height);
    TooltipPlacement {
        left,
        top,
        flipped_x,
        flipped_y,
    }
}

fn place_axis(cursor: f64, extent: f64, limit: f64) -> (f64, bool) {
    let after = cursor + TOOLTIP_OFFSET;
    let (position, flipped) = if after + extent > limit {
        (cursor - TOOLTIP_OFFSET - extent, true)
    } else {
        (after, false)
    };
    let max = (limit - extent).max(0.0);
    (position.clamp(0.0, max), flipped)
}
