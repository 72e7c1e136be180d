//! GET /api/v1/commits?limit=&offset=
//!
//! Time-filtered commits (oldest first) with pagination, each flagged when
//! inside the brush selection, plus the derived statistics of the current
//! state.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::error::Result;
use crate::explorer::{stats, SharedExplorer};
use crate::models::{CommitListResponse, CommitSummary};

pub fn routes(explorer: SharedExplorer) -> Router {
    Router::new()
        .route("/api/v1/commits", get(get_commits))
        .with_state(explorer)
}

#[derive(Debug, Deserialize)]
struct CommitsQuery {
    #[serde(default = "default_limit")]
    limit: usize,
    #[serde(default)]
    offset: usize,
}

fn default_limit() -> usize {
    50
}

async fn get_commits(
    State(explorer): State<SharedExplorer>,
    Query(query): Query<CommitsQuery>,
) -> Result<Json<CommitListResponse>> {
    let explorer = super::read(&explorer)?;
    let state = explorer.state();
    let filtered = state.filtered();
    let selection = state.selection();

    let commits = filtered
        .iter()
        .enumerate()
        .skip(query.offset)
        .take(query.limit)
        .map(|(idx, commit)| CommitSummary {
            id: commit.id.clone(),
            url: commit.url.clone(),
            author: commit.author.clone(),
            datetime: commit.datetime,
            hour_frac: commit.hour_frac,
            total_lines: commit.total_lines,
            file_count: commit.file_count(),
            selected: selection.is_selected(idx),
        })
        .collect();

    Ok(Json(CommitListResponse {
        commits,
        total: state.commits().len(),
        filtered_total: filtered.len(),
        selected_total: selection.selected().len(),
        has_more: filtered.len().saturating_sub(query.offset) > query.limit,
        cutoff: state.cutoff(),
        summary: stats::summarize(filtered),
        languages: stats::language_breakdown(state.active()),
        files: stats::file_composition(filtered),
    }))
}
