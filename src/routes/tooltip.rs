//! POST /api/v1/tooltip { commit_id, cursor, tooltip, viewport }
//!
//! Returns the labelled tooltip fields of a commit and where to put the
//! tooltip so it stays fully inside the viewport.

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::explorer::scatter::{self, Point, Size};
use crate::explorer::SharedExplorer;
use crate::models::TooltipResponse;

pub fn routes(explorer: SharedExplorer) -> Router {
    Router::new()
        .route("/api/v1/tooltip", post(get_tooltip))
        .with_state(explorer)
}

#[derive(Debug, Deserialize)]
struct TooltipRequest {
    commit_id: String,
    cursor: Point,
    tooltip: Size,
    viewport: Size,
}

async fn get_tooltip(
    State(explorer): State<SharedExplorer>,
    Json(request): Json<TooltipRequest>,
) -> Result<Json<TooltipResponse>> {
    let explorer = super::read(&explorer)?;
    let commit = explorer
        .commit(&request.commit_id)
        .ok_or_else(|| AppError::CommitNotFound(request.commit_id.clone()))?;

    Ok(Json(TooltipResponse {
        content: scatter::tooltip_for(commit),
        placement: scatter::place_tooltip(request.cursor, request.tooltip, request.viewport),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::shared;

    fn request(commit_id: &str) -> TooltipRequest {
        TooltipRequest {
            commit_id: commit_id.to_string(),
            cursor: Point { x: 790.0, y: 20.0 },
            tooltip: Size { width: 240.0, height: 120.0 },
            viewport: Size { width: 800.0, height: 600.0 },
        }
    }

    #[tokio::test]
    async fn tooltip_for_commit_flips_left_at_right_edge() {
        let Json(response) = get_tooltip(State(shared(2)), Json(request("c001"))).await.unwrap();
        assert_eq!(response.content.id, "c001");
        assert_eq!(response.content.edited, 1);
        assert_eq!(response.content.time, "1:00 AM");
        assert!(response.placement.flipped_x);
        assert!(!response.placement.flipped_y);
        assert_eq!(response.placement.left, 538.0);
    }

    #[tokio::test]
    async fn unknown_commit_is_not_found() {
        let result = get_tooltip(State(shared(2)), Json(request("nope"))).await;
        assert!(matches!(result, Err(AppError::CommitNotFound(_))));
    }
}
