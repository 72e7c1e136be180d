//! POST /api/v1/highlight { commit_id | null }
//!
//! Emphasizes one chart point. Sent when the pointer enters a chart point
//! or a timeline item, cleared with `null` when it leaves.

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;

use crate::error::Result;
use crate::explorer::SharedExplorer;
use crate::models::ViewsResponse;

pub fn routes(explorer: SharedExplorer) -> Router {
    Router::new()
        .route("/api/v1/highlight", post(set_highlight))
        .with_state(explorer)
}

#[derive(Debug, Deserialize)]
struct HighlightRequest {
    commit_id: Option<String>,
}

async fn set_highlight(
    State(explorer): State<SharedExplorer>,
    Json(request): Json<HighlightRequest>,
) -> Result<Json<ViewsResponse>> {
    let mut explorer = super::write(&explorer)?;
    explorer.highlight(request.commit_id.as_deref())?;
    Ok(Json(explorer.views()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::routes::test_support::shared;

    #[tokio::test]
    async fn highlights_known_commit_only() {
        let explorer = shared(3);
        let Json(views) = set_highlight(
            State(explorer.clone()),
            Json(HighlightRequest {
                commit_id: Some("c001".into()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(views.highlighted.as_deref(), Some("c001"));
        assert_eq!(views.chart.matches("dot highlighted").count(), 1);

        let missing = set_highlight(
            State(explorer),
            Json(HighlightRequest {
                commit_id: Some("zzz".into()),
            }),
        )
        .await;
        assert!(matches!(missing, Err(AppError::CommitNotFound(_))));
    }
}
