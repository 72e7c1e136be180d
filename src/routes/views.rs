//! GET /api/v1/views
//!
//! Returns the current markup of every panel (chart, stats, languages,
//! files, selection count, timeline window). The page calls it once after
//! loading; every mutating endpoint returns the same payload.

use axum::{extract::State, routing::get, Json, Router};

use crate::error::Result;
use crate::explorer::SharedExplorer;
use crate::models::ViewsResponse;

pub fn routes(explorer: SharedExplorer) -> Router {
    Router::new()
        .route("/api/v1/views", get(get_views))
        .with_state(explorer)
}

async fn get_views(State(explorer): State<SharedExplorer>) -> Result<Json<ViewsResponse>> {
    let explorer = super::read(&explorer)?;
    Ok(Json(explorer.views()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LoadStatus;
    use crate::routes::test_support::shared;

    #[tokio::test]
    async fn returns_every_panel() {
        let Json(views) = get_views(State(shared(3))).await.unwrap();
        assert_eq!(views.status, LoadStatus::Ready);
        assert_eq!(views.total, 3);
        assert_eq!(views.filtered, 3);
        assert_eq!(views.chart.matches("<circle").count(), 3);
        assert!(views.stats.contains("Total Commits"));
        assert!(views.timeline.items.contains("my first commit"));
    }
}
