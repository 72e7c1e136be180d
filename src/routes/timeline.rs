//! POST /api/v1/timeline/scroll { scroll_top }
//!
//! Moves the virtualized timeline window. The first visible commit becomes
//! the time cutoff and the highlighted chart point. Safe to call on every
//! scroll event: the same offset always yields the same state.

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;

use crate::error::Result;
use crate::explorer::SharedExplorer;
use crate::models::ViewsResponse;

pub fn routes(explorer: SharedExplorer) -> Router {
    Router::new()
        .route("/api/v1/timeline/scroll", post(scroll_timeline))
        .with_state(explorer)
}

#[derive(Debug, Deserialize)]
struct ScrollRequest {
    scroll_top: f64,
}

async fn scroll_timeline(
    State(explorer): State<SharedExplorer>,
    Json(request): Json<ScrollRequest>,
) -> Result<Json<ViewsResponse>> {
    let mut explorer = super::write(&explorer)?;
    explorer.scroll(request.scroll_top);
    Ok(Json(explorer.views()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::shared;

    #[tokio::test]
    async fn scroll_moves_window_and_cutoff() {
        let explorer = shared(50);
        let Json(views) = scroll_timeline(
            State(explorer.clone()),
            Json(ScrollRequest { scroll_top: 2000.0 }),
        )
        .await
        .unwrap();

        assert_eq!(views.timeline.start, 20);
        assert_eq!(views.timeline.end, 30);
        assert_eq!(views.filtered, 21);
        assert_eq!(views.highlighted.as_deref(), Some("c020"));
        assert_eq!(views.timeline.items.matches(r#"class="item""#).count(), 10);
    }
}
