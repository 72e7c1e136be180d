//! POST /api/v1/selection { region: { x0, y0, x1, y1 } | null }
//!
//! Sets or clears the brush region, in the pixel space of the scatter plot
//! as last rendered.

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;

use crate::error::Result;
use crate::explorer::selection::Rect;
use crate::explorer::SharedExplorer;
use crate::models::ViewsResponse;

pub fn routes(explorer: SharedExplorer) -> Router {
    Router::new()
        .route("/api/v1/selection", post(set_selection))
        .with_state(explorer)
}

#[derive(Debug, Deserialize)]
struct SelectionRequest {
    region: Option<Rect>,
}

async fn set_selection(
    State(explorer): State<SharedExplorer>,
    Json(request): Json<SelectionRequest>,
) -> Result<Json<ViewsResponse>> {
    let mut explorer = super::write(&explorer)?;
    explorer.set_region(request.region)?;
    Ok(Json(explorer.views()))
}
