//! API route handlers - maps HTTP endpoints to explorer operations.
//!
//! Each submodule defines routes for a feature area:
//! - `views`: Rendered panels (GET /api/v1/views)
//! - `commits`: Filtered commit list with derived statistics
//! - `timeline`: Scroll-driven time filter
//! - `selection`: Brush region over the scatter plot
//! - `highlight`: Hover emphasis shared by chart and timeline
//! - `tooltip`: Commit details and placement for the hover tooltip

pub mod commits;
pub mod highlight;
pub mod selection;
pub mod timeline;
pub mod tooltip;
pub mod views;

use std::sync::{RwLockReadGuard, RwLockWriteGuard};

use axum::Router;

use crate::error::{AppError, Result};
use crate::explorer::{Explorer, SharedExplorer};

pub fn create_router(explorer: SharedExplorer) -> Router {
    Router::new()
        .merge(views::routes(explorer.clone()))
        .merge(commits::routes(explorer.clone()))
        .merge(timeline::routes(explorer.clone()))
        .merge(selection::routes(explorer.clone()))
        .merge(highlight::routes(explorer.clone()))
        .merge(tooltip::routes(explorer))
}

fn read(explorer: &SharedExplorer) -> Result<RwLockReadGuard<'_, Explorer>> {
    explorer
        .read()
        .map_err(|_| AppError::Internal("Lock poisoned".to_string()))
}

fn write(explorer: &SharedExplorer) -> Result<RwLockWriteGuard<'_, Explorer>> {
    explorer
        .write()
        .map_err(|_| AppError::Internal("Lock poisoned".to_string()))
}
