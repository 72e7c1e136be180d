use serde::{Deserialize, Serialize};

use crate::explorer::scatter::TooltipPlacement;

/// Labelled fields of the commit hover tooltip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipContent {
    pub id: String,
    pub url: String,
    pub date: String,
    pub time: String,
    pub author: String,
    /// Number of rows the commit edited
    pub edited: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TooltipResponse {
    pub content: TooltipContent,
    pub placement: TooltipPlacement,
}
