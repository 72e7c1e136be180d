//! Data transfer objects (DTOs) for API responses.
//!
//! These structs are serialized to JSON for the embedded page.
//! - `commit`: CommitSummary, CommitListResponse
//! - `stats`: SummaryStats, LanguageShare, FileComposition
//! - `views`: ViewsResponse, TimelineWindow, LoadStatus
//! - `tooltip`: TooltipContent, TooltipResponse

pub mod commit;
pub mod stats;
pub mod tooltip;
pub mod views;

pub use commit::*;
pub use stats::*;
pub use tooltip::*;
pub use views::*;
