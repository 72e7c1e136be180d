pub mod aggregate;
pub mod config;
pub mod filter;
pub mod loader;
pub mod scale;
pub mod scatter;
pub mod selection;
pub mod state;
pub mod stats;
pub mod timeline;
pub mod views;

pub use config::ExplorerConfig;
pub use state::{Explorer, SharedExplorer};
