pub mod config;
pub mod dataset;
pub mod error;

// Search engine
pub mod search;

// Command-line consumer
pub mod cli;

// Utilities
pub mod utils;

// Re-exports
pub use config::Settings;
pub use dataset::DatasetStore;
pub use error::{Error, Result};
pub use search::SearchEngine;
