//! Error types for the host harness binary.
//!
//! [`HostError`] is the top-level error that `main` propagates. Only
//! startup can fail; once the plugin is loaded every problem is logged.

/// Top-level error for the host harness binary.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: crate::config::ConfigError,
    },

    /// Reading the event feed failed.
    #[error("event feed error: {source}")]
    Feed {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
