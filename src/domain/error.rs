use std::time::Duration;

use thiserror::Error;

/// Everything that can go wrong while fetching and delivering the resume.
///
/// None of these reach the user directly: the orchestrator logs them and
/// falls back to opening the document URL in the browser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DownloadError {
    #[error("network error: {0}")]
    Network(String),

    #[error("server responded with status {0}")]
    Protocol(u16),

    #[error("could not deliver file: {0}")]
    Delivery(String),

    #[error("no response within {0:?}")]
    Timeout(Duration),

    #[error("could not open browser: {0}")]
    Navigation(String),
}

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid resume content: {0}")]
    Content(String),
}
