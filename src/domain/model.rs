use std::fmt;

use super::DownloadError;

/// Lifecycle of a single resume download attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DownloadStatus {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    FailedFallback,
}

impl DownloadStatus {
    pub fn is_busy(self) -> bool {
        self != DownloadStatus::Idle
    }
}

/// How a finished attempt was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The payload was handed to the save mechanism.
    Saved,
    /// The direct save failed and the source URL was opened instead.
    FellBack(DownloadError),
}

impl DownloadOutcome {
    pub fn status(&self) -> DownloadStatus {
        match self {
            DownloadOutcome::Saved => DownloadStatus::Succeeded,
            DownloadOutcome::FellBack(_) => DownloadStatus::FailedFallback,
        }
    }
}

/// Short-lived handle to an in-memory payload, in the spirit of a `blob:` URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ephemeral anchor used to trigger a save: `href` points at the payload,
/// `download` is the suggested filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    pub href: ObjectUrl,
    pub download: String,
}
