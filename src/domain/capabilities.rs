//! Host capabilities the download orchestrator depends on.
//!
//! Production implementations live in `api` (HTTP) and `platform` (disk and
//! browser); tests swap in fakes.

use std::future::Future;

use bytes::Bytes;

use super::{DownloadError, DownloadLink, ObjectUrl};

/// A completed HTTP exchange whose body has not been read yet.
pub trait FetchResponse: Send + 'static {
    /// Whether the status code is in the success range.
    fn ok(&self) -> bool;

    fn status(&self) -> u16;

    /// Consume the response and read the whole body.
    fn bytes(self) -> impl Future<Output = Result<Bytes, DownloadError>> + Send;
}

pub trait Fetcher: Send + Sync + 'static {
    type Response: FetchResponse;

    fn fetch(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<Self::Response, DownloadError>> + Send;
}

/// Turns an in-memory payload into a file on the user's machine.
pub trait FileSaver: Send + Sync + 'static {
    fn create_object_url(&self, payload: Bytes) -> Result<ObjectUrl, DownloadError>;

    /// Release the payload behind `url`. Revoking an unknown URL is a no-op.
    fn revoke_object_url(&self, url: &ObjectUrl);

    /// Activate a download link, saving its target under the suggested name.
    fn click(
        &self,
        link: &DownloadLink,
    ) -> impl Future<Output = Result<(), DownloadError>> + Send;
}

/// Opens a URL in a new browsing context.
pub trait Navigator: Send + Sync + 'static {
    fn open_in_new_context(&self, url: &str) -> Result<(), DownloadError>;
}
