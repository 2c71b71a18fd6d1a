use bytes::Bytes;
use reqwest::{Client, Response};

use crate::domain::{DownloadError, FetchResponse, Fetcher};

impl From<reqwest::Error> for DownloadError {
    fn from(e: reqwest::Error) -> Self {
        DownloadError::Network(e.to_string())
    }
}

/// `Fetcher` backed by a shared reqwest client.
#[derive(Clone, Default)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

pub struct HttpResponse {
    inner: Response,
}

impl FetchResponse for HttpResponse {
    fn ok(&self) -> bool {
        self.inner.status().is_success()
    }

    fn status(&self) -> u16 {
        self.inner.status().as_u16()
    }

    async fn bytes(self) -> Result<Bytes, DownloadError> {
        Ok(self.inner.bytes().await?)
    }
}

impl Fetcher for HttpFetcher {
    type Response = HttpResponse;

    /// Only transport failures are errors here; status handling is left to
    /// the caller.
    async fn fetch(&self, url: &str) -> Result<HttpResponse, DownloadError> {
        tracing::debug!(url, "requesting document");
        let inner = self.client.get(url).send().await?;
        tracing::debug!(status = %inner.status(), length = ?inner.content_length(), "response headers received");
        Ok(HttpResponse { inner })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_success_reads_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/export")
            .with_status(200)
            .with_header("content-type", "application/pdf")
            .with_body(b"%PDF-1.7 body".as_slice())
            .create_async()
            .await;

        let fetcher = HttpFetcher::new();
        let response = fetcher
            .fetch(&format!("{}/export", server.url()))
            .await
            .unwrap();
        assert!(response.ok());
        assert_eq!(response.status(), 200);
        assert_eq!(response.bytes().await.unwrap(), Bytes::from_static(b"%PDF-1.7 body"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_error_status_is_not_ok() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/export")
            .with_status(403)
            .create_async()
            .await;

        let response = HttpFetcher::new()
            .fetch(&format!("{}/export", server.url()))
            .await
            .unwrap();
        assert!(!response.ok());
        assert_eq!(response.status(), 403);
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = HttpFetcher::new()
            .fetch(&format!("http://{}/export", addr))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, DownloadError::Network(_)));
    }
}
