use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::watch;

use crate::{
    api::DownloadConfig,
    domain::{
        DownloadError, DownloadLink, DownloadOutcome, DownloadStatus, FetchResponse, Fetcher,
        FileSaver, Navigator, ObjectUrl,
    },
};

/// Fetches the resume and saves it locally, or opens it in the browser when
/// that fails.
///
/// The orchestrator owns the download status; the page only reads it through
/// [`DownloadOrchestrator::status`].
pub struct DownloadOrchestrator<F, S, N> {
    fetcher: Arc<F>,
    saver: Arc<S>,
    navigator: Arc<N>,
    config: Arc<DownloadConfig>,
    status: Arc<watch::Sender<DownloadStatus>>,
}

impl<F, S, N> Clone for DownloadOrchestrator<F, S, N> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
            saver: Arc::clone(&self.saver),
            navigator: Arc::clone(&self.navigator),
            config: Arc::clone(&self.config),
            status: Arc::clone(&self.status),
        }
    }
}

impl<F, S, N> DownloadOrchestrator<F, S, N>
where
    F: Fetcher,
    S: FileSaver,
    N: Navigator,
{
    pub fn new(config: DownloadConfig, fetcher: F, saver: S, navigator: N) -> Self {
        let (status, _) = watch::channel(DownloadStatus::Idle);
        Self {
            fetcher: Arc::new(fetcher),
            saver: Arc::new(saver),
            navigator: Arc::new(navigator),
            config: Arc::new(config),
            status: Arc::new(status),
        }
    }

    pub fn status(&self) -> DownloadStatus {
        *self.status.borrow()
    }

    pub fn config(&self) -> &DownloadConfig {
        &self.config
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Start a download attempt.
    ///
    /// The status is InFlight by the time this returns, before any I/O has
    /// been issued. Returns `None` without side effects if an attempt is
    /// already running.
    pub fn initiate_download(&self) -> Option<DownloadTask<F, S, N>> {
        let started = self.status.send_if_modified(|status| {
            if *status == DownloadStatus::Idle {
                *status = DownloadStatus::InFlight;
                true
            } else {
                false
            }
        });

        if !started {
            tracing::debug!("download already in flight, ignoring activation");
            return None;
        }

        tracing::info!(url = %self.config.source_url, "starting resume download");
        Some(DownloadTask {
            fetcher: Arc::clone(&self.fetcher),
            saver: Arc::clone(&self.saver),
            navigator: Arc::clone(&self.navigator),
            config: Arc::clone(&self.config),
            status: StatusGuard {
                status: Arc::clone(&self.status),
            },
        })
    }
}

/// One in-flight download attempt. Dropping it, run or not, puts the
/// orchestrator back to Idle.
pub struct DownloadTask<F, S, N> {
    fetcher: Arc<F>,
    saver: Arc<S>,
    navigator: Arc<N>,
    config: Arc<DownloadConfig>,
    status: StatusGuard,
}

impl<F, S, N> DownloadTask<F, S, N>
where
    F: Fetcher,
    S: FileSaver,
    N: Navigator,
{
    pub async fn run(self) -> DownloadOutcome {
        let outcome = match self.deliver().await {
            Ok(()) => {
                tracing::info!(filename = %self.config.target_filename, "resume delivered");
                DownloadOutcome::Saved
            }
            Err(e) => {
                tracing::warn!(error = %e, "download failed, opening source url in browser");
                if let Err(nav_err) = self.navigator.open_in_new_context(&self.config.source_url) {
                    tracing::warn!(error = %nav_err, "fallback navigation failed");
                }
                DownloadOutcome::FellBack(e)
            }
        };

        self.status.set(outcome.status());
        outcome
    }

    async fn deliver(&self) -> Result<(), DownloadError> {
        let payload = self.retrieve().await?;
        tracing::debug!(bytes = payload.len(), "payload received");

        let lease = ObjectUrlLease::create(self.saver.as_ref(), payload)?;
        let link = DownloadLink {
            href: lease.url.clone(),
            download: self.config.target_filename.clone(),
        };
        self.saver.click(&link).await
    }

    async fn retrieve(&self) -> Result<Bytes, DownloadError> {
        match self.config.fetch_timeout {
            Some(limit) => tokio::time::timeout(limit, self.fetch_payload())
                .await
                .map_err(|_| DownloadError::Timeout(limit))?,
            None => self.fetch_payload().await,
        }
    }

    async fn fetch_payload(&self) -> Result<Bytes, DownloadError> {
        let response = self.fetcher.fetch(&self.config.source_url).await?;
        if !response.ok() {
            return Err(DownloadError::Protocol(response.status()));
        }
        response.bytes().await
    }
}

/// Resets the shared status to Idle when the task ends, however it ends.
struct StatusGuard {
    status: Arc<watch::Sender<DownloadStatus>>,
}

impl StatusGuard {
    fn set(&self, status: DownloadStatus) {
        self.status.send_replace(status);
    }
}

impl Drop for StatusGuard {
    fn drop(&mut self) {
        self.status.send_replace(DownloadStatus::Idle);
    }
}

/// An object URL that is revoked when the lease goes out of scope.
struct ObjectUrlLease<'a, S: FileSaver> {
    saver: &'a S,
    url: ObjectUrl,
}

impl<'a, S: FileSaver> ObjectUrlLease<'a, S> {
    fn create(saver: &'a S, payload: Bytes) -> Result<Self, DownloadError> {
        let url = saver.create_object_url(payload)?;
        Ok(Self { saver, url })
    }
}

impl<S: FileSaver> Drop for ObjectUrlLease<'_, S> {
    fn drop(&mut self) {
        self.saver.revoke_object_url(&self.url);
    }
}


/// Scenarios against a real HTTP server and the on-disk saver.
#[cfg(test)]
mod scenarios {
    use super::*;
    use crate::api::HttpFetcher;
    use crate::platform::DiskFileSaver;
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct RecordingNavigator {
        opened: Arc<Mutex<Vec<String>>>,
    }

    impl Navigator for RecordingNavigator {
        fn open_in_new_context(&self, url: &str) -> Result<(), DownloadError> {
            self.opened.lock().unwrap().push(url.to_string());
            Ok(())
        }
    }

    fn orchestrator(
        source_url: String,
        dir: &tempfile::TempDir,
        navigator: RecordingNavigator,
    ) -> DownloadOrchestrator<HttpFetcher, DiskFileSaver, RecordingNavigator> {
        let config = DownloadConfig {
            source_url,
            download_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        let saver = DiskFileSaver::new(config.download_dir.clone(), false);
        DownloadOrchestrator::new(config, HttpFetcher::new(), saver, navigator)
    }

    #[tokio::test]
    async fn scenario_a_pdf_is_saved() {
        let body: Vec<u8> = vec![0x25, 0x50, 0x44, 0x46, 0x2d, 0x31, 0x2e, 0x34, 0x0a];
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/export")
            .match_query(mockito::Matcher::UrlEncoded("format".into(), "pdf".into()))
            .with_status(200)
            .with_header("content-type", "application/pdf")
            .with_body(body.clone())
            .expect(1)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let navigator = RecordingNavigator::default();
        let source = format!("{}/export?format=pdf", server.url());
        let orchestrator = orchestrator(source, &dir, navigator.clone());

        assert_eq!(orchestrator.status(), DownloadStatus::Idle);
        let task = orchestrator.initiate_download().unwrap();
        assert_eq!(orchestrator.status(), DownloadStatus::InFlight);
        let outcome = task.run().await;
        assert_eq!(orchestrator.status(), DownloadStatus::Idle);

        assert_eq!(outcome, DownloadOutcome::Saved);
        let saved = std::fs::read(dir.path().join("Yariv-Menachem-Resume.pdf")).unwrap();
        assert_eq!(saved, body);
        assert!(navigator.opened.lock().unwrap().is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn scenario_b_forbidden_opens_source_url() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/export")
            .match_query(mockito::Matcher::Any)
            .with_status(403)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let navigator = RecordingNavigator::default();
        let source = format!("{}/export?format=pdf", server.url());
        let orchestrator = orchestrator(source.clone(), &dir, navigator.clone());

        let task = orchestrator.initiate_download().unwrap();
        assert_eq!(orchestrator.status(), DownloadStatus::InFlight);
        let outcome = task.run().await;
        assert_eq!(orchestrator.status(), DownloadStatus::Idle);

        assert_eq!(outcome, DownloadOutcome::FellBack(DownloadError::Protocol(403)));
        assert_eq!(*navigator.opened.lock().unwrap(), vec![source]);
        assert!(!dir.path().join("Yariv-Menachem-Resume.pdf").exists());
    }

    #[tokio::test]
    async fn scenario_c_offline_opens_source_url() {
        // Reserve a port, then free it so nothing is listening there.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let dir = tempfile::tempdir().unwrap();
        let navigator = RecordingNavigator::default();
        let source = format!("http://{}/export?format=pdf", addr);
        let orchestrator = orchestrator(source.clone(), &dir, navigator.clone());

        let task = orchestrator.initiate_download().unwrap();
        assert_eq!(orchestrator.status(), DownloadStatus::InFlight);
        let outcome = task.run().await;
        assert_eq!(orchestrator.status(), DownloadStatus::Idle);

        assert!(matches!(outcome, DownloadOutcome::FellBack(DownloadError::Network(_))));
        assert_eq!(*navigator.opened.lock().unwrap(), vec![source]);
    }
}
