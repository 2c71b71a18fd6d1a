use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use bytes::Bytes;
use tokio::{fs::OpenOptions, io::AsyncWriteExt};

use crate::{
    domain::{DownloadError, DownloadLink, FileSaver, ObjectUrl},
    utils::{numbered_file_names, sanitize_filename},
};

const OBJECT_URL_PREFIX: &str = "blob:resume-portfolio/";
const MAX_DUPLICATE_NAMES: usize = 1000;

/// Saves downloads to disk, holding payloads in memory between
/// `create_object_url` and `revoke_object_url`.
pub struct DiskFileSaver {
    download_dir: Option<PathBuf>,
    ask_for_location: bool,
    blobs: Mutex<HashMap<ObjectUrl, Bytes>>,
    next_id: AtomicU64,
}

impl DiskFileSaver {
    pub fn new(download_dir: Option<PathBuf>, ask_for_location: bool) -> Self {
        Self {
            download_dir,
            ask_for_location,
            blobs: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Number of object URLs created and not yet revoked.
    #[cfg(test)]
    pub fn outstanding(&self) -> usize {
        self.blobs.lock().map(|b| b.len()).unwrap_or(0)
    }

    fn resolve_download_dir(&self) -> PathBuf {
        self.download_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    fn payload(&self, url: &ObjectUrl) -> Result<Bytes, DownloadError> {
        let blobs = self
            .blobs
            .lock()
            .map_err(|_| DownloadError::Delivery("object URL registry poisoned".to_string()))?;
        blobs
            .get(url)
            .cloned()
            .ok_or_else(|| DownloadError::Delivery(format!("{} has been revoked", url)))
    }

    /// Write `payload` to a new file in `dir`, never replacing an existing
    /// one. Names are claimed with `create_new`, so a file that appears
    /// concurrently just moves us on to the next numbered name.
    async fn write_new_file(
        dir: &Path,
        filename: &str,
        payload: &[u8],
    ) -> Result<PathBuf, DownloadError> {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| DownloadError::Delivery(format!("Failed to create {}: {}", dir.display(), e)))?;

        for name in numbered_file_names(filename).take(MAX_DUPLICATE_NAMES) {
            let path = dir.join(name);
            let mut file = match OpenOptions::new().write(true).create_new(true).open(&path).await {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => {
                    return Err(DownloadError::Delivery(format!(
                        "Failed to create {}: {}",
                        path.display(),
                        e
                    )))
                }
            };

            file.write_all(payload)
                .await
                .map_err(|e| DownloadError::Delivery(format!("Write error: {}", e)))?;
            file.sync_all()
                .await
                .map_err(|e| DownloadError::Delivery(format!("Failed to sync file: {}", e)))?;
            return Ok(path);
        }

        Err(DownloadError::Delivery(format!(
            "no free name for {} in {}",
            filename,
            dir.display()
        )))
    }

    /// Ask the user where to save. The chosen path may replace an existing
    /// file; the dialog has already confirmed that.
    async fn save_with_dialog(
        dir: &Path,
        filename: &str,
        payload: &[u8],
    ) -> Result<Option<PathBuf>, DownloadError> {
        let Some(path) = rfd::AsyncFileDialog::new()
            .set_directory(dir)
            .set_file_name(filename)
            .save_file()
            .await
            .map(|handle| handle.path().to_path_buf())
        else {
            return Ok(None);
        };

        tokio::fs::write(&path, payload)
            .await
            .map_err(|e| DownloadError::Delivery(format!("Failed to write {}: {}", path.display(), e)))?;
        Ok(Some(path))
    }
}

impl FileSaver for DiskFileSaver {
    fn create_object_url(&self, payload: Bytes) -> Result<ObjectUrl, DownloadError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let url = ObjectUrl::new(format!("{}{}", OBJECT_URL_PREFIX, id));
        self.blobs
            .lock()
            .map_err(|_| DownloadError::Delivery("object URL registry poisoned".to_string()))?
            .insert(url.clone(), payload);
        Ok(url)
    }

    fn revoke_object_url(&self, url: &ObjectUrl) {
        if let Ok(mut blobs) = self.blobs.lock() {
            blobs.remove(url);
        }
    }

    async fn click(&self, link: &DownloadLink) -> Result<(), DownloadError> {
        let payload = self.payload(&link.href)?;

        let filename = sanitize_filename(&link.download);
        if filename.is_empty() {
            return Err(DownloadError::Delivery(format!(
                "unusable file name {:?}",
                link.download
            )));
        }

        let dir = self.resolve_download_dir();
        let path = if self.ask_for_location {
            match Self::save_with_dialog(&dir, &filename, &payload).await? {
                Some(path) => path,
                None => {
                    tracing::info!("save dialog dismissed, nothing written");
                    return Ok(());
                }
            }
        } else {
            Self::write_new_file(&dir, &filename, &payload).await?
        };

        tracing::info!(path = %path.display(), bytes = payload.len(), "saved download");
        Ok(())
    }
}
