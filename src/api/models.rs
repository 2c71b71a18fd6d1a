use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::domain::AppError;

pub const RESUME_URL: &str =
    "https://docs.google.com/document/d/16fVcZ9-FRQkPdNRK_I5Qs4CrpgtV7abOTbd8S0kmXPw/export?format=pdf";
pub const RESUME_FILENAME: &str = "Yariv-Menachem-Resume.pdf";

/// Configuration for the resume download
#[derive(Debug, Clone)]
pub struct DownloadConfig {
    pub source_url: String,
    pub target_filename: String,
    /// Where saved files land. `None` means the platform Downloads folder.
    pub download_dir: Option<PathBuf>,
    /// Show a save dialog instead of writing straight to `download_dir`.
    pub ask_for_location: bool,
    /// Upper bound on fetching headers and body. `None` waits forever.
    pub fetch_timeout: Option<Duration>,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            source_url: RESUME_URL.to_string(),
            target_filename: RESUME_FILENAME.to_string(),
            download_dir: None,
            ask_for_location: false,
            fetch_timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl DownloadConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        let url = Url::parse(&self.source_url)
            .map_err(|e| AppError::Config(format!("source_url {:?}: {}", self.source_url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "source_url must be http(s), got {}",
                url.scheme()
            )));
        }

        let name = self.target_filename.trim();
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(AppError::Config(format!(
                "target_filename must be a plain file name, got {:?}",
                self.target_filename
            )));
        }

        if self.fetch_timeout == Some(Duration::ZERO) {
            return Err(AppError::Config("fetch_timeout must be non-zero".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = DownloadConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.target_filename, "Yariv-Menachem-Resume.pdf");
        assert!(config.source_url.ends_with("export?format=pdf"));
    }

    #[test]
    fn test_rejects_bad_url() {
        let config = DownloadConfig {
            source_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(AppError::Config(_))));

        let config = DownloadConfig {
            source_url: "file:///etc/passwd".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_rejects_path_like_filename() {
        for name in ["", "  ", "../resume.pdf", "dir/resume.pdf", ".."] {
            let config = DownloadConfig {
                target_filename: name.to_string(),
                ..Default::default()
            };
            assert!(config.validate().is_err(), "accepted {:?}", name);
        }
    }
}
