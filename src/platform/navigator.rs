use std::process::{Command, Stdio};

use crate::domain::{DownloadError, Navigator};

/// Opens URLs with the desktop's default handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemNavigator;

impl SystemNavigator {
    fn command(url: &str) -> Command {
        if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(url);
            cmd
        } else if cfg!(target_os = "windows") {
            // The empty string is the window title `start` expects first.
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", "", url]);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(url);
            cmd
        }
    }
}

impl Navigator for SystemNavigator {
    fn open_in_new_context(&self, url: &str) -> Result<(), DownloadError> {
        tracing::debug!(url, "opening in browser");
        Self::command(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_| ())
            .map_err(|e| DownloadError::Navigation(e.to_string()))
    }
}
