use iced::Task;

use crate::api::{DownloadConfig, HttpFetcher};
use crate::application::DownloadOrchestrator;
use crate::domain::{DownloadOutcome, Navigator, Resume};
use crate::platform::{DiskFileSaver, SystemNavigator};
use crate::ui::{ResumeMessage, ResumeView};

pub type ResumeDownloader = DownloadOrchestrator<HttpFetcher, DiskFileSaver, SystemNavigator>;

pub struct ResumeApp {
    view: ResumeView,
    downloader: ResumeDownloader,
}

impl ResumeApp {
    pub fn new(resume: Resume, config: DownloadConfig) -> Self {
        let saver = DiskFileSaver::new(config.download_dir.clone(), config.ask_for_location);
        let downloader =
            DownloadOrchestrator::new(config, HttpFetcher::new(), saver, SystemNavigator);

        Self {
            view: ResumeView::new(resume),
            downloader,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    UiMessage(ResumeMessage),
    /// The download task finished, one way or the other
    DownloadFinished(DownloadOutcome),
}

pub fn update(app: &mut ResumeApp, message: Message) -> Task<Message> {
    match message {
        Message::UiMessage(ResumeMessage::DownloadPressed) => {
            match app.downloader.initiate_download() {
                Some(task) => {
                    app.view.is_downloading = app.downloader.status().is_busy();
                    app.view.status_message.clear();
                    // iced Task::perform runs in the background tokio executor
                    return Task::perform(task.run(), Message::DownloadFinished);
                }
                None => {
                    tracing::debug!("download button pressed while busy");
                }
            }
        }
        Message::UiMessage(ResumeMessage::LinkPressed(href)) => {
            if let Err(e) = app.downloader.navigator().open_in_new_context(&href) {
                tracing::warn!(href = %href, error = %e, "could not open link");
            }
        }
        Message::DownloadFinished(outcome) => {
            app.view.is_downloading = app.downloader.status().is_busy();
            app.view.status_message = match outcome {
                DownloadOutcome::Saved => {
                    format!("Saved {}", app.downloader.config().target_filename)
                }
                DownloadOutcome::FellBack(_) => {
                    "Opened the resume in your browser instead".to_string()
                }
            };
        }
    }
    Task::none()
}

pub fn view(app: &ResumeApp) -> iced::Element<'_, Message> {
    app.view.view().map(Message::UiMessage)
}
