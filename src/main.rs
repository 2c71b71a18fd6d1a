mod api;
mod app;
mod application;
mod domain;
mod platform;
mod ui;
mod utils;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api::DownloadConfig;
use crate::domain::Resume;

fn main() -> iced::Result {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("{}=info", env!("CARGO_CRATE_NAME")))),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = DownloadConfig::default();
    let resume = match config.validate().and_then(|_| Resume::embedded()) {
        Ok(resume) => resume,
        Err(e) => {
            tracing::error!(error = %e, "cannot start");
            std::process::exit(1);
        }
    };

    tracing::info!(
        name = %resume.profile.name,
        source = %config.source_url,
        "Starting resume portfolio v{}",
        env!("CARGO_PKG_VERSION")
    );

    let title = format!("{} | {}", resume.profile.name, resume.profile.title);
    iced::application(
        move || app::ResumeApp::new(resume.clone(), config.clone()),
        app::update,
        app::view,
    )
    .title(move |_: &app::ResumeApp| title.clone())
    .run()
}
