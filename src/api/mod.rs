pub mod client;
pub mod models;

pub use client::HttpFetcher;
pub use models::DownloadConfig;
