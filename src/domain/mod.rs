pub mod capabilities;
pub mod error;
pub mod model;
pub mod resume;

pub use capabilities::{FetchResponse, Fetcher, FileSaver, Navigator};
pub use error::{AppError, DownloadError};
pub use model::{DownloadLink, DownloadOutcome, DownloadStatus, ObjectUrl};
pub use resume::Resume;
