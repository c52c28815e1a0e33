pub mod download;
pub mod resource;

pub use download::{DownloadSummary, ResourceDownloadCount};
pub use resource::ResourceRecord;
