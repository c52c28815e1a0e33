//! feedback-core: download counters for dataset resources.
//!
//! [`download::DownloadService`] is the entry point used by request
//! handlers. It records one increment per observed download, reads a
//! resource's counter and aggregates counters across a package. Storage is
//! abstracted behind [`entities::DownloadStore`]; the default backend is
//! [`entities::SqliteStore`].

pub mod clock;
pub mod download;
pub mod entities;
pub mod error;

pub use clock::{Clock, SystemClock};
pub use download::DownloadService;
pub use entities::{
    CatalogStore, DownloadStore, DownloadSummary, ResourceDownloadCount, ResourceRecord,
    SqliteStore, StoreOptions,
};
pub use error::DownloadError;
