use feedback_core::{DownloadSummary, ResourceDownloadCount};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Counter of a single resource. `download_count` is `null` until the
/// resource is downloaded for the first time.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResourceDownloadsResponse {
    pub resource_id: String,
    pub download_count: Option<i64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResourceCountResponse {
    pub resource_id: String,
    pub download_count: i64,
}

/// Aggregated counter of a package. `download_count` is `null` when none
/// of its resources has been downloaded.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PackageDownloadsResponse {
    pub package_id: String,
    pub download_count: Option<i64>,
    pub resources: Vec<ResourceCountResponse>,
}

impl ResourceDownloadsResponse {
    pub fn from_summary(resource_id: String, summary: Option<DownloadSummary>) -> Self {
        match summary {
            Some(s) => Self {
                resource_id,
                download_count: Some(s.download_count),
                created_at: Some(s.created_at.to_rfc3339()),
                updated_at: Some(s.updated_at.to_rfc3339()),
            },
            None => Self {
                resource_id,
                download_count: None,
                created_at: None,
                updated_at: None,
            },
        }
    }
}

impl From<ResourceDownloadCount> for ResourceCountResponse {
    fn from(c: ResourceDownloadCount) -> Self {
        Self {
            resource_id: c.resource_id,
            download_count: c.download_count,
        }
    }
}
