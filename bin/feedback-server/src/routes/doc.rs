use utoipa::OpenApi;

use crate::routes::{download, health, v1};

#[derive(OpenApi)]
#[openapi(info(
    title = "feedback-server",
    description = "Download counters for dataset resources",
    version = "0.1.0"
))]
pub struct ApiDoc;

pub fn get_docs() -> utoipa::openapi::OpenApi {
    let mut root = ApiDoc::openapi();
    root.merge(health::HealthApi::openapi());
    root.merge(download::DownloadApi::openapi());
    root.merge(v1::api_docs());
    root
}
