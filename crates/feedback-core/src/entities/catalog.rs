use std::future::Future;

use crate::entities::SqliteStore;
use crate::entities::dao::ResourceRecord;

/// Read-only lookups into the host catalog's `resource` table.
pub trait CatalogStore: Send + Sync + 'static {
    fn get_resource(
        &self,
        resource_id: &str,
    ) -> impl Future<Output = Result<Option<ResourceRecord>, sqlx::Error>> + Send;
}

impl CatalogStore for SqliteStore {
    async fn get_resource(&self, resource_id: &str) -> Result<Option<ResourceRecord>, sqlx::Error> {
        let row: Option<(String, String, Option<String>)> =
            sqlx::query_as("SELECT id, package_id, url FROM resource WHERE id = ?1")
                .bind(resource_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|(id, package_id, url)| ResourceRecord { id, package_id, url }))
    }
}
