use super::backend;
use crate::deadline::{with_deadline, Deadlines};
use crate::models::DatabaseInfo;
use crate::names::check_db_name;
use crate::store::DocumentStore;
use panel_core::{ServiceError, ServiceResult};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct DatabaseService {
    store: Arc<dyn DocumentStore>,
    deadlines: Deadlines,
}

impl DatabaseService {
    pub fn new(store: Arc<dyn DocumentStore>, deadlines: Deadlines) -> Self {
        Self { store, deadlines }
    }

    /// Collection names of `db`.
    pub async fn database_info(&self, db: &str) -> ServiceResult<DatabaseInfo> {
        check_db_name(db)?;
        info!("Getting info for database '{}'", db);

        let collections = with_deadline(
            "database_info",
            self.deadlines.short,
            self.store.list_collection_names(db),
        )
        .await
        .map_err(backend("failed to get database info"))?;

        Ok(DatabaseInfo {
            database: db.to_string(),
            collections_count: collections.len(),
            collections,
            status: "active",
        })
    }

    /// Ping the deployment on behalf of `db`.
    pub async fn test_connection(&self, db: &str) -> ServiceResult<()> {
        check_db_name(db)?;

        with_deadline("test_connection", self.deadlines.short, self.store.ping(db))
            .await
            .map_err(|e| ServiceError::backend(format!("failed to connect to database {db}: {e}")))?;

        info!("Connection to database '{}' is healthy", db);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::time::Duration;

    #[tokio::test]
    async fn test_database_info() {
        let store = MemoryStore::new()
            .with_documents("app", "users", vec![])
            .with_documents("app", "orders", vec![]);
        let service = DatabaseService::new(Arc::new(store), Deadlines::default());

        let info = service.database_info("app").await.unwrap();
        assert_eq!(info.collections, vec!["orders", "users"]);
        assert_eq!(info.collections_count, 2);
        assert_eq!(info.status, "active");

        let unknown = service.database_info("other").await.unwrap();
        assert_eq!(unknown.collections_count, 0);
    }

    #[tokio::test]
    async fn test_connection_checks() {
        let service = DatabaseService::new(Arc::new(MemoryStore::new()), Deadlines::default());
        service.test_connection("app").await.unwrap();
        assert!(matches!(
            service.test_connection("a/b").await,
            Err(ServiceError::Validation(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_connection_timeout() {
        let store = MemoryStore::new().with_latency(Duration::from_secs(30));
        let service = DatabaseService::new(Arc::new(store), Deadlines::default());

        let err = service.test_connection("app").await.unwrap_err();
        assert!(err.to_string().starts_with("failed to connect to database app"));
    }
}
