//! Database Module
//!
//! Embedded SurrealDB storage for orders, daily sequence counters and the
//! menu item snapshot source.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "restaurant";
const DATABASE: &str = "ordering";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database at `db_path`
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        tracing::info!(path = %db_path, "Database connection established");
        Ok(Self { db })
    }

    /// In-memory database, used by tests
    pub async fn memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;
        Ok(Self { db })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::MenuItem;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn on_disk_database_opens_and_stores() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.db");
        let service = DbService::new(path.to_str().unwrap()).await.unwrap();

        let created: Option<MenuItem> = service
            .db
            .create(("menu_item", "tea"))
            .content(MenuItem {
                id: None,
                name: "Tea".to_string(),
                price: Decimal::from(10),
                available: true,
            })
            .await
            .unwrap();
        assert_eq!(created.unwrap().name, "Tea");
    }
}
