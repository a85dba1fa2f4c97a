//! Menu Item Repository
//!
//! Read-only lookup used for server-trusted price snapshots at order time.

use super::{BaseRepository, RepoResult};
use crate::db::models::MenuItem;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find a menu item by id. A malformed or unknown id resolves to `None`
    /// — historical order lines must keep working after the menu item they
    /// reference is deleted, so this is not an error path.
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<MenuItem>> {
        let Ok(thing) = id.parse::<RecordId>() else {
            return Ok(None);
        };
        let item: Option<MenuItem> = self.base.db().select(thing).await?;
        Ok(item)
    }
}
