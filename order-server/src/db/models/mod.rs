//! Database models
//!
//! Persisted representations (snake_case, SurrealDB `RecordId` ids). The
//! wire models live in `shared::models`; conversion happens in
//! `api::convert`.

pub mod counter;
pub mod menu_item;
pub mod order;
pub mod serde_helpers;

pub use counter::SequenceCounter;
pub use menu_item::MenuItem;
pub use order::{DbOrder, DbOrderLine};
