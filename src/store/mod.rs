//! Storage abstraction for part records.
//!
//! The [`PartStore`] trait defines every persistence operation the service
//! needs, so the SQLite backend and the in-memory backend are
//! interchangeable behind an `Arc<dyn PartStore>`.
//!
//! Implementations must be `Send + Sync` to be shared across request handlers.

pub mod memory;
pub mod sqlite;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{NewPart, Part, PartUpdate};

pub use memory::InMemoryStore;
pub use sqlite::SqliteStore;

/// Abstract storage backend for parts.
///
/// # Operations
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`insert`](PartStore::insert) | Persist a new part, assigning its id |
/// | [`get`](PartStore::get) | Fetch a part by id |
/// | [`list`](PartStore::list) | Page through parts in id order |
/// | [`update`](PartStore::update) | Apply a partial update |
/// | [`delete`](PartStore::delete) | Hard-delete a part |
/// | [`descriptions`](PartStore::descriptions) | All descriptions in id order |
///
/// `insert` and `update` fail with [`Error::Validation`](crate::error::Error::Validation)
/// when a field constraint is violated or the SKU is already taken.
#[async_trait]
pub trait PartStore: Send + Sync {
    /// Insert a new part. Ids are never reused, even after deletion.
    async fn insert(&self, part: NewPart) -> Result<Part>;

    async fn get(&self, id: i64) -> Result<Option<Part>>;

    /// Up to `limit` parts in id order, after skipping the first `skip`.
    async fn list(&self, skip: u32, limit: u32) -> Result<Vec<Part>>;

    /// Apply `update` to the part with `id`. Returns `Ok(None)` if absent.
    async fn update(&self, id: i64, update: PartUpdate) -> Result<Option<Part>>;

    /// Delete the part with `id`, failing with `NotFound` if it is absent.
    async fn delete(&self, id: i64) -> Result<()>;

    async fn descriptions(&self) -> Result<Vec<Option<String>>>;
}
