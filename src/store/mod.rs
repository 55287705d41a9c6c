//! Note persistence.
//!
//! Handlers only see the [`NoteStore`] trait. `SpannerNoteStore` is the
//! production backend; `MemoryNoteStore` backs local runs and the test-suite.

pub mod memory;
mod provision;
pub mod spanner;

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Note, NoteFields};

pub use memory::MemoryNoteStore;
pub use spanner::SpannerNoteStore;

/// One page of a filtered listing plus the number of notes matching the filter
#[derive(Debug, Clone, PartialEq)]
pub struct ListResult {
    pub notes: Vec<Note>,
    pub total_count: i64,
}

/// Storage operations backing the notes API.
///
/// Each method is a single atomic operation on the store. Methods return
/// `Ok(None)` / `Ok(0)` for misses; `Err` is reserved for store failures.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Persist a new note under a freshly generated id.
    async fn insert(&self, fields: NoteFields) -> Result<Note>;

    /// List notes in insertion order.
    ///
    /// `title_filter` is a case-insensitive substring match on the title.
    /// `total_count` ignores `limit` and `offset`.
    async fn list(&self, title_filter: Option<&str>, limit: i64, offset: i64)
    -> Result<ListResult>;

    /// Replace both fields of an existing note, returning the updated note.
    async fn update(&self, id: Uuid, fields: NoteFields) -> Result<Option<Note>>;

    /// Remove a note, returning what was removed.
    async fn delete(&self, id: Uuid) -> Result<Option<Note>>;

    /// Remove every note whose id is in `ids`; unknown ids are ignored.
    async fn delete_many(&self, ids: &[Uuid]) -> Result<u64>;

    /// Cheap round trip proving the store is reachable.
    async fn health_check(&self) -> Result<()>;
}

/// Case-insensitive substring match used by the title filter.
pub fn title_matches(title: &str, filter: &str) -> bool {
    title.to_lowercase().contains(&filter.to_lowercase())
}
