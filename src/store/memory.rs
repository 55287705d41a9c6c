//! In-process note store.
//!
//! Notes live in a `Vec` in insertion order, so listing order matches what the
//! Spanner store yields. Nothing survives a restart.

use anyhow::{Result, bail};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ListResult, NoteStore, title_matches};
use crate::models::{Note, NoteFields};

#[derive(Debug, Clone, Default)]
pub struct MemoryNoteStore {
    notes: Arc<RwLock<Vec<Note>>>,
    /// Every operation fails when set; lets tests exercise the 500 paths.
    unavailable: bool,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every operation fails as if the backend were unreachable.
    #[cfg(test)]
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable {
            bail!("in-memory store is marked unavailable");
        }
        Ok(())
    }
}

#[async_trait]
impl NoteStore for MemoryNoteStore {
    async fn insert(&self, fields: NoteFields) -> Result<Note> {
        self.check_available()?;

        let note = Note {
            id: Uuid::new_v4(),
            title: fields.title,
            description: fields.description,
        };
        self.notes.write().await.push(note.clone());

        tracing::debug!("Inserted note with id: {}", note.id);
        Ok(note)
    }

    async fn list(
        &self,
        title_filter: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<ListResult> {
        self.check_available()?;

        let notes = self.notes.read().await;
        let matching: Vec<&Note> = notes
            .iter()
            .filter(|note| title_filter.is_none_or(|filter| title_matches(&note.title, filter)))
            .collect();

        let skip = usize::try_from(offset.max(0)).unwrap_or(usize::MAX);
        let take = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
        let page = matching.iter().skip(skip).take(take).map(|note| (*note).clone()).collect();

        Ok(ListResult {
            notes: page,
            total_count: matching.len() as i64,
        })
    }

    async fn update(&self, id: Uuid, fields: NoteFields) -> Result<Option<Note>> {
        self.check_available()?;

        let mut notes = self.notes.write().await;
        Ok(notes.iter_mut().find(|note| note.id == id).map(|note| {
            note.title = fields.title;
            note.description = fields.description;
            note.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Note>> {
        self.check_available()?;

        let mut notes = self.notes.write().await;
        let Some(index) = notes.iter().position(|note| note.id == id) else {
            return Ok(None);
        };
        Ok(Some(notes.remove(index)))
    }

    async fn delete_many(&self, ids: &[Uuid]) -> Result<u64> {
        self.check_available()?;

        let ids: HashSet<&Uuid> = ids.iter().collect();
        let mut notes = self.notes.write().await;
        let before = notes.len();
        notes.retain(|note| !ids.contains(&note.id));

        Ok((before - notes.len()) as u64)
    }

    async fn health_check(&self) -> Result<()> {
        self.check_available()
    }
}
