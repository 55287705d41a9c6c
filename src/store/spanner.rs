use anyhow::{Context, Result};
use async_trait::async_trait;
use gcloud_spanner::client::{Client, ClientConfig, Error as SpannerError};
use gcloud_spanner::mutation::insert;
use gcloud_spanner::row::Row;
use gcloud_spanner::statement::Statement;
use gcloud_spanner::value::CommitTimestamp;
use std::sync::Arc;
use uuid::Uuid;

use super::provision::auto_provision;
use super::{ListResult, NoteStore};
use crate::config::SpannerConfig;
use crate::models::{Note, NoteFields};

pub(super) const NOTES_TABLE: &str = "notes";

/// Shareable Spanner-backed note store for use across async handlers
#[derive(Clone)]
pub struct SpannerNoteStore {
    inner: Arc<Client>,
}

impl SpannerNoteStore {
    /// Connect to the configured database
    ///
    /// The gcloud-spanner library detects SPANNER_EMULATOR_HOST on its own and
    /// talks to the emulator when it is set. The instance, database and notes
    /// table are created first if they don't exist.
    pub async fn from_config(config: &SpannerConfig) -> Result<Self> {
        auto_provision(config).await?;

        let database_path = config.database_path();

        match &config.emulator_host {
            Some(host) => tracing::info!("Connecting to Spanner emulator at: {}", host),
            None => tracing::info!("Connecting to production Spanner"),
        }

        let client = Client::new(&database_path, ClientConfig::default())
            .await
            .context("Failed to create Spanner client")?;

        tracing::info!(
            "Successfully connected to Spanner database: {}",
            database_path
        );

        Ok(Self {
            inner: Arc::new(client),
        })
    }

    /// Close the session pool
    ///
    /// Only closes once every clone handed to the router has been dropped.
    pub async fn close(self) {
        match Arc::try_unwrap(self.inner) {
            Ok(client) => {
                client.close().await;
                tracing::info!("Spanner client closed");
            }
            Err(_) => tracing::warn!("Spanner client still in use, skipping close"),
        }
    }
}

fn note_from_row(row: &Row) -> Result<Note> {
    let id: String = row.column_by_name("id")?;
    Ok(Note {
        id: Uuid::parse_str(&id).with_context(|| format!("Stored note id is not a UUID: {}", id))?,
        title: row.column_by_name("title")?,
        description: row.column_by_name("description")?,
    })
}

/// WHERE clause shared by the count and page queries of a listing
fn title_filter_clause(title_filter: Option<&str>) -> &'static str {
    if title_filter.is_some() {
        " WHERE STRPOS(LOWER(title), LOWER(@title)) > 0"
    } else {
        ""
    }
}

fn list_statement(sql: &str, title_filter: Option<&str>) -> Statement {
    let mut statement = Statement::new(sql);
    if let Some(title) = title_filter {
        statement.add_param("title", &title.to_string());
    }
    statement
}

#[async_trait]
impl NoteStore for SpannerNoteStore {
    async fn insert(&self, fields: NoteFields) -> Result<Note> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let mutation = insert(
            NOTES_TABLE,
            &["id", "title", "description", "created_at", "updated_at"],
            &[
                &id_str,
                &fields.title,
                &fields.description,
                &CommitTimestamp::new(),
                &CommitTimestamp::new(),
            ],
        );

        self.inner
            .apply(vec![mutation])
            .await
            .context("Failed to insert note into Spanner")?;

        tracing::debug!("Inserted note with id: {}", id);
        Ok(Note {
            id,
            title: fields.title,
            description: fields.description,
        })
    }

    async fn list(
        &self,
        title_filter: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<ListResult> {
        let filter = title_filter_clause(title_filter);

        let count_stmt = list_statement(
            &format!("SELECT COUNT(*) AS count FROM {}{}", NOTES_TABLE, filter),
            title_filter,
        );

        // One snapshot for both queries so the count matches the page.
        let mut tx = self
            .inner
            .read_only_transaction()
            .await
            .context("Failed to create read-only transaction for listing")?;

        let total_count: i64 = {
            let mut count_result = tx
                .query(count_stmt)
                .await
                .context("Failed to execute count query")?;

            match count_result.next().await? {
                Some(row) => row.column_by_name("count")?,
                None => 0,
            }
        };

        // Insertion order; id breaks ties between notes committed together.
        let data_stmt = list_statement(
            &format!(
                "SELECT id, title, description FROM {}{} ORDER BY created_at, id LIMIT {} OFFSET {}",
                NOTES_TABLE, filter, limit, offset
            ),
            title_filter,
        );

        let mut data_result = tx
            .query(data_stmt)
            .await
            .context("Failed to execute data query")?;

        let mut notes = Vec::new();
        while let Some(row) = data_result.next().await? {
            notes.push(note_from_row(&row)?);
        }

        tracing::debug!(
            "Listed {} notes (total: {}, title: {:?}, limit: {}, offset: {})",
            notes.len(),
            total_count,
            title_filter,
            limit,
            offset
        );

        Ok(ListResult { notes, total_count })
    }

    async fn update(&self, id: Uuid, fields: NoteFields) -> Result<Option<Note>> {
        let id_str = id.to_string();

        let (_, updated_rows) = self
            .inner
            .read_write_transaction(|tx| {
                let id_str = id_str.clone();
                let title = fields.title.clone();
                let description = fields.description.clone();
                Box::pin(async move {
                    let mut stmt = Statement::new(
                        "UPDATE notes SET title = @title, description = @description, \
                         updated_at = PENDING_COMMIT_TIMESTAMP() WHERE id = @id",
                    );
                    stmt.add_param("id", &id_str);
                    stmt.add_param("title", &title);
                    stmt.add_param("description", &description);
                    let count = tx.update(stmt).await?;
                    Ok::<_, SpannerError>(count)
                })
            })
            .await
            .context("Failed to update note in Spanner")?;

        if updated_rows == 0 {
            tracing::debug!("No note to update with id: {}", id);
            return Ok(None);
        }

        tracing::debug!("Updated note with id: {}", id);
        Ok(Some(Note {
            id,
            title: fields.title,
            description: fields.description,
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Note>> {
        let id_str = id.to_string();

        let (_, deleted) = self
            .inner
            .read_write_transaction(|tx| {
                let id_str = id_str.clone();
                Box::pin(async move {
                    let mut select =
                        Statement::new("SELECT title, description FROM notes WHERE id = @id");
                    select.add_param("id", &id_str);

                    let existing = {
                        let mut rows = tx.query(select).await?;
                        match rows.next().await? {
                            Some(row) => Some((
                                row.column_by_name::<String>("title")?,
                                row.column_by_name::<String>("description")?,
                            )),
                            None => None,
                        }
                    };

                    if existing.is_some() {
                        let mut delete = Statement::new("DELETE FROM notes WHERE id = @id");
                        delete.add_param("id", &id_str);
                        tx.update(delete).await?;
                    }
                    Ok::<_, SpannerError>(existing)
                })
            })
            .await
            .context("Failed to delete note from Spanner")?;

        tracing::debug!("Delete of note {} matched: {}", id, deleted.is_some());
        Ok(deleted.map(|(title, description)| Note {
            id,
            title,
            description,
        }))
    }

    async fn delete_many(&self, ids: &[Uuid]) -> Result<u64> {
        let ids: Vec<String> = ids.iter().map(Uuid::to_string).collect();

        let (_, deleted) = self
            .inner
            .read_write_transaction(|tx| {
                let ids = ids.clone();
                Box::pin(async move {
                    let mut stmt = Statement::new("DELETE FROM notes WHERE id IN UNNEST(@ids)");
                    stmt.add_param("ids", &ids);
                    let count = tx.update(stmt).await?;
                    Ok::<_, SpannerError>(count)
                })
            })
            .await
            .context("Failed to delete notes from Spanner")?;

        tracing::debug!("Deleted {} of {} requested notes", deleted, ids.len());
        Ok(u64::try_from(deleted).unwrap_or(0))
    }

    /// Executes `SELECT 1` to verify the database connection is alive
    async fn health_check(&self) -> Result<()> {
        let statement = Statement::new("SELECT 1");

        let mut tx = self
            .inner
            .single()
            .await
            .context("Failed to create health check transaction")?;

        let mut result_set = tx
            .query(statement)
            .await
            .context("Failed to execute health check query")?;

        if result_set.next().await?.is_some() {
            tracing::debug!("Health check query succeeded");
            Ok(())
        } else {
            Err(anyhow::anyhow!("Health check query returned no results"))
        }
    }
}
