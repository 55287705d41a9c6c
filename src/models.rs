use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

/// A persisted note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub description: String,
}

/// Request body for creating or replacing a note
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct NoteInput {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// A note body whose fields have both been checked as present and non-empty
#[derive(Debug, Clone, PartialEq)]
pub struct NoteFields {
    pub title: String,
    pub description: String,
}

impl NoteInput {
    pub const REQUIRED_MESSAGE: &'static str = "Title and description are required";

    pub fn validate(self) -> Result<NoteFields, ApiError> {
        match (self.title, self.description) {
            (Some(title), Some(description)) if !title.is_empty() && !description.is_empty() => {
                Ok(NoteFields { title, description })
            }
            _ => Err(ApiError::InvalidInput(Self::REQUIRED_MESSAGE.to_string())),
        }
    }
}

/// Query parameters for list endpoint
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub title: Option<String>,
}

/// Pagination summary returned alongside a page of notes
#[derive(Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListMetadata {
    pub total_notes: i64,
    pub total_pages: i64,
    pub current_page: i64,
}

/// Response type for list endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ListResponse {
    pub data: Vec<Note>,
    pub metadata: ListMetadata,
}

/// Response type for successful PUT operations
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResponse {
    pub message: String,
    pub updated_note: Note,
}

/// Response type for successful single DELETE operations
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub message: String,
    pub deleted_note: Note,
}

/// Request body for bulk deletion
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct BulkDeleteRequest {
    pub ids: Option<Vec<String>>,
}

impl BulkDeleteRequest {
    pub const INVALID_MESSAGE: &'static str = "Invalid or empty array of note IDs";

    /// Parse every id up front; an empty, missing or malformed list is rejected whole.
    pub fn validate(self) -> Result<Vec<Uuid>, ApiError> {
        let ids = match self.ids {
            Some(ids) if !ids.is_empty() => ids,
            _ => return Err(ApiError::InvalidInput(Self::INVALID_MESSAGE.to_string())),
        };

        ids.iter()
            .map(|id| Uuid::parse_str(id).map_err(|_| ApiError::InvalidId(id.clone())))
            .collect()
    }
}

/// Response type for bulk deletion
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteResponse {
    pub message: String,
    pub deleted_count: u64,
}
