//! Notes repository over a single DynamoDB table.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::{CreateNoteRequest, Note, UpdateNoteRequest};
use crate::errors::{Error, Result};

/// Data access for the notes table.
#[derive(Debug, Clone)]
pub struct NoteRepository {
    client: Client,
    table_name: String,
}

impl NoteRepository {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self { client, table_name: table_name.into() }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Store a new note built from the creation request.
    pub async fn create(&self, request: CreateNoteRequest) -> Result<Note> {
        let note = Note::from_request(request);

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(note.to_item()))
            .send()
            .await
            .map_err(|e| Error::storage(format!("put_item failed: {}", e)))?;

        debug!(note_id = %note.id, "Stored note");
        Ok(note)
    }

    /// Fetch a note by ID.
    pub async fn get(&self, note_id: &str) -> Result<Option<Note>> {
        let response = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(note_id.to_string()))
            .send()
            .await
            .map_err(|e| Error::storage(format!("get_item failed: {}", e)))?;

        match response.item {
            Some(item) => Ok(Some(Note::from_item(&item)?)),
            None => Ok(None),
        }
    }

    /// List notes, newest first, up to `limit`.
    ///
    /// Backed by a table scan; the limit bounds how many items the scan
    /// examines, which is all this API needs for a single-table demo store.
    pub async fn list(&self, limit: u32) -> Result<Vec<Note>> {
        let response = self
            .client
            .scan()
            .table_name(&self.table_name)
            .limit(scan_limit(limit))
            .send()
            .await
            .map_err(|e| Error::storage(format!("scan failed: {}", e)))?;

        let mut notes = response
            .items()
            .iter()
            .map(Note::from_item)
            .collect::<Result<Vec<_>>>()?;
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notes)
    }

    /// Apply a partial update to an existing note.
    ///
    /// Returns the updated note, or `None` when the note does not exist. An
    /// update with no fields is a no-op that returns the current state. The
    /// read-back after the write tolerates eventual consistency by falling
    /// back to the pre-update note with the changes applied locally.
    pub async fn update(&self, note_id: &str, update: UpdateNoteRequest) -> Result<Option<Note>> {
        let Some(existing) = self.get(note_id).await? else {
            return Ok(None);
        };

        if update.is_empty() {
            return Ok(Some(existing));
        }

        let updated_at = Utc::now();
        let (expression, names, values) = build_update_expression(&update, updated_at);

        self.client
            .update_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(note_id.to_string()))
            .update_expression(expression)
            .set_expression_attribute_names(Some(names))
            .set_expression_attribute_values(Some(values))
            .send()
            .await
            .map_err(|e| Error::storage(format!("update_item failed: {}", e)))?;

        match self.get(note_id).await? {
            Some(note) => Ok(Some(note)),
            // Scan-backed reads may lag the write; reconstruct locally.
            None => Ok(Some(apply_update(existing, update, updated_at))),
        }
    }

    /// Delete a note by ID. Returns `false` when the note does not exist.
    pub async fn delete(&self, note_id: &str) -> Result<bool> {
        if self.get(note_id).await?.is_none() {
            return Ok(false);
        }

        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(note_id.to_string()))
            .send()
            .await
            .map_err(|e| Error::storage(format!("delete_item failed: {}", e)))?;

        debug!(note_id = %note_id, "Deleted note");
        Ok(true)
    }

    /// Find notes carrying a specific tag, newest first.
    pub async fn find_by_tag(&self, tag: &str) -> Result<Vec<Note>> {
        let response = self
            .client
            .scan()
            .table_name(&self.table_name)
            .filter_expression("contains(tags, :tag)")
            .expression_attribute_values(":tag", AttributeValue::S(tag.to_string()))
            .send()
            .await
            .map_err(|e| Error::storage(format!("filtered scan failed: {}", e)))?;

        let mut notes = response
            .items()
            .iter()
            .map(Note::from_item)
            .collect::<Result<Vec<_>>>()?;
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notes)
    }
}

/// DynamoDB `Scan` rejects a limit outside `1..=i32::MAX`; clamp instead of
/// surfacing a storage error for an out-of-range query parameter.
fn scan_limit(limit: u32) -> i32 {
    limit.clamp(1, i32::MAX as u32) as i32
}

/// Assemble the `SET` update expression for the fields present in the
/// request, always touching `updated_at`. Attribute names go through
/// placeholders so reserved words in field names never collide.
fn build_update_expression(
    update: &UpdateNoteRequest,
    updated_at: DateTime<Utc>,
) -> (String, HashMap<String, String>, HashMap<String, AttributeValue>) {
    let mut assignments = Vec::new();
    let mut names = HashMap::new();
    let mut values = HashMap::new();

    let mut set_field = |field: &str, value: AttributeValue| {
        assignments.push(format!("#{} = :{}", field, field));
        names.insert(format!("#{}", field), field.to_string());
        values.insert(format!(":{}", field), value);
    };

    if let Some(title) = &update.title {
        set_field("title", AttributeValue::S(title.clone()));
    }
    if let Some(content) = &update.content {
        set_field("content", AttributeValue::S(content.clone()));
    }
    if let Some(tags) = &update.tags {
        set_field(
            "tags",
            AttributeValue::L(tags.iter().cloned().map(AttributeValue::S).collect()),
        );
    }
    if let Some(completed) = update.completed {
        set_field("completed", AttributeValue::Bool(completed));
    }
    set_field("updated_at", AttributeValue::S(updated_at.to_rfc3339()));

    (format!("SET {}", assignments.join(", ")), names, values)
}

fn apply_update(mut note: Note, update: UpdateNoteRequest, updated_at: DateTime<Utc>) -> Note {
    if let Some(title) = update.title {
        note.title = title;
    }
    if let Some(content) = update.content {
        note.content = content;
    }
    if let Some(tags) = update.tags {
        note.tags = tags;
    }
    if let Some(completed) = update.completed {
        note.completed = completed;
    }
    note.updated_at = updated_at;
    note
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_limit_clamps_into_valid_range() {
        assert_eq!(scan_limit(0), 1);
        assert_eq!(scan_limit(1), 1);
        assert_eq!(scan_limit(50), 50);
        assert_eq!(scan_limit(i32::MAX as u32), i32::MAX);
        assert_eq!(scan_limit(u32::MAX), i32::MAX);
    }

    #[test]
    fn test_update_expression_single_field() {
        let update = UpdateNoteRequest { completed: Some(true), ..Default::default() };
        let stamp = Utc::now();
        let (expression, names, values) = build_update_expression(&update, stamp);

        assert_eq!(expression, "SET #completed = :completed, #updated_at = :updated_at");
        assert_eq!(names.get("#completed").unwrap(), "completed");
        assert_eq!(values.get(":completed").unwrap(), &AttributeValue::Bool(true));
        assert_eq!(
            values.get(":updated_at").unwrap(),
            &AttributeValue::S(stamp.to_rfc3339())
        );
    }

    #[test]
    fn test_update_expression_covers_all_fields() {
        let update = UpdateNoteRequest {
            title: Some("New title".to_string()),
            content: Some("New content".to_string()),
            tags: Some(vec!["a".to_string(), "b".to_string()]),
            completed: Some(false),
        };
        let (expression, names, values) = build_update_expression(&update, Utc::now());

        for field in ["title", "content", "tags", "completed", "updated_at"] {
            assert!(expression.contains(&format!("#{} = :{}", field, field)));
            assert!(names.contains_key(&format!("#{}", field)));
            assert!(values.contains_key(&format!(":{}", field)));
        }
    }

    #[test]
    fn test_apply_update_merges_fields() {
        let note = Note::from_request(CreateNoteRequest {
            title: "Old".to_string(),
            content: "Body".to_string(),
            tags: vec![],
            completed: false,
        });
        let created_at = note.created_at;
        let stamp = Utc::now();

        let update = UpdateNoteRequest {
            title: Some("New".to_string()),
            completed: Some(true),
            ..Default::default()
        };
        let merged = apply_update(note, update, stamp);

        assert_eq!(merged.title, "New");
        assert_eq!(merged.content, "Body");
        assert!(merged.completed);
        assert_eq!(merged.created_at, created_at);
        assert_eq!(merged.updated_at, stamp);
    }
}
