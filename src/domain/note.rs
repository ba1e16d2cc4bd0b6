//! Note entity plus request DTOs and item-store attribute conversions.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::errors::{Error, Result};

/// A stored note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Unique note ID (UUID v4)
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Note creation payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateNoteRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(min = 1, max = 5000))]
    pub content: String,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub completed: bool,
}

/// Partial note update; only the provided fields change.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateNoteRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 5000))]
    pub content: Option<String>,

    pub tags: Option<Vec<String>>,

    pub completed: Option<bool>,
}

impl UpdateNoteRequest {
    /// Whether the update carries any field at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.tags.is_none()
            && self.completed.is_none()
    }
}

impl Note {
    /// Create a fresh note from a creation request, stamping ID and
    /// timestamps.
    pub fn from_request(request: CreateNoteRequest) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: request.title,
            content: request.content,
            tags: request.tags,
            completed: request.completed,
            created_at: now,
            updated_at: now,
        }
    }

    /// Convert into a DynamoDB item. Timestamps are stored as RFC 3339
    /// strings; the tag list is always present, even when empty.
    pub fn to_item(&self) -> HashMap<String, AttributeValue> {
        let mut item = HashMap::new();
        item.insert("id".to_string(), AttributeValue::S(self.id.clone()));
        item.insert("title".to_string(), AttributeValue::S(self.title.clone()));
        item.insert("content".to_string(), AttributeValue::S(self.content.clone()));
        item.insert(
            "tags".to_string(),
            AttributeValue::L(self.tags.iter().cloned().map(AttributeValue::S).collect()),
        );
        item.insert("completed".to_string(), AttributeValue::Bool(self.completed));
        item.insert(
            "created_at".to_string(),
            AttributeValue::S(self.created_at.to_rfc3339()),
        );
        item.insert(
            "updated_at".to_string(),
            AttributeValue::S(self.updated_at.to_rfc3339()),
        );
        item
    }

    /// Rebuild a note from a DynamoDB item, failing on missing or malformed
    /// attributes.
    pub fn from_item(item: &HashMap<String, AttributeValue>) -> Result<Self> {
        Ok(Self {
            id: string_attr(item, "id")?,
            title: string_attr(item, "title")?,
            content: string_attr(item, "content")?,
            tags: tag_attr(item),
            completed: matches!(item.get("completed"), Some(AttributeValue::Bool(true))),
            created_at: datetime_attr(item, "created_at")?,
            updated_at: datetime_attr(item, "updated_at")?,
        })
    }
}

fn string_attr(item: &HashMap<String, AttributeValue>, name: &str) -> Result<String> {
    match item.get(name) {
        Some(AttributeValue::S(value)) => Ok(value.clone()),
        _ => Err(Error::storage(format!("note item missing string attribute '{}'", name))),
    }
}

fn tag_attr(item: &HashMap<String, AttributeValue>) -> Vec<String> {
    match item.get("tags") {
        Some(AttributeValue::L(values)) => values
            .iter()
            .filter_map(|value| value.as_s().ok().cloned())
            .collect(),
        _ => Vec::new(),
    }
}

fn datetime_attr(item: &HashMap<String, AttributeValue>, name: &str) -> Result<DateTime<Utc>> {
    let raw = string_attr(item, name)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::storage(format!("invalid '{}' timestamp on note item: {}", name, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> CreateNoteRequest {
        CreateNoteRequest {
            title: "Groceries".to_string(),
            content: "Milk, eggs".to_string(),
            tags: vec!["errands".to_string()],
            completed: false,
        }
    }

    #[test]
    fn test_from_request_stamps_id_and_timestamps() {
        let note = Note::from_request(sample_request());
        assert!(Uuid::parse_str(&note.id).is_ok());
        assert_eq!(note.created_at, note.updated_at);
        assert_eq!(note.title, "Groceries");
    }

    #[test]
    fn test_item_round_trip() {
        let note = Note::from_request(sample_request());
        let rebuilt = Note::from_item(&note.to_item()).unwrap();
        assert_eq!(rebuilt.id, note.id);
        assert_eq!(rebuilt.title, note.title);
        assert_eq!(rebuilt.tags, note.tags);
        assert_eq!(rebuilt.completed, note.completed);
        assert_eq!(rebuilt.created_at, note.created_at);
    }

    #[test]
    fn test_from_item_rejects_missing_title() {
        let note = Note::from_request(sample_request());
        let mut item = note.to_item();
        item.remove("title");
        assert!(Note::from_item(&item).is_err());
    }

    #[test]
    fn test_from_item_rejects_bad_timestamp() {
        let note = Note::from_request(sample_request());
        let mut item = note.to_item();
        item.insert("created_at".to_string(), AttributeValue::S("yesterday".to_string()));
        assert!(Note::from_item(&item).is_err());
    }

    #[test]
    fn test_create_request_validation_bounds() {
        let mut request = sample_request();
        assert!(request.validate().is_ok());

        request.title = String::new();
        assert!(request.validate().is_err());

        request.title = "x".repeat(201);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_request_is_empty() {
        assert!(UpdateNoteRequest::default().is_empty());
        let update = UpdateNoteRequest { completed: Some(true), ..Default::default() };
        assert!(!update.is_empty());
    }
}
