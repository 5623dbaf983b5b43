//! Persisted row shape and the request/response models built around it.
//!
//! `TodoItem` is what the store reads back from the `todos` table. The
//! transfer models (`NewTodo`, `TodoPatch`, `TodoResponse`) are what crosses
//! the HTTP boundary; they are mapped to and from rows explicitly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Page size used when the client does not pass `limit`.
pub const DEFAULT_LIMIT: i64 = 100;

/// Largest page the list endpoint will return.
pub const MAX_LIMIT: i64 = 1000;

/// One row of the `todos` table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct TodoItem {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// JSON representation of a row returned by every endpoint that yields todos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<TodoItem> for TodoResponse {
    fn from(item: TodoItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
            description: item.description,
            completed: item.completed,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

/// Body of `POST /todos/`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewTodo {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl NewTodo {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_title(&self.title)
    }
}

/// A single column assignment requested by `PUT /todos/{id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    Title(String),
    /// `None` clears the description.
    Description(Option<String>),
    Completed(bool),
}

/// Body of `PUT /todos/{id}`.
///
/// Built from the keys actually present in the JSON object, so a field that
/// was left out never shows up as a change. An explicit `"description": null`
/// is a change; a missing `description` key is not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct TodoPatch {
    changes: Vec<FieldChange>,
}

impl TodoPatch {
    pub fn new(changes: Vec<FieldChange>) -> Self {
        Self { changes }
    }

    pub fn changes(&self) -> &[FieldChange] {
        &self.changes
    }
}

impl TryFrom<Map<String, Value>> for TodoPatch {
    type Error = ValidationError;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let mut changes = Vec::with_capacity(fields.len());
        for (name, value) in fields {
            let change = match name.as_str() {
                "title" => match value {
                    Value::String(title) => {
                        check_title(&title)?;
                        FieldChange::Title(title)
                    }
                    Value::Null => return Err(ValidationError::NullField { field: "title" }),
                    _ => {
                        return Err(ValidationError::WrongType {
                            field: "title",
                            expected: "a string",
                        })
                    }
                },
                "description" => match value {
                    Value::String(description) => FieldChange::Description(Some(description)),
                    Value::Null => FieldChange::Description(None),
                    _ => {
                        return Err(ValidationError::WrongType {
                            field: "description",
                            expected: "a string or null",
                        })
                    }
                },
                "completed" => match value {
                    Value::Bool(completed) => FieldChange::Completed(completed),
                    Value::Null => return Err(ValidationError::NullField { field: "completed" }),
                    _ => {
                        return Err(ValidationError::WrongType {
                            field: "completed",
                            expected: "a boolean",
                        })
                    }
                },
                // Unknown keys are ignored.
                _ => continue,
            };
            changes.push(change);
        }
        Ok(Self { changes })
    }
}

/// Rejections raised by the transfer models before anything reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("field `{field}` may not be null")]
    NullField { field: &'static str },
    #[error("field `{field}` must be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
}

fn check_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(())
}

/// `skip` / `limit` query parameters of `GET /todos/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// Negative values become zero and `limit` is capped at [`MAX_LIMIT`].
    pub fn page(self) -> Page {
        Page {
            offset: self.skip.max(0),
            limit: self.limit.clamp(0, MAX_LIMIT),
        }
    }
}

/// A clamped offset/limit window handed to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: i64,
    pub limit: i64,
}

impl Default for Page {
    fn default() -> Self {
        Pagination::default().page()
    }
}

/// Payload of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Welcome {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patch(json: &str) -> Result<TodoPatch, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn new_todo_defaults_optional_fields() {
        let input: NewTodo = serde_json::from_str(r#"{"title":"No extras"}"#).unwrap();
        assert_eq!(input.title, "No extras");
        assert_eq!(input.description, None);
        assert!(!input.completed);
    }

    #[test]
    fn new_todo_accepts_null_description() {
        let input: NewTodo =
            serde_json::from_str(r#"{"title":"t","description":null,"completed":true}"#).unwrap();
        assert_eq!(input.description, None);
        assert!(input.completed);
    }

    #[test]
    fn new_todo_rejects_missing_title() {
        let result: Result<NewTodo, _> = serde_json::from_str(r#"{"completed":true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn new_todo_rejects_non_string_title() {
        let result: Result<NewTodo, _> = serde_json::from_str(r#"{"title":42}"#);
        assert!(result.is_err());
    }

    #[test]
    fn new_todo_validate_rejects_blank_title() {
        let input: NewTodo = serde_json::from_str(r#"{"title":"   "}"#).unwrap();
        assert_eq!(input.validate(), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn empty_patch_has_no_changes() {
        let patch = patch("{}").unwrap();
        assert!(patch.changes().is_empty());
    }

    #[test]
    fn patch_only_contains_present_fields() {
        let patch = patch(r#"{"completed":false}"#).unwrap();
        assert_eq!(patch.changes(), &[FieldChange::Completed(false)]);
    }

    #[test]
    fn patch_distinguishes_null_description_from_missing() {
        let cleared = patch(r#"{"description":null}"#).unwrap();
        assert_eq!(cleared.changes(), &[FieldChange::Description(None)]);

        let untouched = patch(r#"{"title":"x"}"#).unwrap();
        assert!(!untouched
            .changes()
            .iter()
            .any(|c| matches!(c, FieldChange::Description(_))));
    }

    #[test]
    fn patch_rejects_null_title_and_completed() {
        assert!(patch(r#"{"title":null}"#).is_err());
        assert!(patch(r#"{"completed":null}"#).is_err());
    }

    #[test]
    fn patch_rejects_wrong_types() {
        assert!(patch(r#"{"completed":"yes"}"#).is_err());
        assert!(patch(r#"{"description":7}"#).is_err());
    }

    #[test]
    fn patch_rejects_blank_title() {
        let err = TodoPatch::try_from(
            serde_json::json!({"title": ""}).as_object().cloned().unwrap(),
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::EmptyTitle);
    }

    #[test]
    fn patch_ignores_unknown_fields() {
        let patch = patch(r#"{"id":9,"title":"kept"}"#).unwrap();
        assert_eq!(patch.changes(), &[FieldChange::Title("kept".into())]);
    }

    #[test]
    fn patch_rejects_non_object_body() {
        assert!(patch("[]").is_err());
    }

    #[test]
    fn pagination_defaults() {
        let p: Pagination = serde_json::from_str("{}").unwrap();
        assert_eq!(p, Pagination::default());
        assert_eq!(p.page(), Page { offset: 0, limit: 100 });
    }

    #[test]
    fn pagination_clamps_out_of_range_values() {
        let page = Pagination { skip: -5, limit: -1 }.page();
        assert_eq!(page, Page { offset: 0, limit: 0 });

        let page = Pagination { skip: 3, limit: 50_000 }.page();
        assert_eq!(page, Page { offset: 3, limit: MAX_LIMIT });
    }

    #[test]
    fn response_serializes_null_updated_at() {
        let created_at = DateTime::parse_from_rfc3339("2024-01-02T03:04:05Z")
            .unwrap()
            .with_timezone(&Utc);
        let response = TodoResponse::from(TodoItem {
            id: 1,
            title: "Test".into(),
            description: None,
            completed: false,
            created_at,
            updated_at: None,
        });
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["description"], Value::Null);
        assert_eq!(json["updated_at"], Value::Null);
        assert_eq!(json["created_at"], "2024-01-02T03:04:05Z");
    }
}
