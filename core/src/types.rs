//! Wire types for the todo API.
//!
//! # Design
//! These mirror the server's JSON shapes but are defined independently so the
//! client does not pull in axum or sqlx. The end-to-end test in
//! `tests/integration.rs` catches any drift between the two.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A todo item as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request payload for creating a todo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl CreateTodo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            completed: false,
        }
    }
}

/// Request payload for updating a todo. Only fields that are `Some` are sent,
/// so the server leaves everything else untouched.
///
/// `description: Some(None)` sends an explicit `null` and clears the
/// description; `description: None` leaves it alone.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct UpdateTodo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

/// Body of the API root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Welcome {
    pub message: String,
}

/// Error body the server sends with every non-success status.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorDetail {
    pub detail: serde_json::Value,
}
