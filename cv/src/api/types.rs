//! Checkvist API data types
//!
//! Only the fields the client reads are declared; anything else in a payload is ignored.
//! Every field is defaulted so partial payloads still decode.

use serde::{Deserialize, Serialize};

/// The authenticated user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub username: String,
    pub pro: bool,
}

/// A checklist (the remote container tasks belong to)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Checklist {
    pub id: u64,
    pub name: String,
    pub public: bool,
    pub archived: bool,
    pub read_only: bool,
    #[serde(rename = "markdown?")]
    pub markdown: bool,
    pub task_count: u32,
    pub task_completed: u32,
    pub updated_at: Option<String>,
}

/// A task as returned by the server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    pub id: u64,
    /// Parent task id; `None` or `Some(0)` means top level
    pub parent_id: Option<u64>,
    pub checklist_id: u64,
    pub status: u8,
    pub position: u32,
    pub content: String,
    pub comments_count: u32,
    pub updated_at: Option<String>,
}

impl Task {
    /// Reference usable as a parent or note target
    pub fn task_ref(&self) -> TaskRef {
        TaskRef {
            id: self.id,
            checklist_id: self.checklist_id,
        }
    }

    /// Parent id with the server's "0 means none" convention folded into `None`
    pub fn parent(&self) -> Option<u64> {
        self.parent_id.filter(|id| *id != 0)
    }
}

/// Identifier of a task on the remote side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskRef {
    pub id: u64,
    pub checklist_id: u64,
}

/// Request body for task creation
///
/// `None` fields are left out so the server applies its own defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewTask {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
}

impl NewTask {
    /// A top-level task
    pub fn top_level(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    /// A child of `parent` at a 1-based position
    pub fn child(content: impl Into<String>, parent: TaskRef, position: u32) -> Self {
        Self {
            content: content.into(),
            parent_id: Some(parent.id),
            position: Some(position),
        }
    }
}

/// A note (Checkvist calls them comments) attached to a task
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Note {
    pub id: u64,
    pub task_id: u64,
    pub comment: String,
    pub username: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}
