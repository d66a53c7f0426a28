//! Checkvist API boundary
//!
//! The [`CheckvistApi`] trait is the seam between the command logic and the network: the
//! reqwest-backed [`CheckvistClient`] implements it for real runs, and tests swap in a
//! recording mock.

use async_trait::async_trait;

pub mod client;
mod error;
mod types;

pub use client::CheckvistClient;
pub use error::ApiError;
pub use types::{Checklist, NewTask, Note, Task, TaskRef, User};

/// Remote operations offered by the Checkvist service
///
/// Each call is a single request/response. Failures come back as [`ApiError`] values so
/// callers can decide whether to continue; nothing here retries.
#[async_trait]
pub trait CheckvistApi: Send + Sync {
    /// Exchange username and API key for a session token
    async fn login(&self) -> Result<String, ApiError>;

    /// Fetch the authenticated user
    async fn current_user(&self) -> Result<User, ApiError>;

    /// Fetch all checklists visible to the user
    async fn lists(&self) -> Result<Vec<Checklist>, ApiError>;

    /// Fetch a single checklist
    async fn list(&self, list_id: u64) -> Result<Checklist, ApiError>;

    /// Fetch every task of a checklist (all nesting levels, flat)
    async fn tasks(&self, list_id: u64) -> Result<Vec<Task>, ApiError>;

    /// Create a task in a checklist
    async fn create_task(&self, task: &NewTask, list_id: u64) -> Result<Task, ApiError>;

    /// Delete a task from a checklist
    async fn delete_task(&self, task_id: u64, list_id: u64) -> Result<(), ApiError>;

    /// Fetch the notes attached to a task
    async fn notes(&self, task: TaskRef) -> Result<Vec<Note>, ApiError>;

    /// Attach a note to a task
    async fn create_note(&self, comment: &str, task: TaskRef) -> Result<Note, ApiError>;
}
