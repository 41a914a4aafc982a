//! Task repository boundary.
//!
//! The view-model takes any `TaskRepository` by injection, so tests can
//! substitute an in-memory or failing implementation without touching
//! process-wide state. Shipped implementations:
//!
//! - `http`: JSON REST client against the hosted document/blob store
//! - `memory`: in-process store for tests and local experimentation
//!
//! Attachment uploads land at `task_files/{originalFileName}`; a same-name
//! upload overwrites the prior blob at that path. There is no transaction
//! across upload + create: a successful upload followed by a failed create
//! leaves the blob orphaned. Both are inherited policy, kept as documented.

use async_trait::async_trait;

use crate::error::Result;
use crate::task::{Task, TaskDraft, TaskPatch};

pub mod http;
pub mod memory;

pub use http::HttpTaskRepository;
pub use memory::MemoryTaskRepository;

/// Path prefix for uploaded attachments in the blob store
pub const ATTACHMENT_PREFIX: &str = "task_files";

/// Remote CRUD boundary for task records and attachment blobs
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Fetch the full current collection.
    async fn list_tasks(&self) -> Result<Vec<Task>>;

    /// Validate the draft locally, persist a new record, return its id.
    async fn create_task(&self, draft: &TaskDraft) -> Result<String>;

    /// Overwrite fields of an existing record.
    async fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<()>;

    /// Remove a record by id. Reports `NotFound` for unknown ids; callers
    /// treat deletion as idempotent.
    async fn delete_task(&self, id: &str) -> Result<()>;

    /// Store a blob under `task_files/{name}`, return a retrievable URL.
    async fn upload_attachment(&self, name: &str, bytes: Vec<u8>) -> Result<String>;
}

/// Blob path for an attachment with the given file name
pub fn attachment_path(name: &str) -> String {
    format!("{ATTACHMENT_PREFIX}/{name}")
}
