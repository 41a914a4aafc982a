//! In-memory repository for tests and local experimentation.
//!
//! Matches the remote contract, including the same-name blob overwrite
//! policy: uploading `task_files/report.pdf` twice replaces the first blob.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::repo::{attachment_path, TaskRepository};
use crate::task::{Task, TaskDraft, TaskPatch};

#[derive(Default)]
struct MemoryState {
    tasks: Vec<Task>,
    blobs: HashMap<String, Vec<u8>>,
}

/// Task repository held entirely in process memory
#[derive(Default)]
pub struct MemoryTaskRepository {
    state: Mutex<MemoryState>,
}

impl MemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing records.
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            state: Mutex::new(MemoryState {
                tasks,
                blobs: HashMap::new(),
            }),
        }
    }

    /// Stored blob contents for a given attachment name, if any.
    pub fn blob(&self, name: &str) -> Option<Vec<u8>> {
        let state = self.state.lock().expect("memory repo poisoned");
        state.blobs.get(&attachment_path(name)).cloned()
    }
}

#[async_trait::async_trait]
impl TaskRepository for MemoryTaskRepository {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        let state = self.state.lock().expect("memory repo poisoned");
        Ok(state.tasks.clone())
    }

    async fn create_task(&self, draft: &TaskDraft) -> Result<String> {
        draft.validate()?;
        let id = Uuid::new_v4().to_string();
        let task = Task {
            id: id.clone(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            category: draft.category,
            tags: draft.tags.clone(),
            due_date: draft.due_date.clone(),
            completed: draft.completed,
            created_at: Utc::now(),
            attachment_url: draft.attachment_url.clone(),
        };
        let mut state = self.state.lock().expect("memory repo poisoned");
        state.tasks.push(task);
        Ok(id)
    }

    async fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<()> {
        let mut state = self.state.lock().expect("memory repo poisoned");
        let task = state
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        patch.apply(task);
        Ok(())
    }

    async fn delete_task(&self, id: &str) -> Result<()> {
        let mut state = self.state.lock().expect("memory repo poisoned");
        let before = state.tasks.len();
        state.tasks.retain(|task| task.id != id);
        if state.tasks.len() == before {
            return Err(Error::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn upload_attachment(&self, name: &str, bytes: Vec<u8>) -> Result<String> {
        let path = attachment_path(name);
        let mut state = self.state.lock().expect("memory repo poisoned");
        state.blobs.insert(path.clone(), bytes);
        Ok(format!("memory://{path}"))
    }
}
