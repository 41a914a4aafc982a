use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use taskdeck::error::{Error, Result};
use taskdeck::repo::{MemoryTaskRepository, TaskRepository};
use taskdeck::task::{Category, Task, TaskDraft, TaskPatch};

pub fn sample_task(id: &str, due: &str) -> Task {
    Task {
        id: id.to_string(),
        title: format!("Task {id}"),
        description: "description".to_string(),
        category: Category::Work,
        tags: vec!["sample".to_string()],
        due_date: due.to_string(),
        completed: false,
        created_at: Utc::now(),
        attachment_url: None,
    }
}

pub fn sample_draft(title: &str) -> TaskDraft {
    TaskDraft {
        title: title.to_string(),
        description: "description".to_string(),
        category: Category::Personal,
        tags: vec!["x".to_string(), "y".to_string()],
        due_date: "2025-05-01".to_string(),
        completed: false,
        attachment_url: None,
    }
}

/// Repository wrapper that simulates remote failures for chosen ids (and
/// optionally for creates), backed by an in-memory store otherwise.
pub struct FlakyRepository {
    inner: MemoryTaskRepository,
    fail_ids: HashSet<String>,
    fail_creates: bool,
    fail_lists: bool,
}

impl FlakyRepository {
    pub fn new(tasks: Vec<Task>, fail_ids: &[&str]) -> Self {
        Self {
            inner: MemoryTaskRepository::with_tasks(tasks),
            fail_ids: fail_ids.iter().map(|id| id.to_string()).collect(),
            fail_creates: false,
            fail_lists: false,
        }
    }

    pub fn failing_creates() -> Self {
        Self {
            inner: MemoryTaskRepository::new(),
            fail_ids: HashSet::new(),
            fail_creates: true,
            fail_lists: false,
        }
    }

    pub fn failing_lists() -> Self {
        Self {
            inner: MemoryTaskRepository::new(),
            fail_ids: HashSet::new(),
            fail_creates: false,
            fail_lists: true,
        }
    }

    fn check(&self, id: &str) -> Result<()> {
        if self.fail_ids.contains(id) {
            return Err(Error::Write(format!("simulated remote failure for {id}")));
        }
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for FlakyRepository {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        if self.fail_lists {
            return Err(Error::Fetch("simulated fetch failure".to_string()));
        }
        self.inner.list_tasks().await
    }

    async fn create_task(&self, draft: &TaskDraft) -> Result<String> {
        draft.validate()?;
        if self.fail_creates {
            return Err(Error::Write("simulated create failure".to_string()));
        }
        self.inner.create_task(draft).await
    }

    async fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<()> {
        self.check(id)?;
        self.inner.update_task(id, patch).await
    }

    async fn delete_task(&self, id: &str) -> Result<()> {
        self.check(id)?;
        self.inner.delete_task(id).await
    }

    async fn upload_attachment(&self, name: &str, bytes: Vec<u8>) -> Result<String> {
        self.inner.upload_attachment(name, bytes).await
    }
}
