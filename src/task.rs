//! Task records, drafts, and field validation.
//!
//! Field names serialize in camelCase to match the remote documents 1:1.
//! Each stored document also carries a self-referential `id` field that
//! duplicates the document key; the repository writes it after creation.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Date format used by the remote store for `dueDate`
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Fixed category set for tasks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    Work,
    Personal,
    Study,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Work, Category::Personal, Category::Study];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Work => "Work",
            Category::Personal => "Personal",
            Category::Study => "Study",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|category| category.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "unknown category '{trimmed}' (expected Work, Personal, or Study)"
                ))
            })
    }
}

/// A persisted task record as returned by the repository
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Stored as the raw string the remote holds; may be malformed.
    pub due_date: String,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment_url: Option<String>,
}

impl Task {
    /// Parse the stored due date, if well-formed.
    pub fn due_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.due_date.trim(), DUE_DATE_FORMAT).ok()
    }

    /// Sort key for due-date ordering. Malformed dates sort as earliest so
    /// a bad record never panics the sort and orders deterministically.
    pub fn due_key(&self) -> NaiveDate {
        self.due_date().unwrap_or(NaiveDate::MIN)
    }
}

/// User-entered fields for creating or editing a task.
///
/// `created_at` is not part of the draft: the repository assigns it once at
/// creation and it is immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub category: Category,
    #[serde(default)]
    pub tags: Vec<String>,
    pub due_date: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment_url: Option<String>,
}

impl TaskDraft {
    pub fn new(category: Category) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            category,
            tags: Vec::new(),
            due_date: String::new(),
            completed: false,
            attachment_url: None,
        }
    }

    /// Populate a draft from an existing record, for editing.
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            category: task.category,
            tags: task.tags.clone(),
            due_date: task.due_date.clone(),
            completed: task.completed,
            attachment_url: task.attachment_url.clone(),
        }
    }

    /// Check required fields before any network call.
    ///
    /// The category is an enum and cannot be absent, so only the free-text
    /// fields are checked here.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::MissingField("title"));
        }
        if self.description.trim().is_empty() {
            return Err(Error::MissingField("description"));
        }
        if self.due_date.trim().is_empty() {
            return Err(Error::MissingField("dueDate"));
        }
        Ok(())
    }
}

/// Partial update applied to an existing document, mirroring the remote
/// store's field-patch semantics. Unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment_url: Option<String>,
}

impl TaskPatch {
    /// Full-field patch from a draft, used by the edit flow.
    pub fn from_draft(draft: &TaskDraft) -> Self {
        Self {
            title: Some(draft.title.clone()),
            description: Some(draft.description.clone()),
            category: Some(draft.category),
            tags: Some(draft.tags.clone()),
            due_date: Some(draft.due_date.clone()),
            completed: Some(draft.completed),
            attachment_url: draft.attachment_url.clone(),
        }
    }

    /// Patch that only flips the completion flag, used by batch complete.
    pub fn completed(value: bool) -> Self {
        Self {
            completed: Some(value),
            ..Self::default()
        }
    }

    /// Apply this patch to an in-memory record.
    pub fn apply(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(category) = self.category {
            task.category = category;
        }
        if let Some(tags) = &self.tags {
            task.tags = tags.clone();
        }
        if let Some(due_date) = &self.due_date {
            task.due_date = due_date.clone();
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
        if let Some(url) = &self.attachment_url {
            task.attachment_url = Some(url.clone());
        }
    }
}

/// Parse a comma-separated tags input. Blank input yields no tags; empty
/// segments and surrounding whitespace are dropped.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
