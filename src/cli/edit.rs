//! taskdeck edit command implementation
//!
//! Hydrates, populates the draft from the existing task, applies the flag
//! overrides, and submits through the view-model's edit flow so a failed
//! write leaves the draft retained in `Editing`.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::repo::TaskRepository;
use crate::task::{parse_tags, Category};
use crate::view::{EditState, TaskListModel};

use super::create::{upload_file, DraftOverrideArgs};

#[derive(serde::Serialize)]
struct EditReport {
    id: String,
}

pub async fn run(
    repo: Arc<dyn TaskRepository>,
    options: OutputOptions,
    id: String,
    overrides: DraftOverrideArgs,
    file: Option<PathBuf>,
) -> Result<()> {
    let mut model = TaskListModel::new(repo.clone());
    model.hydrate().await?;
    model.begin_edit(&id)?;

    let mut draft = match model.edit_state() {
        EditState::Editing { draft, .. } => draft.clone(),
        other => {
            return Err(Error::InvalidArgument(format!(
                "unexpected edit state: {other:?}"
            )))
        }
    };

    if let Some(title) = overrides.title {
        draft.title = title.trim().to_string();
    }
    if let Some(description) = overrides.description {
        draft.description = description.trim().to_string();
    }
    if let Some(category) = overrides.category {
        draft.category = Category::from_str(&category)?;
    }
    if let Some(tags) = overrides.tags {
        draft.tags = parse_tags(&tags);
    }
    if let Some(due) = overrides.due {
        draft.due_date = due.trim().to_string();
    }
    if let Some(completed) = overrides.completed {
        draft.completed = completed;
    }
    if let Some(path) = &file {
        draft.attachment_url = Some(upload_file(repo.as_ref(), path).await?);
    }

    model.update_draft(draft)?;
    let id = model.submit_edit().await?;

    let report = EditReport { id: id.clone() };
    let human = HumanOutput::new(format!("Updated task {id}"));
    emit_success(options, "edit", &report, Some(&human))
}
