//! taskdeck create command implementation
//!
//! Builds a draft from the flags, optionally uploads an attachment first,
//! then drives the view-model's edit flow. The upload and the create are not
//! transactional: if the create fails after a successful upload, the blob
//! stays behind orphaned.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use clap::Args;

use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::repo::TaskRepository;
use crate::task::{parse_tags, Category, TaskDraft};
use crate::view::TaskListModel;

/// Required task fields for `create`
#[derive(Args, Debug)]
pub struct DraftArgs {
    /// Task title
    #[arg(long)]
    pub title: String,

    /// Task description
    #[arg(long)]
    pub description: String,

    /// Category: Work, Personal, or Study
    #[arg(long)]
    pub category: String,

    /// Comma-separated tags (blank for none)
    #[arg(long, default_value = "")]
    pub tags: String,

    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: String,
}

/// Optional overrides for `edit`; omitted flags keep the current values
#[derive(Args, Debug)]
pub struct DraftOverrideArgs {
    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New description
    #[arg(long)]
    pub description: Option<String>,

    /// New category: Work, Personal, or Study
    #[arg(long)]
    pub category: Option<String>,

    /// New comma-separated tags
    #[arg(long)]
    pub tags: Option<String>,

    /// New due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<String>,

    /// Mark the task completed or pending
    #[arg(long)]
    pub completed: Option<bool>,
}

#[derive(serde::Serialize)]
struct CreateReport {
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    attachment_url: Option<String>,
}

pub async fn run(
    repo: Arc<dyn TaskRepository>,
    options: OutputOptions,
    args: DraftArgs,
    file: Option<PathBuf>,
) -> Result<()> {
    let mut draft = TaskDraft::new(Category::from_str(&args.category)?);
    draft.title = args.title.trim().to_string();
    draft.description = args.description.trim().to_string();
    draft.tags = parse_tags(&args.tags);
    draft.due_date = args.due.trim().to_string();
    // Reject incomplete drafts before touching the network or the blob store.
    draft.validate()?;

    if let Some(path) = &file {
        draft.attachment_url = Some(upload_file(repo.as_ref(), path).await?);
    }

    let mut model = TaskListModel::new(repo);
    model.begin_create(draft);
    let id = model.submit_edit().await?;

    let report = CreateReport {
        id: id.clone(),
        attachment_url: model
            .tasks
            .iter()
            .find(|task| task.id == id)
            .and_then(|task| task.attachment_url.clone()),
    };

    let mut human = HumanOutput::new(format!("Created task {id}"));
    if let Some(url) = &report.attachment_url {
        human.push_detail(format!("attachment: {url}"));
    }
    emit_success(options, "create", &report, Some(&human))
}

/// Upload a local file; the blob path comes from the file name, and a
/// same-name upload overwrites the previous blob.
pub async fn upload_file(repo: &dyn TaskRepository, path: &Path) -> Result<String> {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            Error::InvalidArgument(format!("invalid attachment path: {}", path.display()))
        })?;
    let bytes = std::fs::read(path)?;
    repo.upload_attachment(name, bytes).await
}
