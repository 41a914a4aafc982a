//! taskdeck upload command implementation
//!
//! Stores a file in the attachment blob store and prints the retrievable
//! URL. The blob path is `task_files/{fileName}`; uploading another file
//! with the same name overwrites the earlier blob.

use std::path::PathBuf;
use std::sync::Arc;

use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::repo::TaskRepository;

use super::create::upload_file;

#[derive(serde::Serialize)]
struct UploadReport {
    name: String,
    url: String,
}

pub async fn run(
    repo: Arc<dyn TaskRepository>,
    options: OutputOptions,
    file: PathBuf,
) -> Result<()> {
    let url = upload_file(repo.as_ref(), &file).await?;
    let name = file
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
        .to_string();

    let mut human = HumanOutput::new(format!("Uploaded {name}"));
    human.push_detail(url.clone());
    let report = UploadReport { name, url };
    emit_success(options, "upload", &report, Some(&human))
}
