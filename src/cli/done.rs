//! taskdeck done command implementation
//!
//! Best-effort batch completion over the given ids, with the same
//! partial-failure reporting as delete.

use std::sync::Arc;

use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::repo::TaskRepository;
use crate::view::TaskListModel;

pub async fn run(
    repo: Arc<dyn TaskRepository>,
    options: OutputOptions,
    ids: Vec<String>,
) -> Result<()> {
    let mut model = TaskListModel::new(repo);
    model.hydrate().await?;
    for id in &ids {
        model.toggle_select(id);
    }

    let outcome = model.batch_complete().await;

    let mut human = HumanOutput::new(format!(
        "Completed {} of {} tasks",
        outcome.succeeded.len(),
        outcome.succeeded.len() + outcome.failed.len()
    ));
    for id in &outcome.succeeded {
        human.push_detail(format!("completed {id}"));
    }
    for failure in &outcome.failed {
        human.push_warning(format!("{}: {}", failure.id, failure.error));
    }
    emit_success(options, "done", &outcome, Some(&human))
}
