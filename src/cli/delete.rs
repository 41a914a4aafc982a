//! taskdeck delete command implementation
//!
//! Selects the given ids in the view-model and runs the best-effort batch
//! delete: one failed id never stops the rest, and the per-id outcome is
//! printed instead of being swallowed. The command itself exits successfully
//! as long as the pass ran; individual failures show up as warnings.

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

    let outcome = model.batch_delete().await;

    let mut human = HumanOutput::new(format!(
        "Deleted {} of {} tasks",
        outcome.succeeded.len(),
        outcome.succeeded.len() + outcome.failed.len()
    ));
    for id in &outcome.succeeded {
        human.push_detail(format!("deleted {id}"));
    }
    for failure in &outcome.failed {
        human.push_warning(format!("{}: {}", failure.id, failure.error));
    }
    emit_success(options, "delete", &outcome, Some(&human))
}
