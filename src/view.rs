//! Task list view-model: filtering, sorting, selection, reorder, and batch
//! operations over the hydrated collection.
//!
//! The model owns the in-memory collection for the duration of a session;
//! the remote store stays the durable owner of record. Derived views are
//! recomputed per call through the pure [`compute_view`] function, never
//! cached, so they can be exercised directly in tests without any rendering
//! mechanism.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::repo::TaskRepository;
use crate::task::{Category, Task, TaskDraft, TaskPatch};

/// Presentation mode for the task list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    List,
    Board,
}

/// Filter criteria applied to the hydrated collection. All active predicates
/// are AND-combined; an unset field matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilters {
    pub category: Option<Category>,
    /// Case-sensitive substring matched against each tag
    pub tag_substring: Option<String>,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
}

impl TaskFilters {
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.tag_substring.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }
}

/// Whether a single task passes every active filter predicate
pub fn matches_filters(task: &Task, filters: &TaskFilters) -> bool {
    if let Some(category) = filters.category {
        if task.category != category {
            return false;
        }
    }
    if let Some(needle) = filters.tag_substring.as_deref() {
        if !needle.is_empty() && !task.tags.iter().any(|tag| tag.contains(needle)) {
            return false;
        }
    }
    // A malformed due date never satisfies an active date bound.
    if let Some(start) = filters.start_date {
        match task.due_date() {
            Some(due) if due >= start => {}
            _ => return false,
        }
    }
    if let Some(end) = filters.end_date {
        match task.due_date() {
            Some(due) if due <= end => {}
            _ => return false,
        }
    }
    true
}

/// Derive the presented sequence: filter, then order by due date. Stable
/// sort in both directions, so equal dates keep their hydrated order.
/// Malformed dates sort as earliest either way and never panic.
pub fn compute_view<'a>(
    tasks: &'a [Task],
    filters: &TaskFilters,
    sort_ascending: bool,
) -> Vec<&'a Task> {
    let mut view: Vec<&Task> = tasks
        .iter()
        .filter(|task| matches_filters(task, filters))
        .collect();
    if sort_ascending {
        view.sort_by(|left, right| left.due_key().cmp(&right.due_key()));
    } else {
        view.sort_by(|left, right| right.due_key().cmp(&left.due_key()));
    }
    view
}

/// Per-id result summary of a best-effort batch pass. Partial failure is
/// reported here rather than swallowed; the selection is still cleared
/// unconditionally after the pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchOutcome {
    pub succeeded: Vec<String>,
    pub failed: Vec<BatchFailure>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchFailure {
    pub id: String,
    pub error: String,
}

impl BatchOutcome {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Lifecycle of the single in-flight edit.
///
/// `Idle -> Editing -> Submitting -> Idle` on success; a validation or
/// write failure lands back in `Editing` with the draft retained so the
/// user can retry without re-entering data.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditState {
    #[default]
    Idle,
    Editing {
        /// Target id when editing an existing task; `None` for a new one
        id: Option<String>,
        draft: TaskDraft,
    },
    Submitting {
        id: Option<String>,
        draft: TaskDraft,
    },
}

/// In-memory state and derived-view logic layered over the repository
pub struct TaskListModel {
    repo: Arc<dyn TaskRepository>,
    pub tasks: Vec<Task>,
    pub selected_ids: HashSet<String>,
    pub sort_ascending: bool,
    pub filters: TaskFilters,
    pub view_mode: ViewMode,
    edit: EditState,
}

impl TaskListModel {
    pub fn new(repo: Arc<dyn TaskRepository>) -> Self {
        Self {
            repo,
            tasks: Vec::new(),
            selected_ids: HashSet::new(),
            sort_ascending: true,
            filters: TaskFilters::default(),
            view_mode: ViewMode::default(),
            edit: EditState::Idle,
        }
    }

    /// Replace the collection wholesale from the repository. Errors surface
    /// to the caller; there is no automatic retry. Re-entrant hydration is
    /// unguarded: a stale response can overwrite a newer one if two calls
    /// overlap.
    pub async fn hydrate(&mut self) -> Result<()> {
        self.tasks = self.repo.list_tasks().await?;
        debug!(count = self.tasks.len(), "hydrated task collection");
        Ok(())
    }

    /// Current filtered/sorted view. Recomputed per call.
    pub fn view(&self) -> Vec<&Task> {
        compute_view(&self.tasks, &self.filters, self.sort_ascending)
    }

    pub fn toggle_sort(&mut self) {
        self.sort_ascending = !self.sort_ascending;
    }

    pub fn toggle_view_mode(&mut self) {
        self.view_mode = match self.view_mode {
            ViewMode::List => ViewMode::Board,
            ViewMode::Board => ViewMode::List,
        };
    }

    /// Add the id to the selection if absent, else remove it
    pub fn toggle_select(&mut self, id: &str) {
        if !self.selected_ids.remove(id) {
            self.selected_ids.insert(id.to_string());
        }
    }

    /// Move the task at `source` to `dest` in the in-memory ordering only;
    /// order is never persisted to the remote store.
    pub fn reorder(&mut self, source: usize, dest: usize) -> Result<()> {
        let len = self.tasks.len();
        if source >= len || dest >= len {
            return Err(Error::InvalidArgument(format!(
                "reorder indices {source}->{dest} out of range for {len} tasks"
            )));
        }
        let task = self.tasks.remove(source);
        self.tasks.insert(dest, task);
        Ok(())
    }

    /// Delete every selected task, sequentially and best-effort: one failed
    /// id does not stop the rest. Succeeding ids leave the local collection;
    /// the selection is cleared unconditionally afterwards.
    pub async fn batch_delete(&mut self) -> BatchOutcome {
        let ids = self.take_selection();
        let mut outcome = BatchOutcome::default();
        for id in ids {
            match self.repo.delete_task(&id).await {
                Ok(()) => {
                    self.tasks.retain(|task| task.id != id);
                    outcome.succeeded.push(id);
                }
                Err(err) => {
                    warn!(%id, error = %err, "batch delete failed for task");
                    outcome.failed.push(BatchFailure {
                        id,
                        error: err.to_string(),
                    });
                }
            }
        }
        outcome
    }

    /// Mark every selected task completed, with the same sequential
    /// best-effort semantics and unconditional selection clear as
    /// [`batch_delete`](Self::batch_delete).
    pub async fn batch_complete(&mut self) -> BatchOutcome {
        let ids = self.take_selection();
        let patch = TaskPatch::completed(true);
        let mut outcome = BatchOutcome::default();
        for id in ids {
            match self.repo.update_task(&id, &patch).await {
                Ok(()) => {
                    if let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) {
                        task.completed = true;
                    }
                    outcome.succeeded.push(id);
                }
                Err(err) => {
                    warn!(%id, error = %err, "batch complete failed for task");
                    outcome.failed.push(BatchFailure {
                        id,
                        error: err.to_string(),
                    });
                }
            }
        }
        outcome
    }

    /// Drain the selection in a stable order for the sequential pass
    fn take_selection(&mut self) -> Vec<String> {
        let mut ids: Vec<String> = self.selected_ids.drain().collect();
        ids.sort();
        ids
    }

    pub fn edit_state(&self) -> &EditState {
        &self.edit
    }

    /// Start drafting a new task
    pub fn begin_create(&mut self, draft: TaskDraft) {
        self.edit = EditState::Editing { id: None, draft };
    }

    /// Start editing an existing task, populating the draft from it
    pub fn begin_edit(&mut self, id: &str) -> Result<()> {
        let task = self
            .tasks
            .iter()
            .find(|task| task.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        self.edit = EditState::Editing {
            id: Some(id.to_string()),
            draft: TaskDraft::from_task(task),
        };
        Ok(())
    }

    /// Replace the draft of an in-progress edit
    pub fn update_draft(&mut self, draft: TaskDraft) -> Result<()> {
        match std::mem::take(&mut self.edit) {
            EditState::Editing { id, .. } => {
                self.edit = EditState::Editing { id, draft };
                Ok(())
            }
            other => {
                self.edit = other;
                Err(Error::InvalidArgument("no edit in progress".to_string()))
            }
        }
    }

    /// Submit the in-progress edit. On success the state returns to `Idle`
    /// and local state is patched (update) or re-hydrated (create, so the
    /// server-assigned id and timestamp are picked up). On failure the state
    /// returns to `Editing` with the draft retained.
    pub async fn submit_edit(&mut self) -> Result<String> {
        let (id, draft) = match std::mem::take(&mut self.edit) {
            EditState::Editing { id, draft } => (id, draft),
            other => {
                self.edit = other;
                return Err(Error::InvalidArgument("no edit in progress".to_string()));
            }
        };
        if let Err(err) = draft.validate() {
            self.edit = EditState::Editing { id, draft };
            return Err(err);
        }
        self.edit = EditState::Submitting {
            id: id.clone(),
            draft: draft.clone(),
        };

        let result = match &id {
            Some(existing) => {
                let patch = TaskPatch::from_draft(&draft);
                self.repo
                    .update_task(existing, &patch)
                    .await
                    .map(|()| existing.clone())
            }
            None => self.repo.create_task(&draft).await,
        };

        match result {
            Ok(task_id) => {
                // The write landed; the edit is done even if the follow-up
                // re-hydration fails. Propagating that error would report a
                // created task as a failure and invite a duplicating retry,
                // so it only logs; the next hydrate catches the state up.
                self.edit = EditState::Idle;
                match &id {
                    Some(existing) => {
                        let patch = TaskPatch::from_draft(&draft);
                        if let Some(task) =
                            self.tasks.iter_mut().find(|task| &task.id == existing)
                        {
                            patch.apply(task);
                        }
                    }
                    None => {
                        if let Err(err) = self.hydrate().await {
                            warn!(error = %err, "re-hydration after create failed");
                        }
                    }
                }
                Ok(task_id)
            }
            Err(err) => {
                self.edit = EditState::Editing { id, draft };
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{NaiveDate, Utc};

    use super::*;
    use crate::repo::MemoryTaskRepository;

    fn task(id: &str, category: Category, tags: &[&str], due: &str) -> Task {
        Task {
            id: id.to_string(),
            title: format!("Task {id}"),
            description: "desc".to_string(),
            category,
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
            due_date: due.to_string(),
            completed: false,
            created_at: Utc::now(),
            attachment_url: None,
        }
    }

    fn model_with(tasks: Vec<Task>) -> TaskListModel {
        let mut model = TaskListModel::new(Arc::new(MemoryTaskRepository::new()));
        model.tasks = tasks;
        model
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ids(view: &[&Task]) -> Vec<String> {
        view.iter().map(|task| task.id.clone()).collect()
    }

    #[test]
    fn no_filters_is_identity_over_membership() {
        let tasks = vec![
            task("a", Category::Work, &["x"], "2025-01-03"),
            task("b", Category::Personal, &[], "2025-01-01"),
            task("c", Category::Study, &["y"], "2025-01-02"),
        ];
        let view = compute_view(&tasks, &TaskFilters::default(), true);
        assert_eq!(view.len(), 3);
        assert_eq!(ids(&view), vec!["b", "c", "a"]);
    }

    #[test]
    fn empty_collection_yields_empty_view() {
        let view = compute_view(&[], &TaskFilters::default(), true);
        assert!(view.is_empty());
    }

    #[test]
    fn each_predicate_can_exclude_alone() {
        let tasks = vec![task("a", Category::Work, &["urgent"], "2025-06-15")];

        let by_category = TaskFilters {
            category: Some(Category::Study),
            ..TaskFilters::default()
        };
        assert!(compute_view(&tasks, &by_category, true).is_empty());

        let by_tag = TaskFilters {
            tag_substring: Some("later".to_string()),
            ..TaskFilters::default()
        };
        assert!(compute_view(&tasks, &by_tag, true).is_empty());

        let by_start = TaskFilters {
            start_date: Some(date(2025, 7, 1)),
            ..TaskFilters::default()
        };
        assert!(compute_view(&tasks, &by_start, true).is_empty());

        let by_end = TaskFilters {
            end_date: Some(date(2025, 6, 1)),
            ..TaskFilters::default()
        };
        assert!(compute_view(&tasks, &by_end, true).is_empty());

        let all_pass = TaskFilters {
            category: Some(Category::Work),
            tag_substring: Some("urg".to_string()),
            start_date: Some(date(2025, 6, 1)),
            end_date: Some(date(2025, 6, 30)),
        };
        assert_eq!(compute_view(&tasks, &all_pass, true).len(), 1);
    }

    #[test]
    fn tag_match_is_case_sensitive_substring() {
        let tasks = vec![task("a", Category::Work, &["Urgent"], "2025-06-15")];
        let lower = TaskFilters {
            tag_substring: Some("urgent".to_string()),
            ..TaskFilters::default()
        };
        assert!(compute_view(&tasks, &lower, true).is_empty());

        let exact = TaskFilters {
            tag_substring: Some("Urg".to_string()),
            ..TaskFilters::default()
        };
        assert_eq!(compute_view(&tasks, &exact, true).len(), 1);
    }

    #[test]
    fn malformed_due_date_fails_active_date_bounds() {
        let tasks = vec![task("a", Category::Work, &[], "someday")];
        let bounded = TaskFilters {
            start_date: Some(date(2020, 1, 1)),
            ..TaskFilters::default()
        };
        assert!(compute_view(&tasks, &bounded, true).is_empty());
        // With no date bound active the record still shows.
        assert_eq!(compute_view(&tasks, &TaskFilters::default(), true).len(), 1);
    }

    #[test]
    fn sort_orders_by_due_date_and_malformed_sorts_earliest() {
        let tasks = vec![
            task("late", Category::Work, &[], "2025-12-01"),
            task("bad", Category::Work, &[], "garbage"),
            task("early", Category::Work, &[], "2025-01-01"),
        ];
        let asc = compute_view(&tasks, &TaskFilters::default(), true);
        assert_eq!(ids(&asc), vec!["bad", "early", "late"]);

        let desc = compute_view(&tasks, &TaskFilters::default(), false);
        assert_eq!(ids(&desc), vec!["late", "early", "bad"]);
    }

    #[test]
    fn toggle_sort_twice_restores_order_for_distinct_dates() {
        let tasks = vec![
            task("b", Category::Work, &[], "2025-02-01"),
            task("a", Category::Work, &[], "2025-01-01"),
            task("c", Category::Work, &[], "2025-03-01"),
        ];
        let mut model = model_with(tasks);
        let original = ids(&model.view());
        model.toggle_sort();
        assert_ne!(ids(&model.view()), original);
        model.toggle_sort();
        assert_eq!(ids(&model.view()), original);
    }

    #[test]
    fn toggle_select_is_an_involution() {
        let mut model = model_with(vec![task("a", Category::Work, &[], "2025-01-01")]);
        assert!(model.selected_ids.is_empty());
        model.toggle_select("a");
        assert!(model.selected_ids.contains("a"));
        model.toggle_select("a");
        assert!(model.selected_ids.is_empty());
    }

    #[test]
    fn reorder_moves_task_in_memory() {
        let mut model = model_with(vec![
            task("A", Category::Work, &[], "2025-01-01"),
            task("B", Category::Work, &[], "2025-01-02"),
            task("C", Category::Work, &[], "2025-01-03"),
        ]);
        model.reorder(1, 0).expect("reorder");
        let order: Vec<&str> = model.tasks.iter().map(|task| task.id.as_str()).collect();
        assert_eq!(order, vec!["B", "A", "C"]);
    }

    #[test]
    fn reorder_rejects_out_of_range() {
        let mut model = model_with(vec![task("A", Category::Work, &[], "2025-01-01")]);
        let err = model.reorder(0, 3).expect_err("out of range");
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn view_mode_toggles_between_list_and_board() {
        let mut model = model_with(Vec::new());
        assert_eq!(model.view_mode, ViewMode::List);
        model.toggle_view_mode();
        assert_eq!(model.view_mode, ViewMode::Board);
        model.toggle_view_mode();
        assert_eq!(model.view_mode, ViewMode::List);
    }

    #[test]
    fn begin_edit_populates_draft_from_task() {
        let mut model = model_with(vec![task("a", Category::Study, &["x"], "2025-01-01")]);
        model.begin_edit("a").expect("begin edit");
        match model.edit_state() {
            EditState::Editing { id, draft } => {
                assert_eq!(id.as_deref(), Some("a"));
                assert_eq!(draft.title, "Task a");
                assert_eq!(draft.category, Category::Study);
            }
            other => panic!("unexpected edit state: {other:?}"),
        }
        assert!(model.begin_edit("missing").is_err());
    }
}
