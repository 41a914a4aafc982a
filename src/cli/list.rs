//! taskdeck list command implementation
//!
//! Hydrates the view-model, applies the requested filters and sort order,
//! and prints the derived view either as lines or as board columns grouped
//! by category.

use std::str::FromStr;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::repo::TaskRepository;
use crate::task::{Category, Task, DUE_DATE_FORMAT};
use crate::view::{TaskFilters, TaskListModel, ViewMode};

pub struct ListOptions {
    pub category: Option<String>,
    pub tag: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub desc: bool,
    pub board: bool,
}

pub async fn run(
    repo: Arc<dyn TaskRepository>,
    options: OutputOptions,
    opts: ListOptions,
) -> Result<()> {
    let mut model = TaskListModel::new(repo);
    model.filters = build_filters(&opts)?;
    model.sort_ascending = !opts.desc;
    if opts.board {
        model.toggle_view_mode();
    }
    model.hydrate().await?;

    let view = model.view();
    let mut human = HumanOutput::new(format!(
        "{} of {} tasks",
        view.len(),
        model.tasks.len()
    ));
    match model.view_mode {
        ViewMode::List => {
            for task in &view {
                human.push_detail(task_line(task));
            }
        }
        ViewMode::Board => {
            for category in Category::ALL {
                let column: Vec<&&Task> = view
                    .iter()
                    .filter(|task| task.category == category)
                    .collect();
                human.push_summary(category.as_str(), column.len().to_string());
                for task in column {
                    human.push_detail(format!("[{category}] {}", task_line(task)));
                }
            }
        }
    }

    let data: Vec<&Task> = view;
    emit_success(options, "list", &data, Some(&human))
}

fn build_filters(opts: &ListOptions) -> Result<TaskFilters> {
    let category = opts
        .category
        .as_deref()
        .map(Category::from_str)
        .transpose()?;
    Ok(TaskFilters {
        category,
        tag_substring: opts.tag.clone(),
        start_date: parse_date(opts.from.as_deref())?,
        end_date: parse_date(opts.to.as_deref())?,
    })
}

fn parse_date(value: Option<&str>) -> Result<Option<NaiveDate>> {
    value
        .map(|raw| {
            NaiveDate::parse_from_str(raw.trim(), DUE_DATE_FORMAT)
                .map_err(|_| Error::InvalidArgument(format!("invalid date '{raw}' (YYYY-MM-DD)")))
        })
        .transpose()
}

fn task_line(task: &Task) -> String {
    let mark = if task.completed { "x" } else { " " };
    let mut line = format!("[{mark}] {} {} (due {})", task.id, task.title, task.due_date);
    if !task.tags.is_empty() {
        line.push_str(&format!(" #{}", task.tags.join(" #")));
    }
    line
}
