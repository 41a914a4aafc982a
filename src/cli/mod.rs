//! Command-line interface for taskdeck
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand is defined in its own submodule. The CLI is the event
//! source adapter in front of the view-model: it hydrates, applies the
//! user's action, and prints the result.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::Result;
use crate::output::OutputOptions;
use crate::repo::HttpTaskRepository;

mod create;
mod delete;
mod done;
mod edit;
mod list;
mod upload;

pub use create::DraftArgs;

/// taskdeck - task management against a hosted document store
///
/// Create, edit, filter, sort, batch-operate, and reorder task records
/// with optional file attachments.
#[derive(Parser, Debug)]
#[command(name = "taskdeck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory containing .taskdeck.toml (defaults to current directory)
    #[arg(long, global = true, env = "TASKDECK_DIR")]
    pub dir: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List tasks with client-side filters and due-date sorting
    List {
        /// Only tasks in this category (Work, Personal, Study)
        #[arg(long)]
        category: Option<String>,

        /// Only tasks with a tag containing this substring (case-sensitive)
        #[arg(long)]
        tag: Option<String>,

        /// Only tasks due on or after this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Only tasks due on or before this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Sort by due date descending instead of ascending
        #[arg(long)]
        desc: bool,

        /// Group output into board columns by category
        #[arg(long)]
        board: bool,
    },

    /// Create a new task
    Create {
        #[command(flatten)]
        draft: DraftArgs,

        /// File to upload as an attachment
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Edit an existing task; omitted flags keep the current values
    Edit {
        /// Id of the task to edit
        id: String,

        #[command(flatten)]
        draft: create::DraftOverrideArgs,

        /// File to upload as a replacement attachment
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Delete tasks by id, sequentially and best-effort
    Delete {
        /// Ids of the tasks to delete
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Mark tasks completed, sequentially and best-effort
    Done {
        /// Ids of the tasks to complete
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Upload a file to the attachment blob store
    Upload {
        /// File to upload; the blob path is derived from the file name
        file: PathBuf,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let dir = match &self.dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };
        let config = Config::load_from_dir(&dir)?;
        let options = OutputOptions {
            json: self.json,
            quiet: self.quiet,
        };
        let repo = Arc::new(HttpTaskRepository::new(config.store)?);

        match self.command {
            Commands::List {
                category,
                tag,
                from,
                to,
                desc,
                board,
            } => {
                list::run(
                    repo,
                    options,
                    list::ListOptions {
                        category,
                        tag,
                        from,
                        to,
                        desc,
                        board,
                    },
                )
                .await
            }
            Commands::Create { draft, file } => create::run(repo, options, draft, file).await,
            Commands::Edit { id, draft, file } => edit::run(repo, options, id, draft, file).await,
            Commands::Delete { ids } => delete::run(repo, options, ids).await,
            Commands::Done { ids } => done::run(repo, options, ids).await,
            Commands::Upload { file } => upload::run(repo, options, file).await,
        }
    }
}
