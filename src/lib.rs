//! taskdeck - Task Management Client Library
//!
//! This library provides the core functionality for the taskdeck CLI,
//! a single-user task manager backed by a hosted document database and
//! object storage.
//!
//! # Core Concepts
//!
//! - **Tasks**: The sole persisted entity, stored in a remote document
//!   collection with optional blob attachments
//! - **Repository**: The boundary translating task operations into remote
//!   document/blob store calls, injectable for testing
//! - **View-model**: In-memory state plus pure filter/sort/batch logic over
//!   the hydrated collection
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `config`: Configuration loading from `.taskdeck.toml` and environment
//! - `error`: Error types and result aliases
//! - `output`: Human and JSON output envelopes
//! - `repo`: Repository trait with HTTP and in-memory implementations
//! - `task`: Task records, drafts, patches, and validation
//! - `view`: Task list view-model and derived views

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod repo;
pub mod task;
pub mod view;

pub use error::{Error, Result};
