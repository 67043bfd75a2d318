// src/models/mod.rs

//! Domain models for the bot.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod post;
mod practice;

use std::path::PathBuf;

use chrono::{DateTime, Utc};

// Re-export all public types
pub use config::{ApiConfig, Config, LibraryConfig, OutputConfig, PipelineConfig};
pub use post::{PageMeta, Post, PostPage};
pub(crate) use practice::FrontMatter;
pub use practice::{PendingRecord, PracticeDocument, Titled};

/// Statistics of a single sync run.
#[derive(Debug, Clone)]
pub struct SyncSummary {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Entries in the practices directory
    pub listed: usize,
    /// Practices parsed successfully
    pub parsed: usize,
    /// Title keys collected from published posts
    pub published: usize,
    /// Practices written as pending
    pub pending: usize,
    /// Output file, when anything was written
    pub output: Option<PathBuf>,
}

impl SyncSummary {
    /// Files that were listed but not parsed.
    pub fn skipped(&self) -> usize {
        self.listed.saturating_sub(self.parsed)
    }

    /// Wall-clock duration of the run.
    pub fn duration(&self) -> chrono::Duration {
        self.end_time - self.start_time
    }
}
