//! Practice document data structures.

use serde::{Deserialize, Serialize};

/// A practice parsed from the library repository.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PracticeDocument {
    /// Practice title, also the key matched against published posts
    pub title: String,

    /// One-line purpose (the `subtitle` front matter key)
    pub purpose: String,

    /// Author ids in front matter order
    pub authors: Vec<String>,

    /// Icon path as written in the front matter
    pub icon: String,

    /// File name inside the practices directory
    pub file_name: String,

    /// Canonical practice page
    pub url: String,
}

/// A practice ready for publication.
///
/// Field order is the column order of the output file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PendingRecord {
    pub title: String,
    pub purpose: String,

    /// Space-joined author mentions
    pub authors: String,

    /// Absolute icon URL
    pub icon: String,

    pub file_name: String,
    pub url: String,
}

/// Anything that can be matched against published title keys.
pub trait Titled {
    fn title(&self) -> &str;
}

impl Titled for PracticeDocument {
    fn title(&self) -> &str {
        &self.title
    }
}

impl Titled for PendingRecord {
    fn title(&self) -> &str {
        &self.title
    }
}

/// Raw front matter of a practice file. Every field is checked by the ingestor.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct FrontMatter {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub authors: Option<Vec<String>>,
    pub icon: Option<String>,
}
