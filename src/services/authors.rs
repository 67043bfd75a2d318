// src/services/authors.rs

//! Author directory.
//!
//! Maps author ids from practice front matter to social mentions, loaded once
//! from a two-column table (`author_id`, `social_handle`).

use std::collections::HashMap;
use std::path::Path;

use csv::{ReaderBuilder, Trim};

use crate::error::Result;
use crate::models::LibraryConfig;

/// Handle value meaning "this author has no social account".
const NO_HANDLE: &str = "--";

/// Lower-cased author id to resolved mention.
#[derive(Debug, Clone)]
pub struct AuthorDirectory {
    entries: HashMap<String, String>,
    profile_base_url: String,
    marker: String,
}

impl AuthorDirectory {
    /// An empty directory; every author resolves to a profile link.
    pub fn empty(library: &LibraryConfig) -> Self {
        Self {
            entries: HashMap::new(),
            profile_base_url: library.profile_base_url.clone(),
            marker: library.author_marker.clone(),
        }
    }

    /// Load the author table at `path`, skipping its header row.
    pub fn load(path: impl AsRef<Path>, library: &LibraryConfig) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_path(path.as_ref())?;

        let mut directory = Self::empty(library);
        for (line, record) in reader.records().enumerate() {
            let record = record?;
            let raw_id = record.get(0).unwrap_or_default();
            // Ids may be written as file names (`jane.md`)
            let id = raw_id.split('.').next().unwrap_or_default();
            if id.is_empty() {
                log::warn!(
                    "Skipping row {} of {:?}: empty author id",
                    line + 2,
                    path.as_ref()
                );
                continue;
            }

            let handle = record.get(1).unwrap_or_default();
            let mention = if handle.is_empty() || handle == NO_HANDLE {
                directory.profile_link(id)
            } else {
                format!("@{}", handle.trim_start_matches('@'))
            };
            directory.entries.insert(id.to_lowercase(), mention);
        }

        log::info!("Authors mapped: {}", directory.len());
        Ok(directory)
    }

    /// Number of mapped authors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored mention for an id, matched case-insensitively.
    pub fn get(&self, author_id: &str) -> Option<&str> {
        self.entries
            .get(&author_id.to_lowercase())
            .map(String::as_str)
    }

    /// Resolve a practice's authors into a space-joined mention string.
    ///
    /// Unknown ids fall back to a profile link built from the id exactly as
    /// written; `document` only names the practice in the warning.
    pub fn resolve(&self, author_ids: &[String], document: &str) -> String {
        author_ids
            .iter()
            .map(|id| {
                let mention = match self.get(id) {
                    Some(mention) => mention.to_string(),
                    None => {
                        log::warn!(
                            "Missing author details: '{}' for practice '{}'",
                            id,
                            document
                        );
                        self.profile_link(id)
                    }
                };
                format!("{} {}", self.marker, mention)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn profile_link(&self, id: &str) -> String {
        format!("{}{}", self.profile_base_url, id)
    }
}
