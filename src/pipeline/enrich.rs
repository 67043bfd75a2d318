//! Turns parsed practices into pending records.

use crate::models::{LibraryConfig, PendingRecord, PracticeDocument};
use crate::services::AuthorDirectory;
use crate::utils::resolve;

/// Resolves author mentions and absolute icon links.
pub struct Enricher {
    site_url: String,
    authors: Option<AuthorDirectory>,
}

impl Enricher {
    /// `authors` is `None` when author resolution is disabled.
    pub fn new(library: &LibraryConfig, authors: Option<AuthorDirectory>) -> Self {
        Self {
            site_url: library.site_url.clone(),
            authors,
        }
    }

    pub fn enrich(&self, document: PracticeDocument) -> PendingRecord {
        let authors = match &self.authors {
            Some(directory) => directory.resolve(&document.authors, &document.title),
            None => document.authors.join(" "),
        };
        let icon = self.absolute_icon(document.icon);

        PendingRecord {
            title: document.title,
            purpose: document.purpose,
            authors,
            icon,
            file_name: document.file_name,
            url: document.url,
        }
    }

    /// Icons rooted at `/` are appended to the site URL verbatim, so they
    /// are neither re-encoded nor able to point at another host.
    fn absolute_icon(&self, icon: String) -> String {
        if icon.starts_with('/') {
            format!("{}{}", self.site_url.trim_end_matches('/'), icon)
        } else {
            resolve(&self.site_url, &icon).unwrap_or(icon)
        }
    }

    pub fn enrich_all(&self, documents: Vec<PracticeDocument>) -> Vec<PendingRecord> {
        documents.into_iter().map(|d| self.enrich(d)).collect()
    }
}
