// src/services/practices.rs

//! Practice ingestion.
//!
//! Reads every file of the practices directory and parses the first YAML
//! document of each into a `PracticeDocument`. A file that cannot be parsed is
//! skipped with a warning; it never stops the batch.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DocumentError, Result};
use crate::models::{FrontMatter, LibraryConfig, PracticeDocument};
use crate::utils::{join_path, slug};

/// Outcome of reading the practices directory.
#[derive(Debug, Default)]
pub struct IngestOutcome {
    pub documents: Vec<PracticeDocument>,
    /// Entries found in the directory, sub-directories included
    pub listed: usize,
    pub skipped: Vec<DocumentError>,
}

/// Service for turning practice files into documents.
pub struct PracticeIngestor {
    directory: PathBuf,
    extension: String,
    site_url: String,
    practice_path: String,
}

impl PracticeIngestor {
    /// Create an ingestor for the configured practices directory.
    pub fn new(library: &LibraryConfig) -> Self {
        Self::with_directory(&library.practices_dir, library)
    }

    /// Create an ingestor reading from `directory` instead of the configured one.
    pub fn with_directory(directory: impl Into<PathBuf>, library: &LibraryConfig) -> Self {
        Self {
            directory: directory.into(),
            extension: library.document_extension.clone(),
            site_url: library.site_url.clone(),
            practice_path: library.practice_path.clone(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Parse every practice file. Only an unreadable directory is an error.
    pub fn ingest(&self) -> Result<Vec<PracticeDocument>> {
        Ok(self.ingest_detailed()?.documents)
    }

    /// Like `ingest`, also reporting the listing size and skipped files.
    pub fn ingest_detailed(&self) -> Result<IngestOutcome> {
        let mut entries = fs::read_dir(&self.directory)?.collect::<std::io::Result<Vec<_>>>()?;
        entries.sort_by_key(|entry| entry.file_name());

        let mut outcome = IngestOutcome {
            listed: entries.len(),
            ..IngestOutcome::default()
        };

        for entry in entries {
            let path = entry.path();
            if path.is_dir() {
                log::debug!("Skipping directory {}", path.display());
                continue;
            }
            match self.parse_file(&path) {
                Ok(document) => outcome.documents.push(document),
                Err(error) => {
                    log::warn!("Skipping practice: {}", error);
                    outcome.skipped.push(error);
                }
            }
        }

        log::info!(
            "Found {} practices, parsed {}",
            outcome.listed,
            outcome.documents.len()
        );
        Ok(outcome)
    }

    /// Parse a single practice file.
    pub fn parse_file(&self, path: &Path) -> std::result::Result<PracticeDocument, DocumentError> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let bytes = fs::read(path).map_err(|source| DocumentError::Read {
            file: file_name.clone(),
            source,
        })?;
        let text = String::from_utf8(bytes).map_err(|_| DocumentError::Encoding {
            file: file_name.clone(),
        })?;

        self.parse_str(&text, file_name)
    }

    /// Parse the contents of a practice file named `file_name`.
    pub fn parse_str(
        &self,
        text: &str,
        file_name: String,
    ) -> std::result::Result<PracticeDocument, DocumentError> {
        let yaml = first_document(text);
        if yaml.trim().is_empty() {
            return Err(DocumentError::Empty { file: file_name });
        }

        let front: FrontMatter = match serde_yaml::from_str(yaml) {
            Ok(front) => front,
            Err(source) => {
                return Err(DocumentError::Malformed {
                    file: file_name,
                    source,
                });
            }
        };

        let missing = |field| DocumentError::MissingField {
            file: file_name.clone(),
            field,
        };
        let title = front.title.ok_or_else(|| missing("title"))?;
        let purpose = front.subtitle.ok_or_else(|| missing("subtitle"))?;
        let authors = front.authors.ok_or_else(|| missing("authors"))?;
        let icon = front.icon.ok_or_else(|| missing("icon"))?;

        let url = format!(
            "{}/",
            join_path(
                &self.site_url,
                &[self.practice_path.as_str(), slug(&file_name, &self.extension)]
            )
        );

        Ok(PracticeDocument {
            title,
            purpose,
            authors,
            icon,
            file_name,
            url,
        })
    }
}

/// Text of the first YAML document in a multi-document file.
///
/// A leading `---` opens the document; the next `---` or `...` line closes it.
/// Anything after that (the markdown body) is never looked at.
fn first_document(text: &str) -> &str {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut start = None;
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        let marker = line.trim_end();
        let line_start = offset;
        offset += line.len();

        match start {
            None if marker == "---" => start = Some(offset),
            None if marker.is_empty() || marker.starts_with('#') => {}
            None => start = Some(line_start),
            Some(begin) if marker == "---" || marker == "..." => {
                return &text[begin..line_start];
            }
            Some(_) => {}
        }
    }
    start.map_or("", |begin| &text[begin.min(text.len())..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn ingestor(dir: &Path) -> PracticeIngestor {
        PracticeIngestor::with_directory(dir, &LibraryConfig::default())
    }

    fn practice(title: &str) -> String {
        format!(
            "---\ntitle: {title}\nsubtitle: Why {title}\nauthors:\n  - jane\n  - Bob\nicon: /img/{title}.png\n---\n\n# {title}\n\nBody with: colons and - dashes\n"
        )
    }

    #[test]
    fn test_first_document() {
        assert_eq!(first_document("---\na: 1\n---\nbody"), "a: 1\n");
        assert_eq!(first_document("a: 1\n---\nb: 2\n"), "a: 1\n");
        assert_eq!(first_document("---\na: 1\n...\n"), "a: 1\n");
        assert_eq!(first_document("\n---\na: 1\n"), "a: 1\n");
        assert_eq!(first_document("---\n---\n"), "");
        assert_eq!(first_document(""), "");
    }

    #[test]
    fn test_parse_str_full() {
        let doc = ingestor(Path::new("."))
            .parse_str(&practice("Retro"), "retro.md".to_string())
            .unwrap();
        assert_eq!(doc.title, "Retro");
        assert_eq!(doc.purpose, "Why Retro");
        assert_eq!(doc.authors, vec!["jane", "Bob"]);
        assert_eq!(doc.icon, "/img/Retro.png");
        assert_eq!(doc.file_name, "retro.md");
        assert_eq!(doc.url, "https://openpracticelibrary.com/practice/retro/");
    }

    #[test]
    fn test_parse_str_ignores_trailing_documents() {
        let text = "---\ntitle: A\nsubtitle: B\nauthors: []\nicon: /i.png\n---\ntitle: Other\n---\n: : not yaml {\n";
        let doc = ingestor(Path::new("."))
            .parse_str(text, "a.md".to_string())
            .unwrap();
        assert_eq!(doc.title, "A");
        assert!(doc.authors.is_empty());
    }

    #[test]
    fn test_parse_str_missing_field() {
        let text = "---\ntitle: A\nauthors: [x]\nicon: /i.png\n---\n";
        let err = ingestor(Path::new("."))
            .parse_str(text, "a.md".to_string())
            .unwrap_err();
        assert!(matches!(
            err,
            DocumentError::MissingField { field: "subtitle", .. }
        ));
        assert_eq!(err.file(), "a.md");
    }

    #[test]
    fn test_parse_str_malformed() {
        let text = "---\ntitle: [unclosed\n---\n";
        let err = ingestor(Path::new("."))
            .parse_str(text, "bad.md".to_string())
            .unwrap_err();
        assert!(matches!(err, DocumentError::Malformed { .. }));
    }

    #[test]
    fn test_parse_str_wrong_type() {
        let text = "---\ntitle: A\nsubtitle: B\nauthors: jane\nicon: /i.png\n---\n";
        let err = ingestor(Path::new("."))
            .parse_str(text, "a.md".to_string())
            .unwrap_err();
        assert!(matches!(err, DocumentError::Malformed { .. }));
    }

    #[test]
    fn test_parse_str_empty() {
        let err = ingestor(Path::new("."))
            .parse_str("---\n---\n# Just a body\n", "empty.md".to_string())
            .unwrap_err();
        assert!(matches!(err, DocumentError::Empty { .. }));
    }

    #[test]
    fn test_parse_file_bad_encoding() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("latin1.md");
        fs::write(&path, b"---\ntitle: Caf\xe9\n---\n").unwrap();

        let err = ingestor(dir.path()).parse_file(&path).unwrap_err();
        assert!(matches!(err, DocumentError::Encoding { .. }));
        assert_eq!(err.file(), "latin1.md");
    }

    #[test]
    fn test_ingest_skips_bad_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("A.md"), practice("Retro")).unwrap();
        fs::write(dir.path().join("B.md"), practice("Kickoff")).unwrap();
        fs::write(dir.path().join("C.md"), "this is just prose, no front matter").unwrap();
        fs::write(dir.path().join("D.md"), b"\xff\xfe\x00").unwrap();
        fs::create_dir(dir.path().join("images")).unwrap();

        let outcome = ingestor(dir.path()).ingest_detailed().unwrap();
        assert_eq!(outcome.listed, 5);
        assert_eq!(outcome.skipped.len(), 2);
        let titles: Vec<_> = outcome.documents.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(titles, vec!["Retro", "Kickoff"]);
        assert!(outcome.documents.len() <= outcome.listed);
    }

    #[test]
    fn test_ingest_missing_directory_is_error() {
        let dir = TempDir::new().unwrap();
        let result = ingestor(&dir.path().join("nope")).ingest();
        assert!(result.is_err());
    }
}
