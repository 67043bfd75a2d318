//! CSV output of pending practices.
//!
//! The header row comes from the record's field names, in declaration order:
//! `title, purpose, authors, icon, file_name, url`.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::error::{AppError, Result};
use crate::models::PendingRecord;
use crate::storage::WriteMetadata;

/// Writes pending records to a CSV file.
#[derive(Debug, Clone)]
pub struct PendingStorage {
    path: PathBuf,
}

impl PendingStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Write `records`, replacing any previous file.
    ///
    /// An empty set writes nothing and returns `None`.
    pub fn write(&self, records: &[PendingRecord]) -> Result<Option<WriteMetadata>> {
        if records.is_empty() {
            log::info!("Nothing pending, {} left untouched", self.path.display());
            return Ok(None);
        }

        let mut writer = csv::Writer::from_writer(Vec::new());
        for record in records {
            writer.serialize(record)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| AppError::Io(e.into_error()))?;
        self.write_bytes(&bytes)?;

        log::info!(
            "Wrote {} pending practices to {}",
            records.len(),
            self.path.display()
        );
        Ok(Some(WriteMetadata {
            record_count: records.len(),
            location: self.path.clone(),
        }))
    }

    /// Write bytes atomically (write to temp, then rename).
    fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.path.with_extension("tmp");
        let mut file = fs::File::create(&tmp)?;
        file.write_all(bytes)?;
        file.flush()?;
        drop(file);

        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(title: &str) -> PendingRecord {
        PendingRecord {
            title: title.to_string(),
            purpose: format!("Why {title}, really"),
            authors: "\u{1F64F}\u{1F3FB} @jane".to_string(),
            icon: "https://openpracticelibrary.com/img/x.png".to_string(),
            file_name: format!("{}.md", title.to_lowercase()),
            url: format!(
                "https://openpracticelibrary.com/practice/{}/",
                title.to_lowercase()
            ),
        }
    }

    #[test]
    fn test_empty_is_noop() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        let storage = PendingStorage::new(&path);

        assert!(storage.write(&[]).unwrap().is_none());
        assert!(!path.exists());
    }

    #[test]
    fn test_write_and_read_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/out.csv");
        let storage = PendingStorage::new(&path);
        let records = vec![record("Retro"), record("Kickoff")];

        let metadata = storage.write(&records).unwrap().unwrap();
        assert_eq!(metadata.record_count, 2);
        assert_eq!(metadata.location, path);

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(
            headers,
            vec!["title", "purpose", "authors", "icon", "file_name", "url"]
        );
        let rows: Vec<PendingRecord> = reader.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(rows, records);
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_overwrites_previous_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        let storage = PendingStorage::new(&path);

        storage.write(&[record("A"), record("B")]).unwrap();
        storage.write(&[record("C")]).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(reader.records().count(), 1);
    }
}
