// src/services/repo.rs

//! Practice repository checkout.
//!
//! Clones the library repository when it is missing, otherwise checks out the
//! configured branch and pulls. Only a failed clone is fatal: an outdated
//! checkout can still be reconciled.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{AppError, Result};
use crate::models::LibraryConfig;

/// Keeps the local checkout of the practice repository current.
pub struct RepoSync {
    url: String,
    dir: PathBuf,
    branch: String,
}

impl RepoSync {
    pub fn new(library: &LibraryConfig) -> Self {
        Self {
            url: library.repo_url.clone(),
            dir: library.repo_dir.clone(),
            branch: library.branch.clone(),
        }
    }

    /// Clone or update the checkout.
    pub fn sync(&self) -> Result<()> {
        if !self.dir.is_dir() {
            log::info!("Cloning {} into {}", self.url, self.dir.display());
            let dir = self.dir.to_string_lossy();
            return run_git(None, &["clone", &self.url, &dir]);
        }

        if let Err(e) = run_git(Some(&self.dir), &["checkout", &self.branch]) {
            log::warn!("{}", e);
        }
        if let Err(e) = run_git(Some(&self.dir), &["pull"]) {
            log::warn!("{}", e);
        }
        Ok(())
    }
}

/// Run git with `args`, inside `dir` when given.
fn run_git(dir: Option<&Path>, args: &[&str]) -> Result<()> {
    let mut command = Command::new("git");
    if let Some(dir) = dir {
        command.arg("-C").arg(dir);
    }
    command.args(args);

    let rendered = format!("git {}", args.join(" "));
    log::debug!("Running {}", rendered);
    let output = command
        .output()
        .map_err(|e| AppError::repo(&rendered, e))?;
    if !output.status.success() {
        return Err(AppError::repo(
            rendered,
            String::from_utf8_lossy(&output.stderr).trim(),
        ));
    }
    Ok(())
}
