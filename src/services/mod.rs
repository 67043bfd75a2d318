//! Service layer for the bot.
//!
//! This module contains the business logic for:
//! - Practice ingestion (`PracticeIngestor`)
//! - Author mention lookup (`AuthorDirectory`)
//! - Published post collection (`PostCollector`)
//! - Practice repository checkout (`RepoSync`)

mod authors;
mod posts;
mod practices;
mod repo;

pub use authors::AuthorDirectory;
pub use posts::PostCollector;
pub use practices::{IngestOutcome, PracticeIngestor};
pub use repo::RepoSync;
