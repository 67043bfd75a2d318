// src/pipeline/sync.rs

//! Full reconciliation run.

use chrono::Utc;

use crate::error::Result;
use crate::models::{Config, PendingRecord, SyncSummary};
use crate::services::{AuthorDirectory, PostCollector, PracticeIngestor, RepoSync};
use crate::storage::PendingStorage;

use super::enrich::Enricher;
use super::reconcile::reconcile;

/// Build the enricher, loading the author table when resolution is enabled.
pub fn build_enricher(config: &Config) -> Result<Enricher> {
    let authors = if config.pipeline.resolve_authors {
        Some(AuthorDirectory::load(
            &config.library.authors_file,
            &config.library,
        )?)
    } else {
        None
    };
    Ok(Enricher::new(&config.library, authors))
}

/// Ingest and enrich every practice, without any network access.
pub fn run_practices(config: &Config) -> Result<Vec<PendingRecord>> {
    let documents = PracticeIngestor::new(&config.library).ingest()?;
    Ok(build_enricher(config)?.enrich_all(documents))
}

/// Run the pipeline: ingest, resolve authors, collect published posts,
/// reconcile, and write the pending set.
///
/// The bearer token is checked before anything else happens.
pub fn run_sync(config: &Config) -> Result<SyncSummary> {
    let start_time = Utc::now();
    let token = config.bearer_token()?;

    let total_steps = if config.pipeline.sync_repo { 5 } else { 4 };
    let mut step = 1;

    if config.pipeline.sync_repo {
        log::info!("Step {step}/{total_steps}: Updating practice repository");
        RepoSync::new(&config.library).sync()?;
        step += 1;
    }

    log::info!("Step {step}/{total_steps}: Reading practices");
    let ingestor = PracticeIngestor::new(&config.library);
    let outcome = ingestor.ingest_detailed()?;
    let parsed = outcome.documents.len();
    let records = build_enricher(config)?.enrich_all(outcome.documents);
    step += 1;

    log::info!("Step {step}/{total_steps}: Collecting published posts");
    let published = PostCollector::new(&config.api, token)?.collect()?;
    step += 1;

    log::info!("Step {step}/{total_steps}: Reconciling");
    let pending = reconcile(records, &published, config.pipeline.force_all);
    log::info!("{} practices pending", pending.len());
    step += 1;

    log::info!("Step {step}/{total_steps}: Writing output");
    let written = PendingStorage::new(&config.output.path).write(&pending)?;

    let summary = SyncSummary {
        start_time,
        end_time: Utc::now(),
        listed: outcome.listed,
        parsed,
        published: published.len(),
        pending: pending.len(),
        output: written.map(|metadata| metadata.location),
    };

    log::info!(
        "Complete: {} listed, {} parsed, {} skipped, {} published, {} pending in {}ms",
        summary.listed,
        summary.parsed,
        summary.skipped(),
        summary.published,
        summary.pending,
        summary.duration().num_milliseconds()
    );
    Ok(summary)
}
