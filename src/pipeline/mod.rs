//! Pipeline entry points for the bot.
//!
//! - `run_sync`: Reconcile practices against published posts and write the pending set
//! - `run_practices`: Ingest and enrich practices without network access

pub mod enrich;
pub mod reconcile;
pub mod sync;

pub use enrich::Enricher;
pub use reconcile::reconcile;
pub use sync::{build_enricher, run_practices, run_sync};
