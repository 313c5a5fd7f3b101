mod engine;
mod pipeline;

pub use engine::{admit, compute_new_articles, partition_by_source};
pub use pipeline::{run_sync, SourceFailure, SyncReport, SyncStage};
