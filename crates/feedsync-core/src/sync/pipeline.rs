use std::fmt;
use std::sync::Arc;

use tokio::task::JoinSet;

use super::engine::{admit, partition_by_source};
use crate::feed::{ExtractFeed, FeedSource, NewArticle};
use crate::storage::{ArticleStore, SourceStore};
use crate::{Error, Result};

/// Stage at which a source failed during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStage {
    Fetch,
    CutoffLookup,
    Insert,
}

impl fmt::Display for SyncStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncStage::Fetch => write!(f, "fetch"),
            SyncStage::CutoffLookup => write!(f, "cutoff lookup"),
            SyncStage::Insert => write!(f, "insert"),
        }
    }
}

/// One source's recorded failure; the run continues past it
#[derive(Debug)]
pub struct SourceFailure {
    pub source_id: i64,
    pub stage: SyncStage,
    pub error: Error,
}

/// Aggregate outcome of one sync run
#[derive(Debug, Default)]
pub struct SyncReport {
    pub new_articles: u64,
    pub failures: Vec<SourceFailure>,
}

impl SyncReport {
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Run the full pipeline: enumerate sources, fetch them in parallel,
/// filter each source's candidates against its stored cutoff, and
/// persist the admitted articles one batch per source.
///
/// A fetch or storage failure covers exactly one source: it is logged,
/// recorded in the report, and never aborts the remaining sources.
/// Only a registry listing failure fails the run itself. Running twice
/// against unchanged remote content persists nothing on the second run
/// because each run re-derives the cutoffs from storage.
pub async fn run_sync<E, A>(
    extractor: Arc<E>,
    registry: &dyn SourceStore,
    store: Arc<A>,
    concurrency: usize,
) -> Result<SyncReport>
where
    E: ExtractFeed + ?Sized + 'static,
    A: ArticleStore + ?Sized + 'static,
{
    let sources = registry.list_sources().await?;

    tracing::info!("Starting sync run for {} sources", sources.len());

    let mut report = SyncReport::default();
    let candidates = fetch_all(extractor, sources, concurrency, &mut report).await?;

    // Explicit partition before any filtering; every candidate of a
    // source observes the same cutoff below.
    let groups = partition_by_source(candidates);

    let mut join_set: JoinSet<(i64, std::result::Result<u64, (SyncStage, Error)>)> =
        JoinSet::new();

    for (source_id, group) in groups {
        let store = Arc::clone(&store);
        join_set.spawn(async move {
            let outcome = sync_source(store.as_ref(), source_id, group).await;
            (source_id, outcome)
        });
    }

    while let Some(joined) = join_set.join_next().await {
        let (source_id, outcome) =
            joined.map_err(|e| Error::Other(format!("Task join error: {}", e)))?;

        match outcome {
            Ok(count) => {
                if count > 0 {
                    tracing::info!("Source {}: {} new articles", source_id, count);
                }
                report.new_articles += count;
            }
            Err((stage, error)) => {
                tracing::error!("Source {} failed during {}: {}", source_id, stage, error);
                report.failures.push(SourceFailure {
                    source_id,
                    stage,
                    error,
                });
            }
        }
    }

    tracing::info!(
        "Sync run finished: {} new articles, {} sources failed",
        report.new_articles,
        report.failures.len()
    );

    Ok(report)
}

/// Fan out fetches with bounded concurrency, collecting candidates and
/// recording per-source fetch failures
async fn fetch_all<E>(
    extractor: Arc<E>,
    sources: Vec<FeedSource>,
    concurrency: usize,
    report: &mut SyncReport,
) -> Result<Vec<NewArticle>>
where
    E: ExtractFeed + ?Sized + 'static,
{
    let mut join_set: JoinSet<(i64, Result<Vec<NewArticle>>)> = JoinSet::new();
    let mut iter = sources.into_iter();
    let mut candidates = Vec::new();

    fn spawn_fetch<E>(
        join_set: &mut JoinSet<(i64, Result<Vec<NewArticle>>)>,
        extractor: Arc<E>,
        source: FeedSource,
    ) where
        E: ExtractFeed + ?Sized + 'static,
    {
        join_set.spawn(async move {
            let outcome = extractor.extract(&source).await;
            (source.id, outcome)
        });
    }

    for _ in 0..concurrency.max(1) {
        if let Some(source) = iter.next() {
            spawn_fetch(&mut join_set, Arc::clone(&extractor), source);
        }
    }

    while let Some(joined) = join_set.join_next().await {
        let (source_id, outcome) =
            joined.map_err(|e| Error::Other(format!("Task join error: {}", e)))?;

        match outcome {
            Ok(extracted) => {
                tracing::debug!("Source {}: {} candidates", source_id, extracted.len());
                candidates.extend(extracted);
            }
            Err(error) => {
                tracing::error!("Failed to fetch source {}: {}", source_id, error);
                report.failures.push(SourceFailure {
                    source_id,
                    stage: SyncStage::Fetch,
                    error,
                });
            }
        }

        if let Some(source) = iter.next() {
            spawn_fetch(&mut join_set, Arc::clone(&extractor), source);
        }
    }

    Ok(candidates)
}

/// Sync one source's group: read the cutoff once, admit, insert.
///
/// The cutoff read happens before any filtering, so concurrently
/// extracted candidates for the source all see the same boundary.
async fn sync_source<A>(
    store: &A,
    source_id: i64,
    group: Vec<NewArticle>,
) -> std::result::Result<u64, (SyncStage, Error)>
where
    A: ArticleStore + ?Sized,
{
    let cutoff = store
        .latest_published_at(source_id)
        .await
        .map_err(|e| (SyncStage::CutoffLookup, e))?;

    let admitted = admit(group, cutoff);
    if admitted.is_empty() {
        return Ok(0);
    }

    store
        .insert_batch(source_id, &admitted)
        .await
        .map_err(|e| (SyncStage::Insert, e))?;

    Ok(admitted.len() as u64)
}
