//! Bounded-concurrency enrichment batches.
//!
//! Candidates are split into fixed-size batches. Requests within a batch run
//! concurrently and the whole batch settles before the next one starts.
//! Cancellation is checked before every batch; a batch still in flight when
//! cancellation fires is abandoned rather than awaited.

use std::future::Future;

use async_trait::async_trait;
use futures_util::future::join_all;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::cancel::CancelFlag;
use crate::services::resolver::models::types::{CandidateEntity, ReferenceGroup, ReferenceTag};
use crate::types::errors::ResolveError;
use crate::types::run::percent;

pub const DEFAULT_REFERENCE_BATCH_SIZE: usize = 5;

/// Fetches the reference tags of one catalog entity.
#[async_trait]
pub trait ReferenceFetcher: Send + Sync {
    async fn fetch_references(&self, entity_id: &str) -> Result<Vec<ReferenceTag>, ResolveError>;
}

/// Two-level lookup: reference groups of an entity, then each group's tags.
#[async_trait]
pub trait ReferenceGroupFetcher: Send + Sync {
    async fn fetch_groups(&self, entity_id: &str) -> Result<Vec<ReferenceGroup>, ResolveError>;

    async fn fetch_group_references(
        &self,
        entity_id: &str,
        group: &ReferenceGroup,
    ) -> Result<Vec<ReferenceTag>, ResolveError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichConfig {
    pub batch_size: usize,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_REFERENCE_BATCH_SIZE,
        }
    }
}

impl EnrichConfig {
    pub fn with_batch_size(batch_size: usize) -> Self {
        Self { batch_size }
    }

    /// Batch size clamped to at least one.
    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.max(1)
    }
}

/// Streaming event contract for enrichment progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "event", content = "data")]
pub enum EnrichEvent {
    /// Emitted once before the first batch.
    #[serde(rename_all = "camelCase")]
    Started { total: usize },
    /// Emitted after every settled batch; `completed` never decreases.
    #[serde(rename_all = "camelCase")]
    Progress {
        completed: usize,
        total: usize,
        percent: u8,
    },
    #[serde(rename_all = "camelCase")]
    Finished { total: usize, failed: usize },
    #[serde(rename_all = "camelCase")]
    Cancelled { completed: usize, total: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichStatus {
    Completed,
    Cancelled,
}

/// Result of one enrichment pass.
///
/// On cancellation `candidates` still holds every candidate; those in
/// settled batches are enriched and the rest are untouched. Callers must not
/// treat a cancelled pass as final.
#[derive(Debug, Clone)]
pub struct EnrichOutcome {
    pub status: EnrichStatus,
    pub candidates: Vec<CandidateEntity>,
    pub completed: usize,
    pub failed: usize,
}

impl EnrichOutcome {
    pub fn is_cancelled(&self) -> bool {
        self.status == EnrichStatus::Cancelled
    }
}

/// Attach each candidate's reference tags, one request per candidate.
pub async fn enrich_with_references<F, E>(
    candidates: Vec<CandidateEntity>,
    fetcher: &F,
    config: &EnrichConfig,
    cancel: &CancelFlag,
    on_event: E,
) -> EnrichOutcome
where
    F: ReferenceFetcher + ?Sized,
    E: FnMut(EnrichEvent),
{
    run_batches(candidates, config, cancel, on_event, |id: String| async move {
        fetcher.fetch_references(&id).await
    })
    .await
}

/// Attach reference tags discovered through the entity's reference groups.
///
/// A failed group listing fails the candidate; a failed group detail only
/// drops that group's tags. Group details of one candidate are fetched in
/// chunks of the batch size, one chunk at a time.
pub async fn enrich_with_reference_groups<F, E>(
    candidates: Vec<CandidateEntity>,
    fetcher: &F,
    config: &EnrichConfig,
    cancel: &CancelFlag,
    on_event: E,
) -> EnrichOutcome
where
    F: ReferenceGroupFetcher + ?Sized,
    E: FnMut(EnrichEvent),
{
    let group_batch_size = config.effective_batch_size();
    run_batches(candidates, config, cancel, on_event, |id: String| async move {
        collect_group_references(fetcher, &id, group_batch_size).await
    })
    .await
}

async fn collect_group_references<F>(
    fetcher: &F,
    entity_id: &str,
    batch_size: usize,
) -> Result<Vec<ReferenceTag>, ResolveError>
where
    F: ReferenceGroupFetcher + ?Sized,
{
    let groups = fetcher.fetch_groups(entity_id).await?;

    let mut tags = Vec::new();
    for chunk in groups.chunks(batch_size.max(1)) {
        let details = join_all(
            chunk
                .iter()
                .map(|group| fetcher.fetch_group_references(entity_id, group)),
        )
        .await;

        for (group, detail) in chunk.iter().zip(details) {
            match detail {
                Ok(group_tags) => tags.extend(group_tags),
                Err(e) => warn!(
                    "Reference group {} ({}) of {} skipped: {}",
                    group.id, group.name, entity_id, e
                ),
            }
        }
    }
    Ok(tags)
}

async fn run_batches<E, Fetch, Fut>(
    mut candidates: Vec<CandidateEntity>,
    config: &EnrichConfig,
    cancel: &CancelFlag,
    mut on_event: E,
    fetch: Fetch,
) -> EnrichOutcome
where
    E: FnMut(EnrichEvent),
    Fetch: Fn(String) -> Fut,
    Fut: Future<Output = Result<Vec<ReferenceTag>, ResolveError>>,
{
    let total = candidates.len();
    let batch_size = config.effective_batch_size();
    let mut completed = 0;
    let mut failed = 0;

    on_event(EnrichEvent::Started { total });
    info!("Enriching {} candidates in batches of {}", total, batch_size);

    while completed < total {
        if cancel.is_cancelled() {
            return cancelled(candidates, completed, failed, &mut on_event);
        }

        let end = (completed + batch_size).min(total);
        let settled = {
            let requests = candidates[completed..end]
                .iter()
                .map(|candidate| fetch(candidate.id.clone()));
            tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                results = join_all(requests) => Some(results),
            }
        };
        let Some(results) = settled else {
            info!("Enrichment batch {}..{} abandoned on cancel", completed, end);
            return cancelled(candidates, completed, failed, &mut on_event);
        };

        for (candidate, result) in candidates[completed..end].iter_mut().zip(results) {
            match result {
                Ok(tags) => candidate.references = tags,
                Err(e) => {
                    warn!("References for {} unavailable: {}", candidate.id, e);
                    candidate.references.clear();
                    failed += 1;
                }
            }
        }

        completed = end;
        on_event(EnrichEvent::Progress {
            completed,
            total,
            percent: percent(completed, total),
        });
    }

    on_event(EnrichEvent::Finished { total, failed });
    info!("Enrichment finished: {} candidates, {} failed", total, failed);

    EnrichOutcome {
        status: EnrichStatus::Completed,
        candidates,
        completed,
        failed,
    }
}

fn cancelled<E: FnMut(EnrichEvent)>(
    candidates: Vec<CandidateEntity>,
    completed: usize,
    failed: usize,
    on_event: &mut E,
) -> EnrichOutcome {
    let total = candidates.len();
    on_event(EnrichEvent::Cancelled { completed, total });
    info!("Enrichment cancelled after {}/{}", completed, total);

    EnrichOutcome {
        status: EnrichStatus::Cancelled,
        candidates,
        completed,
        failed,
    }
}

#[cfg(test)]
#[path = "tests/orchestrator_tests.rs"]
mod tests;
