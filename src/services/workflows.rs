//! Run-scoped orchestration of the three matching workflows.
//!
//! Each call owns its result set and returns it; the only state that can
//! outlive a run is a [`CatalogCache`] the caller passes in explicitly.
//!
//! Order within a run is fixed: fetch catalog → (enrich) → match → rank.
//! Matching only starts after enrichment has fully settled.

use std::sync::Arc;

use log::{info, warn};

use crate::services::config::ResolverSettings;
use crate::services::enrichment::{
    enrich_with_references, CancelFlag, EnrichConfig, EnrichEvent, ReferenceFetcher,
};
use crate::services::inventory::{fetch_catalog_with_progress, PagedSource};
use crate::services::resolver::models::types::{
    CandidateEntity, CatalogScope, InputRecord, Workflow,
};
use crate::services::resolver::pipeline::matcher::{MatchConfig, Matcher};
use crate::services::resolver::pipeline::ranker::{ranked, RankOrder};
use crate::services::resolver::state::catalog_cache::CatalogCache;
use crate::types::errors::ResolveError;
use crate::types::run::{percent, RunEvent, RunOutcome, RunReport, RunStage};

pub const REFERENCE_MATCH_PAGE_SIZE: usize = 250;
pub const SEARCH_PAGE_SIZE: usize = 500;

pub fn default_page_size(workflow: Workflow) -> usize {
    match workflow {
        Workflow::ReferenceMatch => REFERENCE_MATCH_PAGE_SIZE,
        Workflow::LocationSearch | Workflow::GlobalSearch => SEARCH_PAGE_SIZE,
    }
}

/// Per-run inputs other than the records themselves.
pub struct RunOptions<'a> {
    pub scope: CatalogScope,
    pub cancel: CancelFlag,
    pub cache: Option<&'a mut CatalogCache>,
    pub enrich: EnrichConfig,
    /// Catalog page size; the workflow default when `None`.
    pub page_size: Option<usize>,
}

impl<'a> RunOptions<'a> {
    pub fn new(scope: CatalogScope) -> Self {
        Self {
            scope,
            cancel: CancelFlag::new(),
            cache: None,
            enrich: EnrichConfig::default(),
            page_size: None,
        }
    }

    pub fn from_settings(scope: CatalogScope, settings: &ResolverSettings) -> Self {
        Self {
            enrich: settings.enrich_config(),
            page_size: settings.catalog_page_size,
            ..Self::new(scope)
        }
    }

    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn with_cache(mut self, cache: &'a mut CatalogCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_enrich(mut self, enrich: EnrichConfig) -> Self {
        self.enrich = enrich;
        self
    }
}

enum Loaded {
    Catalog(Arc<Vec<CandidateEntity>>),
    Cancelled { fetched: usize, expected: usize },
}

/// Deep scan: enrich every candidate with its references, then match by
/// exact reference code with a capped name fallback.
pub async fn run_reference_match<S, F, E>(
    inputs: &[InputRecord],
    source: &S,
    fetcher: &F,
    mut options: RunOptions<'_>,
    mut on_event: E,
) -> Result<RunOutcome, ResolveError>
where
    S: PagedSource + ?Sized,
    F: ReferenceFetcher + ?Sized,
    E: FnMut(RunEvent),
{
    let workflow = Workflow::ReferenceMatch;
    if let Some(outcome) = start(workflow, inputs, &mut on_event) {
        return Ok(outcome);
    }

    let catalog = match load_catalog(source, workflow, &mut options, &mut on_event).await? {
        Loaded::Catalog(catalog) => catalog,
        Loaded::Cancelled { fetched, expected } => {
            return Ok(cancelled(RunStage::FetchCatalog, fetched, expected, &mut on_event))
        }
    };

    let enriched = enrich_with_references(
        (*catalog).clone(),
        fetcher,
        &options.enrich,
        &options.cancel,
        |event| {
            if let EnrichEvent::Progress {
                completed, total, ..
            } = event
            {
                on_event(RunEvent::Progress {
                    stage: RunStage::Enrich,
                    completed,
                    total,
                    percent: percent(completed, total),
                });
            }
        },
    )
    .await;

    if enriched.is_cancelled() {
        let total = enriched.candidates.len();
        return Ok(cancelled(RunStage::Enrich, enriched.completed, total, &mut on_event));
    }
    if enriched.failed > 0 {
        warn!(
            "{} of {} candidates matched without references",
            enriched.failed,
            enriched.candidates.len()
        );
    }

    Ok(finish(workflow, inputs, &enriched.candidates, &options.cancel, &mut on_event))
}

/// Name + city + state against the scope's catalog.
pub async fn run_location_search<S, E>(
    inputs: &[InputRecord],
    source: &S,
    options: RunOptions<'_>,
    on_event: E,
) -> Result<RunOutcome, ResolveError>
where
    S: PagedSource + ?Sized,
    E: FnMut(RunEvent),
{
    run_search(Workflow::LocationSearch, inputs, source, options, on_event).await
}

/// Name + street address (or location when no address) against the scope's
/// catalog, usually the global one.
pub async fn run_global_search<S, E>(
    inputs: &[InputRecord],
    source: &S,
    options: RunOptions<'_>,
    on_event: E,
) -> Result<RunOutcome, ResolveError>
where
    S: PagedSource + ?Sized,
    E: FnMut(RunEvent),
{
    run_search(Workflow::GlobalSearch, inputs, source, options, on_event).await
}

async fn run_search<S, E>(
    workflow: Workflow,
    inputs: &[InputRecord],
    source: &S,
    mut options: RunOptions<'_>,
    mut on_event: E,
) -> Result<RunOutcome, ResolveError>
where
    S: PagedSource + ?Sized,
    E: FnMut(RunEvent),
{
    if let Some(outcome) = start(workflow, inputs, &mut on_event) {
        return Ok(outcome);
    }

    let catalog = match load_catalog(source, workflow, &mut options, &mut on_event).await? {
        Loaded::Catalog(catalog) => catalog,
        Loaded::Cancelled { fetched, expected } => {
            return Ok(cancelled(RunStage::FetchCatalog, fetched, expected, &mut on_event))
        }
    };

    Ok(finish(workflow, inputs, &catalog, &options.cancel, &mut on_event))
}

/// Emits `Started`; an empty input set completes immediately without I/O.
fn start<E: FnMut(RunEvent)>(
    workflow: Workflow,
    inputs: &[InputRecord],
    on_event: &mut E,
) -> Option<RunOutcome> {
    on_event(RunEvent::Started {
        workflow,
        inputs: inputs.len(),
    });
    info!("{} run started with {} inputs", workflow, inputs.len());

    if inputs.is_empty() {
        on_event(RunEvent::Finished {
            results: 0,
            matched: 0,
        });
        return Some(RunOutcome::Completed(RunReport::new(workflow, 0, Vec::new())));
    }
    None
}

async fn load_catalog<S, E>(
    source: &S,
    workflow: Workflow,
    options: &mut RunOptions<'_>,
    on_event: &mut E,
) -> Result<Loaded, ResolveError>
where
    S: PagedSource + ?Sized,
    E: FnMut(RunEvent),
{
    if let Some(cached) = options.cache.as_mut().and_then(|cache| cache.get(&options.scope)) {
        info!("Using cached catalog for {} ({} entities)", options.scope, cached.len());
        return Ok(Loaded::Catalog(cached));
    }

    let page_size = options
        .page_size
        .unwrap_or_else(|| default_page_size(workflow));
    let mut fetched = 0;
    let mut expected = 0;
    let result = fetch_catalog_with_progress(
        source,
        &options.scope,
        page_size,
        &options.cancel,
        |count, total| {
            fetched = count;
            expected = total.unwrap_or(count).max(count);
            on_event(RunEvent::CatalogPage {
                fetched: count,
                total,
            });
        },
    )
    .await;

    let catalog = match result {
        Ok(entities) => Arc::new(entities),
        Err(ResolveError::Cancelled) => return Ok(Loaded::Cancelled { fetched, expected }),
        Err(e) => return Err(e),
    };

    if let Some(cache) = options.cache.as_mut() {
        cache.insert(options.scope.clone(), Arc::clone(&catalog));
    }
    Ok(Loaded::Catalog(catalog))
}

fn finish<E: FnMut(RunEvent)>(
    workflow: Workflow,
    inputs: &[InputRecord],
    candidates: &[CandidateEntity],
    cancel: &CancelFlag,
    on_event: &mut E,
) -> RunOutcome {
    if cancel.is_cancelled() {
        return cancelled(RunStage::Match, 0, inputs.len(), on_event);
    }

    let matcher = Matcher::new(candidates, MatchConfig::for_workflow(workflow));
    let results = ranked(matcher.match_all(inputs), RankOrder::for_workflow(workflow));
    let report = RunReport::new(workflow, matcher.candidate_count(), results);

    on_event(RunEvent::Finished {
        results: report.results.len(),
        matched: report.matched_count,
    });
    info!(
        "{} run complete: {} of {} inputs matched against {} candidates",
        workflow,
        report.matched_count,
        report.results.len(),
        report.candidate_count
    );

    RunOutcome::Completed(report)
}

fn cancelled<E: FnMut(RunEvent)>(
    stage: RunStage,
    processed: usize,
    total: usize,
    on_event: &mut E,
) -> RunOutcome {
    on_event(RunEvent::Cancelled {
        stage,
        processed,
        total,
    });
    info!("Run cancelled during {} ({}/{})", stage, processed, total);
    RunOutcome::Cancelled {
        stage,
        processed,
        total,
    }
}

#[cfg(test)]
#[path = "tests/workflows_tests.rs"]
mod tests;
