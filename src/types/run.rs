//! Run-level contracts shared by every workflow.
//!
//! A run reports exactly one terminal state: `Ok(RunOutcome::Completed)`,
//! `Ok(RunOutcome::Cancelled { .. })`, or `Err(ResolveError)`.

use serde::{Deserialize, Serialize};

use crate::services::resolver::models::types::{MatchResult, Workflow};

/// Phase a run is in; reported with progress and with a cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RunStage {
    FetchCatalog,
    Enrich,
    Match,
}

impl std::fmt::Display for RunStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunStage::FetchCatalog => write!(f, "fetch catalog"),
            RunStage::Enrich => write!(f, "enrich"),
            RunStage::Match => write!(f, "match"),
        }
    }
}

/// Streaming event contract for run progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "event", content = "data")]
pub enum RunEvent {
    /// Emitted once when a run starts.
    #[serde(rename_all = "camelCase")]
    Started { workflow: Workflow, inputs: usize },
    /// Emitted after each catalog page.
    #[serde(rename_all = "camelCase")]
    CatalogPage { fetched: usize, total: Option<usize> },
    /// Emitted after each enrichment batch.
    #[serde(rename_all = "camelCase")]
    Progress {
        stage: RunStage,
        completed: usize,
        total: usize,
        percent: u8,
    },
    /// Emitted when a run finishes normally.
    #[serde(rename_all = "camelCase")]
    Finished { results: usize, matched: usize },
    /// Emitted when a run is cancelled.
    #[serde(rename_all = "camelCase")]
    Cancelled {
        stage: RunStage,
        processed: usize,
        total: usize,
    },
}

/// Ranked results of a completed run. Owned by the caller; nothing is kept
/// between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub workflow: Workflow,
    pub candidate_count: usize,
    pub matched_count: usize,
    pub results: Vec<MatchResult>,
}

impl RunReport {
    pub fn new(workflow: Workflow, candidate_count: usize, results: Vec<MatchResult>) -> Self {
        let matched_count = results.iter().filter(|r| r.is_match()).count();
        Self {
            workflow,
            candidate_count,
            matched_count,
            results,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Completed(RunReport),
    /// Stopped cooperatively. Partial work is not reported as results.
    Cancelled {
        stage: RunStage,
        processed: usize,
        total: usize,
    },
}

impl RunOutcome {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunOutcome::Cancelled { .. })
    }

    pub fn report(&self) -> Option<&RunReport> {
        match self {
            RunOutcome::Completed(report) => Some(report),
            RunOutcome::Cancelled { .. } => None,
        }
    }

    pub fn into_report(self) -> Option<RunReport> {
        match self {
            RunOutcome::Completed(report) => Some(report),
            RunOutcome::Cancelled { .. } => None,
        }
    }
}

/// Integer percentage for progress events; an empty total counts as done.
pub fn percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    ((completed.min(total) * 100) / total) as u8
}
