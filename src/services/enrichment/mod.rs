//! Deep-scan enrichment of catalog candidates with reference data.
//!
//! **Fail-safe**: a failed sub-resource request empties that candidate's
//! references and is logged; it never aborts the batch or the run.
pub mod cancel;
pub mod orchestrator;

pub use cancel::CancelFlag;
pub use orchestrator::{
    enrich_with_reference_groups, enrich_with_references, EnrichConfig, EnrichEvent,
    EnrichOutcome, EnrichStatus, ReferenceFetcher, ReferenceGroupFetcher,
    DEFAULT_REFERENCE_BATCH_SIZE,
};
