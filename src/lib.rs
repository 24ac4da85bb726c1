pub mod services;
pub mod types;
#[cfg(test)]
pub mod test_utils;

pub use services::config::ResolverSettings;
pub use services::enrichment::CancelFlag;
pub use services::inventory::InventoryClient;
pub use services::resolver::{
    CandidateEntity, CatalogCache, CatalogScope, InputRecord, MatchMethod, MatchResult,
    ReferenceTag, Tier, Workflow,
};
pub use services::workflows::{
    run_global_search, run_location_search, run_reference_match, RunOptions,
};
pub use types::errors::ResolveError;
pub use types::run::{RunEvent, RunOutcome, RunReport, RunStage};
