//! Entity resolution: normalize, score, pick the best candidate, rank.
//!
//! All three workflows share this one component set and differ only by
//! weighting profile, exact-reference short-circuit and rank order.
pub mod analysis;
pub mod core;
pub mod models;
pub mod pipeline;
pub mod state;

pub use analysis::scoring::WeightProfile;
pub use models::types::{
    CandidateEntity, CatalogScope, InputRecord, MatchMethod, MatchResult, ReferenceGroup,
    ReferenceTag, Tier, Workflow,
};
pub use pipeline::matcher::{match_records, MatchConfig, Matcher, ProfileRule, FUZZY_SCORE_CAP};
pub use pipeline::ranker::{rank_results, ranked, RankOrder};
pub use state::catalog_cache::CatalogCache;
