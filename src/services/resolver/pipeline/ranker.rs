//! Presentation ordering for completed match results.

use std::cmp::Ordering;

use crate::services::resolver::models::types::{round_score, MatchResult, Workflow};

/// Primary sort key; the secondary key is always the score, descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankOrder {
    /// Address proximity descending. Results without one (no input address,
    /// or no match at all) sort after every result that has one, including
    /// matched results whose proximity is 0.
    AddressProximity,
    /// Confidence tier descending.
    Tier,
}

impl RankOrder {
    pub fn for_workflow(workflow: Workflow) -> Self {
        match workflow {
            Workflow::ReferenceMatch | Workflow::GlobalSearch => RankOrder::AddressProximity,
            Workflow::LocationSearch => RankOrder::Tier,
        }
    }
}

// Keys are compared at display precision so near-identical floats do not
// reorder rows that render the same.
fn proximity_key(result: &MatchResult) -> f64 {
    result.address_proximity.map(round_score).unwrap_or(-1.0)
}

fn compare(order: RankOrder, a: &MatchResult, b: &MatchResult) -> Ordering {
    let primary = match order {
        RankOrder::AddressProximity => proximity_key(b).total_cmp(&proximity_key(a)),
        RankOrder::Tier => b.tier.rank().cmp(&a.tier.rank()),
    };
    primary.then_with(|| round_score(b.score).total_cmp(&round_score(a.score)))
}

/// Stable sort in place: equal keys keep their input order.
pub fn rank_results(results: &mut [MatchResult], order: RankOrder) {
    results.sort_by(|a, b| compare(order, a, b));
}

/// Owned variant of [`rank_results`].
pub fn ranked(mut results: Vec<MatchResult>, order: RankOrder) -> Vec<MatchResult> {
    rank_results(&mut results, order);
    results
}

#[cfg(test)]
#[path = "../tests/pipeline/ranker_tests.rs"]
mod tests;
