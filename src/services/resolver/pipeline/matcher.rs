//! Greedy per-input best match over a read-only candidate slice.
//!
//! Every candidate is scored against the input; a strictly greater score
//! replaces the current best, so ties keep the first candidate in scan order.
//! An exact reference hit scores 1.0 and ends the scan for that input.

use std::cell::OnceCell;

#[cfg(feature = "debug_matcher")]
use log::debug;

use crate::services::resolver::analysis::scoring::{
    address_proximity, combined_score, ScoringFields, WeightProfile,
};
use crate::services::resolver::models::types::{
    CandidateEntity, InputRecord, MatchMethod, MatchResult, Tier, Workflow,
};

/// Score of an exact reference-code hit. Never produced by fuzzy scoring.
pub const EXACT_REFERENCE_SCORE: f64 = 1.0;

/// Upper bound for any fuzzy pair score.
pub const FUZZY_SCORE_CAP: f64 = 0.9;

/// How the weighting profile is chosen for an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileRule {
    Fixed(WeightProfile),
    /// NameAddress when the input has a street address, else NameLocation.
    ByInputAddress,
}

impl ProfileRule {
    fn resolve(self, input: &InputRecord) -> WeightProfile {
        match self {
            ProfileRule::Fixed(profile) => profile,
            ProfileRule::ByInputAddress => WeightProfile::for_input(input),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchConfig {
    pub profile: ProfileRule,
    /// Whether an input reference code may short-circuit with an exact hit.
    pub exact_reference: bool,
}

impl MatchConfig {
    pub fn for_workflow(workflow: Workflow) -> Self {
        match workflow {
            Workflow::ReferenceMatch => Self {
                profile: ProfileRule::Fixed(WeightProfile::NameOnly),
                exact_reference: true,
            },
            Workflow::LocationSearch => Self {
                profile: ProfileRule::Fixed(WeightProfile::NameLocation),
                exact_reference: false,
            },
            Workflow::GlobalSearch => Self {
                profile: ProfileRule::ByInputAddress,
                exact_reference: false,
            },
        }
    }
}

/// Matcher bound to one candidate set for the duration of a run.
///
/// Candidate fields are normalized lazily, once per profile actually used.
pub struct Matcher<'a> {
    candidates: &'a [CandidateEntity],
    config: MatchConfig,
    prepared: [OnceCell<Vec<ScoringFields>>; 3],
}

impl<'a> Matcher<'a> {
    pub fn new(candidates: &'a [CandidateEntity], config: MatchConfig) -> Self {
        Self {
            candidates,
            config,
            prepared: Default::default(),
        }
    }

    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    fn prepared(&self, profile: WeightProfile) -> &[ScoringFields] {
        let slot = match profile {
            WeightProfile::NameOnly => 0,
            WeightProfile::NameLocation => 1,
            WeightProfile::NameAddress => 2,
        };
        self.prepared[slot].get_or_init(|| {
            self.candidates
                .iter()
                .map(|candidate| ScoringFields::from_candidate(candidate, profile))
                .collect()
        })
    }

    /// Resolve one input. Never fails: an empty candidate set or an input
    /// with neither a usable code nor a name yields a `None` result.
    pub fn match_one(&self, input: &InputRecord) -> MatchResult {
        let code_key = if self.config.exact_reference {
            input.reference_key()
        } else {
            None
        };
        let profile = self.config.profile.resolve(input);
        let input_fields = Some(ScoringFields::from_input(input, profile))
            .filter(|fields| !fields.name.is_empty());

        let mut best_score = 0.0;
        let mut best: Option<(usize, MatchMethod)> = None;

        for (idx, candidate) in self.candidates.iter().enumerate() {
            let (score, method) = if code_key
                .as_deref()
                .is_some_and(|code| candidate.has_reference(code))
            {
                (EXACT_REFERENCE_SCORE, MatchMethod::ExactReference)
            } else if let Some(fields) = &input_fields {
                let fuzzy = combined_score(profile, fields, &self.prepared(profile)[idx]);
                (fuzzy.min(FUZZY_SCORE_CAP), MatchMethod::FuzzyName)
            } else {
                (0.0, MatchMethod::None)
            };

            if score > best_score {
                best_score = score;
                best = Some((idx, method));
            }
            if method == MatchMethod::ExactReference {
                break;
            }
        }

        let Some((idx, method)) = best else {
            #[cfg(feature = "debug_matcher")]
            debug!("[matcher] no match for {:?}", input.name);
            return MatchResult::no_match(input.clone());
        };

        #[cfg(feature = "debug_matcher")]
        debug!(
            "[matcher] {:?} -> {} ({:.3}, {:?}, {:?})",
            input.name, self.candidates[idx].id, best_score, method, profile
        );

        self.build_result(input, idx, best_score, method)
    }

    pub fn match_all(&self, inputs: &[InputRecord]) -> Vec<MatchResult> {
        inputs.iter().map(|input| self.match_one(input)).collect()
    }

    fn build_result(
        &self,
        input: &InputRecord,
        idx: usize,
        score: f64,
        method: MatchMethod,
    ) -> MatchResult {
        let candidate = &self.candidates[idx];
        let proximity = input.has_address().then(|| {
            address_proximity(
                &ScoringFields::from_input(input, WeightProfile::NameAddress),
                &ScoringFields::from_candidate(candidate, WeightProfile::NameAddress),
            )
        });
        let references = Some(candidate.reference_summary()).filter(|s| !s.is_empty());

        MatchResult {
            input: input.clone(),
            score,
            method,
            tier: Tier::from_score(score),
            matched_entity_id: Some(candidate.id.clone()),
            matched_name: Some(candidate.name.clone()),
            matched_address: candidate.address.clone(),
            matched_location: Some(candidate.location()),
            matched_references: references,
            address_proximity: proximity,
        }
    }
}

/// One-shot convenience over [`Matcher`].
pub fn match_records(
    inputs: &[InputRecord],
    candidates: &[CandidateEntity],
    config: MatchConfig,
) -> Vec<MatchResult> {
    Matcher::new(candidates, config).match_all(inputs)
}

#[cfg(test)]
#[path = "../tests/pipeline/matcher_tests.rs"]
mod tests;
