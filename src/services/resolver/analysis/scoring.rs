//! Weighted combination of field similarities into one pair score.
//!
//! Weights are fixed: they encode how much each field is trusted and must
//! stay identical for results to be comparable across runs.

use crate::services::resolver::analysis::similarity::{
    edit_similarity, numeric_token_bonus, token_overlap,
};
use crate::services::resolver::core::normalizer::{
    normalize, normalize_address, normalize_address_opt, normalize_opt,
};
use crate::services::resolver::models::types::{CandidateEntity, InputRecord};

// Name blend shared by NameOnly and NameLocation.
const NAME_EDIT_WEIGHT: f64 = 0.6;
const NAME_TOKEN_WEIGHT: f64 = 0.4;

// NameOnly: the name blend scaled so a fuzzy hit never reaches 1.0.
const NAME_ONLY_SCALE: f64 = 0.9;

// NameLocation
const LOCATION_NAME_WEIGHT: f64 = 0.7;
const LOCATION_CITY_WEIGHT: f64 = 0.2;
const LOCATION_STATE_WEIGHT: f64 = 0.1;

// NameAddress
const ADDRESS_NAME_EDIT_WEIGHT: f64 = 0.4;
const ADDRESS_NAME_TOKEN_WEIGHT: f64 = 0.3;
const ADDRESS_EDIT_WEIGHT: f64 = 0.2;
const ADDRESS_TOKEN_WEIGHT: f64 = 0.1;

/// Which fields feed the pair score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightProfile {
    /// Name only, scaled by 0.9 (reference-match fallback).
    NameOnly,
    /// Name + city + state (no street address available).
    NameLocation,
    /// Name + street address.
    NameAddress,
}

impl WeightProfile {
    /// NameAddress when the input carries a street address, else NameLocation.
    pub fn for_input(input: &InputRecord) -> Self {
        if input.has_address() {
            WeightProfile::NameAddress
        } else {
            WeightProfile::NameLocation
        }
    }
}

/// Normalized view of the fields a profile compares.
///
/// Built once per input and once per candidate so normalization is not
/// repeated inside the candidate scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoringFields {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
}

impl ScoringFields {
    pub fn from_input(input: &InputRecord, profile: WeightProfile) -> Self {
        match profile {
            WeightProfile::NameAddress => Self {
                name: normalize_address(&input.name),
                address: normalize_address_opt(input.address.as_deref()),
                ..Self::default()
            },
            WeightProfile::NameOnly | WeightProfile::NameLocation => Self {
                name: normalize(&input.name),
                city: normalize_opt(input.city.as_deref()),
                state: normalize_opt(input.state.as_deref()),
                ..Self::default()
            },
        }
    }

    pub fn from_candidate(candidate: &CandidateEntity, profile: WeightProfile) -> Self {
        match profile {
            WeightProfile::NameAddress => Self {
                name: normalize_address(&candidate.name),
                address: normalize_address(candidate.address_str()),
                ..Self::default()
            },
            WeightProfile::NameOnly | WeightProfile::NameLocation => Self {
                name: normalize(&candidate.name),
                city: normalize(candidate.city_str()),
                state: normalize(candidate.state_str()),
                ..Self::default()
            },
        }
    }
}

fn name_blend(input: &ScoringFields, candidate: &ScoringFields) -> f64 {
    NAME_EDIT_WEIGHT * edit_similarity(&input.name, &candidate.name)
        + NAME_TOKEN_WEIGHT * token_overlap(&input.name, &candidate.name)
}

/// 1.0 when both normalized states are equal and non-empty.
fn state_exact(input: &str, candidate: &str) -> f64 {
    if !input.is_empty() && input == candidate {
        1.0
    } else {
        0.0
    }
}

/// Combined pair score in [0, 1].
pub fn combined_score(
    profile: WeightProfile,
    input: &ScoringFields,
    candidate: &ScoringFields,
) -> f64 {
    match profile {
        WeightProfile::NameOnly => NAME_ONLY_SCALE * name_blend(input, candidate),
        WeightProfile::NameLocation => {
            let score = LOCATION_NAME_WEIGHT * name_blend(input, candidate)
                + LOCATION_CITY_WEIGHT * edit_similarity(&input.city, &candidate.city)
                + LOCATION_STATE_WEIGHT * state_exact(&input.state, &candidate.state);
            score.min(1.0)
        }
        WeightProfile::NameAddress => {
            // The numeric bonus is unbounded on its own; only the sum is clamped.
            let score = ADDRESS_NAME_EDIT_WEIGHT * edit_similarity(&input.name, &candidate.name)
                + ADDRESS_NAME_TOKEN_WEIGHT * token_overlap(&input.name, &candidate.name)
                + ADDRESS_EDIT_WEIGHT * edit_similarity(&input.address, &candidate.address)
                + ADDRESS_TOKEN_WEIGHT * token_overlap(&input.address, &candidate.address)
                + numeric_token_bonus(&input.address, &candidate.address);
            score.min(1.0)
        }
    }
}

/// Edit similarity of the two street lines, used as a ranking key.
pub fn address_proximity(input: &ScoringFields, candidate: &ScoringFields) -> f64 {
    edit_similarity(&input.address, &candidate.address)
}

#[cfg(test)]
#[path = "../tests/analysis/scoring_tests.rs"]
mod tests;
