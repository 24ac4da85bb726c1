use super::*;
use crate::services::resolver::models::types::{InputRecord, Tier};

fn result(name: &str, score: f64, proximity: Option<f64>) -> MatchResult {
    let mut result = MatchResult::no_match(InputRecord::new(name));
    result.score = score;
    result.tier = Tier::from_score(score);
    result.address_proximity = proximity;
    result
}

fn names(results: &[MatchResult]) -> Vec<&str> {
    results.iter().map(|r| r.input.name.as_str()).collect()
}

#[test]
fn test_tier_then_score() {
    let ranked = ranked(
        vec![
            result("weak", 0.65, None),
            result("high", 0.95, None),
            result("good-low", 0.81, None),
            result("good-high", 0.88, None),
            result("none", 0.0, None),
        ],
        RankOrder::Tier,
    );
    assert_eq!(names(&ranked), vec!["high", "good-high", "good-low", "weak", "none"]);
}

#[test]
fn test_equal_keys_keep_input_order() {
    let ranked = ranked(
        vec![
            result("first", 0.7, None),
            result("other", 0.9, None),
            result("second", 0.7, None),
            result("third", 0.7, None),
        ],
        RankOrder::Tier,
    );
    assert_eq!(names(&ranked), vec!["other", "first", "second", "third"]);
}

#[test]
fn test_address_proximity_then_score() {
    let ranked = ranked(
        vec![
            result("no-address", 0.9, None),
            result("far", 0.9, Some(0.2)),
            result("close-low", 0.5, Some(0.95)),
            result("close-high", 0.7, Some(0.95)),
        ],
        RankOrder::AddressProximity,
    );
    assert_eq!(names(&ranked), vec!["close-high", "close-low", "far", "no-address"]);
}

#[test]
fn test_proximity_compared_at_three_decimals() {
    let ranked = ranked(
        vec![
            result("a", 0.5, Some(0.8000001)),
            result("b", 0.6, Some(0.8)),
        ],
        RankOrder::AddressProximity,
    );
    // Proximities tie at display precision, so the score decides.
    assert_eq!(names(&ranked), vec!["b", "a"]);
}

#[test]
fn test_without_proximity_falls_back_to_score() {
    let ranked = ranked(
        vec![
            result("low", 0.3, None),
            result("high", 0.8, None),
            result("mid", 0.5, None),
        ],
        RankOrder::AddressProximity,
    );
    assert_eq!(names(&ranked), vec!["high", "mid", "low"]);
}

#[test]
fn test_workflow_orders() {
    assert_eq!(RankOrder::for_workflow(Workflow::LocationSearch), RankOrder::Tier);
    assert_eq!(
        RankOrder::for_workflow(Workflow::ReferenceMatch),
        RankOrder::AddressProximity
    );
}

#[test]
fn test_scores_equal_at_display_precision_keep_input_order() {
    let ranked = ranked(
        vec![
            result("name-and-city", 0.7 + 0.2, None),
            result("capped", 0.9, None),
        ],
        RankOrder::Tier,
    );
    assert_eq!(ranked[0].tier, Tier::High);
    assert_eq!(names(&ranked), vec!["name-and-city", "capped"]);
}

#[test]
fn test_no_match_sorts_after_zero_proximity() {
    let ranked = ranked(
        vec![
            result("unmatched", 0.0, None),
            result("zero", 0.4, Some(0.0)),
        ],
        RankOrder::AddressProximity,
    );
    assert_eq!(names(&ranked), vec!["zero", "unmatched"]);
}
