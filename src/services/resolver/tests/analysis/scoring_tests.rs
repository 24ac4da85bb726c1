use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn score(profile: WeightProfile, input: &InputRecord, candidate: &CandidateEntity) -> f64 {
    combined_score(
        profile,
        &ScoringFields::from_input(input, profile),
        &ScoringFields::from_candidate(candidate, profile),
    )
}

#[test]
fn test_profile_selection_follows_address_presence() {
    let with_address = InputRecord::new("Greenwood").with_address("100 Main St");
    let without = InputRecord::new("Greenwood").with_city("Denver");
    let blank = InputRecord::new("Greenwood").with_address("   ");

    assert_eq!(WeightProfile::for_input(&with_address), WeightProfile::NameAddress);
    assert_eq!(WeightProfile::for_input(&without), WeightProfile::NameLocation);
    assert_eq!(WeightProfile::for_input(&blank), WeightProfile::NameLocation);
}

#[test]
fn test_name_only_identical_names_score_point_nine() {
    let input = InputRecord::new("Greenwood Apartments");
    let candidate = CandidateEntity::new("1", "GREENWOOD  apartments");
    assert!(approx(score(WeightProfile::NameOnly, &input, &candidate), 0.9));
}

#[test]
fn test_name_only_contained_query() {
    // edit 1 - 11/20 = 0.45, token 1.0 -> 0.9 * (0.27 + 0.4)
    let input = InputRecord::new("Greenwood");
    let candidate = CandidateEntity::new("1", "Greenwood Apartments");
    assert!(approx(score(WeightProfile::NameOnly, &input, &candidate), 0.603));
}

#[test]
fn test_name_location_full_agreement_clamps_to_one() {
    let input = InputRecord::new("The Lofts").with_city("Denver").with_state("CO");
    let candidate = CandidateEntity::new("1", "The Lofts")
        .with_city("Denver")
        .with_state("co");
    let value = score(WeightProfile::NameLocation, &input, &candidate);
    assert!(value <= 1.0);
    assert!(approx(value, 1.0));
}

#[test]
fn test_name_location_state_requires_non_empty() {
    // Both cities empty compare as identical; both states empty do not count.
    let input = InputRecord::new("The Lofts");
    let candidate = CandidateEntity::new("1", "The Lofts");
    assert!(approx(score(WeightProfile::NameLocation, &input, &candidate), 0.9));
}

#[test]
fn test_name_location_state_mismatch() {
    let input = InputRecord::new("The Lofts").with_city("Denver").with_state("CO");
    let candidate = CandidateEntity::new("1", "The Lofts")
        .with_city("Denver")
        .with_state("TX");
    assert!(approx(score(WeightProfile::NameLocation, &input, &candidate), 0.9));
}

#[test]
fn test_name_address_expands_abbreviations_before_comparing() {
    let input = InputRecord::new("Greenwood").with_address("100 Main St.");
    let candidate = CandidateEntity::new("1", "Greenwood").with_address("100 main street");
    // 0.4 + 0.3 + 0.2 + 0.1 + 0.1 bonus, clamped.
    assert_eq!(score(WeightProfile::NameAddress, &input, &candidate), 1.0);
}

#[test]
fn test_name_address_numeric_bonus_is_added_unclamped() {
    // Names share nothing. Address edit 0.5, token 0.5, shared "12".
    let input = InputRecord::new("aaaa").with_address("12 Oak");
    let candidate = CandidateEntity::new("1", "bbbb").with_address("12 Elm");
    let value = score(WeightProfile::NameAddress, &input, &candidate);
    assert!(approx(value, 0.2 * 0.5 + 0.1 * 0.5 + NUMERIC_BONUS));
}

#[test]
fn test_missing_candidate_fields_score_without_panicking() {
    let input = InputRecord::new("Greenwood")
        .with_address("100 Main St")
        .with_city("Denver")
        .with_state("CO");
    let candidate = CandidateEntity::default();
    for profile in [
        WeightProfile::NameOnly,
        WeightProfile::NameLocation,
        WeightProfile::NameAddress,
    ] {
        let value = score(profile, &input, &candidate);
        assert!((0.0..=1.0).contains(&value), "{profile:?} -> {value}");
    }
}

#[test]
fn test_address_proximity_uses_normalized_lines() {
    let profile = WeightProfile::NameAddress;
    let input = ScoringFields::from_input(
        &InputRecord::new("x").with_address("9 S. W. Pine Ct"),
        profile,
    );
    let candidate = ScoringFields::from_candidate(
        &CandidateEntity::new("1", "y").with_address("9 southwest pine court"),
        profile,
    );
    assert_eq!(address_proximity(&input, &candidate), 1.0);
}

#[test]
fn test_name_address_profile_normalizes_name_as_address() {
    let fields = ScoringFields::from_input(
        &InputRecord::new("N. Main Lofts").with_address("1 Main"),
        WeightProfile::NameAddress,
    );
    assert_eq!(fields.name, "north main lofts");
    assert!(fields.city.is_empty());
}

const NUMERIC_BONUS: f64 = crate::services::resolver::analysis::similarity::NUMERIC_TOKEN_BONUS;
