use super::*;

#[test]
fn test_input_builders_drop_blank_fields() {
    let input = InputRecord::new("Greenwood")
        .with_reference_code("  ")
        .with_address("")
        .with_city("Denver")
        .with_state("CO");

    assert_eq!(input.reference_code, None);
    assert_eq!(input.address, None);
    assert_eq!(input.city.as_deref(), Some("Denver"));
    assert!(!input.has_address());
}

#[test]
fn test_reference_key_trims_and_lowercases() {
    let input = InputRecord::new("x").with_reference_code("  AbC-12 ");
    assert_eq!(input.reference_key().as_deref(), Some("abc-12"));
    assert_eq!(InputRecord::new("x").reference_key(), None);
}

#[test]
fn test_reference_tag_matching_is_case_insensitive() {
    let tag = ReferenceTag::new("unit", " ABC-12 ");
    assert!(tag.matches_code("abc-12"));
    assert!(!tag.matches_code("abc-1"));
}

#[test]
fn test_reference_tag_display_defaults_key() {
    assert_eq!(ReferenceTag::new("unit", "12345").to_string(), "unit: 12345");
    assert_eq!(ReferenceTag::new("", "12345").to_string(), "id: 12345");
}

#[test]
fn test_candidate_decodes_flat_inventory_shape() {
    let candidate: CandidateEntity = serde_json::from_value(serde_json::json!({
        "id": 42,
        "name": "Greenwood",
        "address_line1": "100 Main St",
        "address_city": "Denver",
        "address_state": "CO"
    }))
    .unwrap();

    assert_eq!(candidate.id, "42");
    assert_eq!(candidate.address.as_deref(), Some("100 Main St"));
    assert_eq!(candidate.location(), "Denver, CO");
    assert!(candidate.references.is_empty());
}

#[test]
fn test_candidate_decodes_nested_address() {
    let candidate: CandidateEntity = serde_json::from_value(serde_json::json!({
        "id": "a-1",
        "name": "The Lofts",
        "address": { "line1": "9 Pine Ct", "city": "Austin", "state": "TX" }
    }))
    .unwrap();

    assert_eq!(candidate.address_str(), "9 Pine Ct");
    assert_eq!(candidate.city_str(), "Austin");
    assert_eq!(candidate.state_str(), "TX");
}

#[test]
fn test_candidate_missing_fields_default_to_empty() {
    let candidate: CandidateEntity = serde_json::from_str("{}").unwrap();
    assert_eq!(candidate.id, "");
    assert_eq!(candidate.name, "");
    assert_eq!(candidate.address_str(), "");
    assert_eq!(candidate.location(), "N/A");
}

#[test]
fn test_candidate_serialized_form_reads_back() {
    let original = CandidateEntity::new("7", "Oak Park")
        .with_address("1 Oak Ln")
        .with_city("Boise")
        .with_references(vec![ReferenceTag::new("unit", "99")]);

    let json = serde_json::to_string(&original).unwrap();
    let decoded: CandidateEntity = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, original);
}

#[test]
fn test_location_and_reference_summary() {
    let candidate = CandidateEntity::new("1", "x")
        .with_state("CO")
        .with_references(vec![
            ReferenceTag::new("unit", "1"),
            ReferenceTag::new("", "2"),
        ]);
    assert_eq!(candidate.location(), "CO");
    assert_eq!(candidate.reference_summary(), "unit: 1 | id: 2");
}

#[test]
fn test_tier_boundaries() {
    assert_eq!(Tier::from_score(1.0), Tier::High);
    assert_eq!(Tier::from_score(0.90), Tier::High);
    assert_eq!(Tier::from_score(0.899), Tier::Good);
    assert_eq!(Tier::from_score(0.8), Tier::Good);
    assert_eq!(Tier::from_score(0.6), Tier::Weak);
    assert_eq!(Tier::from_score(0.001), Tier::Marginal);
    assert_eq!(Tier::from_score(0.0), Tier::None);
    // Classified at display precision.
    assert_eq!(Tier::from_score(0.7 + 0.2), Tier::High);
    assert_eq!(Tier::from_score(0.7999999), Tier::Good);
}

#[test]
fn test_tier_ordering_matches_rank() {
    assert!(Tier::High > Tier::Good);
    assert!(Tier::Marginal > Tier::None);
    assert_eq!(Tier::High.rank(), 4);
    assert_eq!(Tier::Good.severity(), "warning");
    assert_eq!(serde_json::to_string(&Tier::Marginal).unwrap(), "\"marginal\"");
}

#[test]
fn test_match_result_display_name() {
    let mut result = MatchResult::no_match(InputRecord::new("x"));
    assert_eq!(result.display_name(), "No Match");
    assert!(!result.is_match());

    result.matched_entity_id = Some("1".into());
    result.matched_name = Some("Greenwood".into());
    result.tier = Tier::Weak;
    assert_eq!(result.display_name(), "Guess: Greenwood");

    result.tier = Tier::Marginal;
    assert_eq!(result.display_name(), "Weak: Greenwood");

    result.tier = Tier::High;
    result.score = 1.0;
    assert_eq!(result.display_name(), "Greenwood");
    assert_eq!(result.score_label(), "1.000");
}

#[test]
fn test_match_result_serializes_camel_case() {
    let value = serde_json::to_value(MatchResult::no_match(InputRecord::new("x"))).unwrap();
    assert_eq!(value["method"], "None");
    assert_eq!(value["tier"], "none");
    assert!(value.get("matchedEntityId").is_some());
}
