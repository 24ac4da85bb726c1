use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_edit_distance_classic_cases() {
    assert_eq!(edit_distance("kitten", "sitting"), 3);
    assert_eq!(edit_distance("", "abc"), 3);
    assert_eq!(edit_distance("same", "same"), 0);
}

#[test]
fn test_edit_similarity_identity() {
    for sample in ["greenwood", "the lofts", "a", "123 main street"] {
        assert_eq!(edit_similarity(sample, sample), 1.0);
    }
}

#[test]
fn test_edit_similarity_empty_edges() {
    assert_eq!(edit_similarity("", ""), 1.0);
    assert_eq!(edit_similarity("", "x"), 0.0);
    assert_eq!(edit_similarity("x", ""), 0.0);
}

#[test]
fn test_edit_similarity_ratio() {
    // one substitution over four characters
    assert!(approx(edit_similarity("loft", "lift"), 0.75));
    assert!(approx(edit_similarity("kitten", "sitting"), 1.0 - 3.0 / 7.0));
}

#[test]
fn test_edit_similarity_counts_chars_not_bytes() {
    assert!(approx(edit_similarity("ñandu", "nandu"), 0.8));
}

#[test]
fn test_token_overlap_is_directional() {
    // Short query fully contained in a longer candidate.
    assert_eq!(token_overlap("greenwood", "greenwood apartments"), 1.0);
    // Reverse direction only shares half of the query tokens.
    assert_eq!(token_overlap("greenwood apartments", "greenwood"), 0.5);
}

#[test]
fn test_token_overlap_uses_unique_tokens() {
    assert_eq!(token_overlap("park park place", "park"), 0.5);
}

#[test]
fn test_token_overlap_empty_query() {
    assert_eq!(token_overlap("", "anything"), 0.0);
    assert_eq!(token_overlap("", ""), 0.0);
}

#[test]
fn test_numeric_token_bonus() {
    assert_eq!(numeric_token_bonus("100 main street", "100 main st"), NUMERIC_TOKEN_BONUS);
    assert_eq!(numeric_token_bonus("100 main street", "1000 main street"), 0.0);
    assert_eq!(numeric_token_bonus("main street", "main street"), 0.0);
    assert_eq!(numeric_token_bonus("unit 4 bldg 12", "12 oak lane"), NUMERIC_TOKEN_BONUS);
}
