use std::sync::Once;

use crate::services::resolver::models::types::{CandidateEntity, ReferenceTag};

static INIT: Once = Once::new();

/// Route `log` output through the test harness. Safe to call from every test.
pub fn init_logger() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Small catalog used across module tests.
pub fn sample_catalog() -> Vec<CandidateEntity> {
    vec![
        CandidateEntity::new("101", "Greenwood Apartments")
            .with_address("100 Main St")
            .with_city("Denver")
            .with_state("CO"),
        CandidateEntity::new("102", "The Lofts at Union Station")
            .with_address("1701 Wynkoop St")
            .with_city("Denver")
            .with_state("CO"),
        CandidateEntity::new("103", "Maple Court")
            .with_address("9 SW Pine Ct")
            .with_city("Austin")
            .with_state("TX")
            .with_references(vec![ReferenceTag::new("unit", "MC-9")]),
    ]
}
