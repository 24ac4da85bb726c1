//! Pure decoders for the `{ data: [...], paging: { next_url, total_count } }`
//! envelope shared by every inventory listing endpoint.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::services::resolver::models::types::{CandidateEntity, ReferenceGroup, ReferenceTag};
use crate::types::errors::ResolveError;

/// One decoded page of a listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Absent (or blank) on the last page.
    pub next_url: Option<String>,
    pub total_count: Option<usize>,
}

#[derive(Deserialize)]
#[serde(bound = "T: DeserializeOwned")]
struct Envelope<T> {
    #[serde(default)]
    data: Option<Vec<T>>,
    #[serde(default)]
    paging: Option<Paging>,
}

#[derive(Deserialize, Default)]
struct Paging {
    #[serde(default)]
    next_url: Option<String>,
    #[serde(default)]
    total_count: Option<usize>,
}

pub fn decode_page<T: DeserializeOwned>(body: &str) -> Result<Page<T>, ResolveError> {
    let envelope: Envelope<T> = serde_json::from_str(body)?;
    let paging = envelope.paging.unwrap_or_default();

    Ok(Page {
        items: envelope.data.unwrap_or_default(),
        next_url: paging.next_url.filter(|url| !url.trim().is_empty()),
        total_count: paging.total_count,
    })
}

pub fn decode_catalog_page(body: &str) -> Result<Page<CandidateEntity>, ResolveError> {
    decode_page(body)
}

pub fn decode_references(body: &str) -> Result<Page<ReferenceTag>, ResolveError> {
    decode_page(body)
}

pub fn decode_groups(body: &str) -> Result<Page<ReferenceGroup>, ResolveError> {
    decode_page(body)
}

#[cfg(test)]
#[path = "tests/decode_tests.rs"]
mod tests;
