//! Domain types for the resolver pipeline.
//!
//! Contains: InputRecord, ReferenceTag, ReferenceGroup, CandidateEntity,
//! MatchMethod, Tier, MatchResult, Workflow.

use serde::{Deserialize, Deserializer, Serialize};

// ==================== INPUT ====================

/// One externally supplied property record to be resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    pub name: String,
    #[serde(default)]
    pub reference_code: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

impl InputRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_reference_code(mut self, code: impl Into<String>) -> Self {
        self.reference_code = non_blank(code.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = non_blank(address.into());
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = non_blank(city.into());
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = non_blank(state.into());
        self
    }

    /// Reference code prepared for exact comparison (trimmed, lowercased).
    pub fn reference_key(&self) -> Option<String> {
        self.reference_code
            .as_deref()
            .map(|code| code.trim().to_lowercase())
            .filter(|code| !code.is_empty())
    }

    pub fn has_address(&self) -> bool {
        self.address
            .as_deref()
            .is_some_and(|address| !address.trim().is_empty())
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

// ==================== CATALOG ====================

/// A `{ key, value }` reference attached to a catalog entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceTag {
    #[serde(default, deserialize_with = "string_or_number")]
    pub key: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub value: String,
}

impl ReferenceTag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Case-insensitive, whitespace-trimmed equality against a prepared code.
    pub fn matches_code(&self, code_key: &str) -> bool {
        self.value.trim().to_lowercase() == code_key
    }
}

impl std::fmt::Display for ReferenceTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let key = if self.key.is_empty() { "id" } else { &self.key };
        write!(f, "{}: {}", key, self.value)
    }
}

/// A reference group discovered for an entity (two-level reference lookup).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceGroup {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct NestedAddress {
    #[serde(default, alias = "address_line1", alias = "street")]
    line1: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    state: Option<String>,
}

/// Wire shape accepted for catalog records. `address` is either the street
/// line or a nested `{ line1, city, state }` object.
#[derive(Debug, Deserialize)]
struct RawCandidate {
    #[serde(default, deserialize_with = "string_or_number")]
    id: String,
    #[serde(default, deserialize_with = "string_or_number")]
    name: String,
    #[serde(default)]
    address_line1: Option<String>,
    #[serde(default, alias = "city")]
    address_city: Option<String>,
    #[serde(default, alias = "state")]
    address_state: Option<String>,
    #[serde(default)]
    address: Option<serde_json::Value>,
    #[serde(default)]
    references: Vec<ReferenceTag>,
}

/// A canonical catalog record. `references` is empty until enrichment runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawCandidate")]
pub struct CandidateEntity {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub references: Vec<ReferenceTag>,
}

impl From<RawCandidate> for CandidateEntity {
    fn from(raw: RawCandidate) -> Self {
        let nested = match raw.address {
            Some(serde_json::Value::String(line1)) => NestedAddress {
                line1: Some(line1),
                ..NestedAddress::default()
            },
            Some(value @ serde_json::Value::Object(_)) => {
                serde_json::from_value(value).unwrap_or_default()
            }
            _ => NestedAddress::default(),
        };
        let pick = |flat: Option<String>, nested: Option<String>| {
            flat.filter(|v| !v.is_empty())
                .or(nested.filter(|v| !v.is_empty()))
        };

        Self {
            id: raw.id,
            name: raw.name,
            address: pick(raw.address_line1, nested.line1),
            city: pick(raw.address_city, nested.city),
            state: pick(raw.address_state, nested.state),
            references: raw.references,
        }
    }
}

impl CandidateEntity {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn with_references(mut self, references: Vec<ReferenceTag>) -> Self {
        self.references = references;
        self
    }

    pub fn address_str(&self) -> &str {
        self.address.as_deref().unwrap_or("")
    }

    pub fn city_str(&self) -> &str {
        self.city.as_deref().unwrap_or("")
    }

    pub fn state_str(&self) -> &str {
        self.state.as_deref().unwrap_or("")
    }

    pub fn has_reference(&self, code_key: &str) -> bool {
        self.references.iter().any(|tag| tag.matches_code(code_key))
    }

    /// `"City, ST"`, a single part, or `"N/A"`.
    pub fn location(&self) -> String {
        match (self.city_str(), self.state_str()) {
            ("", "") => "N/A".to_string(),
            (city, "") => city.to_string(),
            ("", state) => state.to_string(),
            (city, state) => format!("{city}, {state}"),
        }
    }

    /// `"key: value | key: value"`.
    pub fn reference_summary(&self) -> String {
        self.references
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

// ==================== RESULTS ====================

/// Which strategy produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchMethod {
    ExactReference,
    FuzzyName,
    None,
}

impl std::fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchMethod::ExactReference => write!(f, "Reference ID (Exact)"),
            MatchMethod::FuzzyName => write!(f, "Fuzzy Name"),
            MatchMethod::None => write!(f, "-"),
        }
    }
}

/// Confidence bucket derived from a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    None,
    Marginal,
    Weak,
    Good,
    High,
}

pub const TIER_HIGH_MIN: f64 = 0.9;
pub const TIER_GOOD_MIN: f64 = 0.8;
pub const TIER_WEAK_MIN: f64 = 0.6;

/// Score at display precision (three decimals).
pub fn round_score(score: f64) -> f64 {
    (score * 1000.0).round() / 1000.0
}

impl Tier {
    /// Classifies the score as displayed, so `0.8999999999999999` is high.
    pub fn from_score(score: f64) -> Self {
        let score = round_score(score);
        if score >= TIER_HIGH_MIN {
            Tier::High
        } else if score >= TIER_GOOD_MIN {
            Tier::Good
        } else if score >= TIER_WEAK_MIN {
            Tier::Weak
        } else if score > 0.0 {
            Tier::Marginal
        } else {
            Tier::None
        }
    }

    pub fn rank(self) -> u8 {
        match self {
            Tier::High => 4,
            Tier::Good => 3,
            Tier::Weak => 2,
            Tier::Marginal => 1,
            Tier::None => 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::High => "high",
            Tier::Good => "good",
            Tier::Weak => "weak",
            Tier::Marginal => "marginal",
            Tier::None => "none",
        }
    }

    /// Fixed severity label used by presentation layers.
    pub fn severity(self) -> &'static str {
        match self {
            Tier::High => "success",
            Tier::Good => "warning",
            Tier::Weak => "caution",
            Tier::Marginal => "danger",
            Tier::None => "neutral",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One resolved input. Carries enough denormalized data to render or export
/// without going back to the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub input: InputRecord,
    pub score: f64,
    pub method: MatchMethod,
    pub tier: Tier,
    pub matched_entity_id: Option<String>,
    pub matched_name: Option<String>,
    pub matched_address: Option<String>,
    pub matched_location: Option<String>,
    pub matched_references: Option<String>,
    pub address_proximity: Option<f64>,
}

impl MatchResult {
    pub fn no_match(input: InputRecord) -> Self {
        Self {
            input,
            score: 0.0,
            method: MatchMethod::None,
            tier: Tier::None,
            matched_entity_id: None,
            matched_name: None,
            matched_address: None,
            matched_location: None,
            matched_references: None,
            address_proximity: None,
        }
    }

    pub fn is_match(&self) -> bool {
        self.matched_entity_id.is_some()
    }

    /// Score rendered with three decimals (`"0.873"`).
    pub fn score_label(&self) -> String {
        format!("{:.3}", self.score)
    }

    /// Matched name prefixed by how much it should be trusted.
    pub fn display_name(&self) -> String {
        let Some(name) = self.matched_name.as_deref() else {
            return "No Match".to_string();
        };
        match self.tier {
            Tier::High | Tier::Good => name.to_string(),
            Tier::Weak => format!("Guess: {name}"),
            Tier::Marginal | Tier::None => format!("Weak: {name}"),
        }
    }
}

// ==================== WORKFLOWS ====================

/// Matching workflow. All workflows share one scorer; they differ by
/// weighting profile, exact-reference short-circuit and ranking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Workflow {
    /// Deep scan: enrich with references, exact code first, name fallback.
    ReferenceMatch,
    /// Name + city + state against one account's catalog.
    LocationSearch,
    /// Name + street address against the global catalog.
    GlobalSearch,
}

impl std::fmt::Display for Workflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Workflow::ReferenceMatch => write!(f, "ReferenceMatch"),
            Workflow::LocationSearch => write!(f, "LocationSearch"),
            Workflow::GlobalSearch => write!(f, "GlobalSearch"),
        }
    }
}

/// Which slice of the inventory a run fetches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "id")]
pub enum CatalogScope {
    Account(String),
    Global,
}

impl std::fmt::Display for CatalogScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogScope::Account(id) => write!(f, "account {id}"),
            CatalogScope::Global => write!(f, "global"),
        }
    }
}

#[cfg(test)]
#[path = "../tests/models/types_tests.rs"]
mod tests;
