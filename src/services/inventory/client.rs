use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::decode::{decode_catalog_page, decode_page};
use super::source::{CatalogPage, PagedSource};
use crate::services::config::ResolverSettings;
use crate::services::enrichment::{ReferenceFetcher, ReferenceGroupFetcher};
use crate::services::resolver::models::types::{CatalogScope, ReferenceGroup, ReferenceTag};
use crate::types::errors::ResolveError;

const ASSETS_FLAG: &str = "accounts-assets";
const REFERENCES_FLAG: &str = "references";

pub const REFERENCE_PAGE_SIZE: usize = 100;

/// HTTP client for the inventory API.
///
/// Every request carries the `API-Key` header and the experimental flag the
/// endpoint requires. Listings follow `paging.next_url` until exhausted.
#[derive(Debug, Clone)]
pub struct InventoryClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl InventoryClient {
    pub fn new(settings: &ResolverSettings) -> Result<Self, ResolveError> {
        settings.validate()?;
        let http = Client::builder()
            .timeout(settings.request_timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone().unwrap_or_default(),
        })
    }

    pub fn catalog_url(&self, scope: &CatalogScope, page_size: usize) -> String {
        match scope {
            CatalogScope::Account(account_id) => format!(
                "{}/accounts/{}/assets?per-page={}",
                self.base_url,
                urlencoding::encode(account_id),
                page_size
            ),
            CatalogScope::Global => format!("{}/assets?per-page={}", self.base_url, page_size),
        }
    }

    pub fn references_url(&self, entity_id: &str) -> String {
        format!(
            "{}/assets/{}/multifamily/references?per-page={}",
            self.base_url,
            urlencoding::encode(entity_id),
            REFERENCE_PAGE_SIZE
        )
    }

    pub fn groups_url(&self, entity_id: &str) -> String {
        format!(
            "{}/assets/{}/multifamily/units/reference-groups?per-page={}",
            self.base_url,
            urlencoding::encode(entity_id),
            REFERENCE_PAGE_SIZE
        )
    }

    pub fn group_references_url(&self, entity_id: &str, group_id: &str) -> String {
        format!(
            "{}/assets/{}/multifamily/units/reference-groups/{}/references?per-page={}",
            self.base_url,
            urlencoding::encode(entity_id),
            urlencoding::encode(group_id),
            REFERENCE_PAGE_SIZE
        )
    }

    async fn get_text(&self, url: &str, flag: &str) -> Result<String, ResolveError> {
        debug!("GET {}", url);
        let response = self
            .http
            .get(url)
            .header("API-Key", &self.api_key)
            .header("Experimental-Flags", flag)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.text().await?)
    }

    /// Follow a listing to its last page.
    async fn collect_pages<T: DeserializeOwned>(
        &self,
        first_url: String,
        flag: &str,
    ) -> Result<Vec<T>, ResolveError> {
        let mut items = Vec::new();
        let mut next = Some(first_url);

        while let Some(url) = next.take() {
            let page = decode_page::<T>(&self.get_text(&url, flag).await?)?;
            items.extend(page.items);
            next = page.next_url.filter(|candidate| *candidate != url);
        }
        Ok(items)
    }
}

#[async_trait]
impl PagedSource for InventoryClient {
    fn first_cursor(&self, scope: &CatalogScope, page_size: usize) -> String {
        self.catalog_url(scope, page_size)
    }

    async fn fetch_page(&self, cursor: &str) -> Result<CatalogPage, ResolveError> {
        let body = self.get_text(cursor, ASSETS_FLAG).await?;
        decode_catalog_page(&body)
    }
}

#[async_trait]
impl ReferenceFetcher for InventoryClient {
    async fn fetch_references(&self, entity_id: &str) -> Result<Vec<ReferenceTag>, ResolveError> {
        self.collect_pages(self.references_url(entity_id), REFERENCES_FLAG)
            .await
    }
}

#[async_trait]
impl ReferenceGroupFetcher for InventoryClient {
    async fn fetch_groups(&self, entity_id: &str) -> Result<Vec<ReferenceGroup>, ResolveError> {
        match self
            .collect_pages(self.groups_url(entity_id), REFERENCES_FLAG)
            .await
        {
            // 404 means the entity has no reference groups.
            Err(ResolveError::Status { status: 404, .. }) => Ok(Vec::new()),
            Err(e) => {
                warn!("Reference groups for {} failed: {}", entity_id, e);
                Err(e)
            }
            ok => ok,
        }
    }

    async fn fetch_group_references(
        &self,
        entity_id: &str,
        group: &ReferenceGroup,
    ) -> Result<Vec<ReferenceTag>, ResolveError> {
        self.collect_pages(
            self.group_references_url(entity_id, &group.id),
            REFERENCES_FLAG,
        )
        .await
    }
}

#[cfg(test)]
#[path = "tests/client_tests.rs"]
mod tests;
