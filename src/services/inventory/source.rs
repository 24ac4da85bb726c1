use async_trait::async_trait;
use log::info;

use super::decode::Page;
use crate::services::enrichment::CancelFlag;
use crate::services::resolver::models::types::{CandidateEntity, CatalogScope};
use crate::types::errors::ResolveError;

pub type CatalogPage = Page<CandidateEntity>;

/// Paginated catalog listing. Cursors are opaque (in practice, page URLs).
#[async_trait]
pub trait PagedSource: Send + Sync {
    /// Cursor of the first page for a scope.
    fn first_cursor(&self, scope: &CatalogScope, page_size: usize) -> String;

    /// A non-success response is an error; the caller does not retry.
    async fn fetch_page(&self, cursor: &str) -> Result<CatalogPage, ResolveError>;
}

/// Concatenate every page of a scope.
///
/// Returns `ResolveError::Cancelled` when the flag is set before a page is
/// requested; any page failure aborts the whole fetch.
pub async fn fetch_catalog<S>(
    source: &S,
    scope: &CatalogScope,
    page_size: usize,
    cancel: &CancelFlag,
) -> Result<Vec<CandidateEntity>, ResolveError>
where
    S: PagedSource + ?Sized,
{
    fetch_catalog_with_progress(source, scope, page_size, cancel, |_, _| {}).await
}

/// [`fetch_catalog`] reporting `(fetched, total_count)` after every page.
pub async fn fetch_catalog_with_progress<S, P>(
    source: &S,
    scope: &CatalogScope,
    page_size: usize,
    cancel: &CancelFlag,
    mut on_page: P,
) -> Result<Vec<CandidateEntity>, ResolveError>
where
    S: PagedSource + ?Sized,
    P: FnMut(usize, Option<usize>),
{
    let mut entities = Vec::new();
    let mut total_count = None;
    let mut cursor = Some(source.first_cursor(scope, page_size.max(1)));

    while let Some(current) = cursor.take() {
        if cancel.is_cancelled() {
            info!("Catalog fetch for {} cancelled at {} entities", scope, entities.len());
            return Err(ResolveError::Cancelled);
        }

        let page = source.fetch_page(&current).await?;
        total_count = page.total_count.or(total_count);
        entities.extend(page.items);
        on_page(entities.len(), total_count);

        // A page pointing at itself would never terminate.
        cursor = page.next_url.filter(|next| *next != current);
    }

    info!("Fetched {} catalog entities ({})", entities.len(), scope);
    Ok(entities)
}

#[cfg(test)]
#[path = "tests/source_tests.rs"]
mod tests;
