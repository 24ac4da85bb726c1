//! Inventory service adapters: paged catalog retrieval and the
//! per-entity reference endpoints.
pub mod client;
pub mod decode;
pub mod source;

pub use client::{InventoryClient, REFERENCE_PAGE_SIZE};
pub use decode::{decode_catalog_page, decode_groups, decode_references, Page};
pub use source::{fetch_catalog, fetch_catalog_with_progress, CatalogPage, PagedSource};
