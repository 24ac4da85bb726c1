pub mod config;
pub mod enrichment;
pub mod inventory;
pub mod resolver;
pub mod workflows;
