//! Shared types, error definitions, and utilities used across all skilldex crates.
//!
//! The catalog contract types live here because they are the only thing the
//! build pipeline and the query engine exchange.

pub mod error;
pub mod types;

pub use {
    error::{Error, Result},
    types::{Catalog, CatalogEntry, Language, UnknownLanguage},
};
