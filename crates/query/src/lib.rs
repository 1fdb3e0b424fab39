//! Query engine over a built skill catalog.
//!
//! The engine holds the read-only [`Catalog`](skilldex_common::Catalog) and
//! three pieces of state: the language facet, the category facet, and a
//! free-text query. Every accessor recomputes from scratch; the catalog is
//! small enough that no index is kept.

pub mod deeplink;
pub mod engine;
pub mod error;
pub mod facet;
pub mod links;
pub mod load;
pub mod search;

pub use {
    deeplink::{DeepLinkError, decode, encode},
    engine::{QueryEngine, SkillDetail},
    error::{Error, Result},
    facet::{Facet, FacetOption},
    links::LinkTemplates,
    load::{LoadState, load_catalog},
    search::SearchQuery,
};
