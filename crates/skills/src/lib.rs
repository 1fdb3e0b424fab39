//! Catalog build pipeline: discovery, categorization, parsing, assembly, and
//! publishing.
//!
//! Skills are directories containing a `SKILL.md` file with YAML frontmatter
//! and markdown instructions. They live either inside language-scoped plugin
//! bundles or in a flat core directory; this crate reconciles both layouts
//! into one name-sorted [`Catalog`](skilldex_common::Catalog).

pub mod assemble;
pub mod categorize;
pub mod discover;
pub mod error;
pub mod parse;
pub mod publish;
pub mod repair;
pub mod types;

pub use {
    assemble::{BuildOutput, CatalogBuilder},
    error::{Error, Result},
    publish::{Freshness, PublishOutcome, check, publish},
};
