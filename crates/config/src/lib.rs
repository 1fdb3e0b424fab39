//! Configuration loading, validation, and env substitution.
//!
//! Config files: `skilldex.toml`, `skilldex.yaml`, or `skilldex.json`
//! Searched in `./` then `~/.config/skilldex/`.
//!
//! Supports `${ENV_VAR}` substitution in all string values.

pub mod env_subst;
pub mod error;
pub mod loader;
pub mod schema;
pub mod validate;

pub use {
    error::{Error, Result},
    loader::{config_dir, discover_and_load, find_config_file, load_config},
    schema::{CategorizeConfig, LinksConfig, OutputConfig, SkilldexConfig, SourcesConfig, SuffixRule},
    validate::{Diagnostic, Severity, validate},
};
