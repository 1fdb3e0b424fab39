use std::path::Path;

use {
    skilldex_common::Catalog,
    tracing::{info, warn},
};

use crate::{
    engine::QueryEngine,
    error::{Error, Result},
    links::LinkTemplates,
};

/// Read and parse a published catalog artifact.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let raw = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = Catalog::from_json(&raw).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), entries = catalog.len(), "catalog loaded");
    Ok(catalog)
}

/// Outcome of bringing up the browser. A catalog that cannot be read or
/// parsed is a distinct state rather than an empty catalog.
#[derive(Debug)]
pub enum LoadState {
    Ready(QueryEngine),
    Failed { reason: String },
}

impl LoadState {
    pub fn load(path: &Path, links: LinkTemplates) -> Self {
        match load_catalog(path) {
            Ok(catalog) => Self::Ready(QueryEngine::new(catalog, links)),
            Err(e) => {
                warn!(%e, "catalog unavailable");
                Self::Failed {
                    reason: e.to_string(),
                }
            },
        }
    }

    pub fn engine(&self) -> Option<&QueryEngine> {
        match self {
            Self::Ready(engine) => Some(engine),
            Self::Failed { .. } => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}
