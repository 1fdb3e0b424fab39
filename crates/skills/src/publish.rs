//! Writing the catalog artifact.
//!
//! The artifact is staged in a temporary file next to its destination and
//! renamed into place, so readers never observe a partially written catalog.

use std::{io::Write, path::Path};

use {
    skilldex_common::Catalog,
    tracing::{debug, info},
};

use crate::error::{Error, Result};

/// What [`publish`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    Written,
    /// The destination already held byte-identical content.
    Unchanged,
}

/// How a published artifact compares to a fresh build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    UpToDate,
    Stale,
    Missing,
}

/// Publish `catalog` to `path` via stage-then-swap.
pub fn publish(catalog: &Catalog, path: &Path) -> Result<PublishOutcome> {
    let rendered = catalog.to_json()?;

    if let Ok(existing) = std::fs::read(path)
        && existing == rendered.as_bytes()
    {
        debug!(path = %path.display(), "catalog unchanged, skipping write");
        return Ok(PublishOutcome::Unchanged);
    }

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|e| Error::publish(path, e))?;

    let mut staged = tempfile::NamedTempFile::new_in(parent).map_err(|e| Error::publish(path, e))?;
    staged
        .write_all(rendered.as_bytes())
        .and_then(|()| staged.as_file().sync_all())
        .map_err(|e| Error::publish(path, e))?;
    staged
        .persist(path)
        .map_err(|e| Error::publish(path, e.error))?;

    info!(path = %path.display(), entries = catalog.len(), "catalog published");
    Ok(PublishOutcome::Written)
}

/// Compare a freshly built catalog with what is published at `path`.
pub fn check(catalog: &Catalog, path: &Path) -> Result<Freshness> {
    let rendered = catalog.to_json()?;
    match std::fs::read(path) {
        Ok(existing) if existing == rendered.as_bytes() => Ok(Freshness::UpToDate),
        Ok(_) => Ok(Freshness::Stale),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Freshness::Missing),
        Err(e) => Err(e.into()),
    }
}
