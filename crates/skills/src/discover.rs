use std::{
    collections::{BTreeMap, HashMap},
    path::{Path, PathBuf},
};

use {
    skilldex_common::Language,
    skilldex_config::SkilldexConfig,
    tracing::{debug, warn},
};

use crate::{
    error::{Error, Result},
    types::{Provenance, SkillCandidate, SkipReason, SkippedSkill},
};

/// Candidates found by one discovery pass, plus the directories left out.
#[derive(Debug, Default)]
pub struct Discovery {
    pub candidates: Vec<SkillCandidate>,
    pub skipped: Vec<SkippedSkill>,
}

/// Discovers skill candidates from filesystem layouts.
pub trait SkillDiscoverer {
    /// Scan every configured root and return manifest-bearing candidates,
    /// unique by identity.
    fn discover(&self) -> Result<Discovery>;
}

/// Scans the plugins root, then the flat core root.
///
/// This is the only place identity uniqueness is enforced: the first
/// candidate seen for an identity wins and later ones are recorded as
/// [`SkipReason::DuplicateIdentity`]. Plugin bundles are scanned first, so a
/// plugin copy always beats a core copy of the same skill.
pub struct FsSkillDiscoverer {
    plugins_root: PathBuf,
    core_root: PathBuf,
    manifest_file: String,
    /// Allow-list: plugin directory name → declared language.
    plugins: BTreeMap<String, Language>,
}

impl FsSkillDiscoverer {
    pub fn new(
        plugins_root: impl Into<PathBuf>,
        core_root: impl Into<PathBuf>,
        manifest_file: impl Into<String>,
        plugins: BTreeMap<String, Language>,
    ) -> Self {
        Self {
            plugins_root: plugins_root.into(),
            core_root: core_root.into(),
            manifest_file: manifest_file.into(),
            plugins,
        }
    }

    pub fn from_config(config: &SkilldexConfig) -> Self {
        Self::new(
            config.plugins_root(),
            config.core_root(),
            config.sources.manifest_file.clone(),
            config.sources.plugins.clone(),
        )
    }
}

impl SkillDiscoverer for FsSkillDiscoverer {
    fn discover(&self) -> Result<Discovery> {
        let mut scan = Scan::new(&self.manifest_file);

        let bundles = list_subdirs(&self.plugins_root)
            .map_err(|e| Error::root_unreadable(&self.plugins_root, e))?;
        for (plugin, bundle_dir) in bundles {
            let Some(&language) = self.plugins.get(&plugin) else {
                debug!(%plugin, "skipping unrecognized plugin bundle");
                continue;
            };
            let skills_dir = bundle_dir.join("skills");
            let skill_dirs = match list_subdirs(&skills_dir) {
                Ok(dirs) => dirs,
                Err(e) => {
                    debug!(path = %skills_dir.display(), %e, "plugin bundle has no skills directory");
                    continue;
                },
            };
            for (identity, skill_dir) in skill_dirs {
                scan.offer(identity, skill_dir, Provenance::PluginBundle {
                    plugin: plugin.clone(),
                    language,
                });
            }
        }

        let core_dirs =
            list_subdirs(&self.core_root).map_err(|e| Error::root_unreadable(&self.core_root, e))?;
        for (identity, skill_dir) in core_dirs {
            scan.offer(identity, skill_dir, Provenance::CoreDirectory);
        }

        Ok(scan.finish())
    }
}

/// Accumulates candidates in scan order with first-source-wins dedup.
struct Scan<'a> {
    manifest_file: &'a str,
    seen: HashMap<String, PathBuf>,
    discovery: Discovery,
}

impl<'a> Scan<'a> {
    fn new(manifest_file: &'a str) -> Self {
        Self {
            manifest_file,
            seen: HashMap::new(),
            discovery: Discovery::default(),
        }
    }

    fn offer(&mut self, identity: String, skill_dir: PathBuf, provenance: Provenance) {
        let manifest_path = skill_dir.join(self.manifest_file);
        if !manifest_path.is_file() {
            debug!(path = %skill_dir.display(), "skipping directory without manifest");
            self.discovery.skipped.push(SkippedSkill {
                identity,
                path: skill_dir,
                reason: SkipReason::MissingManifest,
            });
            return;
        }

        if let Some(kept) = self.seen.get(&identity) {
            debug!(
                %identity,
                kept = %kept.display(),
                dropped = %skill_dir.display(),
                "suppressing duplicate skill identity"
            );
            self.discovery.skipped.push(SkippedSkill {
                reason: SkipReason::DuplicateIdentity {
                    kept: kept.display().to_string(),
                },
                identity,
                path: skill_dir,
            });
            return;
        }

        self.seen.insert(identity.clone(), skill_dir.clone());
        self.discovery.candidates.push(SkillCandidate {
            identity,
            skill_dir,
            manifest_path,
            provenance,
        });
    }

    fn finish(self) -> Discovery {
        self.discovery
    }
}

/// Every entry of `dir`, sorted by file name so scan order does not depend
/// on the filesystem.
pub(crate) fn list_entries(dir: &Path) -> std::io::Result<Vec<(String, PathBuf)>> {
    let mut out = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(path = %dir.display(), %e, "failed to read directory entry");
                continue;
            },
        };
        let path = entry.path();
        match entry.file_name().into_string() {
            Ok(name) => out.push((name, path)),
            Err(_) => warn!(path = %path.display(), "skipping non UTF-8 file name"),
        }
    }
    out.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(out)
}

/// Subdirectories of `dir` (following symlinks), sorted by name.
pub(crate) fn list_subdirs(dir: &Path) -> std::io::Result<Vec<(String, PathBuf)>> {
    Ok(list_entries(dir)?
        .into_iter()
        .filter(|(_, path)| path.is_dir())
        .collect())
}
