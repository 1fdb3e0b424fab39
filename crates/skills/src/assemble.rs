use std::{
    collections::{HashMap, hash_map::Entry},
    path::PathBuf,
};

use {
    skilldex_common::{Catalog, CatalogEntry},
    skilldex_config::SkilldexConfig,
    tracing::{info, warn},
};

use crate::{
    categorize::Categorizer,
    discover::{FsSkillDiscoverer, SkillDiscoverer},
    error::{ManifestError, Result},
    parse::parse_metadata,
    types::{
        BuildReport, CategorizationRecord, NameMismatch, SkillCandidate, SkillMetadata,
        SkipReason, SkippedSkill,
    },
};

/// A finished build: the catalog plus its diagnostics.
#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub catalog: Catalog,
    pub report: BuildReport,
}

/// Runs the whole pipeline: discover → categorize → parse → assemble.
pub struct CatalogBuilder {
    root: PathBuf,
    discoverer: Box<dyn SkillDiscoverer>,
    categorizer: Categorizer,
}

impl CatalogBuilder {
    pub fn new(
        root: impl Into<PathBuf>,
        discoverer: Box<dyn SkillDiscoverer>,
        categorizer: Categorizer,
    ) -> Self {
        Self {
            root: root.into(),
            discoverer,
            categorizer,
        }
    }

    pub fn from_config(config: &SkilldexConfig) -> Self {
        Self::new(
            config.sources.root.clone(),
            Box::new(FsSkillDiscoverer::from_config(config)),
            Categorizer::from_config(config),
        )
    }

    /// Build the catalog. Only an unreadable skill root is an error; every
    /// per-skill problem is logged and recorded in the report.
    pub fn build(&self) -> Result<BuildOutput> {
        let discovery = self.discoverer.discover()?;
        let mut report = BuildReport {
            skipped: discovery.skipped,
            unresolved_links: self.categorizer.index().unresolved(),
            ..Default::default()
        };

        let mut entries = Vec::with_capacity(discovery.candidates.len());
        let mut claimed: HashMap<String, PathBuf> = HashMap::new();
        for candidate in discovery.candidates {
            let meta = match load_metadata(&candidate) {
                Ok(meta) => meta,
                Err(e) => {
                    warn!(
                        identity = %candidate.identity,
                        path = %candidate.manifest_path.display(),
                        %e,
                        "skipping skill with malformed metadata"
                    );
                    report.skipped.push(SkippedSkill {
                        identity: candidate.identity,
                        path: candidate.manifest_path,
                        reason: SkipReason::MalformedMetadata {
                            reason: e.to_string(),
                        },
                    });
                    continue;
                },
            };

            if meta.name != candidate.identity {
                warn!(
                    identity = %candidate.identity,
                    name = %meta.name,
                    path = %candidate.manifest_path.display(),
                    "manifest name differs from its directory"
                );
                report.name_mismatches.push(NameMismatch {
                    identity: candidate.identity.clone(),
                    name: meta.name.clone(),
                    path: candidate.manifest_path.clone(),
                });
            }

            match claimed.entry(meta.name.clone()) {
                Entry::Occupied(first) => {
                    warn!(
                        name = %meta.name,
                        kept = %first.get().display(),
                        dropped = %candidate.skill_dir.display(),
                        "skill name already claimed by another directory"
                    );
                    report.skipped.push(SkippedSkill {
                        reason: SkipReason::DuplicateName {
                            name: meta.name,
                            kept: first.get().display().to_string(),
                        },
                        identity: candidate.identity,
                        path: candidate.skill_dir,
                    });
                    continue;
                },
                Entry::Vacant(slot) => {
                    slot.insert(candidate.skill_dir.clone());
                },
            }

            let record = self.categorizer.categorize(&candidate.identity);
            entries.push(assemble_entry(&candidate, meta, record, &self.root));
        }

        let catalog = Catalog::from_entries(entries);
        report.entries = catalog.len();
        for entry in &catalog {
            *report.per_language.entry(entry.language).or_default() += 1;
        }

        for (language, count) in &report.per_language {
            info!(%language, count, "catalog language total");
        }
        info!(
            entries = report.entries,
            skipped = report.skipped.len(),
            unresolved_links = report.unresolved_links,
            "catalog built"
        );

        Ok(BuildOutput { catalog, report })
    }
}

fn load_metadata(candidate: &SkillCandidate) -> std::result::Result<SkillMetadata, ManifestError> {
    let content = std::fs::read_to_string(&candidate.manifest_path)?;
    parse_metadata(&content)
}

/// Merge one candidate's metadata and categorization into a catalog entry.
///
/// A language declared by the plugin bundle overrides the categorizer's.
pub fn assemble_entry(
    candidate: &SkillCandidate,
    meta: SkillMetadata,
    record: CategorizationRecord,
    root: &std::path::Path,
) -> CatalogEntry {
    CatalogEntry {
        name: meta.name,
        description: meta.description,
        language: candidate
            .provenance
            .declared_language()
            .unwrap_or(record.language),
        category: record.category,
        path: candidate.catalog_path(root),
        package: meta.package,
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{categorize::CategoryIndex, discover::Discovery, types::Provenance},
        skilldex_common::Language,
        skilldex_config::CategorizeConfig,
        std::path::Path,
    };

    struct FixedDiscoverer(Vec<SkillCandidate>);

    impl SkillDiscoverer for FixedDiscoverer {
        fn discover(&self) -> Result<Discovery> {
            Ok(Discovery {
                candidates: self.0.clone(),
                skipped: Vec::new(),
            })
        }
    }

    fn candidate(dir: &Path, identity: &str, provenance: Provenance, manifest: &str) -> SkillCandidate {
        let skill_dir = dir.join(identity);
        std::fs::create_dir_all(&skill_dir).unwrap();
        let manifest_path = skill_dir.join("SKILL.md");
        std::fs::write(&manifest_path, manifest).unwrap();
        SkillCandidate {
            identity: identity.into(),
            skill_dir,
            manifest_path,
            provenance,
        }
    }

    fn builder(root: &Path, candidates: Vec<SkillCandidate>) -> CatalogBuilder {
        CatalogBuilder::new(
            root,
            Box::new(FixedDiscoverer(candidates)),
            Categorizer::new(CategoryIndex::default(), CategorizeConfig::default()),
        )
    }

    #[test]
    fn plugin_language_overrides_categorizer() {
        let cand = SkillCandidate {
            identity: "helper-ts".into(),
            skill_dir: PathBuf::from("/repo/plugins/p/skills/helper-ts"),
            manifest_path: PathBuf::from("/repo/plugins/p/skills/helper-ts/SKILL.md"),
            provenance: Provenance::PluginBundle {
                plugin: "p".into(),
                language: Language::Java,
            },
        };
        let meta = SkillMetadata {
            name: "helper-ts".into(),
            description: "d".into(),
            package: None,
        };
        let record = CategorizationRecord {
            language: Language::Ts,
            category: "tools".into(),
        };
        let entry = assemble_entry(&cand, meta, record, Path::new("/repo"));
        assert_eq!(entry.language, Language::Java);
        assert_eq!(entry.category, "tools");
        assert_eq!(entry.path, "plugins/p/skills/helper-ts");
    }

    #[test]
    fn malformed_entries_are_reported_and_dropped() {
        let tmp = tempfile::tempdir().unwrap();
        let good = candidate(
            tmp.path(),
            "good-py",
            Provenance::CoreDirectory,
            "---\nname: good-py\ndescription: fine\n---\n",
        );
        let bad = candidate(
            tmp.path(),
            "bad-py",
            Provenance::CoreDirectory,
            "---\ndescription: no name\n---\n",
        );

        let out = builder(tmp.path(), vec![good, bad]).build().unwrap();
        assert_eq!(out.catalog.len(), 1);
        assert_eq!(out.report.malformed(), 1);
        assert_eq!(out.report.skipped[0].identity, "bad-py");
        assert_eq!(out.report.per_language.get(&Language::Py), Some(&1));
    }

    #[test]
    fn unreadable_manifest_counts_as_malformed() {
        let tmp = tempfile::tempdir().unwrap();
        let mut cand = candidate(
            tmp.path(),
            "gone-py",
            Provenance::CoreDirectory,
            "---\nname: gone-py\ndescription: d\n---\n",
        );
        cand.manifest_path = tmp.path().join("gone-py/missing.md");

        let out = builder(tmp.path(), vec![cand]).build().unwrap();
        assert!(out.catalog.is_empty());
        assert_eq!(out.report.malformed(), 1);
    }

    #[test]
    fn mismatched_name_is_kept_and_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let cand = candidate(
            tmp.path(),
            "azure-ai-search-python",
            Provenance::CoreDirectory,
            "---\nname: azure-search-documents-py\ndescription: Search\n---\n",
        );

        let out = builder(tmp.path(), vec![cand]).build().unwrap();
        assert_eq!(out.catalog.len(), 1);
        let entry = out.catalog.get("azure-search-documents-py").unwrap();
        assert_eq!(entry.path, "azure-ai-search-python");
        assert_eq!(out.report.malformed(), 0);
        assert_eq!(out.report.name_mismatches.len(), 1);
        assert_eq!(out.report.name_mismatches[0].identity, "azure-ai-search-python");
    }

    #[test]
    fn second_directory_claiming_a_name_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let first = candidate(
            tmp.path(),
            "search-py",
            Provenance::CoreDirectory,
            "---\nname: search-py\ndescription: first\n---\n",
        );
        let second = candidate(
            tmp.path(),
            "search-python",
            Provenance::CoreDirectory,
            "---\nname: search-py\ndescription: second\n---\n",
        );

        let out = builder(tmp.path(), vec![first, second]).build().unwrap();
        assert_eq!(out.catalog.len(), 1);
        assert_eq!(out.catalog.get("search-py").unwrap().description, "first");
        assert_eq!(out.report.duplicates(), 1);
        assert!(matches!(
            &out.report.skipped[0].reason,
            SkipReason::DuplicateName { name, .. } if name == "search-py"
        ));
    }

    #[test]
    fn entries_are_sorted_by_name() {
        let tmp = tempfile::tempdir().unwrap();
        let cands = ["zeta-ts", "alpha-py", "mid"]
            .into_iter()
            .map(|name| {
                candidate(
                    tmp.path(),
                    name,
                    Provenance::CoreDirectory,
                    &format!("---\nname: {name}\ndescription: d\n---\n"),
                )
            })
            .collect();

        let out = builder(tmp.path(), cands).build().unwrap();
        let names: Vec<_> = out.catalog.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["alpha-py", "mid", "zeta-ts"]);
        assert_eq!(out.catalog.get("mid").unwrap().language, Language::Core);
    }
}
