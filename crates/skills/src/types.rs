use std::{
    collections::BTreeMap,
    fmt,
    path::{Component, Path, PathBuf},
};

use {
    serde::{Deserialize, Serialize},
    skilldex_common::Language,
};

// ── Candidates ──────────────────────────────────────────────────────────────

/// Which layout a skill directory was found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provenance {
    /// `<plugins>/<plugin>/skills/<identity>`; the plugin name declares a language.
    PluginBundle { plugin: String, language: Language },
    /// `<core>/<identity>`
    CoreDirectory,
}

impl Provenance {
    /// Language known directly from where the skill lives, if any.
    pub fn declared_language(&self) -> Option<Language> {
        match self {
            Self::PluginBundle { language, .. } => Some(*language),
            Self::CoreDirectory => None,
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PluginBundle { plugin, .. } => write!(f, "plugin:{plugin}"),
            Self::CoreDirectory => f.write_str("core"),
        }
    }
}

/// A skill directory that carries a manifest. Only lives during a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillCandidate {
    /// Directory name; must equal the manifest's `name`.
    pub identity: String,
    pub skill_dir: PathBuf,
    pub manifest_path: PathBuf,
    pub provenance: Provenance,
}

impl SkillCandidate {
    /// `skill_dir` relative to `root`, joined with `/` regardless of platform.
    pub fn catalog_path(&self, root: &Path) -> String {
        let rel = self.skill_dir.strip_prefix(root).unwrap_or(&self.skill_dir);
        rel.components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                Component::RootDir => Some(String::new()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

// ── Parsed metadata ─────────────────────────────────────────────────────────

/// The part of `SKILL.md` frontmatter the catalog cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillMetadata {
    pub name: String,
    pub description: String,
    /// Passed through verbatim (e.g. `@azure/cosmos`, `azure-cosmos`).
    pub package: Option<String>,
}

// ── Categorization ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorizationRecord {
    pub language: Language,
    pub category: String,
}

// ── Build report ────────────────────────────────────────────────────────────

/// Why a skill directory did not make it into the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    MissingManifest,
    MalformedMetadata { reason: String },
    DuplicateIdentity { kept: String },
    /// Another directory's manifest already declared this `name`.
    DuplicateName { name: String, kept: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedSkill {
    pub identity: String,
    pub path: PathBuf,
    #[serde(flatten)]
    pub reason: SkipReason,
}

/// A manifest whose `name` differs from its directory. The entry is kept
/// under the manifest's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameMismatch {
    pub identity: String,
    pub name: String,
    pub path: PathBuf,
}

/// Diagnostics of one build. Not part of the catalog contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildReport {
    pub entries: usize,
    pub per_language: BTreeMap<Language, usize>,
    pub skipped: Vec<SkippedSkill>,
    pub name_mismatches: Vec<NameMismatch>,
    /// Categorization links whose target could not be resolved.
    pub unresolved_links: usize,
}

impl BuildReport {
    pub fn count(&self, matches: impl Fn(&SkipReason) -> bool) -> usize {
        self.skipped.iter().filter(|s| matches(&s.reason)).count()
    }

    pub fn malformed(&self) -> usize {
        self.count(|r| matches!(r, SkipReason::MalformedMetadata { .. }))
    }

    pub fn duplicates(&self) -> usize {
        self.count(|r| {
            matches!(
                r,
                SkipReason::DuplicateIdentity { .. } | SkipReason::DuplicateName { .. }
            )
        })
    }

    pub fn missing_manifest(&self) -> usize {
        self.count(|r| matches!(r, SkipReason::MissingManifest))
    }
}
