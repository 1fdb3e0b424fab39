/// Config schema types (sources, categorization, output, link templates).
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use {
    serde::{Deserialize, Serialize},
    skilldex_common::Language,
};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkilldexConfig {
    pub sources: SourcesConfig,
    pub categorize: CategorizeConfig,
    pub output: OutputConfig,
    pub links: LinksConfig,
}

impl SkilldexConfig {
    pub fn plugins_root(&self) -> PathBuf {
        self.sources.resolve(&self.sources.plugins_dir)
    }

    pub fn core_root(&self) -> PathBuf {
        self.sources.resolve(&self.sources.core_dir)
    }

    pub fn symlink_root(&self) -> PathBuf {
        self.sources.resolve(&self.categorize.symlink_dir)
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.sources.resolve(&self.output.catalog)
    }
}

/// Where skills live on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Repository root. Every other relative path is resolved against it,
    /// and catalog `path` values are written relative to it.
    pub root: PathBuf,
    /// Directory of language-scoped plugin bundles.
    pub plugins_dir: PathBuf,
    /// Flat directory of core skills.
    pub core_dir: PathBuf,
    /// Manifest file expected inside every skill directory.
    pub manifest_file: String,
    /// Allow-list of plugin bundle names and the language each one declares.
    /// Bundles not listed here are skipped.
    pub plugins: BTreeMap<String, Language>,
}

impl SourcesConfig {
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl Default for SourcesConfig {
    fn default() -> Self {
        let plugins = [
            ("azure-sdk-python", Language::Py),
            ("azure-sdk-dotnet", Language::Dotnet),
            ("azure-sdk-typescript", Language::Ts),
            ("azure-sdk-java", Language::Java),
            ("azure-sdk-rust", Language::Rust),
        ]
        .into_iter()
        .map(|(name, lang)| (name.to_string(), lang))
        .collect();

        Self {
            root: PathBuf::from("."),
            plugins_dir: PathBuf::from(".github/plugins"),
            core_dir: PathBuf::from(".github/skills"),
            manifest_file: "SKILL.md".into(),
            plugins,
        }
    }
}

/// Name-suffix rule used when the categorization tree has no link for a skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuffixRule {
    pub suffix: String,
    pub language: Language,
}

impl SuffixRule {
    pub fn new(suffix: impl Into<String>, language: Language) -> Self {
        Self {
            suffix: suffix.into(),
            language,
        }
    }
}

/// Symlink-tree categorization and its fallbacks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CategorizeConfig {
    /// Root of the `language/category/link` tree.
    pub symlink_dir: PathBuf,
    pub fallback_category: String,
    /// Used when neither a link nor a suffix rule matches.
    pub fallback_language: Language,
    /// Checked in order; the first matching suffix wins.
    pub suffixes: Vec<SuffixRule>,
}

impl CategorizeConfig {
    /// Language implied by a skill directory name, if any suffix rule matches.
    pub fn language_for_suffix(&self, identity: &str) -> Option<Language> {
        self.suffixes
            .iter()
            .find(|rule| !rule.suffix.is_empty() && identity.ends_with(&rule.suffix))
            .map(|rule| rule.language)
    }
}

impl Default for CategorizeConfig {
    fn default() -> Self {
        Self {
            symlink_dir: PathBuf::from("skills"),
            fallback_category: "general".into(),
            fallback_language: Language::Core,
            suffixes: vec![
                SuffixRule::new("-py", Language::Py),
                SuffixRule::new("-dotnet", Language::Dotnet),
                SuffixRule::new("-ts", Language::Ts),
                SuffixRule::new("-java", Language::Java),
                SuffixRule::new("-rust", Language::Rust),
            ],
        }
    }
}

/// Where the catalog artifact is published.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub catalog: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            catalog: PathBuf::from("docs-site/src/data/skills.json"),
        }
    }
}

/// String templates for links shown in the detail view.
///
/// `{name}` and `{path}` are substituted with the entry's values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    pub install_command: String,
    pub source_url: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            install_command: "npx skills add microsoft/agent-skills --skill {name}".into(),
            source_url: "https://github.com/microsoft/agent-skills/tree/main/{path}".into(),
        }
    }
}
