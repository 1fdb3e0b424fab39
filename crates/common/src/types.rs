//! Catalog contract: the records written by `skilldex build` and read by the
//! query engine.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize, Serializer};

use crate::error::Result;

// ── Language ────────────────────────────────────────────────────────────────

/// Language tag attached to every catalog entry.
///
/// Serialized as the short tag (`py`, `ts`, ...). Declaration order is the
/// display order of the language facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[serde(alias = "python")]
    Py,
    #[serde(alias = "csharp", alias = "net")]
    Dotnet,
    #[serde(alias = "typescript", alias = "javascript")]
    Ts,
    Java,
    Rust,
    /// Catch-all for skills not tied to one SDK language.
    Core,
}

impl Language {
    pub const ALL: [Language; 6] = [
        Language::Py,
        Language::Dotnet,
        Language::Ts,
        Language::Java,
        Language::Rust,
        Language::Core,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Py => "py",
            Self::Dotnet => "dotnet",
            Self::Ts => "ts",
            Self::Java => "java",
            Self::Rust => "rust",
            Self::Core => "core",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Returned when a string names no known [`Language`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown language '{0}'")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    /// Accepts the short tags plus the long directory names used by the
    /// categorization tree (`python`, `typescript`, ...), ignoring case.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "py" | "python" => Ok(Self::Py),
            "dotnet" | "csharp" | "net" | ".net" => Ok(Self::Dotnet),
            "ts" | "typescript" | "javascript" | "js" => Ok(Self::Ts),
            "java" => Ok(Self::Java),
            "rust" | "rs" => Ok(Self::Rust),
            "core" => Ok(Self::Core),
            _ => Err(UnknownLanguage(s.to_string())),
        }
    }
}

// ── Catalog ─────────────────────────────────────────────────────────────────

/// One skill as published in the catalog artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Globally unique skill name; also the directory identity.
    pub name: String,
    pub description: String,
    pub language: Language,
    pub category: String,
    /// Repository-relative path of the authoritative skill directory, `/`-separated.
    pub path: String,
    /// Package identifier, passed through verbatim from the manifest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
}

/// Immutable, name-sorted sequence of [`CatalogEntry`].
///
/// Every constructor sorts, so lookups can binary-search on `name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Vec<CatalogEntry>")]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn from_entries(mut entries: Vec<CatalogEntry>) -> Self {
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact-name lookup.
    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries
            .binary_search_by(|entry| entry.name.as_str().cmp(name))
            .ok()
            .map(|idx| &self.entries[idx])
    }

    /// Pretty-printed JSON array with a trailing newline.
    pub fn to_json(&self) -> Result<String> {
        let mut out = serde_json::to_string_pretty(&self.entries)?;
        out.push('\n');
        Ok(out)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

impl From<Vec<CatalogEntry>> for Catalog {
    fn from(entries: Vec<CatalogEntry>) -> Self {
        Self::from_entries(entries)
    }
}

impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;
    type Item = &'a CatalogEntry;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
