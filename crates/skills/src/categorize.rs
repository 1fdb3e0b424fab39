//! Language/category tagging from the categorization symlink tree.
//!
//! The tree is shaped `<language>/<category>/<link>`, where each link points
//! at a skill directory somewhere in the repository. A skill is tagged with
//! the `(language, category)` of the first link (in sorted traversal order)
//! whose resolved target's final path segment equals the skill's identity.
//!
//! Rather than scanning every link once per candidate, the whole tree is
//! resolved once into an identity-keyed side table.

use std::{
    collections::{HashMap, hash_map::Entry},
    path::Path,
};

use {
    skilldex_common::Language,
    skilldex_config::{CategorizeConfig, SkilldexConfig},
    tracing::{debug, warn},
};

use crate::{
    discover::{list_entries, list_subdirs},
    types::CategorizationRecord,
};

/// Identity → categorization, resolved once per build.
#[derive(Debug, Default, Clone)]
pub struct CategoryIndex {
    by_identity: HashMap<String, CategorizationRecord>,
    unresolved: usize,
}

impl CategoryIndex {
    /// Resolve every link under `root`. A missing or unreadable tree yields an
    /// empty index; dangling or cyclic links are counted and otherwise ignored.
    pub fn build(root: &Path) -> Self {
        let mut index = Self::default();

        let languages = match list_subdirs(root) {
            Ok(dirs) => dirs,
            Err(e) => {
                warn!(path = %root.display(), %e, "categorization tree unavailable, using fallbacks");
                return index;
            },
        };

        for (lang_name, lang_dir) in languages {
            let language = match lang_name.parse::<Language>() {
                Ok(l) => l,
                Err(e) => {
                    debug!(path = %lang_dir.display(), %e, "skipping categorization directory");
                    continue;
                },
            };
            let categories = match list_subdirs(&lang_dir) {
                Ok(dirs) => dirs,
                Err(e) => {
                    warn!(path = %lang_dir.display(), %e, "failed to list categories");
                    continue;
                },
            };
            for (category, category_dir) in categories {
                index.add_links(language, &category, &category_dir);
            }
        }

        debug!(
            resolved = index.by_identity.len(),
            unresolved = index.unresolved,
            "categorization index built"
        );
        index
    }

    fn add_links(&mut self, language: Language, category: &str, dir: &Path) {
        let links = match list_entries(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %dir.display(), %e, "failed to list category links");
                return;
            },
        };
        for (_, link) in links {
            let Some(identity) = resolve_target_name(&link) else {
                debug!(link = %link.display(), "categorization link does not resolve");
                self.unresolved += 1;
                continue;
            };
            if let Entry::Vacant(slot) = self.by_identity.entry(identity) {
                slot.insert(CategorizationRecord {
                    language,
                    category: category.to_string(),
                });
            }
        }
    }

    pub fn lookup(&self, identity: &str) -> Option<&CategorizationRecord> {
        self.by_identity.get(identity)
    }

    pub fn len(&self) -> usize {
        self.by_identity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_identity.is_empty()
    }

    /// Links that were dangling, cyclic, or otherwise unresolvable.
    pub fn unresolved(&self) -> usize {
        self.unresolved
    }
}

/// Final path segment of a link's fully resolved target.
fn resolve_target_name(link: &Path) -> Option<String> {
    let target = std::fs::canonicalize(link).ok()?;
    target.file_name()?.to_str().map(str::to_string)
}

/// Tags candidates using the index, falling back to configured defaults.
pub struct Categorizer {
    index: CategoryIndex,
    fallbacks: CategorizeConfig,
}

impl Categorizer {
    pub fn new(index: CategoryIndex, fallbacks: CategorizeConfig) -> Self {
        Self { index, fallbacks }
    }

    pub fn from_config(config: &SkilldexConfig) -> Self {
        Self::new(
            CategoryIndex::build(&config.symlink_root()),
            config.categorize.clone(),
        )
    }

    pub fn index(&self) -> &CategoryIndex {
        &self.index
    }

    /// Categorization for `identity`; never fails.
    ///
    /// Without a matching link the category is the fallback category and the
    /// language comes from the identity's suffix, else the catch-all.
    pub fn categorize(&self, identity: &str) -> CategorizationRecord {
        if let Some(record) = self.index.lookup(identity) {
            return record.clone();
        }
        CategorizationRecord {
            language: self
                .fallbacks
                .language_for_suffix(identity)
                .unwrap_or(self.fallbacks.fallback_language),
            category: self.fallbacks.fallback_category.clone(),
        }
    }
}
