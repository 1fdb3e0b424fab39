//! Free-text matching over catalog entries.
//!
//! An entry matches when the query occurs, case-insensitively, inside its
//! name or description, or when every whitespace-separated word of the query
//! fuzzily matches the name (its characters appear in order). Both tests
//! only get harder as the query grows, so extending a query can only narrow
//! the result set. Words are taken literally: no character of the query has
//! a special meaning.

use {
    nucleo::{
        Config, Matcher, Utf32Str,
        pattern::{Atom, AtomKind, CaseMatching, Normalization},
    },
    skilldex_common::CatalogEntry,
};

/// A compiled query. The empty query matches everything.
pub struct SearchQuery {
    folded: String,
    atoms: Vec<Atom>,
}

impl SearchQuery {
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim();
        let atoms = trimmed
            .split_whitespace()
            .map(|word| {
                Atom::new(
                    word,
                    CaseMatching::Ignore,
                    Normalization::Never,
                    AtomKind::Fuzzy,
                    false,
                )
            })
            .collect();
        Self {
            folded: fold(trimmed),
            atoms,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Keep the entries of `entries` that match, in their original order.
    pub fn filter<'a, I>(&self, entries: I) -> Vec<&'a CatalogEntry>
    where
        I: IntoIterator<Item = &'a CatalogEntry>,
    {
        if self.is_empty() {
            return entries.into_iter().collect();
        }
        let mut matcher = Matcher::new(Config::DEFAULT);
        let mut buf = Vec::new();
        entries
            .into_iter()
            .filter(|entry| {
                self.contains(entry) || self.fuzzy(&entry.name, &mut matcher, &mut buf)
            })
            .collect()
    }

    /// Single-entry convenience; prefer [`filter`](Self::filter) in loops.
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        !self.filter(std::iter::once(entry)).is_empty()
    }

    fn fuzzy(&self, name: &str, matcher: &mut Matcher, buf: &mut Vec<char>) -> bool {
        let haystack = Utf32Str::new(name, buf);
        self.atoms
            .iter()
            .all(|atom| atom.score(haystack, matcher).is_some())
    }

    fn contains(&self, entry: &CatalogEntry) -> bool {
        fold(&entry.name).contains(&self.folded) || fold(&entry.description).contains(&self.folded)
    }
}

/// Per-character lowercase. Unlike `str::to_lowercase` this never looks at
/// context, so a substring of the input folds to a substring of the output.
fn fold(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).collect()
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, rstest::rstest, skilldex_common::Language};

    fn entry(name: &str, description: &str) -> CatalogEntry {
        CatalogEntry {
            name: name.into(),
            description: description.into(),
            language: Language::Py,
            category: "general".into(),
            path: format!(".github/skills/{name}"),
            package: None,
        }
    }

    fn names(query: &str, entries: &[CatalogEntry]) -> Vec<String> {
        SearchQuery::new(query)
            .filter(entries)
            .into_iter()
            .map(|e| e.name.clone())
            .collect()
    }

    #[rstest]
    #[case("cosmos", true)]
    #[case("COSMOS", true)]
    #[case("nosql", true)]
    #[case("  cosmos  ", true)]
    #[case("azcospy", true)]
    #[case("cosmos db", true)]
    #[case("blob", false)]
    fn matches_name_description_and_fuzzy(#[case] query: &str, #[case] hit: bool) {
        let e = entry("azure-cosmos-py", "Azure Cosmos DB NoSQL client");
        assert_eq!(SearchQuery::new(query).matches(&e), hit);
    }

    #[test]
    fn empty_query_is_a_no_op() {
        let entries = vec![entry("b", "x"), entry("a", "y")];
        assert_eq!(names("", &entries), vec!["b", "a"]);
        assert_eq!(names("   ", &entries), vec!["b", "a"]);
        assert!(SearchQuery::new(" \t").is_empty());
    }

    #[test]
    fn keeps_input_order() {
        let entries = vec![
            entry("zeta-storage", "blob"),
            entry("alpha", "storage queue"),
            entry("mid", "unrelated"),
        ];
        assert_eq!(names("storage", &entries), vec!["zeta-storage", "alpha"]);
    }

    #[test]
    fn description_is_not_matched_fuzzily() {
        let e = entry("x", "a long description with many letters");
        assert!(!SearchQuery::new("alng").matches(&e));
    }

    #[test]
    fn backslash_is_literal() {
        let entries = vec![entry("x y", "d")];
        assert!(names("x\\", &entries).is_empty());
        assert!(names("x\\ y", &entries).is_empty());
        assert_eq!(names("x y", &entries), vec!["x y"]);

        let slashed = vec![entry("x\\y", "d")];
        assert_eq!(names("x\\", &slashed), vec!["x\\y"]);
    }

    #[test]
    fn fold_is_contextless() {
        assert_eq!(fold("ΣΑ"), "σα");
        assert_eq!(fold("Σ"), "σ");
    }
}
