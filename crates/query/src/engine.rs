use std::collections::BTreeMap;

use {
    serde::Serialize,
    skilldex_common::{Catalog, CatalogEntry, Language},
    tracing::debug,
};

use crate::{
    deeplink::{self, DeepLinkError},
    facet::{Facet, FacetOption},
    links::LinkTemplates,
    search::SearchQuery,
};

/// Browsing state over one catalog.
///
/// Filters compose in a fixed order: language, then category, then the
/// free-text query. Changing the language resets the category, so a stale
/// category from another language can never hide every result.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    catalog: Catalog,
    links: LinkTemplates,
    language: Facet<Language>,
    category: Facet<String>,
    query: String,
}

/// Everything the detail view shows for one skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillDetail<'a> {
    #[serde(flatten)]
    pub entry: &'a CatalogEntry,
    pub install_command: String,
    pub source_url: String,
    pub deep_link: String,
}

impl QueryEngine {
    pub fn new(catalog: Catalog, links: LinkTemplates) -> Self {
        Self {
            catalog,
            links,
            language: Facet::All,
            category: Facet::All,
            query: String::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn language(&self) -> &Facet<Language> {
        &self.language
    }

    pub fn category(&self) -> &Facet<String> {
        &self.category
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Select a language. Always resets the category to all.
    pub fn set_language(&mut self, language: Facet<Language>) {
        debug!(%language, "language facet changed");
        self.language = language;
        self.category = Facet::All;
    }

    pub fn set_category(&mut self, category: Facet<String>) {
        self.category = category;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Clear every filter.
    pub fn reset(&mut self) {
        self.language = Facet::All;
        self.category = Facet::All;
        self.query.clear();
    }

    /// "all" with the catalog size, then each language present in the
    /// catalog with its count, in [`Language`] declaration order.
    pub fn language_options(&self) -> Vec<FacetOption<Language>> {
        let mut counts: BTreeMap<Language, usize> = BTreeMap::new();
        for entry in &self.catalog {
            *counts.entry(entry.language).or_default() += 1;
        }
        std::iter::once(FacetOption::all(self.catalog.len()))
            .chain(
                counts
                    .into_iter()
                    .map(|(language, count)| FacetOption::only(language, count)),
            )
            .collect()
    }

    /// "all" with the size of the language-filtered subset, then each
    /// category of that subset in ascending order with its count. The
    /// per-category counts always sum to the "all" count.
    pub fn category_options(&self) -> Vec<FacetOption<String>> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        let mut total = 0;
        for entry in self.by_language() {
            *counts.entry(entry.category.as_str()).or_default() += 1;
            total += 1;
        }
        std::iter::once(FacetOption::all(total))
            .chain(
                counts
                    .into_iter()
                    .map(|(category, count)| FacetOption::only(category.to_string(), count)),
            )
            .collect()
    }

    /// Entries passing every active filter, in catalog order.
    pub fn results(&self) -> Vec<&CatalogEntry> {
        let faceted = self
            .by_language()
            .filter(|entry| self.category.admits(&entry.category));
        SearchQuery::new(&self.query).filter(faceted)
    }

    /// Detail view for the skill called `name`.
    pub fn detail(&self, name: &str) -> Option<SkillDetail<'_>> {
        self.catalog.get(name).map(|entry| self.detail_for(entry))
    }

    /// Detail view for the skill a deep link selects.
    pub fn open_deep_link(&self, link: &str) -> Result<SkillDetail<'_>, DeepLinkError> {
        let entry = deeplink::resolve(&self.catalog, link)?;
        Ok(self.detail_for(entry))
    }

    fn detail_for<'a>(&'a self, entry: &'a CatalogEntry) -> SkillDetail<'a> {
        SkillDetail {
            entry,
            install_command: self.links.install_command(entry),
            source_url: self.links.source_url(entry),
            deep_link: deeplink::encode(&entry.name),
        }
    }

    fn by_language(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.catalog
            .iter()
            .filter(|entry| self.language.admits(&entry.language))
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, language: Language, category: &str, description: &str) -> CatalogEntry {
        CatalogEntry {
            name: name.into(),
            description: description.into(),
            language,
            category: category.into(),
            path: format!(".github/skills/{name}"),
            package: None,
        }
    }

    fn engine() -> QueryEngine {
        QueryEngine::new(
            Catalog::from_entries(vec![
                entry("azure-cosmos-py", Language::Py, "data", "Cosmos DB NoSQL"),
                entry("azure-storage-blob-py", Language::Py, "data", "Blob storage"),
                entry("azure-servicebus-py", Language::Py, "messaging", "Service Bus queues"),
                entry("azure-cosmos-ts", Language::Ts, "data", "Cosmos DB for TypeScript"),
                entry("azure-identity-java", Language::Java, "identity", "Credentials"),
                entry("podcast-generation", Language::Core, "general", "Make podcasts"),
            ]),
            LinkTemplates::default(),
        )
    }

    fn names(results: Vec<&CatalogEntry>) -> Vec<&str> {
        results.into_iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn language_options_follow_declaration_order() {
        let opts = engine().language_options();
        let shown: Vec<_> = opts.iter().map(|o| (o.value.to_string(), o.count)).collect();
        assert_eq!(shown, vec![
            ("all".to_string(), 6),
            ("py".to_string(), 3),
            ("ts".to_string(), 1),
            ("java".to_string(), 1),
            ("core".to_string(), 1),
        ]);
    }

    #[test]
    fn category_counts_sum_to_language_total() {
        let mut engine = engine();
        for language in [Facet::All, Facet::Only(Language::Py), Facet::Only(Language::Rust)] {
            engine.set_language(language);
            let opts = engine.category_options();
            let (all, rest) = opts.split_first().unwrap();
            assert!(all.value.is_all());
            assert_eq!(rest.iter().map(|o| o.count).sum::<usize>(), all.count);
        }

        engine.set_language(Facet::Only(Language::Py));
        let cats: Vec<_> = engine
            .category_options()
            .into_iter()
            .map(|o| o.value.to_string())
            .collect();
        assert_eq!(cats, vec!["all", "data", "messaging"]);
    }

    #[test]
    fn changing_language_resets_category() {
        let mut engine = engine();
        engine.set_language(Facet::Only(Language::Py));
        engine.set_category(Facet::Only("messaging".into()));
        assert_eq!(names(engine.results()), vec!["azure-servicebus-py"]);

        engine.set_language(Facet::Only(Language::Ts));
        assert!(engine.category().is_all());
        assert_eq!(names(engine.results()), vec!["azure-cosmos-ts"]);

        engine.set_category(Facet::Only("data".into()));
        engine.set_language(Facet::Only(Language::Ts));
        assert!(engine.category().is_all());
    }

    #[test]
    fn filters_compose_in_order() {
        let mut engine = engine();
        engine.set_query("cosmos");
        assert_eq!(names(engine.results()), vec!["azure-cosmos-py", "azure-cosmos-ts"]);

        engine.set_language(Facet::Only(Language::Py));
        engine.set_category(Facet::Only("data".into()));
        assert_eq!(names(engine.results()), vec!["azure-cosmos-py"]);

        // The query survives a language change.
        engine.set_language(Facet::All);
        assert_eq!(engine.query(), "cosmos");

        engine.reset();
        assert_eq!(engine.results().len(), 6);
    }

    #[test]
    fn no_matches_is_an_empty_result() {
        let mut engine = engine();
        engine.set_query("kubernetes");
        assert!(engine.results().is_empty());
    }

    #[test]
    fn detail_and_deep_link_round_trip() {
        let engine = engine();
        let detail = engine.detail("azure-identity-java").unwrap();
        assert_eq!(detail.deep_link, "skill=azure-identity-java");
        assert!(detail.install_command.ends_with("--skill azure-identity-java"));
        assert!(detail.source_url.ends_with(".github/skills/azure-identity-java"));

        let opened = engine.open_deep_link(&format!("#{}", detail.deep_link)).unwrap();
        assert_eq!(opened, detail);

        assert_eq!(
            engine.open_deep_link("#skill=gone").unwrap_err(),
            DeepLinkError::NotFound("gone".into())
        );
        assert!(engine.detail("gone").is_none());
    }

    #[test]
    fn detail_serializes_entry_fields_inline() {
        let engine = engine();
        let value = serde_json::to_value(engine.detail("podcast-generation").unwrap()).unwrap();
        assert_eq!(value["name"], "podcast-generation");
        assert_eq!(value["language"], "core");
        assert_eq!(value["deep_link"], "skill=podcast-generation");
        assert!(value.get("package").is_none());
    }
}
