#![allow(clippy::unwrap_used, clippy::expect_used)]
use {
    proptest::prelude::*,
    skilldex_common::{Catalog, CatalogEntry, Language},
    skilldex_query::{Facet, LinkTemplates, QueryEngine, SearchQuery, decode, encode},
};

fn language() -> impl Strategy<Value = Language> {
    prop::sample::select(Language::ALL.to_vec())
}

fn entry() -> impl Strategy<Value = CatalogEntry> {
    (
        r"[a-z][a-z\\ ]{1,7}(-[a-z\\ ]{2,6}){0,2}",
        "[A-Za-z ]{0,40}",
        language(),
        prop::sample::select(vec!["data", "messaging", "identity", "general"]),
    )
        .prop_map(|(name, description, language, category)| CatalogEntry {
            path: format!(".github/skills/{name}"),
            name,
            description,
            language,
            category: category.to_string(),
            package: None,
        })
}

fn catalog() -> impl Strategy<Value = Catalog> {
    prop::collection::vec(entry(), 0..24).prop_map(|mut entries| {
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries.dedup_by(|a, b| a.name == b.name);
        Catalog::from_entries(entries)
    })
}

fn names(entries: Vec<&CatalogEntry>) -> Vec<String> {
    entries.into_iter().map(|e| e.name.clone()).collect()
}

proptest! {
    #[test]
    fn extending_a_query_never_adds_results(
        catalog in catalog(),
        before in r"[a-zA-Z \\-]{0,3}",
        base in r"[a-zA-Z \\-]{0,6}",
        after in r"[a-zA-Z \\-]{0,3}",
    ) {
        let narrow = format!("{before}{base}{after}");
        let wide = SearchQuery::new(&base).filter(&catalog);
        let narrowed = SearchQuery::new(&narrow).filter(&catalog);
        for hit in narrowed {
            prop_assert!(wide.contains(&hit), "{} matched {narrow:?} but not {base:?}", hit.name);
        }
    }

    #[test]
    fn results_are_a_subsequence_of_the_catalog(
        catalog in catalog(),
        query in "[a-z]{0,4}",
        language in prop::option::of(language()),
    ) {
        let mut engine = QueryEngine::new(catalog.clone(), LinkTemplates::default());
        engine.set_language(language.map_or(Facet::All, Facet::Only));
        engine.set_query(query);
        let got = names(engine.results());
        let mut sorted = got.clone();
        sorted.sort();
        prop_assert_eq!(&got, &sorted);
        for name in &got {
            prop_assert!(catalog.get(name).is_some());
        }
    }

    #[test]
    fn category_counts_partition_the_language_subset(
        catalog in catalog(),
        language in prop::option::of(language()),
    ) {
        let mut engine = QueryEngine::new(catalog, LinkTemplates::default());
        engine.set_language(language.map_or(Facet::All, Facet::Only));
        let opts = engine.category_options();
        let total: usize = opts[1..].iter().map(|o| o.count).sum();
        prop_assert_eq!(total, opts[0].count);
        prop_assert_eq!(opts[0].count, engine.results().len());
    }

    #[test]
    fn language_counts_cover_the_catalog(catalog in catalog()) {
        let engine = QueryEngine::new(catalog.clone(), LinkTemplates::default());
        let opts = engine.language_options();
        prop_assert_eq!(opts[0].count, catalog.len());
        prop_assert_eq!(opts[1..].iter().map(|o| o.count).sum::<usize>(), catalog.len());
        prop_assert!(opts[1..].iter().all(|o| o.count > 0));
    }

    #[test]
    fn deep_links_round_trip(name in any::<String>()) {
        prop_assert_eq!(decode(&encode(&name)), Some(name.clone()));
        prop_assert_eq!(decode(&format!("#{}", encode(&name))), Some(name));
    }

    #[test]
    fn decode_never_panics(link in any::<String>()) {
        let _ = decode(&link);
    }
}
