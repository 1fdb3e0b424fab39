use std::{path::PathBuf, process::ExitCode};

use {
    anyhow::Result,
    skilldex_common::{CatalogEntry, Language},
    skilldex_config::SkilldexConfig,
    skilldex_query::{DeepLinkError, Facet, LinkTemplates, LoadState, QueryEngine, SkillDetail},
};

#[derive(clap::Args)]
pub struct BrowseArgs {
    /// Language facet (`all`, `py`, `dotnet`, `ts`, `java`, `rust`, `core`).
    #[arg(long, default_value = "all")]
    pub(crate) language: Facet<Language>,
    /// Category facet, applied after the language facet.
    #[arg(long, default_value = "all")]
    pub(crate) category: Facet<String>,
    /// Free-text query over names and descriptions.
    #[arg(long, short)]
    pub(crate) query: Option<String>,
    /// Print facet options with counts before the results.
    #[arg(long)]
    pub(crate) facets: bool,
    /// Catalog artifact path (overrides `output.catalog`).
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    #[arg(long)]
    pub(crate) json: bool,
}

const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

fn open(config: &SkilldexConfig, catalog: Option<PathBuf>) -> LoadState {
    let path = catalog.unwrap_or_else(|| config.catalog_path());
    LoadState::load(&path, LinkTemplates::from_config(&config.links))
}

fn report_failure(reason: &str) {
    eprintln!("{BOLD}{RED}catalog unavailable{RESET} {reason}");
}

/// Render the failed-load state and return the engine otherwise.
fn ready(state: &LoadState) -> Option<&QueryEngine> {
    match state {
        LoadState::Ready(engine) => Some(engine),
        LoadState::Failed { reason } => {
            report_failure(reason);
            None
        },
    }
}

pub fn browse(config: &SkilldexConfig, args: BrowseArgs) -> Result<ExitCode> {
    let mut state = open(config, args.catalog);
    let engine = match &mut state {
        LoadState::Ready(engine) => engine,
        LoadState::Failed { reason } => {
            report_failure(reason);
            return Ok(ExitCode::FAILURE);
        },
    };

    engine.set_language(args.language);
    engine.set_category(args.category);
    if let Some(query) = args.query {
        engine.set_query(query);
    }
    let results = engine.results();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(ExitCode::SUCCESS);
    }

    if args.facets {
        print_facets(engine);
    }
    if results.is_empty() {
        println!("No skills match.");
    }
    for entry in &results {
        print_card(entry);
    }
    println!("{DIM}{} of {} skills{RESET}", results.len(), engine.catalog().len());
    Ok(ExitCode::SUCCESS)
}

pub fn show(
    config: &SkilldexConfig,
    catalog: Option<PathBuf>,
    target: &str,
    json: bool,
) -> Result<ExitCode> {
    let state = open(config, catalog);
    let Some(engine) = ready(&state) else {
        return Ok(ExitCode::FAILURE);
    };

    let detail = if looks_like_link(target) {
        engine.open_deep_link(target)
    } else {
        engine
            .detail(target)
            .ok_or_else(|| DeepLinkError::NotFound(target.to_string()))
    };
    let detail = match detail {
        Ok(detail) => detail,
        Err(e) => {
            eprintln!("{e}");
            return Ok(ExitCode::FAILURE);
        },
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&detail)?);
    } else {
        print_detail(&detail);
    }
    Ok(ExitCode::SUCCESS)
}

pub fn link(config: &SkilldexConfig, catalog: Option<PathBuf>, name: &str) -> Result<ExitCode> {
    let state = open(config, catalog);
    let Some(engine) = ready(&state) else {
        return Ok(ExitCode::FAILURE);
    };
    match engine.detail(name) {
        Some(detail) => {
            println!("#{}", detail.deep_link);
            Ok(ExitCode::SUCCESS)
        },
        None => {
            eprintln!("{}", DeepLinkError::NotFound(name.to_string()));
            Ok(ExitCode::FAILURE)
        },
    }
}

fn looks_like_link(target: &str) -> bool {
    target.contains(&format!("{}=", skilldex_query::deeplink::PARAM))
}

fn print_facets(engine: &QueryEngine) {
    let languages: Vec<_> = engine
        .language_options()
        .iter()
        .map(|o| mark(o.value == *engine.language(), &o.value.to_string(), o.count))
        .collect();
    let categories: Vec<_> = engine
        .category_options()
        .iter()
        .map(|o| mark(o.value == *engine.category(), &o.value.to_string(), o.count))
        .collect();
    println!("Language:  {}", languages.join("  "));
    println!("Category:  {}", categories.join("  "));
    println!();
}

fn mark(selected: bool, label: &str, count: usize) -> String {
    if selected {
        format!("{BOLD}[{label} {count}]{RESET}")
    } else {
        format!("{label} {count}")
    }
}

fn print_card(entry: &CatalogEntry) {
    println!(
        "{BOLD}{}{RESET} {DIM}[{} / {}]{RESET}",
        entry.name, entry.language, entry.category
    );
    println!("  {}", entry.description);
}

fn print_detail(detail: &SkillDetail<'_>) {
    let entry = detail.entry;
    println!("{BOLD}{}{RESET}", entry.name);
    println!("{}\n", entry.description);
    println!("Language:  {}", entry.language);
    println!("Category:  {}", entry.category);
    if let Some(package) = &entry.package {
        println!("Package:   {package}");
    }
    println!("Install:   {}", detail.install_command);
    println!("Source:    {}", detail.source_url);
    println!("Link:      #{}", detail.deep_link);
}
