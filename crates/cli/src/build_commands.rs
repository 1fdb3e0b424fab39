use std::process::ExitCode;

use {
    anyhow::{Context, Result},
    skilldex_config::{Severity, SkilldexConfig},
    skilldex_skills::{BuildOutput, CatalogBuilder, Freshness, PublishOutcome, types::SkipReason},
    tracing::warn,
};

pub fn build(config: &SkilldexConfig) -> Result<ExitCode> {
    let Some(out) = run_pipeline(config)? else {
        return Ok(ExitCode::FAILURE);
    };
    let path = config.catalog_path();
    let outcome = skilldex_skills::publish(&out.catalog, &path)
        .with_context(|| format!("publishing {}", path.display()))?;

    print_report(&out);
    match outcome {
        PublishOutcome::Written => println!("Wrote {}", path.display()),
        PublishOutcome::Unchanged => println!("{} is already up to date", path.display()),
    }
    Ok(ExitCode::SUCCESS)
}

pub fn check(config: &SkilldexConfig) -> Result<ExitCode> {
    let Some(out) = run_pipeline(config)? else {
        return Ok(ExitCode::FAILURE);
    };
    let path = config.catalog_path();
    match skilldex_skills::check(&out.catalog, &path)? {
        Freshness::UpToDate => {
            println!("{} is up to date ({} skills)", path.display(), out.catalog.len());
            Ok(ExitCode::SUCCESS)
        },
        Freshness::Stale => {
            eprintln!("{} is stale; run `skilldex build`", path.display());
            Ok(ExitCode::FAILURE)
        },
        Freshness::Missing => {
            eprintln!("{} does not exist; run `skilldex build`", path.display());
            Ok(ExitCode::FAILURE)
        },
    }
}

/// Validate the config, then build. `None` means config errors stopped the run.
fn run_pipeline(config: &SkilldexConfig) -> Result<Option<BuildOutput>> {
    let mut errors = 0;
    for d in skilldex_config::validate(config) {
        match d.severity {
            Severity::Error => {
                errors += 1;
                eprintln!("config error: {}: {}", d.path, d.message);
            },
            Severity::Warning => warn!(path = %d.path, message = %d.message, "config warning"),
        }
    }
    if errors > 0 {
        return Ok(None);
    }

    let out = CatalogBuilder::from_config(config)
        .build()
        .context("building skill catalog")?;
    Ok(Some(out))
}

fn print_report(out: &BuildOutput) {
    let report = &out.report;
    println!("Catalog: {} skills", report.entries);
    for (language, count) in &report.per_language {
        println!("  {language:<8} {count:>4}");
    }
    for mismatch in &report.name_mismatches {
        println!(
            "  note: {} declares name '{}'",
            mismatch.identity, mismatch.name
        );
    }
    if report.skipped.is_empty() && report.unresolved_links == 0 {
        return;
    }
    println!(
        "Skipped: {} malformed, {} duplicate, {} without manifest; {} unresolved links",
        report.malformed(),
        report.duplicates(),
        report.missing_manifest(),
        report.unresolved_links,
    );
    for skipped in &report.skipped {
        if let SkipReason::MalformedMetadata { reason } = &skipped.reason {
            println!("  {} ({}): {reason}", skipped.identity, skipped.path.display());
        }
    }
}
