mod browse_commands;
mod build_commands;
mod config_commands;

use std::{path::PathBuf, process::ExitCode};

use {
    clap::{Parser, Subcommand},
    skilldex_config::SkilldexConfig,
    tracing::{debug, info},
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

#[derive(Parser)]
#[command(name = "skilldex", about = "skilldex: agent skill catalog builder and browser", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// Config file (overrides discovery of ./skilldex.toml and the user config dir).
    #[arg(long, global = true, env = "SKILLDEX_CONFIG")]
    config: Option<PathBuf>,
}

/// Overrides shared by commands that touch the repository.
#[derive(clap::Args)]
struct SourceArgs {
    /// Repository root (overrides `sources.root`).
    #[arg(long)]
    root: Option<PathBuf>,
    /// Catalog artifact path (overrides `output.catalog`).
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the catalog and publish it.
    Build {
        #[command(flatten)]
        sources: SourceArgs,
    },
    /// Rebuild in memory and fail if the published catalog differs.
    Check {
        #[command(flatten)]
        sources: SourceArgs,
    },
    /// Filter the published catalog.
    Browse(browse_commands::BrowseArgs),
    /// Show one skill by name or deep link.
    Show {
        /// Skill name, or a deep link such as `#skill=azure-cosmos-py`.
        target: String,
        /// Catalog artifact path (overrides `output.catalog`).
        #[arg(long)]
        catalog: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Print the deep link selecting a skill.
    Link {
        name: String,
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Configuration management.
    Config {
        #[command(subcommand)]
        action: config_commands::ConfigAction,
    },
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so command output stays pipeable.
    if cli.json_logs {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<SkilldexConfig> {
    match path {
        Some(path) => Ok(skilldex_config::load_config(path)?),
        None => Ok(skilldex_config::discover_and_load()),
    }
}

fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_telemetry(&cli);

    debug!(version = env!("CARGO_PKG_VERSION"), "skilldex starting");

    let mut config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Build { sources } => {
            apply_overrides(&mut config, sources);
            build_commands::build(&config)
        },
        Commands::Check { sources } => {
            apply_overrides(&mut config, sources);
            build_commands::check(&config)
        },
        Commands::Browse(args) => browse_commands::browse(&config, args),
        Commands::Show {
            target,
            catalog,
            json,
        } => browse_commands::show(&config, catalog, &target, json),
        Commands::Link { name, catalog } => browse_commands::link(&config, catalog, &name),
        Commands::Config { action } => config_commands::handle_config(&config, action),
    }
}

fn apply_overrides(config: &mut SkilldexConfig, args: SourceArgs) {
    if let Some(root) = args.root {
        info!(root = %root.display(), "using repository root override");
        config.sources.root = root;
    }
    if let Some(output) = args.output {
        config.output.catalog = output;
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, clap::CommandFactory};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn browse_flags_parse_into_facets() {
        let cli = Cli::try_parse_from([
            "skilldex",
            "browse",
            "--language",
            "python",
            "--category",
            "data",
            "-q",
            "cosmos",
        ])
        .unwrap();
        let Commands::Browse(args) = cli.command else {
            panic!("expected browse");
        };
        assert_eq!(args.language, skilldex_query::Facet::Only(skilldex_common::Language::Py));
        assert_eq!(args.category, skilldex_query::Facet::Only("data".to_string()));
        assert_eq!(args.query.as_deref(), Some("cosmos"));
    }

    #[test]
    fn unknown_language_is_rejected() {
        assert!(Cli::try_parse_from(["skilldex", "browse", "--language", "cobol"]).is_err());
    }

    #[test]
    fn overrides_replace_config_paths() {
        let mut config = SkilldexConfig::default();
        apply_overrides(&mut config, SourceArgs {
            root: Some(PathBuf::from("/repo")),
            output: Some(PathBuf::from("out/skills.json")),
        });
        assert_eq!(config.catalog_path(), PathBuf::from("/repo/out/skills.json"));
        assert_eq!(config.core_root(), PathBuf::from("/repo/.github/skills"));
    }
}
