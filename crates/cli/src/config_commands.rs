use std::process::ExitCode;

use {
    anyhow::Result,
    clap::Subcommand,
    skilldex_config::{Severity, SkilldexConfig, validate},
};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Validate the configuration and report errors/warnings.
    Check,
    /// Print the effective configuration as JSON.
    Show,
    /// Print where configuration is searched for.
    Path,
}

pub fn handle_config(config: &SkilldexConfig, action: ConfigAction) -> Result<ExitCode> {
    match action {
        ConfigAction::Check => Ok(check(config)),
        ConfigAction::Show => {
            println!("{}", serde_json::to_string_pretty(config)?);
            Ok(ExitCode::SUCCESS)
        },
        ConfigAction::Path => {
            match skilldex_config::find_config_file() {
                Some(path) => println!("{}", path.display()),
                None => println!("No config file found; using defaults."),
            }
            if let Some(dir) = skilldex_config::config_dir() {
                println!("User config directory: {}", dir.display());
            }
            Ok(ExitCode::SUCCESS)
        },
    }
}

/// ANSI color codes.
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

fn check(config: &SkilldexConfig) -> ExitCode {
    let diagnostics = validate(config);

    for d in &diagnostics {
        let color = match d.severity {
            Severity::Error => RED,
            Severity::Warning => YELLOW,
        };
        eprintln!("  {BOLD}{color}{}{RESET} {}: {}", d.severity, d.path, d.message);
    }

    let count = |severity| diagnostics.iter().filter(|d| d.severity == severity).count();
    let errors = count(Severity::Error);
    let warnings = count(Severity::Warning);

    if errors == 0 && warnings == 0 {
        eprintln!("No issues found.");
    } else {
        eprintln!("\n{errors} error(s), {warnings} warning(s)");
    }

    if errors > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
