//! Semantic checks on a loaded configuration.
//!
//! Parsing already rejects type errors; these diagnostics catch values that
//! parse fine but would silently produce a wrong catalog.

use std::collections::HashSet;

use crate::schema::SkilldexConfig;

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// A single validation diagnostic.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Dotted path, e.g. "links.source_url"
    pub path: String,
    pub message: String,
}

impl Diagnostic {
    fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            path: path.into(),
            message: message.into(),
        }
    }

    fn warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            path: path.into(),
            message: message.into(),
        }
    }
}

const PLACEHOLDERS: &[&str] = &["{name}", "{path}"];

/// Validate a configuration, returning every problem found.
pub fn validate(config: &SkilldexConfig) -> Vec<Diagnostic> {
    let mut out = Vec::new();

    let manifest = &config.sources.manifest_file;
    if manifest.is_empty() || manifest.contains(['/', '\\']) {
        out.push(Diagnostic::error(
            "sources.manifest_file",
            format!("'{manifest}' must be a plain file name"),
        ));
    }

    if config.sources.plugins.is_empty() {
        out.push(Diagnostic::warning(
            "sources.plugins",
            "no plugin bundles are allowed; only the core directory will be scanned",
        ));
    }

    if config.categorize.fallback_category.trim().is_empty() {
        out.push(Diagnostic::error(
            "categorize.fallback_category",
            "fallback category must not be empty",
        ));
    }

    let mut seen = HashSet::new();
    for (idx, rule) in config.categorize.suffixes.iter().enumerate() {
        let path = format!("categorize.suffixes[{idx}]");
        if rule.suffix.is_empty() {
            out.push(Diagnostic::warning(&path, "empty suffix never matches"));
        } else if !seen.insert(rule.suffix.as_str()) {
            out.push(Diagnostic::warning(
                &path,
                format!("duplicate suffix '{}' is shadowed by an earlier rule", rule.suffix),
            ));
        }
    }

    check_template(&mut out, "links.install_command", &config.links.install_command);
    check_template(&mut out, "links.source_url", &config.links.source_url);

    out
}

fn check_template(out: &mut Vec<Diagnostic>, path: &str, template: &str) {
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        let after = &rest[open..];
        let Some(close) = after.find('}') else {
            out.push(Diagnostic::warning(path, "unclosed '{' in template"));
            return;
        };
        let token = &after[..=close];
        if !PLACEHOLDERS.contains(&token) {
            out.push(Diagnostic::warning(
                path,
                format!("unknown placeholder {token}; expected {{name}} or {{path}}"),
            ));
        }
        rest = &after[close + 1..];
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::schema::SuffixRule,
        skilldex_common::Language,
    };

    #[test]
    fn default_config_is_clean() {
        assert!(validate(&SkilldexConfig::default()).is_empty());
    }

    #[test]
    fn flags_bad_manifest_and_duplicate_suffix() {
        let mut cfg = SkilldexConfig::default();
        cfg.sources.manifest_file = "docs/SKILL.md".into();
        cfg.categorize
            .suffixes
            .push(SuffixRule::new("-py", Language::Core));

        let diags = validate(&cfg);
        assert!(
            diags
                .iter()
                .any(|d| d.severity == Severity::Error && d.path == "sources.manifest_file")
        );
        assert!(diags.iter().any(|d| d.path == "categorize.suffixes[5]"));
    }

    #[test]
    fn flags_unknown_template_placeholder() {
        let mut cfg = SkilldexConfig::default();
        cfg.links.source_url = "https://example.com/{branch}/{path}".into();
        let diags = validate(&cfg);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].path, "links.source_url");
        assert!(diags[0].message.contains("{branch}"));
    }
}
