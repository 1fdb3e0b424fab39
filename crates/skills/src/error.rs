use std::path::PathBuf;

/// Build-fatal errors. Per-skill problems never surface here; they become
/// [`SkipReason`](crate::types::SkipReason)s in the build report.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot read skill root {path}: {source}")]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to publish catalog to {path}: {source}")]
    Publish {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Common(#[from] skilldex_common::Error),
}

impl Error {
    #[must_use]
    pub fn root_unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::RootUnreadable {
            path: path.into(),
            source,
        }
    }

    #[must_use]
    pub fn publish(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Publish {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Why a manifest could not be turned into [`SkillMetadata`](crate::types::SkillMetadata).
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("failed to read manifest: {0}")]
    Read(#[from] std::io::Error),
    #[error("manifest must start with YAML frontmatter delimited by ---")]
    MissingFrontmatter,
    #[error("manifest missing closing --- for frontmatter")]
    UnclosedFrontmatter,
    #[error("invalid frontmatter: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("frontmatter has no `{0}` field")]
    MissingField(&'static str),
}
