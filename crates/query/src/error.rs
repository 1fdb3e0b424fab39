use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("catalog {path} is not valid: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: skilldex_common::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
