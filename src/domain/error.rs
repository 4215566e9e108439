// ============================================================
// Layer 3 — Dataset Error Taxonomy
// ============================================================
// Every way a dataset access can fail, as one typed enum.
// The application layer wraps these in anyhow with context;
// the data layer returns them directly.
//
// Reference: Rust Book §9 (Error Handling)
//            thiserror crate documentation

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    /// The configuration itself is unusable (bad directory, bad numbers)
    #[error("invalid dataset configuration: {0}")]
    Config(String),

    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The structure file could not be understood
    #[error("failed to parse '{}': {details}", path.display())]
    Parse {
        path:    PathBuf,
        details: String,
    },

    /// The molecule does not fit into the padded length
    #[error("'{}' has {atoms} atoms, more than max_num_atoms = {max}", path.display())]
    Overflow {
        path:  PathBuf,
        atoms: usize,
        max:   usize,
    },

    #[error("index {index} is out of range for a dataset of {len} files")]
    IndexOutOfRange { index: usize, len: usize },
}

impl DatasetError {
    pub fn config(details: impl Into<String>) -> Self {
        Self::Config(details.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub fn parse(path: impl Into<PathBuf>, details: impl Into<String>) -> Self {
        Self::Parse {
            path:    path.into(),
            details: details.into(),
        }
    }
}
