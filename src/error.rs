use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the fingerprint core.
///
/// Integrity checks never produce one of these; they answer with a `bool`.
/// Absence of a record is `Option::None`, never an error.
#[derive(Error, Debug)]
pub enum FingerprintError {
    #[error("failed to parse fingerprint JSON ({source_label}): {message}")]
    Parse {
        source_label: String,
        message: String,
    },

    #[error("malformed XML: {0}")]
    Xml(String),

    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("fingerprint field '{0}' is missing")]
    MissingField(&'static str),

    #[error("incompatible fingerprints: {0}")]
    Precondition(String),

    #[error("count of base {base} at position {position} leaves the i64 range")]
    Overflow { base: char, position: usize },

    #[error("fingerprint source failed: {0}")]
    Source(String),
}

pub type Result<T> = std::result::Result<T, FingerprintError>;

impl FingerprintError {
    pub(crate) fn parse(source_label: impl Into<String>, err: serde_json::Error) -> Self {
        FingerprintError::Parse {
            source_label: source_label.into(),
            message: err.to_string(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FingerprintError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for both JSON and XML parse failures.
    pub fn is_parse(&self) -> bool {
        matches!(self, FingerprintError::Parse { .. } | FingerprintError::Xml(_))
    }
}
