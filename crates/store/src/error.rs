use std::path::{Path, PathBuf};

use landing_core::error::CoreError;

/// Errors returned by [`RowStore`](crate::RowStore) operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A named validation or lookup rejection.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// File-system failure other than "missing file".
    #[error("I/O error during {op} on {}: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode {what}: {source}")]
    Encode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The mutation worker is no longer running.
    #[error("Mutation queue is closed")]
    SerializerClosed,

    /// A queued task panicked. Later tasks are unaffected.
    #[error("Queued task panicked: {0}")]
    TaskPanicked(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    pub(crate) fn io(op: &'static str, path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            op,
            path: path.to_path_buf(),
            source,
        }
    }

    /// The core rejection, if this error is one.
    pub fn as_core(&self) -> Option<&CoreError> {
        match self {
            Self::Core(err) => Some(err),
            _ => None,
        }
    }
}
