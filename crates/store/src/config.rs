use std::path::PathBuf;

/// Default location of the rows document.
pub const DEFAULT_ROWS_PATH: &str = "data/landing-rows.json";

/// Default location of the audit log.
pub const DEFAULT_AUDIT_PATH: &str = "data/landing-rows-audit.log";

/// File locations owned by one [`RowStore`](crate::RowStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// JSON array of rows, replaced wholesale on every mutation.
    pub rows_path: PathBuf,
    /// Append-only audit log, one JSON record per line.
    pub audit_path: PathBuf,
}

impl StoreConfig {
    pub fn new(rows_path: impl Into<PathBuf>, audit_path: impl Into<PathBuf>) -> Self {
        Self {
            rows_path: rows_path.into(),
            audit_path: audit_path.into(),
        }
    }

    /// Both files side by side in `dir`, using the default file names.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            rows_path: dir.join("landing-rows.json"),
            audit_path: dir.join("landing-rows-audit.log"),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS_PATH, DEFAULT_AUDIT_PATH)
    }
}
