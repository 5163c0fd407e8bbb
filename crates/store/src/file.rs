//! Persistence adapter: the rows document and the audit log on disk.
//!
//! The rows document is always rewritten whole. A save writes a sibling
//! temp file, syncs it, then renames it over the target, so a completed
//! save is durable and concurrent readers never see a torn document.
//! An unreadable document is copied aside once, just before the save that
//! replaces it.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use landing_core::audit::AuditEntry;
use landing_core::model::Row;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::{StoreError, StoreResult};

/// Initial content of a missing rows document.
pub const EMPTY_ROWS_DOCUMENT: &[u8] = b"[]";

/// Create `path` (and its parent directory) with `fallback` content if it
/// does not exist yet. Existing files are left untouched.
pub async fn ensure_file(path: &Path, fallback: &[u8]) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io("create_dir", parent, e))?;
        }
    }

    let created = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await;

    match created {
        Ok(mut file) => {
            file.write_all(fallback)
                .await
                .map_err(|e| StoreError::io("write_fallback", path, e))?;
            file.sync_all()
                .await
                .map_err(|e| StoreError::io("sync_fallback", path, e))?;
            tracing::debug!(path = %path.display(), "Created store file");
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(StoreError::io("create_file", path, e)),
    }
}

// ---------------------------------------------------------------------------
// Rows document
// ---------------------------------------------------------------------------

/// The JSON document holding the full row collection.
#[derive(Debug)]
pub struct RowsFile {
    path: PathBuf,
    /// Set when a load found the document unreadable; the next save copies
    /// the old bytes aside before replacing them.
    unreadable: AtomicBool,
}

impl RowsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            unreadable: AtomicBool::new(false),
        }
    }

    /// Load the whole collection.
    ///
    /// An unparsable document is recovered as an empty collection. Loading
    /// never writes; the unreadable bytes are copied aside by the next
    /// [`save_rows`](Self::save_rows), once, before they are overwritten.
    pub async fn load_rows(&self) -> StoreResult<Vec<Row>> {
        ensure_file(&self.path, EMPTY_ROWS_DOCUMENT).await?;

        let bytes = fs::read(&self.path)
            .await
            .map_err(|e| StoreError::io("read_rows", &self.path, e))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            tracing::warn!(path = %self.path.display(), "Rows document is blank, treating as empty");
            return Ok(Vec::new());
        }

        match serde_json::from_slice::<Vec<Row>>(&bytes) {
            Ok(rows) => Ok(rows),
            Err(e) => {
                if !self.unreadable.swap(true, Ordering::AcqRel) {
                    tracing::error!(
                        path = %self.path.display(),
                        error = %e,
                        "Rows document is unreadable, recovering as an empty collection",
                    );
                }
                Ok(Vec::new())
            }
        }
    }

    /// Replace the document with `rows`. Returns once the new content has
    /// been synced and renamed into place.
    pub async fn save_rows(&self, rows: &[Row]) -> StoreResult<()> {
        ensure_file(&self.path, EMPTY_ROWS_DOCUMENT).await?;

        let body = serde_json::to_vec_pretty(rows).map_err(|source| StoreError::Encode {
            what: "rows document",
            source,
        })?;

        if self.unreadable.swap(false, Ordering::AcqRel) {
            self.preserve_unreadable().await;
        }

        let temp_path = sibling_path(&self.path, ".tmp");
        if let Err(e) = write_synced(&temp_path, &body).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e);
        }

        if let Err(e) = fs::rename(&temp_path, &self.path).await {
            tracing::warn!(
                temp_path = %temp_path.display(),
                error = %e,
                "Rename failed, cleaning up temp file",
            );
            let _ = fs::remove_file(&temp_path).await;
            return Err(StoreError::io("rename_rows", &self.path, e));
        }

        tracing::debug!(path = %self.path.display(), rows = rows.len(), "Rows document saved");
        Ok(())
    }

    /// Copy the current document to `<file>.corrupt-<timestamp>` if it is
    /// still unparsable. Best-effort: failures are logged.
    async fn preserve_unreadable(&self) {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to read unreadable rows document for preservation",
                );
                return;
            }
        };
        if bytes.iter().all(u8::is_ascii_whitespace)
            || serde_json::from_slice::<Vec<Row>>(&bytes).is_ok()
        {
            return;
        }

        let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%S%.6fZ");
        let backup = sibling_path(&self.path, &format!(".corrupt-{stamp}"));
        match fs::write(&backup, &bytes).await {
            Ok(()) => tracing::warn!(
                backup = %backup.display(),
                "Preserved unreadable rows document",
            ),
            Err(e) => tracing::error!(
                backup = %backup.display(),
                error = %e,
                "Failed to preserve unreadable rows document",
            ),
        }
    }
}

async fn write_synced(path: &Path, body: &[u8]) -> StoreResult<()> {
    let mut file = fs::File::create(path)
        .await
        .map_err(|e| StoreError::io("create_temp", path, e))?;
    file.write_all(body)
        .await
        .map_err(|e| StoreError::io("write_temp", path, e))?;
    file.sync_all()
        .await
        .map_err(|e| StoreError::io("sync_temp", path, e))?;
    Ok(())
}

/// `path` with `suffix` appended to its file name.
fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

// ---------------------------------------------------------------------------
// Audit log
// ---------------------------------------------------------------------------

/// Newline-delimited JSON audit log.
#[derive(Debug, Clone)]
pub struct AuditFile {
    path: PathBuf,
}

impl AuditFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Append one record as a single line.
    pub async fn append(&self, entry: &AuditEntry) -> StoreResult<()> {
        ensure_file(&self.path, b"").await?;

        let mut line = serde_json::to_vec(entry).map_err(|source| StoreError::Encode {
            what: "audit entry",
            source,
        })?;
        line.push(b'\n');

        let mut file = fs::OpenOptions::new()
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| StoreError::io("open_audit", &self.path, e))?;
        file.write_all(&line)
            .await
            .map_err(|e| StoreError::io("append_audit", &self.path, e))?;
        file.flush()
            .await
            .map_err(|e| StoreError::io("flush_audit", &self.path, e))?;
        Ok(())
    }

    /// Read every well-formed record in append order. Malformed lines are
    /// logged and skipped.
    pub async fn read_entries(&self) -> StoreResult<Vec<AuditEntry>> {
        ensure_file(&self.path, b"").await?;

        let text = fs::read_to_string(&self.path)
            .await
            .map_err(|e| StoreError::io("read_audit", &self.path, e))?;

        let mut entries = Vec::new();
        for (index, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<AuditEntry>(line) {
                Ok(entry) => entries.push(entry),
                Err(e) => tracing::warn!(
                    path = %self.path.display(),
                    line = index + 1,
                    error = %e,
                    "Skipping malformed audit line",
                ),
            }
        }
        Ok(entries)
    }
}
