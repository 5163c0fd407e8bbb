//! Best-effort audit logger.
//!
//! A failed append never undoes or fails the mutation that produced it;
//! it is logged and dropped.

use landing_core::audit::{AuditEntry, AuditRecord};

use crate::error::StoreResult;
use crate::file::AuditFile;

#[derive(Debug, Clone)]
pub struct AuditLogger {
    file: AuditFile,
}

impl AuditLogger {
    pub fn new(file: AuditFile) -> Self {
        Self { file }
    }

    /// Stamp `record` with the current time and append it.
    ///
    /// Returns whether the append succeeded, for callers that want to log
    /// it; the outcome must not change the result of the mutation.
    pub async fn record(&self, record: AuditRecord) -> bool {
        let entry = record.stamp(chrono::Utc::now());
        match self.file.append(&entry).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    action = entry.action.as_str(),
                    row_id = ?entry.row_id,
                    error = %e,
                    "Failed to append audit entry",
                );
                false
            }
        }
    }

    /// Every readable entry, oldest first.
    pub async fn entries(&self) -> StoreResult<Vec<AuditEntry>> {
        self.file.read_entries().await
    }
}
