//! Row store core: the five public operations over the rows document.
//!
//! Mutations (`add`, `update`, `remove`, `reorder`) each run a full
//! load → validate → mutate → save cycle inside the [`TaskSerializer`].
//! `list` reads the document directly and may observe the state from just
//! before an in-flight mutation.

use std::sync::Arc;

use landing_core::audit::{AuditEntry, AuditRecord};
use landing_core::error::CoreError;
use landing_core::model::{
    Card, CardInput, CreateRow, ListInput, MutationOptions, ReorderRows, Row, UpdateRow,
};
use landing_core::ordering::{apply_reorder, renumber, renumber_with_hint};
use landing_core::types::{new_id, RowId};
use landing_core::validation::{normalize_cards, validate_row_title};

use crate::audit::AuditLogger;
use crate::config::StoreConfig;
use crate::error::StoreResult;
use crate::file::{AuditFile, RowsFile};
use crate::serializer::TaskSerializer;

/// File-backed store for landing rows.
///
/// Owns both files exclusively; open at most one store per rows document.
pub struct RowStore {
    inner: Arc<Inner>,
    serializer: TaskSerializer,
}

struct Inner {
    rows: RowsFile,
    audit: AuditLogger,
}

impl RowStore {
    /// Bind a store to the configured files and start its mutation worker.
    /// Must be called from within a tokio runtime. Files are created lazily.
    pub fn open(config: StoreConfig) -> Self {
        tracing::info!(
            rows_path = %config.rows_path.display(),
            audit_path = %config.audit_path.display(),
            "Opening landing row store",
        );
        Self {
            inner: Arc::new(Inner {
                rows: RowsFile::new(config.rows_path),
                audit: AuditLogger::new(AuditFile::new(config.audit_path)),
            }),
            serializer: TaskSerializer::start(),
        }
    }

    /// The collection as stored (ascending `order`).
    pub async fn list(&self) -> StoreResult<Vec<Row>> {
        self.inner.rows.load_rows().await
    }

    /// Create a row at the end of the collection.
    pub async fn add(&self, payload: CreateRow, options: MutationOptions) -> StoreResult<Row> {
        let inner = Arc::clone(&self.inner);
        self.serializer
            .run_exclusive(async move { inner.add(payload, options).await })
            .await
    }

    /// Replace a row's title and/or cards, optionally nudging its position.
    pub async fn update(
        &self,
        id: RowId,
        payload: UpdateRow,
        options: MutationOptions,
    ) -> StoreResult<Row> {
        let inner = Arc::clone(&self.inner);
        self.serializer
            .run_exclusive(async move { inner.update(id, payload, options).await })
            .await
    }

    /// Delete a row and return it as it was before deletion.
    pub async fn remove(&self, id: RowId, options: MutationOptions) -> StoreResult<Row> {
        let inner = Arc::clone(&self.inner);
        self.serializer
            .run_exclusive(async move { inner.remove(id, options).await })
            .await
    }

    /// Put the whole collection in the order given by `payload.ids`.
    pub async fn reorder(
        &self,
        payload: ReorderRows,
        options: MutationOptions,
    ) -> StoreResult<Vec<Row>> {
        let inner = Arc::clone(&self.inner);
        self.serializer
            .run_exclusive(async move { inner.reorder(payload, options).await })
            .await
    }

    /// The audit trail, oldest first. Not serialized with mutations.
    pub async fn audit_entries(&self) -> StoreResult<Vec<AuditEntry>> {
        self.inner.audit.entries().await
    }
}

impl Inner {
    async fn add(&self, payload: CreateRow, options: MutationOptions) -> StoreResult<Row> {
        let mut rows = self.rows.load_rows().await?;

        let title = validate_row_title(payload.title.as_deref(), &rows, None)?;
        let card_inputs = payload.cards.as_ref().and_then(ListInput::as_slice);
        let cards = normalize_cards(card_inputs, options.max_cards)?;

        let now = chrono::Utc::now();
        let id = new_id();
        rows.push(Row {
            id: id.clone(),
            title,
            cards,
            order: u32::try_from(rows.len()).unwrap_or(u32::MAX),
            created_at: now,
            updated_at: now,
        });
        renumber(&mut rows);

        self.rows.save_rows(&rows).await?;
        let row = find_row(&rows, &id)?;

        tracing::info!(
            row_id = %row.id,
            title = %row.title,
            cards = row.cards.len(),
            actor_id = ?options.actor_id,
            "Landing row created",
        );
        self.audit
            .record(AuditRecord::created(&row, options.actor_id))
            .await;

        Ok(row)
    }

    async fn update(
        &self,
        id: RowId,
        payload: UpdateRow,
        options: MutationOptions,
    ) -> StoreResult<Row> {
        let mut rows = self.rows.load_rows().await?;
        let index = position_of(&rows, &id)?;

        let current = &rows[index];
        let title = validate_row_title(
            Some(payload.title.as_deref().unwrap_or(&current.title)),
            &rows,
            Some(id.as_str()),
        )?;
        // Stored cards are re-validated too, so a lowered bound applies on
        // the next edit of any row.
        let card_inputs: Option<Vec<CardInput>> = match payload.cards {
            Some(cards) => cards.into_list(),
            None => Some(current.cards.iter().map(Card::to_input).collect()),
        };
        let cards = normalize_cards(card_inputs.as_deref(), options.max_cards)?;

        let row = &mut rows[index];
        row.title = title;
        row.cards = cards;
        row.updated_at = chrono::Utc::now();

        match payload.order.filter(|order| order.is_finite()) {
            Some(target) => renumber_with_hint(&mut rows, &id, target),
            None => renumber(&mut rows),
        }

        self.rows.save_rows(&rows).await?;
        let row = find_row(&rows, &id)?;

        tracing::info!(
            row_id = %row.id,
            title = %row.title,
            order = row.order,
            actor_id = ?options.actor_id,
            "Landing row updated",
        );
        self.audit
            .record(AuditRecord::updated(&row, options.actor_id))
            .await;

        Ok(row)
    }

    async fn remove(&self, id: RowId, options: MutationOptions) -> StoreResult<Row> {
        let mut rows = self.rows.load_rows().await?;
        let index = position_of(&rows, &id)?;

        let removed = rows.remove(index);
        renumber(&mut rows);
        self.rows.save_rows(&rows).await?;

        tracing::info!(
            row_id = %removed.id,
            title = %removed.title,
            remaining = rows.len(),
            actor_id = ?options.actor_id,
            "Landing row deleted",
        );
        self.audit
            .record(AuditRecord::deleted(&removed, options.actor_id))
            .await;

        Ok(removed)
    }

    async fn reorder(
        &self,
        payload: ReorderRows,
        options: MutationOptions,
    ) -> StoreResult<Vec<Row>> {
        let rows = self.rows.load_rows().await?;
        let ids = payload.ids.as_ref().and_then(ListInput::as_slice);
        let reordered = apply_reorder(rows, ids, chrono::Utc::now())?;
        self.rows.save_rows(&reordered).await?;

        let ids: Vec<RowId> = reordered.iter().map(|row| row.id.clone()).collect();
        tracing::info!(
            rows = ids.len(),
            actor_id = ?options.actor_id,
            "Landing rows reordered",
        );
        self.audit
            .record(AuditRecord::reordered(&ids, options.actor_id))
            .await;

        Ok(reordered)
    }
}

fn position_of(rows: &[Row], id: &str) -> Result<usize, CoreError> {
    rows.iter()
        .position(|row| row.id == id)
        .ok_or_else(|| CoreError::row_not_found(id))
}

fn find_row(rows: &[Row], id: &str) -> Result<Row, CoreError> {
    rows.iter()
        .find(|row| row.id == id)
        .cloned()
        .ok_or_else(|| CoreError::row_not_found(id))
}
