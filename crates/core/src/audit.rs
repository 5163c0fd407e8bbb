//! Audit trail records for landing row mutations.
//!
//! One entry is written per successful mutation. Entries are immutable once
//! appended; the timestamp is assigned by the writer, not the caller.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::model::Row;
use crate::types::{ActorId, RowId, Timestamp};

/// Kind of mutation recorded by an [`AuditEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    Reorder,
}

impl AuditAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Reorder => "reorder",
        }
    }
}

/// A mutation as described by the store, before it is stamped.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditRecord {
    pub action: AuditAction,
    pub row_id: Option<RowId>,
    pub actor_id: Option<ActorId>,
    pub details: serde_json::Value,
}

impl AuditRecord {
    /// `{create, rowId, actorId, {title}}`
    pub fn created(row: &Row, actor_id: Option<ActorId>) -> Self {
        Self::for_row(AuditAction::Create, row, actor_id)
    }

    /// `{update, rowId, actorId, {title}}`
    pub fn updated(row: &Row, actor_id: Option<ActorId>) -> Self {
        Self::for_row(AuditAction::Update, row, actor_id)
    }

    /// `{delete, rowId, actorId, {title}}`
    pub fn deleted(row: &Row, actor_id: Option<ActorId>) -> Self {
        Self::for_row(AuditAction::Delete, row, actor_id)
    }

    /// `{reorder, actorId, {order: [ids]}}` with no row id.
    pub fn reordered(ids: &[RowId], actor_id: Option<ActorId>) -> Self {
        Self {
            action: AuditAction::Reorder,
            row_id: None,
            actor_id,
            details: json!({ "order": ids }),
        }
    }

    fn for_row(action: AuditAction, row: &Row, actor_id: Option<ActorId>) -> Self {
        Self {
            action,
            row_id: Some(row.id.clone()),
            actor_id,
            details: json!({ "title": row.title }),
        }
    }

    /// Stamp the record with the time it is written.
    pub fn stamp(self, timestamp: Timestamp) -> AuditEntry {
        AuditEntry {
            timestamp,
            action: self.action,
            row_id: self.row_id,
            actor_id: self.actor_id,
            details: self.details,
        }
    }
}

/// One line of the append-only audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub timestamp: Timestamp,
    pub action: AuditAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_id: Option<RowId>,
    pub actor_id: Option<ActorId>,
    pub details: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> Row {
        let now = chrono::Utc::now();
        Row {
            id: "row-1".into(),
            title: "Weekly Picks".into(),
            cards: Vec::new(),
            order: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn row_records_carry_title_details() {
        let record = AuditRecord::created(&sample_row(), Some("admin-1".into()));
        assert_eq!(record.action, AuditAction::Create);
        assert_eq!(record.row_id.as_deref(), Some("row-1"));
        assert_eq!(record.details, json!({ "title": "Weekly Picks" }));
    }

    #[test]
    fn reorder_entry_omits_row_id_on_the_wire() {
        let ids = vec!["b".to_string(), "a".to_string()];
        let entry = AuditRecord::reordered(&ids, None).stamp(chrono::Utc::now());
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["action"], "reorder");
        assert!(json.get("rowId").is_none());
        assert!(json["actorId"].is_null());
        assert_eq!(json["details"]["order"], json!(["b", "a"]));
    }

    #[test]
    fn entry_round_trips_through_a_log_line() {
        let entry = AuditRecord::deleted(&sample_row(), Some("admin-1".into()))
            .stamp(chrono::Utc::now());
        let line = serde_json::to_string(&entry).unwrap();
        assert!(!line.contains('\n'));
        let parsed: AuditEntry = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed, entry);
    }
}
