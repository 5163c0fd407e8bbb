/// Opaque row identifier (UUID v4 text when generated by the store).
pub type RowId = String;

/// Opaque card identifier. Client-supplied ids are kept verbatim.
pub type CardId = String;

/// Identifier of the principal performing a mutation.
pub type ActorId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh opaque identifier.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
