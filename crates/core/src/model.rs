//! Landing row and card models plus the untrusted input DTOs.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{ActorId, CardId, RowId, Timestamp};

/// Default upper bound on cards per row when the caller has no configuration.
pub const DEFAULT_MAX_CARDS: usize = 6;

// ---------------------------------------------------------------------------
// Persisted entities
// ---------------------------------------------------------------------------

/// A single clickable tile within a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    pub link_url: String,
    #[serde(default)]
    pub badge: String,
}

/// A titled, ordered group of cards shown as one unit on the landing surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub id: RowId,
    pub title: String,
    pub cards: Vec<Card>,
    /// Dense display position, `0..N-1` across the collection.
    pub order: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Card {
    /// Convert back into an input payload, keeping the card id.
    ///
    /// Used when an update omits `cards` and the stored cards must be
    /// re-validated against the current bound.
    pub fn to_input(&self) -> CardInput {
        CardInput {
            id: Some(self.id.clone()),
            title: Some(self.title.clone()),
            description: Some(self.description.clone()),
            image_url: Some(self.image_url.clone()),
            link_url: Some(self.link_url.clone()),
            badge: Some(self.badge.clone()),
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// Untrusted card payload. Every field is optional so that validation, not
/// deserialization, decides which rule was broken.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardInput {
    pub id: Option<CardId>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub link_url: Option<String>,
    pub badge: Option<String>,
}

/// A payload field that is expected to hold a JSON array.
///
/// Any other JSON value deserializes to [`ListInput::Malformed`] instead of
/// failing the whole body, so validation can reject it with the named code
/// for that field.
#[derive(Debug, Clone, PartialEq)]
pub enum ListInput<T> {
    List(Vec<T>),
    Malformed,
}

impl<T> ListInput<T> {
    /// The items, or `None` when the field was not a list.
    pub fn as_slice(&self) -> Option<&[T]> {
        match self {
            Self::List(items) => Some(items.as_slice()),
            Self::Malformed => None,
        }
    }

    pub fn into_list(self) -> Option<Vec<T>> {
        match self {
            Self::List(items) => Some(items),
            Self::Malformed => None,
        }
    }
}

impl<T> From<Vec<T>> for ListInput<T> {
    fn from(items: Vec<T>) -> Self {
        Self::List(items)
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for ListInput<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match serde_json::from_value::<Vec<T>>(value) {
            Ok(items) => Self::List(items),
            Err(_) => Self::Malformed,
        })
    }
}

/// Reads a position hint. Anything other than a JSON number is no hint.
fn number_or_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(serde_json::Value::deserialize(deserializer)?.as_f64())
}

/// DTO for creating a row.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRow {
    pub title: Option<String>,
    pub cards: Option<ListInput<CardInput>>,
}

/// DTO for updating a row. Omitted fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRow {
    pub title: Option<String>,
    pub cards: Option<ListInput<CardInput>>,
    /// Relative position hint; only finite numbers are honored.
    #[serde(default, deserialize_with = "number_or_none")]
    pub order: Option<f64>,
}

/// DTO for a bulk reorder: the complete id set in the desired order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReorderRows {
    pub ids: Option<ListInput<RowId>>,
}

/// Per-call options supplied by the transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationOptions {
    pub max_cards: usize,
    pub actor_id: Option<ActorId>,
}

impl Default for MutationOptions {
    fn default() -> Self {
        Self {
            max_cards: DEFAULT_MAX_CARDS,
            actor_id: None,
        }
    }
}

impl MutationOptions {
    pub fn new(max_cards: usize, actor_id: Option<ActorId>) -> Self {
        Self {
            max_cards,
            actor_id,
        }
    }
}
