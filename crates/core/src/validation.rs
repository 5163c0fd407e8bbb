//! Validation rules applied to every mutation before persistence.
//!
//! `normalize_cards` is the single choke point turning untrusted
//! [`CardInput`] payloads into stored [`Card`] values.

use crate::error::{CoreError, ErrorCode};
use crate::model::{Card, CardInput, Row};
use crate::sanitize::{sanitize_text, sanitize_url};
use crate::types::new_id;

/// Sanitize a row title and check it against the collection.
///
/// The row identified by `exclude_id` is skipped, so a row may keep its own
/// title. Returns the sanitized title.
pub fn validate_row_title(
    title: Option<&str>,
    rows: &[Row],
    exclude_id: Option<&str>,
) -> Result<String, CoreError> {
    let title = sanitize_text(title);
    if title.is_empty() {
        return Err(CoreError::rejected(
            ErrorCode::RowTitleRequired,
            "Row title is required",
        ));
    }

    let folded = title.to_lowercase();
    let clash = rows
        .iter()
        .filter(|row| Some(row.id.as_str()) != exclude_id)
        .any(|row| row.title.to_lowercase() == folded);
    if clash {
        return Err(CoreError::rejected(
            ErrorCode::RowTitleDuplicate,
            format!("A row titled '{title}' already exists"),
        ));
    }

    Ok(title)
}

/// Check that a card list is present and within `1..=max_cards`.
pub fn validate_card_count(
    cards: Option<&[CardInput]>,
    max_cards: usize,
) -> Result<(), CoreError> {
    let cards = cards.ok_or_else(|| {
        CoreError::rejected(ErrorCode::CardsInvalid, "Cards must be provided as a list")
    })?;
    if cards.is_empty() {
        return Err(CoreError::rejected(
            ErrorCode::CardsMin,
            "A row needs at least one card",
        ));
    }
    if cards.len() > max_cards {
        return Err(CoreError::rejected(
            ErrorCode::CardsMax,
            format!("A row can hold at most {max_cards} cards"),
        ));
    }
    Ok(())
}

/// Sanitize one card payload. A supplied non-empty id is preserved so a
/// card keeps its identity across edits.
pub fn normalize_card(raw: &CardInput) -> Result<Card, CoreError> {
    let title = sanitize_text(raw.title.as_deref());
    if title.is_empty() {
        return Err(CoreError::rejected(
            ErrorCode::CardTitleRequired,
            "Card title is required",
        ));
    }

    let link_url = sanitize_url(raw.link_url.as_deref());
    if link_url.is_empty() {
        return Err(CoreError::rejected(
            ErrorCode::CardLinkRequired,
            "Card link must be an http(s) URL or a relative path",
        ));
    }

    let id = sanitize_text(raw.id.as_deref());
    let id = if id.is_empty() { new_id() } else { id };

    Ok(Card {
        id,
        title,
        description: sanitize_text(raw.description.as_deref()),
        image_url: sanitize_url(raw.image_url.as_deref()),
        link_url,
        badge: sanitize_text(raw.badge.as_deref()),
    })
}

/// Validate the count, then normalize each card in order.
pub fn normalize_cards(
    cards: Option<&[CardInput]>,
    max_cards: usize,
) -> Result<Vec<Card>, CoreError> {
    validate_card_count(cards, max_cards)?;
    cards
        .unwrap_or_default()
        .iter()
        .map(normalize_card)
        .collect()
}
