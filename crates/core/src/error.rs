use std::fmt;

use serde::Serialize;

/// Named rejection kinds produced by validation and lookup.
///
/// Every kind is synchronous and safe to retry once the input is corrected;
/// none of them indicates corrupted state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    RowTitleRequired,
    RowTitleDuplicate,
    RowNotFound,
    CardsInvalid,
    CardsMin,
    CardsMax,
    CardTitleRequired,
    CardLinkRequired,
    ReorderPayloadInvalid,
    ReorderIdsMismatch,
}

/// How a rejection should be reported to a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Malformed or incomplete input.
    Invalid,
    /// Input clashes with existing state.
    Conflict,
    /// The referenced entity does not exist.
    NotFound,
}

impl ErrorCode {
    /// Wire name, e.g. `"ROW_TITLE_REQUIRED"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RowTitleRequired => "ROW_TITLE_REQUIRED",
            Self::RowTitleDuplicate => "ROW_TITLE_DUPLICATE",
            Self::RowNotFound => "ROW_NOT_FOUND",
            Self::CardsInvalid => "CARDS_INVALID",
            Self::CardsMin => "CARDS_MIN",
            Self::CardsMax => "CARDS_MAX",
            Self::CardTitleRequired => "CARD_TITLE_REQUIRED",
            Self::CardLinkRequired => "CARD_LINK_REQUIRED",
            Self::ReorderPayloadInvalid => "REORDER_PAYLOAD_INVALID",
            Self::ReorderIdsMismatch => "REORDER_IDS_MISMATCH",
        }
    }

    pub fn disposition(self) -> Disposition {
        match self {
            Self::RowTitleDuplicate => Disposition::Conflict,
            Self::RowNotFound => Disposition::NotFound,
            _ => Disposition::Invalid,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Input rejected by a named rule.
    #[error("{message}")]
    Rejected { code: ErrorCode, message: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn rejected(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Rejected {
            code,
            message: message.into(),
        }
    }

    pub fn row_not_found(id: &str) -> Self {
        Self::rejected(ErrorCode::RowNotFound, format!("Row with id {id} not found"))
    }

    /// The named rejection kind, if this error carries one.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Rejected { code, .. } => Some(*code),
            _ => None,
        }
    }
}
