//! Error taxonomy for item operations.
//!
//! Three kinds are expected and answered with a client error by the
//! transport layer: [`ItemError::Parse`], [`ItemError::Validation`] and
//! [`ItemError::NotFound`]. [`ItemError::Store`] is the unexpected kind; it
//! is never mapped to a client response and must be propagated.

use crate::item::ItemId;
use crate::store::StoreError;
use crate::validation::ValidationError;
use thiserror::Error;

/// The request body is not parseable JSON.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("invalid request body format: {detail}")]
pub struct ParseError {
    detail: String,
}

impl ParseError {
    /// Creates a parse error carrying the decoder's message.
    #[must_use]
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }

    /// Returns the decoder's message.
    #[must_use]
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

/// Errors produced by [`ItemService`](crate::service::ItemService).
#[derive(Error, Debug)]
pub enum ItemError {
    /// Malformed request body.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Well-formed body with invalid fields.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No record exists for the given identifier.
    #[error("item not found: {0}")]
    NotFound(ItemId),

    /// The store failed; unexpected.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ItemError {
    /// Returns `true` for the kinds a transport maps to a client error.
    #[must_use]
    pub const fn is_expected(&self) -> bool {
        !matches!(self, Self::Store(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::new("EOF while parsing a value at line 1 column 0");
        assert_eq!(
            err.to_string(),
            "invalid request body format: EOF while parsing a value at line 1 column 0"
        );
    }

    #[test]
    fn test_store_errors_are_unexpected() {
        assert!(ItemError::NotFound(ItemId::new("x")).is_expected());
        assert!(ItemError::from(ParseError::new("bad")).is_expected());
        assert!(!ItemError::from(StoreError::Unavailable("down".to_string())).is_expected());
    }
}
