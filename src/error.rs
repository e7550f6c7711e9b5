//! Error types for the validating decorator and the decode pipeline.
//!
//! The raw engines stay unchecked; errors only surface from the opt-in
//! [`CheckedBook`](crate::CheckedBook) wrapper, the generic decoder, and
//! the feed router.

use crate::Side;

/// Input-validation failures raised by [`CheckedBook`](crate::CheckedBook).
///
/// The underlying engine is never called with the offending argument; no
/// partial mutation happens before the error is returned.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BookError {
    #[error("invalid side: {0}")]
    InvalidSide(Side),

    #[error("price out of range: {0}")]
    PriceOutOfRange(i64),

    #[error("quantity out of range: {0}")]
    QuantityOutOfRange(i64),

    #[error("level out of range: {0}")]
    LevelOutOfRange(usize),

    #[error("output buffers too small: need {need}, got {got}")]
    OutputTooSmall { need: usize, got: usize },
}

/// Failures from the decode pipeline.
///
/// The dedicated converters do not defensively check their input; only the
/// generic decoder (whose numeric parsing goes through `rust_decimal`) and
/// the checked symbol packer produce these.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("field {0} missing from message")]
    MissingField(usize),

    #[error("malformed number in field {field}: {text:?}")]
    BadNumber { field: usize, text: String },

    #[error("symbol does not fit 8 bytes: {0:?}")]
    SymbolTooLong(String),

    #[error("symbol is not ASCII: {0:?}")]
    SymbolNotAscii(String),
}

/// Failures from end-to-end message application in
/// [`FeedBooks`](crate::FeedBooks).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FeedError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("side field did not decode to a book side")]
    UnknownSide,
}
