//! Book side: Bid or Offer, plus the stream-control markers.

use std::fmt;

/// Side of the book an update applies to.
///
/// `Bid` and `Offer` are the only sides the engines accept directly.
/// `Clear` is a stream-control marker instructing the consumer to wipe the
/// book, and `Unknown` marks a side field that failed to decode — the caller
/// decides whether either is fatal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Bid,
    Offer,
    Clear,
    Unknown,
}

impl Side {
    /// Map the wire side tag: `b` → Bid, `a` → Offer, `c` → Clear,
    /// anything else → Unknown.
    #[inline]
    pub fn from_tag(ch: char) -> Self {
        match ch {
            'b' => Side::Bid,
            'a' => Side::Offer,
            'c' => Side::Clear,
            _ => Side::Unknown,
        }
    }

    /// True for the two sides a book actually stores.
    #[inline]
    pub fn is_book_side(self) -> bool {
        matches!(self, Side::Bid | Side::Offer)
    }

    /// Returns the opposite book side.
    ///
    /// Only meaningful for `Bid`/`Offer`; the markers map to themselves.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Side::Bid => Side::Offer,
            Side::Offer => Side::Bid,
            other => other,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Bid => write!(f, "BID"),
            Side::Offer => write!(f, "OFFER"),
            Side::Clear => write!(f, "CLEAR"),
            Side::Unknown => write!(f, "UNKNOWN"),
        }
    }
}
