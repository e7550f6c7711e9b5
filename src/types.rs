//! Core types: Price, Quantity, Timestamp, SymbolId

use std::fmt;

use crate::DecodeError;

/// Price in smallest units (e.g., cents).
///
/// The wire format carries two decimal digits, so `Price(3299)` represents
/// 32.99. Using fixed-point avoids floating-point errors in book state; no
/// engine ever touches a float.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Price(pub i64);

impl Price {
    pub const ZERO: Price = Price(0);
    pub const MAX: Price = Price(i64::MAX);

    /// The "no price" output sentinel used in level extraction.
    ///
    /// Engines never store this; it only appears in output buffers past the
    /// last occupied level.
    pub const NONE: Price = Price(-1);
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Display as units.hundredths per the 2dp wire scale
        let units = self.0 / 100;
        let cents = (self.0 % 100).abs();
        if self.0 < 0 {
            write!(f, "-{}.{:02}", units.abs(), cents)
        } else {
            write!(f, "{}.{:02}", units, cents)
        }
    }
}

/// Aggregated resting size at a price, in the same 2dp fixed-point scale.
///
/// A quantity of 0 is never stored: it is the "remove this level" marker on
/// the way in, and absent levels are physically absent in every engine.
pub type Quantity = i64;

/// Wire timestamp: 10-digit unix seconds.
pub type Timestamp = u64;

/// Instrument identity: up to 8 ASCII characters packed into a `u64`.
///
/// One byte per character, most significant byte first, so packed ids of
/// distinct ≤8-char symbols are distinct and compare in lexicographic order.
/// This keeps the hot path free of string-keyed hash lookups.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolId(pub u64);

impl SymbolId {
    /// Pack a textual symbol, rejecting anything the encoding cannot hold.
    pub fn pack(symbol: &str) -> Result<Self, DecodeError> {
        if symbol.len() > 8 {
            return Err(DecodeError::SymbolTooLong(symbol.to_string()));
        }
        if !symbol.is_ascii() {
            return Err(DecodeError::SymbolNotAscii(symbol.to_string()));
        }
        Ok(Self::pack_lossy(symbol))
    }

    /// Pack without validation, as the feed hot path does.
    ///
    /// Symbols longer than 8 bytes silently keep only their trailing 8 bytes
    /// (earlier characters shift out of the accumulator). Callers who cannot
    /// tolerate that aliasing should use [`SymbolId::pack`] at configuration
    /// time.
    #[inline]
    pub fn pack_lossy(symbol: &str) -> Self {
        let mut id = 0u64;
        for &b in symbol.as_bytes() {
            id = (id << 8) | b as u64;
        }
        SymbolId(id)
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Unpack the non-zero bytes, most significant first
        for shift in (0..8).rev() {
            let b = ((self.0 >> (shift * 8)) & 0xff) as u8;
            if b != 0 {
                write!(f, "{}", b as char)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_ordering() {
        assert!(Price(100) < Price(200));
        assert!(Price::NONE < Price::ZERO);
        assert_eq!(Price(3299), Price(3299));
    }

    #[test]
    fn price_display() {
        assert_eq!(format!("{}", Price(3299)), "32.99");
        assert_eq!(format!("{}", Price(100)), "1.00");
        assert_eq!(format!("{}", Price(5)), "0.05");
        assert_eq!(format!("{}", Price(-250)), "-2.50");
    }

    #[test]
    fn pack_is_msb_first() {
        assert_eq!(SymbolId::pack_lossy("A"), SymbolId(0x41));
        assert_eq!(SymbolId::pack_lossy("AB"), SymbolId(0x41_42));
    }

    #[test]
    fn pack_distinct_symbols_distinct_ids() {
        let a = SymbolId::pack("BTC-USD").unwrap();
        let b = SymbolId::pack("ETH-USD").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn pack_rejects_long_symbols() {
        assert!(SymbolId::pack("TOOLONGSYM").is_err());
        assert!(SymbolId::pack("12345678").is_ok());
    }

    #[test]
    fn pack_lossy_keeps_trailing_bytes() {
        // 9 chars: the leading byte shifts out
        assert_eq!(
            SymbolId::pack_lossy("XBTC-USDT"),
            SymbolId::pack_lossy("BTC-USDT")
        );
    }

    #[test]
    fn display_round_trips() {
        let id = SymbolId::pack("BTC-USD").unwrap();
        assert_eq!(format!("{}", id), "BTC-USD");
    }
}
