//! Tick message decoders.
//!
//! Wire format is a pipe-separated key/value string:
//!
//! ```text
//! t=1638848595|i=VOD.L|p=32.99|q=100.25|s=b
//! ```
//!
//! `t` is a 10-digit epoch stamp, `i` an instrument symbol of up to eight
//! ASCII characters, `p` and `q` decimals with two fractional digits, and
//! `s` the side tag (`b` bid, `a` offer, `c` clear).
//!
//! Two decoders share the split layout. [`DedicatedDecoder`] uses
//! hand-rolled converters that assume well-formed input and never allocate;
//! it is the hot path. [`GenericDecoder`] parses through `rust_decimal` and
//! reports malformed fields instead of panicking; it is the slow path for
//! untrusted input and the yardstick the dedicated converters are tested
//! against.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::DecodeError;
use crate::splitter::Splitter;
use crate::{Price, Quantity, Side, SymbolId, Timestamp};

/// Delimiter pair for the key/value wire format.
pub const FIELD_DELIMS: [u8; 2] = [b'|', b'='];

/// Fields per well-formed tick message (five keys, five values).
pub const FIELD_COUNT: usize = 10;

/// Value-field offsets within a split message.
pub mod field {
    pub const STAMP: usize = 1;
    pub const SYMBOL: usize = 3;
    pub const PRICE: usize = 5;
    pub const QUANTITY: usize = 7;
    pub const SIDE: usize = 9;
}

/// Callback invoked once per decoded tick. `None` runs the decoder in
/// parse-only mode, which is useful for benchmarking the decode step alone.
pub type OnTick<'a> = Option<&'a mut dyn FnMut(Timestamp, SymbolId, Side, Price, Quantity)>;

/// Parses a two-decimal-place number into hundredths, e.g. `32.99` to 3299.
///
/// Digits accumulate left to right and the point is skipped, so the input
/// must carry exactly two fractional digits.
#[inline]
pub fn to_scaled2(text: &str) -> i64 {
    let mut v = 0_i64;
    for &b in text.as_bytes() {
        if b == b'.' {
            continue;
        }
        v = v * 10 + (b - b'0') as i64;
    }
    v
}

/// Parses a 10-digit epoch stamp with the multiplications written out.
#[inline]
pub fn to_stamp10(text: &str) -> Timestamp {
    let b = text.as_bytes();
    (b[0] - b'0') as u64 * 1_000_000_000
        + (b[1] - b'0') as u64 * 100_000_000
        + (b[2] - b'0') as u64 * 10_000_000
        + (b[3] - b'0') as u64 * 1_000_000
        + (b[4] - b'0') as u64 * 100_000
        + (b[5] - b'0') as u64 * 10_000
        + (b[6] - b'0') as u64 * 1_000
        + (b[7] - b'0') as u64 * 100
        + (b[8] - b'0') as u64 * 10
        + (b[9] - b'0') as u64
}

/// Hot-path decoder: no allocation, no validation.
///
/// Assumes every message carries the five key/value pairs in wire order and
/// panics on anything shorter. Feed this only data that has already passed
/// upstream conformance checks; use [`GenericDecoder`] otherwise.
#[derive(Clone, Debug, Default)]
pub struct DedicatedDecoder {
    splitter: Splitter,
}

impl DedicatedDecoder {
    pub fn new() -> Self {
        Self {
            splitter: Splitter::with_capacity(FIELD_COUNT),
        }
    }

    pub fn decode(&mut self, msg: &str, on_tick: OnTick<'_>) {
        let fields = self.splitter.split(msg, FIELD_DELIMS);
        let seq = |i: usize| match fields.sequence(i) {
            Some(s) => s,
            None => panic!("field {i} missing in tick message"),
        };

        let stamp = to_stamp10(seq(field::STAMP));
        let symbol = SymbolId::pack_lossy(seq(field::SYMBOL));
        let price = Price(to_scaled2(seq(field::PRICE)));
        let quantity: Quantity = to_scaled2(seq(field::QUANTITY));
        let side = match fields.to_char(field::SIDE) {
            Some(tag) => Side::from_tag(tag),
            None => panic!("field {} missing in tick message", field::SIDE),
        };

        if let Some(visit) = on_tick {
            visit(stamp, symbol, side, price, quantity);
        }
    }
}

/// Validating decoder built on library parsers.
#[derive(Clone, Debug, Default)]
pub struct GenericDecoder {
    splitter: Splitter,
}

impl GenericDecoder {
    pub fn new() -> Self {
        Self {
            splitter: Splitter::with_capacity(FIELD_COUNT),
        }
    }

    pub fn decode(&mut self, msg: &str, on_tick: OnTick<'_>) -> Result<(), DecodeError> {
        let fields = self.splitter.split(msg, FIELD_DELIMS);
        let seq = |i: usize| fields.sequence(i).ok_or(DecodeError::MissingField(i));

        let stamp: Timestamp = {
            let text = seq(field::STAMP)?;
            text.parse().map_err(|_| DecodeError::BadNumber {
                field: field::STAMP,
                text: text.to_owned(),
            })?
        };
        let symbol = SymbolId::pack(seq(field::SYMBOL)?)?;
        let price = Price(decimal_hundredths(seq(field::PRICE)?, field::PRICE)?);
        let quantity: Quantity = decimal_hundredths(seq(field::QUANTITY)?, field::QUANTITY)?;
        let side = match seq(field::SIDE)?.chars().next() {
            Some(tag) => Side::from_tag(tag),
            None => return Err(DecodeError::MissingField(field::SIDE)),
        };

        if let Some(visit) = on_tick {
            visit(stamp, symbol, side, price, quantity);
        }
        Ok(())
    }
}

/// Parses a decimal field and rescales it to hundredths.
fn decimal_hundredths(text: &str, field: usize) -> Result<i64, DecodeError> {
    let bad = || DecodeError::BadNumber {
        field,
        text: text.to_owned(),
    };
    let value: Decimal = text.parse().map_err(|_| bad())?;
    (value * Decimal::ONE_HUNDRED).trunc().to_i64().ok_or_else(bad)
}
