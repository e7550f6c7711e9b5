//! Feed application: one book per instrument.
//!
//! `FeedBooks` keeps an `FxHashMap` from packed symbol to book engine and
//! drives the validating decoder over raw wire messages. Books spring into
//! existence on the first update for their symbol; a clear tick (`s=c`)
//! empties the matching book and is a no-op for symbols never seen.

use rustc_hash::FxHashMap;

use crate::decode::GenericDecoder;
use crate::error::FeedError;
use crate::{OrderBook, Side, SymbolId};

/// Routes decoded ticks to per-symbol book engines.
#[derive(Debug, Default)]
pub struct FeedBooks<B> {
    books: FxHashMap<SymbolId, B>,
    decoder: GenericDecoder,
}

impl<B: OrderBook + Default> FeedBooks<B> {
    pub fn new() -> Self {
        Self {
            books: FxHashMap::default(),
            decoder: GenericDecoder::new(),
        }
    }

    /// Decodes one wire message and applies it to the owning book.
    pub fn apply(&mut self, msg: &str) -> Result<(), FeedError> {
        let Self { books, decoder } = self;
        let mut unknown = false;
        let mut route = |_stamp, symbol, side: Side, price, quantity| match side {
            Side::Bid | Side::Offer => {
                books.entry(symbol).or_default().add(side, price, quantity);
            }
            Side::Clear => {
                if let Some(book) = books.get_mut(&symbol) {
                    book.clear();
                }
            }
            Side::Unknown => unknown = true,
        };
        decoder.decode(msg, Some(&mut route))?;
        if unknown {
            return Err(FeedError::UnknownSide);
        }
        Ok(())
    }

    /// Book for `symbol`, if any update ever touched it.
    #[inline]
    pub fn book(&self, symbol: SymbolId) -> Option<&B> {
        self.books.get(&symbol)
    }

    /// Number of instruments seen so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Symbols with a live book, in no particular order.
    pub fn symbols(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.books.keys().copied()
    }

    /// Drops every book.
    pub fn clear_all(&mut self) {
        self.books.clear();
    }
}
