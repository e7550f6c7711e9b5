// Allow our dollar.cents digit grouping convention (e.g., 100_00 = $100.00)
#![allow(clippy::inconsistent_digit_grouping)]

//! # tickbook
//!
//! Price-level order books fed from a plain-text tick stream, with a choice
//! of engines tuned for different price domains.
//!
//! ## Features
//!
//! - **Three engines behind one trait**: array-indexed ([`DirectBook`]),
//!   adaptive radix tree ([`ArtBook`]), and ordered map ([`TreeBook`])
//! - **Fixed-point prices**: integer hundredths, no floats anywhere in book
//!   state
//! - **Zero-copy decoding**: a reusable [`Splitter`] plus hand-rolled field
//!   converters on the hot path
//! - **Per-instrument routing**: [`FeedBooks`] keys engines by packed
//!   [`SymbolId`]
//! - **Opt-in validation**: [`CheckedBook`] turns contract violations into
//!   errors instead of panics
//!
//! ## Quick Start
//!
//! ```
//! use tickbook::{FeedBooks, OrderBook, Price, Side, SymbolId, TreeBook};
//!
//! let mut feed: FeedBooks<TreeBook> = FeedBooks::new();
//! feed.apply("t=1638848595|i=VOD.L|p=32.99|q=123.00|s=b").unwrap();
//! feed.apply("t=1638848595|i=VOD.L|p=33.11|q=100.30|s=a").unwrap();
//!
//! let book = feed.book(SymbolId::pack("VOD.L").unwrap()).unwrap();
//! assert_eq!(book.get(Side::Bid, Price(32_99)), Some(123_00));
//! assert_eq!(book.mid_price(), Some(Price(33_05)));
//! ```
//!
//! ## Price Representation
//!
//! Prices are [`i64`] hundredths wrapped in a [`Price`] newtype:
//!
//! ```
//! use tickbook::Price;
//!
//! let price = Price(32_99);  // 32.99
//! assert_eq!(format!("{}", price), "32.99");
//! ```
//!
//! ## Choosing an Engine
//!
//! | Engine | Best for |
//! |--------|----------|
//! | [`DirectBook`] | Dense, bounded price domains (one slot per tick) |
//! | [`ArtBook`] | Sparse or unbounded domains, tight iteration bounds |
//! | [`TreeBook`] | Reference semantics, correctness oracle |
//!
//! All three expose the same [`OrderBook`] trait: quantity replaces at a
//! level, quantity zero removes it, and iteration is always best-first.

mod art;
mod art_book;
mod book;
mod checked;
pub mod decode;
pub mod depth;
mod direct;
mod error;
mod feed;
mod side;
mod splitter;
mod tree_book;
mod types;

// Re-export public API
pub use art::ArtMap;
pub use art_book::{ArtBook, DEFAULT_MAX_ITERATION_LEVEL};
pub use book::OrderBook;
pub use checked::CheckedBook;
pub use decode::{DedicatedDecoder, GenericDecoder};
pub use direct::DirectBook;
pub use error::{BookError, DecodeError, FeedError};
pub use feed::FeedBooks;
pub use side::Side;
pub use splitter::{Fields, Splitter};
pub use tree_book::TreeBook;
pub use types::{Price, Quantity, SymbolId, Timestamp};
