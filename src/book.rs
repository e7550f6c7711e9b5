//! The order book contract shared by every engine.
//!
//! A book is two independent ordered collections of price levels, one per
//! side, keyed by scaled-integer price with a single aggregated quantity per
//! level. Engines differ only in how they keep that price-ordered index under
//! mutation; callers can swap engines with no code change beyond
//! construction.

use crate::{Price, Quantity, Side};

/// A per-instrument limit order book of aggregated resting size per price.
///
/// # Contract
///
/// - At most one quantity exists per (side, price); a level with quantity 0
///   does not exist (it is physically absent, never stored as zero).
/// - Iteration is best-first on both sides: highest price first for bids,
///   lowest price first for offers.
/// - Raw engines perform minimal-to-no argument validation. Out-of-domain
///   input (a price outside a bounded engine's configured domain, a side
///   other than `Bid`/`Offer`) panics or indexes out of bounds rather than
///   returning a checked error; wrap the engine in
///   [`CheckedBook`](crate::CheckedBook) when that is not acceptable.
/// - No operation allocates per call once the book has reached steady state.
pub trait OrderBook {
    /// Add, update, or remove a price level on one side.
    ///
    /// A quantity > 0 inserts or overwrites the level; quantity 0 removes it
    /// if present (removing an absent level is a no-op, not an error).
    fn add(&mut self, side: Side, price: Price, quantity: Quantity);

    /// The quantity resting at `price`, or `None` if the level is absent.
    fn get(&self, side: Side, price: Price) -> Option<Quantity>;

    /// Number of levels with non-zero quantity on that side.
    fn depth(&self, side: Side) -> usize;

    /// Visit levels best-first until `visit` returns `false` or the side is
    /// exhausted.
    ///
    /// The visitor is a caller-owned `&mut` so traversal state lives with
    /// the caller and no closure environment is heap-allocated.
    fn for_each(&self, side: Side, visit: &mut dyn FnMut(Price, Quantity) -> bool);

    /// Copy up to `level` best levels into the output slices.
    ///
    /// Slot 0 is the best level. Trailing slots past the last occupied level
    /// are set to [`Price::NONE`] and quantity 0 across the full slice
    /// length. Raw engines do not check slice sizes beyond the implicit
    /// bounds check on indexing.
    fn get_levels(
        &self,
        side: Side,
        level: usize,
        out_prices: &mut [Price],
        out_qty: &mut [Quantity],
    );

    /// `floor((best_bid + best_offer) / 2)`, or `None` if either side is
    /// empty.
    ///
    /// Prices are non-negative by precondition, so integer truncation is
    /// floor.
    fn mid_price(&self) -> Option<Price>;

    /// Remove every level on both sides.
    fn clear(&mut self);
}

/// Pad the unfilled tail of a level-extraction output with the no-price /
/// no-quantity sentinels.
#[inline]
pub(crate) fn fill_tail(out_prices: &mut [Price], out_qty: &mut [Quantity], from: usize) {
    for px in &mut out_prices[from..] {
        *px = Price::NONE;
    }
    for qty in &mut out_qty[from..] {
        *qty = 0;
    }
}
