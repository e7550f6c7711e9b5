//! ArtBook: the ordered-tree engine, one [`ArtMap`] per side.
//!
//! The radix map only iterates ascending, so bid prices are stored negated:
//! the smallest negated key is the largest real price, and one ascending
//! primitive yields best-first order on both sides. Offer keys pass through
//! unchanged.

use crate::book::fill_tail;
use crate::{ArtMap, OrderBook, Price, Quantity, Side};

/// Default ceiling on levels emitted by a single traversal.
pub const DEFAULT_MAX_ITERATION_LEVEL: usize = 100;

/// Ordered-tree engine for unbounded price domains.
///
/// Near-O(1) locality for updates at the top of book, full ordered
/// semantics, one node allocation per distinct new key (amortized away by
/// the pooling mode). Traversals are capped at the configured
/// `max_iteration_level`; that cap is a hard ceiling on levels visited, not
/// a performance hint.
pub struct ArtBook {
    bids: ArtMap,
    offers: ArtMap,
    max_iteration_level: usize,
}

impl ArtBook {
    /// Engine with direct allocation and the default iteration ceiling.
    pub fn new() -> Self {
        Self::with_config(false, DEFAULT_MAX_ITERATION_LEVEL)
    }

    /// Engine with explicit pooling mode and iteration ceiling.
    ///
    /// Pooling reuses freed tree nodes through pre-sized freelists, trading
    /// memory footprint for steady-state allocation rate; disabling it
    /// trades allocation rate for simplicity.
    pub fn with_config(pooling: bool, max_iteration_level: usize) -> Self {
        let map = || {
            if pooling {
                ArtMap::pooled(64 * 1024)
            } else {
                ArtMap::new()
            }
        };
        ArtBook {
            bids: map(),
            offers: map(),
            max_iteration_level,
        }
    }

    /// The configured traversal ceiling.
    #[inline]
    pub fn max_iteration_level(&self) -> usize {
        self.max_iteration_level
    }

    /// Bid keys live negated in the ascending map.
    #[inline]
    fn invert(price: Price) -> i64 {
        -price.0
    }

    fn side_map(&self, side: Side) -> &ArtMap {
        match side {
            Side::Bid => &self.bids,
            Side::Offer => &self.offers,
            other => panic!("side not supported: {other}"),
        }
    }

    /// Best-first traversal bounded by `limit` levels.
    fn for_each_capped(&self, side: Side, limit: usize, visit: &mut dyn FnMut(Price, Quantity) -> bool) {
        match side {
            Side::Bid => self
                .bids
                .for_each_while(limit, &mut |key, qty| visit(Price(-key), qty)),
            Side::Offer => self
                .offers
                .for_each_while(limit, &mut |key, qty| visit(Price(key), qty)),
            other => panic!("side not supported: {other}"),
        }
    }
}

impl Default for ArtBook {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderBook for ArtBook {
    fn add(&mut self, side: Side, price: Price, quantity: Quantity) {
        let (map, key) = match side {
            Side::Bid => (&mut self.bids, Self::invert(price)),
            Side::Offer => (&mut self.offers, price.0),
            other => panic!("side not supported: {other}"),
        };
        if quantity == 0 {
            map.remove(key);
        } else {
            map.insert(key, quantity);
        }
    }

    fn get(&self, side: Side, price: Price) -> Option<Quantity> {
        match side {
            Side::Bid => self.bids.get(Self::invert(price)),
            Side::Offer => self.offers.get(price.0),
            other => panic!("side not supported: {other}"),
        }
    }

    fn depth(&self, side: Side) -> usize {
        self.side_map(side).len()
    }

    fn for_each(&self, side: Side, visit: &mut dyn FnMut(Price, Quantity) -> bool) {
        self.for_each_capped(side, self.max_iteration_level, visit);
    }

    fn get_levels(
        &self,
        side: Side,
        level: usize,
        out_prices: &mut [Price],
        out_qty: &mut [Quantity],
    ) {
        let mut out = 0;
        self.for_each_capped(side, level, &mut |px, qty| {
            out_prices[out] = px;
            out_qty[out] = qty;
            out += 1;
            true
        });
        fill_tail(out_prices, out_qty, out);
    }

    fn mid_price(&self) -> Option<Price> {
        if self.bids.is_empty() || self.offers.is_empty() {
            return None;
        }
        // Depth-1 traversal of each side reads the single best entry
        let (mut best_bid, mut best_offer) = (0i64, 0i64);
        self.bids.for_each_while(1, &mut |key, _| {
            best_bid = -key;
            false
        });
        self.offers.for_each_while(1, &mut |key, _| {
            best_offer = key;
            false
        });
        Some(Price((best_bid + best_offer) / 2))
    }

    fn clear(&mut self) {
        self.bids.clear();
        self.offers.clear();
    }
}
