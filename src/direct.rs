//! DirectBook: price-as-array-index engine for bounded price domains.
//!
//! Backing store is one fixed-length quantity slab per side; the array index
//! *is* the price, so an update is a single store plus a best-index check.
//! This removes all tree and hash overhead at the cost of requiring a
//! non-negative, contiguous price domain sized at construction — appropriate
//! when tick size and realistic depth fix the range up front.

use crate::book::fill_tail;
use crate::{OrderBook, Price, Quantity, Side};

/// "Side empty" sentinels for the tracked best index. 0 is a legitimate
/// price index here, so -1 cannot serve; the extremes keep the best-index
/// comparisons in `add` branch-free.
const NO_BID: isize = isize::MIN;
const NO_OFFER: isize = isize::MAX;

/// Array-backed book with O(1) amortized updates.
///
/// # Preconditions (constructor contract, not validated per call)
///
/// - Every price satisfies `0 <= price < max_depth`. The engine never remaps
///   or rescales; an out-of-domain price is an out-of-bounds index and
///   panics.
/// - Only `Side::Bid` / `Side::Offer` are accepted.
///
/// The only non-O(1) path is removing the current best level, which rescans
/// inward to the next occupied slot — bounded by the gap between consecutive
/// occupied levels, not by the configured depth.
#[derive(Clone, Debug)]
pub struct DirectBook {
    bids: Vec<Quantity>,
    offers: Vec<Quantity>,
    /// Highest occupied bid index, or `NO_BID`.
    top_bid: isize,
    /// Lowest occupied offer index, or `NO_OFFER`.
    top_offer: isize,
}

impl DirectBook {
    /// Create a book covering the price domain `[0, max_depth)`.
    pub fn new(max_depth: usize) -> Self {
        Self {
            bids: vec![0; max_depth],
            offers: vec![0; max_depth],
            top_bid: NO_BID,
            top_offer: NO_OFFER,
        }
    }

    /// The configured price domain size.
    #[inline]
    pub fn max_depth(&self) -> usize {
        self.bids.len()
    }

    fn slab(&self, side: Side) -> &[Quantity] {
        match side {
            Side::Bid => &self.bids,
            Side::Offer => &self.offers,
            other => panic!("side not supported: {other}"),
        }
    }
}

impl OrderBook for DirectBook {
    fn add(&mut self, side: Side, price: Price, quantity: Quantity) {
        let ix = price.0 as usize;
        match side {
            Side::Bid => {
                // Delete on an empty side is a no-op
                if self.top_bid == NO_BID && quantity == 0 {
                    return;
                }
                if ix as isize > self.top_bid {
                    self.top_bid = ix as isize;
                }
                self.bids[ix] = quantity;
                if quantity == 0 && self.top_bid == ix as isize {
                    // Best level removed: rescan inward for the next one
                    let mut i = ix;
                    while i > 0 && self.bids[i] == 0 {
                        i -= 1;
                    }
                    self.top_bid = if self.bids[i] == 0 { NO_BID } else { i as isize };
                }
            }
            Side::Offer => {
                if self.top_offer == NO_OFFER && quantity == 0 {
                    return;
                }
                if (ix as isize) < self.top_offer {
                    self.top_offer = ix as isize;
                }
                self.offers[ix] = quantity;
                if quantity == 0 && self.top_offer == ix as isize {
                    let n = self.offers.len();
                    let mut i = ix;
                    while i < n && self.offers[i] == 0 {
                        i += 1;
                    }
                    self.top_offer = if i == n { NO_OFFER } else { i as isize };
                }
            }
            other => panic!("side not supported: {other}"),
        }
    }

    fn get(&self, side: Side, price: Price) -> Option<Quantity> {
        let qty = self.slab(side)[price.0 as usize];
        (qty != 0).then_some(qty)
    }

    fn depth(&self, side: Side) -> usize {
        // A slot inside the scanned range can be zero (an intermediate level
        // removed without being the best), so occupied slots are counted.
        let mut levels = 0;
        match side {
            Side::Bid => {
                let mut i = self.top_bid;
                while i >= 0 {
                    if self.bids[i as usize] != 0 {
                        levels += 1;
                    }
                    i -= 1;
                }
            }
            Side::Offer => {
                let n = self.offers.len() as isize;
                let mut i = self.top_offer;
                while i < n {
                    if self.offers[i as usize] != 0 {
                        levels += 1;
                    }
                    i += 1;
                }
            }
            other => panic!("side not supported: {other}"),
        }
        levels
    }

    fn for_each(&self, side: Side, visit: &mut dyn FnMut(Price, Quantity) -> bool) {
        match side {
            Side::Bid => {
                let mut i = self.top_bid;
                while i >= 0 {
                    let qty = self.bids[i as usize];
                    if qty != 0 && !visit(Price(i as i64), qty) {
                        return;
                    }
                    i -= 1;
                }
            }
            Side::Offer => {
                let n = self.offers.len() as isize;
                let mut i = self.top_offer;
                while i < n {
                    let qty = self.offers[i as usize];
                    if qty != 0 && !visit(Price(i as i64), qty) {
                        return;
                    }
                    i += 1;
                }
            }
            other => panic!("side not supported: {other}"),
        }
    }

    fn get_levels(
        &self,
        side: Side,
        level: usize,
        out_prices: &mut [Price],
        out_qty: &mut [Quantity],
    ) {
        let mut remaining = level;
        let mut out = 0;
        match side {
            Side::Bid => {
                let mut i = self.top_bid;
                while remaining > 0 && i >= 0 {
                    let qty = self.bids[i as usize];
                    if qty != 0 {
                        out_prices[out] = Price(i as i64);
                        out_qty[out] = qty;
                        out += 1;
                        remaining -= 1;
                    }
                    i -= 1;
                }
            }
            Side::Offer => {
                let n = self.offers.len() as isize;
                let mut i = self.top_offer;
                while remaining > 0 && i < n {
                    let qty = self.offers[i as usize];
                    if qty != 0 {
                        out_prices[out] = Price(i as i64);
                        out_qty[out] = qty;
                        out += 1;
                        remaining -= 1;
                    }
                    i += 1;
                }
            }
            other => panic!("side not supported: {other}"),
        }
        fill_tail(out_prices, out_qty, out);
    }

    fn mid_price(&self) -> Option<Price> {
        if self.top_bid == NO_BID || self.top_offer == NO_OFFER {
            return None;
        }
        Some(Price(((self.top_bid + self.top_offer) / 2) as i64))
    }

    fn clear(&mut self) {
        self.bids.fill(0);
        self.offers.fill(0);
        self.top_bid = NO_BID;
        self.top_offer = NO_OFFER;
    }
}
