//! TreeBook: the reference balanced-tree engine.
//!
//! One `BTreeMap` per side, bids walked in reverse so both sides come out
//! best-first. Straightforward to verify, works on any price domain, and
//! serves as the correctness oracle the other engines are tested against.

use std::collections::BTreeMap;

use crate::book::fill_tail;
use crate::{OrderBook, Price, Quantity, Side};

/// Conventional ordered-map book for unconstrained or sparse price domains.
#[derive(Clone, Debug, Default)]
pub struct TreeBook {
    bids: BTreeMap<Price, Quantity>,
    offers: BTreeMap<Price, Quantity>,
}

impl TreeBook {
    pub fn new() -> Self {
        Self::default()
    }

    fn side_map(&self, side: Side) -> &BTreeMap<Price, Quantity> {
        match side {
            Side::Bid => &self.bids,
            Side::Offer => &self.offers,
            other => panic!("side not supported: {other}"),
        }
    }

    /// Best-first iterator: descending for bids, ascending for offers.
    fn iter_best_first(&self, side: Side) -> Box<dyn Iterator<Item = (&Price, &Quantity)> + '_> {
        match side {
            Side::Bid => Box::new(self.bids.iter().rev()),
            Side::Offer => Box::new(self.offers.iter()),
            other => panic!("side not supported: {other}"),
        }
    }
}

impl OrderBook for TreeBook {
    fn add(&mut self, side: Side, price: Price, quantity: Quantity) {
        let map = match side {
            Side::Bid => &mut self.bids,
            Side::Offer => &mut self.offers,
            other => panic!("side not supported: {other}"),
        };
        if quantity == 0 {
            map.remove(&price);
        } else {
            map.insert(price, quantity);
        }
    }

    fn get(&self, side: Side, price: Price) -> Option<Quantity> {
        self.side_map(side).get(&price).copied()
    }

    fn depth(&self, side: Side) -> usize {
        self.side_map(side).len()
    }

    fn for_each(&self, side: Side, visit: &mut dyn FnMut(Price, Quantity) -> bool) {
        for (&price, &qty) in self.iter_best_first(side) {
            if !visit(price, qty) {
                return;
            }
        }
    }

    fn get_levels(
        &self,
        side: Side,
        level: usize,
        out_prices: &mut [Price],
        out_qty: &mut [Quantity],
    ) {
        let mut out = 0;
        for (&price, &qty) in self.iter_best_first(side).take(level) {
            out_prices[out] = price;
            out_qty[out] = qty;
            out += 1;
        }
        fill_tail(out_prices, out_qty, out);
    }

    fn mid_price(&self) -> Option<Price> {
        let (&best_bid, _) = self.bids.last_key_value()?;
        let (&best_offer, _) = self.offers.first_key_value()?;
        Some(Price((best_bid.0 + best_offer.0) / 2))
    }

    fn clear(&mut self) {
        self.bids.clear();
        self.offers.clear();
    }
}
