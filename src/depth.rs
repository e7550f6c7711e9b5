//! Depth aggregation over any [`OrderBook`].
//!
//! Both walks visit levels best-first and stop as soon as the answer is
//! known. The `_with` variants take a caller-owned [`Working`] scratch so a
//! tight loop can reuse one accumulator across calls; the plain variants
//! make a fresh one.

use crate::{OrderBook, Quantity, Side};

/// Reusable accumulator for the aggregation walks.
#[derive(Clone, Copy, Debug, Default)]
pub struct Working {
    pub size: Quantity,
    pub levels: usize,
}

impl Working {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn reset(&mut self) {
        self.size = 0;
        self.levels = 0;
    }
}

/// Total quantity resting on the first `level` levels of `side`.
///
/// A book shallower than `level` contributes everything it has.
pub fn size_up_to_level<B: OrderBook + ?Sized>(book: &B, side: Side, level: usize) -> Quantity {
    size_up_to_level_with(book, side, level, &mut Working::new())
}

pub fn size_up_to_level_with<B: OrderBook + ?Sized>(
    book: &B,
    side: Side,
    level: usize,
    w: &mut Working,
) -> Quantity {
    w.reset();
    if level == 0 {
        return 0;
    }
    book.for_each(side, &mut |_, qty| {
        w.size += qty;
        w.levels += 1;
        w.levels < level
    });
    w.size
}

/// Number of levels needed for the running size to reach `target`.
///
/// Stops at the first level where the accumulated quantity meets or exceeds
/// `target`. If the whole side holds less than `target`, every level counts
/// and the side's depth comes back.
pub fn levels_for_size<B: OrderBook + ?Sized>(book: &B, side: Side, target: Quantity) -> usize {
    levels_for_size_with(book, side, target, &mut Working::new())
}

pub fn levels_for_size_with<B: OrderBook + ?Sized>(
    book: &B,
    side: Side,
    target: Quantity,
    w: &mut Working,
) -> usize {
    w.reset();
    if target <= 0 {
        return 0;
    }
    book.for_each(side, &mut |_, qty| {
        w.size += qty;
        w.levels += 1;
        w.size < target
    });
    w.levels
}
