//! Validating wrapper around any book engine.
//!
//! The raw engines trust their callers and panic on misuse. `CheckedBook`
//! fronts one of them with explicit limits and turns every misuse into a
//! [`BookError`] instead. All arguments are validated before the inner
//! engine is touched, so a rejected call leaves the book unchanged.

use crate::error::BookError;
use crate::{OrderBook, Price, Quantity, Side};

/// Engine decorator that bounds prices, quantities, and level requests.
#[derive(Clone, Debug)]
pub struct CheckedBook<B> {
    inner: B,
    max_price: Price,
    max_quantity: Quantity,
    max_level: usize,
}

impl<B: OrderBook> CheckedBook<B> {
    pub fn new(inner: B, max_price: Price, max_quantity: Quantity, max_level: usize) -> Self {
        Self {
            inner,
            max_price,
            max_quantity,
            max_level,
        }
    }

    /// Decorator with every limit at its maximum; tighten with the `with_`
    /// setters.
    pub fn unlimited(inner: B) -> Self {
        Self::new(inner, Price::MAX, Quantity::MAX, usize::MAX)
    }

    pub fn with_max_price(mut self, max_price: Price) -> Self {
        self.max_price = max_price;
        self
    }

    pub fn with_max_quantity(mut self, max_quantity: Quantity) -> Self {
        self.max_quantity = max_quantity;
        self
    }

    pub fn with_max_level(mut self, max_level: usize) -> Self {
        self.max_level = max_level;
        self
    }

    #[inline]
    pub fn inner(&self) -> &B {
        &self.inner
    }

    pub fn into_inner(self) -> B {
        self.inner
    }

    fn check_side(&self, side: Side) -> Result<(), BookError> {
        if side.is_book_side() {
            Ok(())
        } else {
            Err(BookError::InvalidSide(side))
        }
    }

    fn check_price(&self, price: Price) -> Result<(), BookError> {
        if price.0 < 0 || price > self.max_price {
            Err(BookError::PriceOutOfRange(price.0))
        } else {
            Ok(())
        }
    }

    pub fn add(&mut self, side: Side, price: Price, quantity: Quantity) -> Result<(), BookError> {
        self.check_side(side)?;
        self.check_price(price)?;
        if quantity < 0 || quantity > self.max_quantity {
            return Err(BookError::QuantityOutOfRange(quantity));
        }
        self.inner.add(side, price, quantity);
        Ok(())
    }

    pub fn get(&self, side: Side, price: Price) -> Result<Option<Quantity>, BookError> {
        self.check_side(side)?;
        self.check_price(price)?;
        Ok(self.inner.get(side, price))
    }

    pub fn depth(&self, side: Side) -> Result<usize, BookError> {
        self.check_side(side)?;
        Ok(self.inner.depth(side))
    }

    pub fn for_each(
        &self,
        side: Side,
        visit: &mut dyn FnMut(Price, Quantity) -> bool,
    ) -> Result<(), BookError> {
        self.check_side(side)?;
        self.inner.for_each(side, visit);
        Ok(())
    }

    pub fn get_levels(
        &self,
        side: Side,
        level: usize,
        out_prices: &mut [Price],
        out_qty: &mut [Quantity],
    ) -> Result<(), BookError> {
        self.check_side(side)?;
        if level < 1 || level > self.max_level {
            return Err(BookError::LevelOutOfRange(level));
        }
        let got = out_prices.len().min(out_qty.len());
        if got < level {
            return Err(BookError::OutputTooSmall { need: level, got });
        }
        self.inner.get_levels(side, level, out_prices, out_qty);
        Ok(())
    }

    #[inline]
    pub fn mid_price(&self) -> Option<Price> {
        self.inner.mid_price()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TreeBook;

    fn checked() -> CheckedBook<TreeBook> {
        CheckedBook::new(TreeBook::new(), Price(100_00), 1_000_00, 10)
    }

    #[test]
    fn valid_calls_pass_through() {
        let mut book = checked();
        book.add(Side::Bid, Price(32_99), 123_00).unwrap();
        book.add(Side::Offer, Price(33_11), 100_30).unwrap();

        assert_eq!(book.get(Side::Bid, Price(32_99)).unwrap(), Some(123_00));
        assert_eq!(book.depth(Side::Offer).unwrap(), 1);
        assert_eq!(book.mid_price(), Some(Price(33_05)));
    }

    #[test]
    fn unlimited_then_tightened() {
        let mut book = CheckedBook::unlimited(TreeBook::new());
        book.add(Side::Bid, Price(99_999_99), 1).unwrap();

        let mut book = CheckedBook::unlimited(TreeBook::new()).with_max_price(Price(50_00));
        assert!(matches!(
            book.add(Side::Bid, Price(99_999_99), 1),
            Err(BookError::PriceOutOfRange(_))
        ));
    }

    #[test]
    fn rejects_marker_sides() {
        let mut book = checked();
        let err = book.add(Side::Clear, Price(1), 1).unwrap_err();
        assert!(matches!(err, BookError::InvalidSide(Side::Clear)));

        let err = book.depth(Side::Unknown).unwrap_err();
        assert!(matches!(err, BookError::InvalidSide(Side::Unknown)));
    }

    #[test]
    fn rejects_out_of_range_price() {
        let mut book = checked();
        assert!(matches!(
            book.add(Side::Bid, Price(100_01), 1),
            Err(BookError::PriceOutOfRange(100_01))
        ));
        assert!(matches!(
            book.get(Side::Bid, Price(-5)),
            Err(BookError::PriceOutOfRange(-5))
        ));
    }

    #[test]
    fn rejects_out_of_range_quantity() {
        let mut book = checked();
        assert!(matches!(
            book.add(Side::Bid, Price(1), 1_000_01),
            Err(BookError::QuantityOutOfRange(1_000_01))
        ));
        assert!(matches!(
            book.add(Side::Bid, Price(1), -1),
            Err(BookError::QuantityOutOfRange(-1))
        ));
    }

    #[test]
    fn rejected_add_leaves_book_unchanged() {
        let mut book = checked();
        book.add(Side::Bid, Price(32_99), 1).unwrap();
        book.add(Side::Bid, Price(200_00), 1).unwrap_err();

        assert_eq!(book.depth(Side::Bid).unwrap(), 1);
    }

    #[test]
    fn level_and_buffer_checks() {
        let book = checked();
        let mut prices = [Price::ZERO; 4];
        let mut qty = [0; 4];

        assert!(matches!(
            book.get_levels(Side::Bid, 11, &mut prices, &mut qty),
            Err(BookError::LevelOutOfRange(11))
        ));
        // Requested level must be at least 1
        assert!(matches!(
            book.get_levels(Side::Bid, 0, &mut prices, &mut qty),
            Err(BookError::LevelOutOfRange(0))
        ));
        assert!(matches!(
            book.get_levels(Side::Bid, 5, &mut prices, &mut qty),
            Err(BookError::OutputTooSmall { need: 5, got: 4 })
        ));
        book.get_levels(Side::Bid, 4, &mut prices, &mut qty).unwrap();
        assert_eq!(prices, [Price::NONE; 4]);
    }
}
