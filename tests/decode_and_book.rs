// Allow our dollar.cents digit grouping convention (e.g., 100_00 = $100.00)
#![allow(clippy::inconsistent_digit_grouping)]

//! End-to-end scenarios: wire messages through the decoder into each engine.
//!
//! The same message tape is replayed into every engine and the resulting
//! book state is checked level by level, so the decoder, the symbol packing,
//! and the three engines are all exercised through one pipeline.

use tickbook::depth::{levels_for_size, size_up_to_level};
use tickbook::{
    ArtBook, DedicatedDecoder, DirectBook, FeedBooks, OrderBook, Price, Side, SymbolId, TreeBook,
};

/// Three bid and three offer levels for one instrument.
const BASIC_TAPE: &[&str] = &[
    "t=1638848595|i=VOD.L|p=32.99|q=123.00|s=b",
    "t=1638848596|i=VOD.L|p=32.98|q=102.00|s=b",
    "t=1638848597|i=VOD.L|p=32.97|q=103.00|s=b",
    "t=1638848598|i=VOD.L|p=33.11|q=321.00|s=a",
    "t=1638848599|i=VOD.L|p=33.12|q=102.00|s=a",
    "t=1638848600|i=VOD.L|p=33.13|q=103.00|s=a",
];

/// Removes the middle level on each side of the basic tape.
const MID_REMOVALS: &[&str] = &[
    "t=1638848601|i=VOD.L|p=32.98|q=0.00|s=b",
    "t=1638848602|i=VOD.L|p=33.12|q=0.00|s=a",
];

/// Removes the best level on each side of the basic tape.
const TOP_REMOVALS: &[&str] = &[
    "t=1638848601|i=VOD.L|p=32.99|q=0.00|s=b",
    "t=1638848602|i=VOD.L|p=33.11|q=0.00|s=a",
];

/// Replay a tape into `book` through the hot-path decoder.
fn replay<B: OrderBook>(book: &mut B, tape: &[&str]) {
    let mut decoder = DedicatedDecoder::new();
    for msg in tape {
        let mut route = |_stamp, _symbol, side: Side, price, quantity| {
            if side.is_book_side() {
                book.add(side, price, quantity);
            }
        };
        decoder.decode(msg, Some(&mut route));
    }
}

/// Run `check` against every engine after replaying the given tapes.
fn with_each_engine(tapes: &[&[&str]], check: impl Fn(&dyn OrderBook)) {
    let mut tree = TreeBook::new();
    let mut direct = DirectBook::new(4000);
    let mut art = ArtBook::new();
    for tape in tapes {
        replay(&mut tree, tape);
        replay(&mut direct, tape);
        replay(&mut art, tape);
    }
    check(&tree);
    check(&direct);
    check(&art);
}

#[test]
fn basic_tape_builds_three_levels_per_side() {
    with_each_engine(&[BASIC_TAPE], |book| {
        assert_eq!(book.depth(Side::Bid), 3);
        assert_eq!(book.depth(Side::Offer), 3);

        assert_eq!(book.get(Side::Bid, Price(32_99)), Some(123_00));
        assert_eq!(book.get(Side::Bid, Price(32_98)), Some(102_00));
        assert_eq!(book.get(Side::Bid, Price(32_97)), Some(103_00));
        assert_eq!(book.get(Side::Offer, Price(33_11)), Some(321_00));
    });
}

#[test]
fn basic_tape_cumulative_sizes() {
    with_each_engine(&[BASIC_TAPE], |book| {
        assert_eq!(size_up_to_level(book, Side::Bid, 1), 123_00);
        assert_eq!(size_up_to_level(book, Side::Bid, 2), 225_00);
        assert_eq!(size_up_to_level(book, Side::Bid, 3), 328_00);

        assert_eq!(levels_for_size(book, Side::Bid, 123_00), 1);
        assert_eq!(levels_for_size(book, Side::Bid, 200_00), 2);
        assert_eq!(levels_for_size(book, Side::Bid, 328_00), 3);
    });
}

#[test]
fn basic_tape_mid_price() {
    with_each_engine(&[BASIC_TAPE], |book| {
        // floor((32.99 + 33.11) / 2) = 33.05
        assert_eq!(book.mid_price(), Some(Price(33_05)));
    });
}

#[test]
fn mid_level_removals_leave_best_untouched() {
    with_each_engine(&[BASIC_TAPE, MID_REMOVALS], |book| {
        assert_eq!(book.depth(Side::Bid), 2);
        assert_eq!(book.depth(Side::Offer), 2);

        assert_eq!(size_up_to_level(book, Side::Bid, 1), 123_00);
        assert_eq!(size_up_to_level(book, Side::Bid, 2), 226_00);

        assert_eq!(book.mid_price(), Some(Price(33_05)));
        assert_eq!(book.get(Side::Bid, Price(32_98)), None);
        assert_eq!(book.get(Side::Offer, Price(33_12)), None);
    });
}

#[test]
fn top_level_removals_promote_next_best() {
    with_each_engine(&[BASIC_TAPE, TOP_REMOVALS], |book| {
        assert_eq!(book.depth(Side::Bid), 2);
        assert_eq!(book.depth(Side::Offer), 2);

        let mut prices = [Price::ZERO; 3];
        let mut qty = [0i64; 3];
        book.get_levels(Side::Bid, 3, &mut prices, &mut qty);
        assert_eq!(prices, [Price(32_98), Price(32_97), Price::NONE]);
        assert_eq!(qty, [102_00, 103_00, 0]);

        // floor((32.98 + 33.12) / 2) = 33.05
        assert_eq!(book.mid_price(), Some(Price(33_05)));
    });
}

#[test]
fn overwrite_replaces_level_in_place() {
    let overwrite = ["t=1638848601|i=VOD.L|p=32.99|q=7.50|s=b"];
    with_each_engine(&[BASIC_TAPE, &overwrite], |book| {
        assert_eq!(book.depth(Side::Bid), 3);
        assert_eq!(book.get(Side::Bid, Price(32_99)), Some(7_50));
        assert_eq!(size_up_to_level(book, Side::Bid, 3), 212_50);
    });
}

// === Feed routing ===

#[test]
fn feed_replays_tape_per_symbol() {
    let mut feed: FeedBooks<TreeBook> = FeedBooks::new();
    for msg in BASIC_TAPE {
        feed.apply(msg).unwrap();
    }
    feed.apply("t=1638848601|i=BT.L|p=18.02|q=50.00|s=b").unwrap();

    assert_eq!(feed.len(), 2);

    let vod = feed.book(SymbolId::pack("VOD.L").unwrap()).unwrap();
    assert_eq!(vod.depth(Side::Bid), 3);
    assert_eq!(vod.mid_price(), Some(Price(33_05)));

    let bt = feed.book(SymbolId::pack("BT.L").unwrap()).unwrap();
    assert_eq!(bt.get(Side::Bid, Price(18_02)), Some(50_00));
}

#[test]
fn feed_clear_message_wipes_one_book() {
    let mut feed: FeedBooks<ArtBook> = FeedBooks::new();
    for msg in BASIC_TAPE {
        feed.apply(msg).unwrap();
    }
    feed.apply("t=1638848601|i=BT.L|p=18.02|q=50.00|s=b").unwrap();
    feed.apply("t=1638848602|i=VOD.L|p=0.00|q=0.00|s=c").unwrap();

    let vod = feed.book(SymbolId::pack("VOD.L").unwrap()).unwrap();
    assert_eq!(vod.depth(Side::Bid), 0);
    assert_eq!(vod.depth(Side::Offer), 0);

    let bt = feed.book(SymbolId::pack("BT.L").unwrap()).unwrap();
    assert_eq!(bt.depth(Side::Bid), 1);
}

#[test]
fn feed_then_checked_snapshot() {
    use tickbook::CheckedBook;

    let mut book = CheckedBook::new(TreeBook::new(), Price(100_00), 10_000_00, 10);
    let mut decoder = DedicatedDecoder::new();
    for msg in BASIC_TAPE {
        let mut route = |_t, _i, side: Side, price, qty| {
            if side.is_book_side() {
                book.add(side, price, qty).unwrap();
            }
        };
        decoder.decode(msg, Some(&mut route));
    }

    let mut prices = [Price::ZERO; 5];
    let mut qty = [0i64; 5];
    book.get_levels(Side::Offer, 5, &mut prices, &mut qty).unwrap();
    assert_eq!(prices[..3], [Price(33_11), Price(33_12), Price(33_13)]);
    assert_eq!(prices[3..], [Price::NONE, Price::NONE]);
}
