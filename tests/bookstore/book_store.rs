//! Customer Tests
//!
//! Purchases, ratings and the public book view.

use proptest::prelude::*;

use crate::*;
use certainstore::Shortfall;

// =============================================================================
// BUY
// =============================================================================

#[test]
fn test_buy_all_copies_default_book() {
    for (mode, store) in stores_with_default_book() {
        store
            .buy_books(&[BookCopy::new(TEST_ISBN, NUM_COPIES)])
            .unwrap();

        let books = store.get_books_by_isbn(&[Isbn(TEST_ISBN)]).unwrap();
        assert_eq!(books, vec![default_book().to_book()], "{mode}");
        assert_eq!(stock_of(&store, TEST_ISBN).num_copies, 0, "{mode}");
    }
}

#[test]
fn test_buy_invalid_requests_change_nothing() {
    for (mode, store) in stores_with_default_book() {
        let requests = [
            (vec![BookCopy::new(TEST_ISBN, 1), BookCopy::new(-1, 1)], Error::InvalidKey { isbn: Isbn(-1) }),
            (vec![BookCopy::new(TEST_ISBN, 1), BookCopy::new(100_000, 1)], Error::UnknownKey { isbn: Isbn(100_000) }),
            (
                vec![BookCopy::new(TEST_ISBN, -1)],
                Error::InvalidQuantity { isbn: Isbn(TEST_ISBN), quantity: -1 },
            ),
        ];
        for (request, expected) in requests {
            assert_eq!(store.buy_books(&request).unwrap_err(), expected, "{mode}");
        }
        assert_eq!(stock_of(&store, TEST_ISBN), default_book(), "{mode}");
    }
}

#[test]
fn test_buy_too_many_books_records_sale_misses() {
    for (mode, store) in stores_with_default_book() {
        let err = store
            .buy_books(&[BookCopy::new(TEST_ISBN, NUM_COPIES + 3)])
            .unwrap_err();
        match err {
            Error::InsufficientStock { shortfalls } => {
                assert_eq!(
                    shortfalls,
                    vec![Shortfall { isbn: Isbn(TEST_ISBN), requested: NUM_COPIES + 3, available: NUM_COPIES }],
                    "{mode}"
                );
            }
            other => panic!("{mode}: unexpected error {other}"),
        }

        let after = stock_of(&store, TEST_ISBN);
        assert_eq!(after.num_copies, NUM_COPIES, "{mode}");
        assert_eq!(after.num_sale_misses, 3, "{mode}");
    }
}

#[test]
fn test_buy_mixed_batch_is_all_or_nothing() {
    for (mode, store) in all_stores() {
        add_range(&store, 1, 4, 2);
        // 2 and 4 are short; 1 and 3 would be fine on their own
        let err = store
            .buy_books(&[
                BookCopy::new(4, 5),
                BookCopy::new(1, 1),
                BookCopy::new(2, 3),
                BookCopy::new(3, 2),
            ])
            .unwrap_err();
        let Error::InsufficientStock { shortfalls } = err else {
            panic!("{mode}: expected insufficient stock");
        };
        let short: Vec<i32> = shortfalls.iter().map(|s| s.isbn.get()).collect();
        assert_eq!(short, vec![2, 4], "{mode}");

        let books = store.get_books().unwrap();
        assert!(books.iter().all(|b| b.num_copies == 2), "{mode}");
        let misses: Vec<i64> = books.iter().map(|b| b.num_sale_misses).collect();
        assert_eq!(misses, vec![0, 1, 0, 3], "{mode}");
    }
}

#[test]
fn test_buy_then_restock_restores_stock() {
    for (mode, store) in stores_with_default_book() {
        store.buy_books(&[BookCopy::new(TEST_ISBN, 2)]).unwrap();
        store.add_copies(&[BookCopy::new(TEST_ISBN, 2)]).unwrap();
        assert_eq!(stock_of(&store, TEST_ISBN), default_book(), "{mode}");
    }
}

// =============================================================================
// RATINGS
// =============================================================================

#[test]
fn test_rate_books_accumulates() {
    for (mode, store) in stores_with_default_book() {
        store
            .rate_books(&[
                BookRating::new(TEST_ISBN, 5),
                BookRating::new(TEST_ISBN, 2),
            ])
            .unwrap();
        store.rate_books(&[BookRating::new(TEST_ISBN, 0)]).unwrap();

        let stock = stock_of(&store, TEST_ISBN);
        assert_eq!(stock.num_times_rated, 3, "{mode}");
        assert_eq!(stock.total_rating, 7, "{mode}");
        assert!((stock.average_rating() - 7.0 / 3.0).abs() < 1e-6, "{mode}");
    }
}

#[test]
fn test_rate_books_invalid_requests_change_nothing() {
    for (mode, store) in stores_with_default_book() {
        let requests = [
            (vec![BookRating::new(TEST_ISBN, 3), BookRating::new(TEST_ISBN, 6)], Error::InvalidRating { isbn: Isbn(TEST_ISBN), rating: 6 }),
            (vec![BookRating::new(TEST_ISBN, 3), BookRating::new(TEST_ISBN, -1)], Error::InvalidRating { isbn: Isbn(TEST_ISBN), rating: -1 }),
            (vec![BookRating::new(TEST_ISBN, 3), BookRating::new(0, 3)], Error::InvalidKey { isbn: Isbn(0) }),
            (vec![BookRating::new(TEST_ISBN, 3), BookRating::new(8, 3)], Error::UnknownKey { isbn: Isbn(8) }),
        ];
        for (request, expected) in requests {
            assert_eq!(store.rate_books(&request).unwrap_err(), expected, "{mode}");
        }
        let stock = stock_of(&store, TEST_ISBN);
        assert_eq!(stock.num_times_rated, 0, "{mode}");
        assert_eq!(stock.total_rating, 0, "{mode}");
    }
}

// =============================================================================
// PUBLIC VIEW
// =============================================================================

#[test]
fn test_get_books_by_isbn() {
    for (mode, store) in all_stores() {
        add_range(&store, 20, 3, 1);
        let books = store.get_books_by_isbn(&[Isbn(22), Isbn(20)]).unwrap();
        assert_eq!(books, vec![book(22, 1).to_book(), book(20, 1).to_book()], "{mode}");
    }
}

#[test]
fn test_get_books_by_isbn_errors() {
    for (mode, store) in stores_with_default_book() {
        assert_eq!(
            store.get_books_by_isbn(&[Isbn(-5)]),
            Err(Error::InvalidKey { isbn: Isbn(-5) }),
            "{mode}"
        );
        assert_eq!(
            store.get_books_by_isbn(&[Isbn(TEST_ISBN), Isbn(6)]),
            Err(Error::UnknownKey { isbn: Isbn(6) }),
            "{mode}"
        );
    }
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn buy_is_all_or_nothing(
        stock in prop::collection::vec(1i32..6, 1..6),
        request in prop::collection::vec((0usize..6, 1i32..4), 0..8),
    ) {
        for (mode, store) in all_stores() {
            let isbns = add_range(&store, 1, stock.len() as i32, 1);
            let restock: Vec<BookCopy> = isbns
                .iter()
                .zip(&stock)
                .filter(|(_, n)| **n > 1)
                .map(|(&i, &n)| BookCopy::new(i, n - 1))
                .collect();
            store.add_copies(&restock).unwrap();

            let copies: Vec<BookCopy> = request
                .iter()
                .map(|&(k, n)| BookCopy::new(isbns[k % isbns.len()], n))
                .collect();
            let mut wanted = vec![0i32; stock.len()];
            for &(k, n) in &request {
                wanted[k % stock.len()] += n;
            }

            let result = store.buy_books(&copies);
            let after = store.get_books().unwrap();
            let fits = wanted.iter().zip(&stock).all(|(w, s)| w <= s);
            prop_assert_eq!(result.is_ok(), fits, "{}", mode);
            for (i, b) in after.iter().enumerate() {
                if fits {
                    prop_assert_eq!(b.num_copies, stock[i] - wanted[i]);
                    prop_assert_eq!(b.num_sale_misses, 0);
                } else {
                    prop_assert_eq!(b.num_copies, stock[i]);
                    let missing = (wanted[i] - stock[i]).max(0);
                    prop_assert_eq!(b.num_sale_misses, i64::from(missing));
                }
            }
        }
    }
}
