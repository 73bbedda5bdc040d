//! Stock Manager Tests
//!
//! Adding and removing titles, restocking, editor-pick curation and stock
//! inspection. Every rejected request must leave the store unchanged.

use crate::*;

// =============================================================================
// ADD BOOKS
// =============================================================================

#[test]
fn test_add_books_then_get_books() {
    for (mode, store) in all_stores() {
        add_range(&store, 10, 5, 3);
        let books = store.get_books().unwrap();
        let isbns: Vec<i32> = books.iter().map(|b| b.isbn.get()).collect();
        assert_eq!(isbns, vec![10, 11, 12, 13, 14], "{mode}");
        assert!(books.iter().all(|b| b.num_copies == 3 && b.num_sale_misses == 0));
    }
}

#[test]
fn test_add_books_counters_start_at_zero() {
    for (mode, store) in all_stores() {
        let mut incoming = book(1, 4);
        incoming.num_sale_misses = 9;
        incoming.num_times_rated = 3;
        incoming.total_rating = 12;
        store.add_books(&[incoming]).unwrap();

        let stored = stock_of(&store, 1);
        assert_eq!(stored.num_sale_misses, 0, "{mode}");
        assert_eq!(stored.num_times_rated, 0, "{mode}");
        assert_eq!(stored.total_rating, 0, "{mode}");
    }
}

#[test]
fn test_add_existing_book_rejects_whole_batch() {
    for (mode, store) in stores_with_default_book() {
        let err = store
            .add_books(&[book(1, 1), default_book(), book(2, 1)])
            .unwrap_err();
        assert_eq!(err, Error::DuplicateKey { isbn: Isbn(TEST_ISBN) }, "{mode}");
        assert_eq!(store.get_books().unwrap(), vec![default_book()], "{mode}");
    }
}

#[test]
fn test_add_duplicate_within_batch() {
    for (mode, store) in all_stores() {
        let err = store.add_books(&[book(7, 1), book(7, 2)]).unwrap_err();
        assert_eq!(err, Error::DuplicateKey { isbn: Isbn(7) }, "{mode}");
        assert!(store.get_books().unwrap().is_empty(), "{mode}");
    }
}

#[test]
fn test_add_invalid_books() {
    let invalid = [
        StockBook::new(Isbn(0), "t", "a", 1.0, 1, false),
        StockBook::new(Isbn(1), "", "a", 1.0, 1, false),
        StockBook::new(Isbn(1), "t", "", 1.0, 1, false),
        StockBook::new(Isbn(1), "t", "a", -1.0, 1, false),
        StockBook::new(Isbn(1), "t", "a", 1.0, 0, false),
    ];
    for (mode, store) in stores_with_default_book() {
        for b in &invalid {
            let err = store.add_books(&[book(2, 1), b.clone()]).unwrap_err();
            assert!(err.is_validation(), "{mode}: {err}");
        }
        assert_eq!(store.get_books().unwrap().len(), 1, "{mode}");
    }
}

// =============================================================================
// ADD COPIES
// =============================================================================

#[test]
fn test_add_copies() {
    for (mode, store) in stores_with_default_book() {
        store.add_copies(&[BookCopy::new(TEST_ISBN, 3)]).unwrap();
        assert_eq!(stock_of(&store, TEST_ISBN).num_copies, NUM_COPIES + 3, "{mode}");
    }
}

#[test]
fn test_add_copies_invalid_requests_change_nothing() {
    for (mode, store) in stores_with_default_book() {
        let requests = [
            (vec![BookCopy::new(TEST_ISBN, 1), BookCopy::new(-3, 1)], Error::InvalidKey { isbn: Isbn(-3) }),
            (vec![BookCopy::new(TEST_ISBN, 1), BookCopy::new(99, 1)], Error::UnknownKey { isbn: Isbn(99) }),
            (
                vec![BookCopy::new(TEST_ISBN, 1), BookCopy::new(TEST_ISBN, 0)],
                Error::InvalidQuantity { isbn: Isbn(TEST_ISBN), quantity: 0 },
            ),
        ];
        for (request, expected) in requests {
            assert_eq!(store.add_copies(&request).unwrap_err(), expected, "{mode}");
        }
        assert_eq!(stock_of(&store, TEST_ISBN).num_copies, NUM_COPIES, "{mode}");
    }
}

// =============================================================================
// EDITOR PICKS
// =============================================================================

#[test]
fn test_update_editor_picks() {
    for (mode, store) in stores_with_default_book() {
        store
            .update_editor_picks(&[BookEditorPick::new(TEST_ISBN, false)])
            .unwrap();
        assert!(!stock_of(&store, TEST_ISBN).editor_pick, "{mode}");
        assert!(store.get_editor_picks(1).unwrap().is_empty(), "{mode}");
    }
}

#[test]
fn test_update_editor_picks_unknown_isbn_changes_nothing() {
    for (mode, store) in stores_with_default_book() {
        let err = store
            .update_editor_picks(&[
                BookEditorPick::new(TEST_ISBN, false),
                BookEditorPick::new(42, true),
            ])
            .unwrap_err();
        assert_eq!(err, Error::UnknownKey { isbn: Isbn(42) }, "{mode}");
        assert!(stock_of(&store, TEST_ISBN).editor_pick, "{mode}");
    }
}

// =============================================================================
// STOCK QUERIES
// =============================================================================

#[test]
fn test_get_stock_books_by_isbn_keeps_request_order() {
    for (mode, store) in all_stores() {
        add_range(&store, 1, 3, 2);
        let books = store
            .get_stock_books_by_isbn(&[Isbn(3), Isbn(1), Isbn(3)])
            .unwrap();
        let isbns: Vec<i32> = books.iter().map(|b| b.isbn.get()).collect();
        assert_eq!(isbns, vec![3, 1, 3], "{mode}");
    }
}

#[test]
fn test_get_stock_books_by_isbn_errors() {
    for (mode, store) in stores_with_default_book() {
        assert_eq!(
            store.get_stock_books_by_isbn(&[Isbn(TEST_ISBN), Isbn(0)]),
            Err(Error::InvalidKey { isbn: Isbn(0) }),
            "{mode}"
        );
        assert_eq!(
            store.get_stock_books_by_isbn(&[Isbn(TEST_ISBN), Isbn(5)]),
            Err(Error::UnknownKey { isbn: Isbn(5) }),
            "{mode}"
        );
    }
}

// =============================================================================
// REMOVAL
// =============================================================================

#[test]
fn test_remove_books() {
    for (mode, store) in all_stores() {
        add_range(&store, 1, 4, 1);
        store.remove_books(&[Isbn(2), Isbn(4)]).unwrap();
        let isbns: Vec<i32> = store.get_books().unwrap().iter().map(|b| b.isbn.get()).collect();
        assert_eq!(isbns, vec![1, 3], "{mode}");
    }
}

#[test]
fn test_remove_books_unknown_isbn_removes_nothing() {
    for (mode, store) in all_stores() {
        add_range(&store, 1, 3, 1);
        let err = store.remove_books(&[Isbn(1), Isbn(9)]).unwrap_err();
        assert_eq!(err, Error::UnknownKey { isbn: Isbn(9) }, "{mode}");
        assert_eq!(store.get_books().unwrap().len(), 3, "{mode}");
    }
}

#[test]
fn test_remove_all_books() {
    for (mode, store) in all_stores() {
        add_range(&store, 1, 10, 1);
        store.remove_all_books().unwrap();
        assert!(store.get_books().unwrap().is_empty(), "{mode}");
        // Removed ISBNs can be added again
        add_range(&store, 1, 2, 1);
        assert_eq!(store.get_books().unwrap().len(), 2, "{mode}");
    }
}
