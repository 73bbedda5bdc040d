//! Query Tests
//!
//! Editor picks, top-rated ranking and the in-demand report.

use std::collections::BTreeSet;

use crate::*;

fn picks_setup(store: &Arc<dyn Store>, total: i32, picked: i32) {
    add_range(store, 1, total, 1);
    let picks: Vec<BookEditorPick> = (1..=picked).map(|i| BookEditorPick::new(i, true)).collect();
    store.update_editor_picks(&picks).unwrap();
}

// =============================================================================
// EDITOR PICKS
// =============================================================================

#[test]
fn test_editor_picks_returns_distinct_picks() {
    for (mode, store) in all_stores() {
        picks_setup(&store, 20, 8);
        for k in 1..=8 {
            let picks = store.get_editor_picks(k).unwrap();
            assert_eq!(picks.len(), k as usize, "{mode}");
            let distinct: BTreeSet<Isbn> = picks.iter().map(|b| b.isbn).collect();
            assert_eq!(distinct.len(), picks.len(), "{mode}");
            assert!(picks.iter().all(|b| b.editor_pick && b.isbn.get() <= 8), "{mode}");
        }
    }
}

#[test]
fn test_editor_picks_fewer_than_requested() {
    for (mode, store) in all_stores() {
        picks_setup(&store, 10, 3);
        let picks = store.get_editor_picks(7).unwrap();
        let isbns: Vec<i32> = picks.iter().map(|b| b.isbn.get()).collect();
        assert_eq!(isbns, vec![1, 2, 3], "{mode}");
    }
}

#[test]
fn test_editor_picks_zero_and_negative() {
    for (mode, store) in stores_with_default_book() {
        assert!(store.get_editor_picks(0).unwrap().is_empty(), "{mode}");
        assert!(
            matches!(store.get_editor_picks(-1), Err(Error::InvalidArgument(_))),
            "{mode}"
        );
    }
}

#[test]
fn test_editor_picks_empty_store() {
    for (mode, store) in all_stores() {
        assert!(store.get_editor_picks(5).unwrap().is_empty(), "{mode}");
    }
}

#[test]
fn test_editor_picks_sampling_covers_all_picks() {
    for (mode, store) in all_stores() {
        picks_setup(&store, 6, 6);
        let mut seen = BTreeSet::new();
        for _ in 0..200 {
            seen.extend(store.get_editor_picks(2).unwrap().into_iter().map(|b| b.isbn));
        }
        assert_eq!(seen.len(), 6, "{mode}");
    }
}

// =============================================================================
// TOP RATED
// =============================================================================

#[test]
fn test_top_rated_order() {
    for (mode, store) in all_stores() {
        add_range(&store, 1, 5, 1);
        store
            .rate_books(&[
                BookRating::new(1, 2),
                BookRating::new(2, 5),
                BookRating::new(3, 4),
                BookRating::new(3, 5),
                BookRating::new(4, 5),
            ])
            .unwrap();
        // averages: 1 -> 2.0, 2 -> 5.0, 3 -> 4.5, 4 -> 5.0, 5 -> 0.0
        let top: Vec<i32> = store
            .get_top_rated_books(4)
            .unwrap()
            .iter()
            .map(|b| b.isbn.get())
            .collect();
        assert_eq!(top, vec![2, 4, 3, 1], "{mode}");
    }
}

#[test]
fn test_top_rated_more_than_available() {
    for (mode, store) in all_stores() {
        add_range(&store, 1, 3, 1);
        assert_eq!(store.get_top_rated_books(10).unwrap().len(), 3, "{mode}");
    }
}

#[test]
fn test_top_rated_invalid_count() {
    for (mode, store) in stores_with_default_book() {
        for n in [0, -3] {
            assert!(
                matches!(store.get_top_rated_books(n), Err(Error::InvalidArgument(_))),
                "{mode}"
            );
        }
    }
}

// =============================================================================
// IN DEMAND
// =============================================================================

#[test]
fn test_books_in_demand() {
    for (mode, store) in all_stores() {
        add_range(&store, 1, 4, 1);
        assert!(store.get_books_in_demand().unwrap().is_empty(), "{mode}");

        let _ = store.buy_books(&[BookCopy::new(3, 2)]);
        let _ = store.buy_books(&[BookCopy::new(1, 5), BookCopy::new(4, 1)]);

        let demand: Vec<(i32, i64)> = store
            .get_books_in_demand()
            .unwrap()
            .iter()
            .map(|b| (b.isbn.get(), b.num_sale_misses))
            .collect();
        assert_eq!(demand, vec![(1, 4), (3, 1)], "{mode}");
    }
}
