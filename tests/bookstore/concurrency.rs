//! Concurrency Tests
//!
//! Multi-threaded scenarios: readers never observe a half-applied batch,
//! writers on disjoint or overlapping entries never lose updates, and lock
//! ordering keeps opposite-order batches from deadlocking.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Barrier;
use std::thread;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::*;

const AMOUNT: i32 = 3;

// =============================================================================
// ATOMIC VISIBILITY
// =============================================================================

#[test]
fn test_buy_and_restock_batches_are_atomic_to_readers() {
    const ROUNDS: usize = 500;
    const READERS: usize = 3;

    for (mode, store) in all_stores() {
        let isbns = add_range(&store, 1, 8, 10);
        let original: Vec<i32> = store
            .get_stock_books_by_isbn(&isbns)
            .unwrap()
            .iter()
            .map(|b| b.num_copies)
            .collect();
        let copies: Vec<BookCopy> = isbns.iter().map(|&i| BookCopy::new(i, AMOUNT)).collect();
        let done = AtomicBool::new(false);
        let barrier = Barrier::new(READERS + 1);

        thread::scope(|s| {
            s.spawn(|| {
                barrier.wait();
                for _ in 0..ROUNDS {
                    store.buy_books(&copies).unwrap();
                    store.add_copies(&copies).unwrap();
                }
                done.store(true, Ordering::Release);
            });

            for _ in 0..READERS - 1 {
                s.spawn(|| {
                    barrier.wait();
                    while !done.load(Ordering::Acquire) {
                        let now: Vec<i32> = store
                            .get_stock_books_by_isbn(&isbns)
                            .unwrap()
                            .iter()
                            .map(|b| b.num_copies)
                            .collect();
                        let all_original = now == original;
                        let all_bought = now.iter().zip(&original).all(|(n, o)| *n == o - AMOUNT);
                        assert!(all_original || all_bought, "{mode}: torn read {now:?}");
                    }
                });
            }

            barrier.wait();
            // The last reader goes through the full-table snapshot
            while !done.load(Ordering::Acquire) {
                let now: Vec<i32> = store.get_books().unwrap().iter().map(|b| b.num_copies).collect();
                let all_original = now == original;
                let all_bought = now.iter().zip(&original).all(|(n, o)| *n == o - AMOUNT);
                assert!(all_original || all_bought, "{mode}: torn snapshot {now:?}");
            }
        });

        let after: Vec<i32> = store.get_books().unwrap().iter().map(|b| b.num_copies).collect();
        assert_eq!(after, original, "{mode}");
    }
}

#[test]
fn test_concurrent_buy_restock_cycles_cancel_out() {
    const THREADS: usize = 6;
    const CYCLES: usize = 300;

    for (mode, store) in all_stores() {
        // Enough stock that every buy succeeds even if all threads buy at once
        let isbns = add_range(&store, 1, 5, THREADS as i32 * AMOUNT);
        let copies: Vec<BookCopy> = isbns.iter().map(|&i| BookCopy::new(i, AMOUNT)).collect();
        let barrier = Barrier::new(THREADS);

        thread::scope(|s| {
            for _ in 0..THREADS {
                s.spawn(|| {
                    barrier.wait();
                    for _ in 0..CYCLES {
                        store.buy_books(&copies).unwrap();
                        store.add_copies(&copies).unwrap();
                    }
                });
            }
        });

        let books = store.get_books().unwrap();
        assert!(
            books.iter().all(|b| b.num_copies == THREADS as i32 * AMOUNT),
            "{mode}"
        );
        assert!(store.get_books_in_demand().unwrap().is_empty(), "{mode}");
    }
}

// =============================================================================
// NO LOST UPDATES
// =============================================================================

#[test]
fn test_disjoint_restocks_in_parallel() {
    const THREADS: i32 = 4;
    const ROUNDS: i32 = 250;

    for (mode, store) in all_stores() {
        add_range(&store, 1, THREADS * 4, 1);
        let barrier = Barrier::new(THREADS as usize);

        thread::scope(|s| {
            for t in 0..THREADS {
                let store = &store;
                let barrier = &barrier;
                s.spawn(move || {
                    let mine: Vec<BookCopy> =
                        (0..4).map(|k| BookCopy::new(1 + t * 4 + k, 1)).collect();
                    barrier.wait();
                    for _ in 0..ROUNDS {
                        store.add_copies(&mine).unwrap();
                    }
                });
            }
        });

        let books = store.get_books().unwrap();
        assert!(books.iter().all(|b| b.num_copies == 1 + ROUNDS), "{mode}");
    }
}

#[test]
fn test_competing_buyers_never_oversell() {
    const BUYERS: usize = 8;
    const STOCK: i32 = 1_000;

    for (mode, store) in all_stores() {
        add_range(&store, 1, 2, STOCK);
        let sold = AtomicUsize::new(0);
        let barrier = Barrier::new(BUYERS);

        thread::scope(|s| {
            for _ in 0..BUYERS {
                s.spawn(|| {
                    barrier.wait();
                    loop {
                        match store.buy_books(&[BookCopy::new(1, 1), BookCopy::new(2, 1)]) {
                            Ok(()) => {
                                sold.fetch_add(1, Ordering::Relaxed);
                            }
                            Err(e) if e.is_insufficient_stock() => break,
                            Err(e) => panic!("{mode}: unexpected error {e}"),
                        }
                    }
                });
            }
        });

        assert_eq!(sold.load(Ordering::Relaxed), STOCK as usize, "{mode}");
        let books = store.get_books().unwrap();
        assert!(books.iter().all(|b| b.num_copies == 0), "{mode}");
        // Every buyer fails exactly once when it finds the shelf empty
        assert!(books.iter().all(|b| b.num_sale_misses == BUYERS as i64), "{mode}");
    }
}

#[test]
fn test_opposite_order_batches_do_not_deadlock() {
    const ROUNDS: i32 = 500;
    const ADD: i32 = 2;

    for (mode, store) in all_stores() {
        let isbns = add_range(&store, 1, 6, 1);
        let forward: Vec<BookCopy> = isbns.iter().map(|&i| BookCopy::new(i, ADD)).collect();
        let backward: Vec<BookCopy> = forward.iter().rev().copied().collect();
        let barrier = Barrier::new(2);

        thread::scope(|s| {
            for batch in [&forward, &backward] {
                let store = &store;
                let barrier = &barrier;
                s.spawn(move || {
                    barrier.wait();
                    for _ in 0..ROUNDS {
                        store.add_copies(batch).unwrap();
                    }
                });
            }
        });

        let books = store.get_books().unwrap();
        assert!(books.iter().all(|b| b.num_copies == 1 + 2 * ROUNDS * ADD), "{mode}");
    }
}

// =============================================================================
// STRUCTURAL CHANGES
// =============================================================================

#[test]
fn test_structural_changes_alongside_value_operations() {
    const ROUNDS: i32 = 200;

    for (mode, store) in all_stores() {
        let stable = add_range(&store, 1, 5, 1);
        let restock: Vec<BookCopy> = stable.iter().map(|&i| BookCopy::new(i, 1)).collect();
        let barrier = Barrier::new(3);

        thread::scope(|s| {
            s.spawn(|| {
                barrier.wait();
                for round in 0..ROUNDS {
                    let isbn = 1_000 + round;
                    store.add_books(&[book(isbn, 1)]).unwrap();
                    store.remove_books(&[Isbn(isbn)]).unwrap();
                }
            });
            s.spawn(|| {
                barrier.wait();
                for _ in 0..ROUNDS {
                    store.add_copies(&restock).unwrap();
                }
            });
            s.spawn(|| {
                barrier.wait();
                for _ in 0..ROUNDS {
                    store
                        .rate_books(&[BookRating::new(1, 4), BookRating::new(5, 2)])
                        .unwrap();
                }
            });
        });

        let books = store.get_books().unwrap();
        assert_eq!(books.len(), 5, "{mode}");
        assert!(books.iter().all(|b| b.num_copies == 1 + ROUNDS), "{mode}");
        assert_eq!(stock_of(&store, 1).num_times_rated, ROUNDS as i64, "{mode}");
        assert_eq!(stock_of(&store, 5).total_rating, 2 * ROUNDS as i64, "{mode}");
    }
}

// =============================================================================
// RANDOMIZED STRESS
// =============================================================================

#[test]
fn test_random_batches_conserve_copies() {
    const THREADS: u64 = 6;
    const ROUNDS: usize = 300;
    const BOOKS: i32 = 12;

    for (mode, store) in all_stores() {
        add_range(&store, 1, BOOKS, 20);
        let net = AtomicUsize::new(0);
        let added = AtomicUsize::new(0);

        thread::scope(|s| {
            for seed in 0..THREADS {
                let (store, net, added) = (&store, &net, &added);
                s.spawn(move || {
                    let mut rng = StdRng::seed_from_u64(seed);
                    for _ in 0..ROUNDS {
                        let len = rng.gen_range(1..=4);
                        let batch: Vec<BookCopy> = (0..len)
                            .map(|_| BookCopy::new(rng.gen_range(1..=BOOKS), rng.gen_range(1..=3)))
                            .collect();
                        let total: usize = batch.iter().map(|c| c.num_copies as usize).sum();
                        if rng.gen_bool(0.5) {
                            if store.buy_books(&batch).is_ok() {
                                net.fetch_add(total, Ordering::Relaxed);
                            }
                        } else {
                            store.add_copies(&batch).unwrap();
                            added.fetch_add(total, Ordering::Relaxed);
                        }
                    }
                });
            }
        });

        let books = store.get_books().unwrap();
        let remaining: i64 = books.iter().map(|b| i64::from(b.num_copies)).sum();
        let expected = i64::from(BOOKS * 20) + added.load(Ordering::Relaxed) as i64
            - net.load(Ordering::Relaxed) as i64;
        assert_eq!(remaining, expected, "{mode}");
        assert!(books.iter().all(|b| b.num_copies >= 0), "{mode}");
    }
}
