//! Workload Harness Tests

use certainstore::workload::{run_workload, WorkloadConfiguration, WorkloadReport};

use crate::*;

fn quick_config() -> WorkloadConfiguration {
    WorkloadConfiguration {
        initial_books: 200,
        warm_up_runs: 20,
        num_actual_runs: 100,
        seed: Some(17),
        ..WorkloadConfiguration::new()
    }
}

#[test]
fn test_workload_keeps_store_consistent() {
    for (mode, store) in all_stores() {
        let report = run_workload(Arc::clone(&store), &quick_config(), 4).unwrap();
        assert_eq!(report.threads, 4, "{mode}");
        assert_eq!(report.initial_books, 200, "{mode}");

        let books = store.get_books().unwrap();
        assert!(books.len() >= 200, "{mode}");
        assert!(books.iter().all(|b| b.num_copies >= 0), "{mode}");
        // Customers only ever buy editor picks
        assert!(
            store
                .get_books_in_demand()
                .unwrap()
                .iter()
                .all(|b| b.editor_pick),
            "{mode}"
        );
    }
}

#[test]
fn test_workload_report_csv_shape() {
    let store = StoreOptions::new().seed(2).open();
    let report = run_workload(store, &quick_config(), 2).unwrap();
    let row = report.to_csv();
    assert_eq!(
        row.split(',').count(),
        WorkloadReport::CSV_HEADER.split(',').count()
    );
    assert!(report.frequent_percent > 0.0);
}
