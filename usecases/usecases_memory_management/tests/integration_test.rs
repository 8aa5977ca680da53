//! Integration tests for usecases_memory_management crate
//!
//! These tests verify the placement strategies, split and coalescing
//! behaviour, and end-to-end allocate/release workflows through the
//! public table API.

use entities_memory_partition::{Partition, PartitionStatus};
use usecases_memory_management::{
    verify_layout, AllocationError, InitMode, PartitionTable, Strategy, TableConfig,
};

fn table_from(total: usize, partitions: Vec<Partition>) -> PartitionTable {
    PartitionTable::from_partitions(TableConfig::new(total).with_seed(11), partitions).unwrap()
}

fn assert_covered(table: &PartitionTable) {
    verify_layout(table.partitions(), table.total_size()).unwrap();
}

/// Free partitions of 30, 10 and 50 units separated by busy ones
fn three_holes() -> Vec<Partition> {
    vec![
        Partition::free(0, 30),
        Partition::busy(30, 5, "X"),
        Partition::free(35, 10),
        Partition::busy(45, 5, "Y"),
        Partition::free(50, 50),
    ]
}

#[test]
fn test_strategy_enum() {
    let strategies = vec![Strategy::FirstFit, Strategy::BestFit, Strategy::WorstFit];

    for strategy in &strategies {
        let _ = format!("{:?} {}", strategy, strategy);
    }

    assert_eq!(Strategy::default(), Strategy::FirstFit);
    assert_ne!(Strategy::FirstFit, Strategy::BestFit);
}

#[test]
fn test_strategy_selection() {
    let partitions = three_holes();
    assert_eq!(Strategy::FirstFit.select(&partitions, 10), Some(0));
    assert_eq!(Strategy::BestFit.select(&partitions, 10), Some(2));
    assert_eq!(Strategy::WorstFit.select(&partitions, 10), Some(4));
}

#[test]
fn test_strategy_drives_allocation() {
    let expected = [
        (Strategy::FirstFit, 0),
        (Strategy::BestFit, 35),
        (Strategy::WorstFit, 50),
    ];
    for (strategy, start) in expected {
        let mut table = table_from(100, three_holes());
        table.set_strategy(strategy);
        assert_eq!(table.try_allocate("P", 10), Ok(start), "{}", strategy);
        assert_covered(&table);
    }
}

#[test]
fn test_split_correctness() {
    let mut table = table_from(100, three_holes());
    table.set_strategy(Strategy::WorstFit);
    assert!(table.allocate("P", 20));

    let parts = table.partitions();
    assert_eq!(parts.len(), 6);
    assert_eq!(parts[4], Partition::busy(50, 20, "P"));
    assert_eq!(parts[5], Partition::free(70, 30));
    assert_covered(&table);
}

#[test]
fn test_exact_fit_no_split() {
    let mut table = table_from(100, three_holes());
    table.set_strategy(Strategy::BestFit);
    assert!(table.allocate("P", 10));

    assert_eq!(table.len(), 5);
    assert_eq!(table.partitions()[2], Partition::busy(35, 10, "P"));
}

#[test]
fn test_out_of_space_despite_total_free() {
    let mut table = table_from(100, three_holes());
    // 90 units free in total, largest hole is 50
    let result = table.try_allocate("P", 60);
    assert_eq!(
        result,
        Err(AllocationError::OutOfSpace { requested: 60, largest_free: 50 })
    );
    assert_eq!(table.partitions(), &three_holes()[..]);
}

#[test]
fn test_no_defragmentation() {
    let mut table = table_from(
        75,
        vec![
            Partition::free(0, 25),
            Partition::busy(25, 25, "A"),
            Partition::free(50, 25),
        ],
    );
    for strategy in Strategy::ALL {
        table.set_strategy(strategy);
        assert!(!table.allocate("P", 40));
    }
    assert_eq!(table.len(), 3);
}

#[test]
fn test_release_then_coalesce() {
    let mut table = table_from(
        200,
        vec![
            Partition::free(0, 100),
            Partition::busy(100, 50, "P"),
            Partition::free(150, 50),
        ],
    );
    assert!(table.release("P"));
    assert_eq!(table.partitions(), &[Partition::free(0, 200)]);
}

#[test]
fn test_multi_partition_release() {
    let mut table = PartitionTable::new(TableConfig::new(100)).unwrap();
    assert!(table.allocate("P", 10));
    assert!(table.allocate("Q", 10));
    assert!(table.allocate("P", 10));
    assert!(table.allocate("R", 10));

    assert!(table.release("P"));

    let views = table.snapshot();
    let owners: Vec<Option<&str>> = views.iter().map(|v| v.owner()).collect();
    assert_eq!(
        owners,
        vec![None, Some("Q"), None, Some("R"), None]
    );
    assert_eq!(table.owned_by("P").count(), 0);
    assert_covered(&table);
}

#[test]
fn test_round_trip_restores_single_partition() {
    let mut table = PartitionTable::new(TableConfig::new(512)).unwrap();
    assert!(table.allocate("P", 40));
    assert!(table.release("P"));
    assert_eq!(table.partitions(), &[Partition::free(0, 512)]);
}

#[test]
fn test_release_unknown_process() {
    let mut table = PartitionTable::new(TableConfig::new(64)).unwrap();
    assert!(!table.release("ghost"));
    assert_eq!(
        table.try_release("ghost"),
        Err(AllocationError::NotFound { process: "ghost".to_string() })
    );
}

#[test]
fn test_invalid_requests() {
    let mut table = PartitionTable::new(TableConfig::new(64)).unwrap();
    assert!(matches!(
        table.try_allocate("P", 0),
        Err(AllocationError::InvalidRequest(_))
    ));
    assert!(matches!(
        table.try_allocate("", 4),
        Err(AllocationError::InvalidRequest(_))
    ));
    assert!(matches!(
        table.try_release(""),
        Err(AllocationError::InvalidRequest(_))
    ));
    assert_eq!(table.len(), 1);
}

#[test]
fn test_invalid_layout_rejected() {
    let result = PartitionTable::from_partitions(
        TableConfig::new(100),
        vec![Partition::free(0, 40), Partition::free(50, 50)],
    );
    assert!(matches!(result, Err(AllocationError::InvalidLayout(_))));
}

#[test]
fn test_coalesce_idempotent_on_table() {
    let mut table = table_from(
        40,
        vec![
            Partition::free(0, 10),
            Partition::free(10, 10),
            Partition::busy(20, 10, "A"),
            Partition::free(30, 10),
        ],
    );
    assert_eq!(table.coalesce(), 1);
    let once = table.partitions().to_vec();
    assert_eq!(table.coalesce(), 0);
    assert_eq!(table.partitions(), &once[..]);
}

#[test]
fn test_invariant_holds_over_workload() {
    for strategy in Strategy::ALL {
        let config = TableConfig::new(1024)
            .with_strategy(strategy)
            .with_mode(InitMode::fragmented())
            .with_seed(2024);
        let mut table = PartitionTable::new(config).unwrap();

        let sizes = [12, 70, 5, 200, 33, 64, 1, 90, 48, 128];
        for (i, size) in sizes.iter().enumerate() {
            let _ = table.allocate(&format!("job{}", i % 4), *size);
            assert_covered(&table);
        }
        for i in [1, 3, 0, 2] {
            let _ = table.release(&format!("job{}", i));
            assert_covered(&table);
        }

        // Everything released: only the fragmented layout remains
        let usage = table.usage();
        assert_eq!(usage.used, 0);
        assert_eq!(usage.free + usage.reserved, 1024);
    }
}

#[test]
fn test_fragmented_layout_never_has_adjacent_free() {
    for seed in 0..32 {
        let config = TableConfig::new(1024)
            .with_mode(InitMode::fragmented())
            .with_seed(seed);
        let table = PartitionTable::new(config).unwrap();
        assert_covered(&table);
        for pair in table.partitions().windows(2) {
            assert!(!(pair[0].is_free() && pair[1].is_free()));
        }
    }
}

#[test]
fn test_fragmented_layout_reproducible() {
    let config = TableConfig::new(2048)
        .with_mode(InitMode::Fragmented { segments: 6 })
        .with_seed(99);
    let a = PartitionTable::new(config.clone()).unwrap();
    let b = PartitionTable::new(config).unwrap();
    assert_eq!(a.partitions(), b.partitions());
}

#[test]
fn test_reset_restores_mode() {
    let mut table = PartitionTable::new(TableConfig::new(300)).unwrap();
    assert!(table.allocate("A", 100));
    assert!(table.allocate("B", 100));
    table.reset().unwrap();
    assert_eq!(table.partitions(), &[Partition::free(0, 300)]);

    let mut fragmented = PartitionTable::new(
        TableConfig::new(1024).with_mode(InitMode::fragmented()).with_seed(8),
    )
    .unwrap();
    assert!(fragmented.allocate("A", 200));
    fragmented.reset().unwrap();
    assert_eq!(fragmented.len(), 17);
    assert_eq!(fragmented.owned_by("A").count(), 0);
    assert_covered(&fragmented);
}

#[test]
fn test_snapshot_matches_partitions() {
    let mut table = PartitionTable::new(TableConfig::new(100)).unwrap();
    assert!(table.allocate("A", 30));
    let snapshot = table.snapshot();
    assert_eq!(snapshot.len(), table.len());
    assert_eq!(snapshot[0].status, PartitionStatus::Busy("A".to_string()));
    assert_eq!(snapshot[1].status, PartitionStatus::Free);
    assert_eq!(snapshot[1].end, 100);
}
