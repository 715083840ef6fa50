use cost_tree::parser::{CostRecord, RecordId};
use cost_tree::tree::{build_tree, BuildError, PreOrderIter};

#[test]
fn test_two_node_cycle_roots_both() {
    let records = vec![
        CostRecord::new("A", 10.0, "a").with_parent("B"),
        CostRecord::new("B", 20.0, "b").with_parent("A"),
    ];

    let forest = build_tree(&records);

    let roots: Vec<&RecordId> = forest.roots.iter().map(|n| n.id()).collect();
    assert_eq!(roots, vec![&RecordId::from("A"), &RecordId::from("B")]);
    assert!(forest.roots.iter().all(|n| n.is_leaf()));
    assert!(forest
        .errors
        .iter()
        .any(|e| matches!(e, BuildError::CycleDetected { .. })));
}

#[test]
fn test_dangling_parent_becomes_root() {
    let records = vec![
        CostRecord::new(1, 10.0, "root"),
        CostRecord::new(2, 5.0, "orphan").with_parent(404),
    ];

    let forest = build_tree(&records);

    assert_eq!(forest.roots.len(), 2);
    assert_eq!(forest.roots[1].label(), "orphan");
    assert_eq!(
        forest.errors,
        vec![BuildError::DanglingParent {
            id: RecordId::Int(2),
            parent_id: RecordId::Int(404),
        }]
    );
}

#[test]
fn test_every_record_appears_once() {
    let records = vec![
        CostRecord::new(1, 1.0, "a").with_parent(3),
        CostRecord::new(2, 1.0, "b").with_parent(1),
        CostRecord::new(3, 1.0, "c").with_parent(2),
        CostRecord::new(4, 1.0, "d").with_parent(2),
        CostRecord::new(5, 1.0, "e").with_parent(77),
        CostRecord::new(6, 1.0, "f"),
        CostRecord::new(7, 1.0, "g").with_parent(6),
    ];

    let forest = build_tree(&records);

    let mut seen: Vec<String> = PreOrderIter::forest(&forest.roots)
        .map(|n| n.id().to_string())
        .collect();
    seen.sort();
    assert_eq!(seen, vec!["1", "2", "3", "4", "5", "6", "7"]);
    assert_eq!(forest.node_count(), records.len());
}

#[test]
fn test_roots_keep_input_order() {
    let records = vec![
        CostRecord::new(9, 1.0, "z"),
        CostRecord::new(3, 1.0, "child of 9").with_parent(9),
        CostRecord::new(1, 1.0, "a"),
        CostRecord::new(5, 1.0, "m"),
    ];

    let forest = build_tree(&records);
    let labels: Vec<&str> = forest.roots.iter().map(|n| n.label()).collect();
    assert_eq!(labels, vec!["z", "a", "m"]);
}

#[test]
fn test_depths() {
    let records = vec![
        CostRecord::new(1, 1.0, "a"),
        CostRecord::new(2, 1.0, "b").with_parent(1),
        CostRecord::new(3, 1.0, "c").with_parent(2),
    ];

    let forest = build_tree(&records);
    let depths: Vec<usize> = PreOrderIter::forest(&forest.roots).map(|n| n.depth).collect();
    assert_eq!(depths, vec![0, 1, 2]);
}

#[test]
fn test_rebuild_is_independent() {
    let records = vec![
        CostRecord::new(1, 1.0, "a"),
        CostRecord::new(2, 1.0, "b").with_parent(1),
    ];

    let mut first = build_tree(&records);
    first.roots[0].children.clear();

    let second = build_tree(&records);
    assert_eq!(second.roots[0].children.len(), 1);
}

fn chain(depth: i64) -> Vec<CostRecord> {
    (0..depth)
        .map(|i| {
            let record = CostRecord::new(i, 1.0, "link");
            if i == 0 {
                record
            } else {
                record.with_parent(i - 1)
            }
        })
        .collect()
}

#[test]
fn test_deep_chain_build_and_annotate() {
    let records = chain(100_000);

    let mut forest = build_tree(&records);
    cost_tree::aggregator::annotate(&mut forest.roots);

    assert!(forest.errors.is_empty());
    assert_eq!(forest.roots.len(), 1);
    assert_eq!(forest.node_count(), 100_000);
    assert_eq!(forest.roots[0].descendant_total, 100_000.0);

    let depths: Vec<usize> = PreOrderIter::forest(&forest.roots).map(|n| n.depth).collect();
    assert_eq!(depths.last(), Some(&99_999));
}

#[test]
fn test_deep_chain_with_cycle_at_the_bottom() {
    let mut records = chain(20_000);
    records[0] = CostRecord::new(0, 1.0, "link").with_parent(19_999);

    let forest = build_tree(&records);

    assert_eq!(forest.roots.len(), 20_000);
    assert_eq!(forest.errors.len(), 20_000);
    assert!(forest
        .errors
        .iter()
        .all(|e| matches!(e, BuildError::CycleDetected { .. })));
}

#[test]
fn test_mixed_id_types_link_up() {
    let records = vec![
        CostRecord::new(1, 10.0, "int id"),
        CostRecord::new(2, 4.0, "text parent").with_parent("1"),
    ];

    let forest = build_tree(&records);

    assert!(forest.errors.is_empty());
    assert_eq!(forest.roots.len(), 1);
    assert_eq!(forest.roots[0].children[0].label(), "text parent");
}
