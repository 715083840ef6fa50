use cost_tree::aggregator::annotate;
use cost_tree::parser::{CostRecord, RecordId};
use cost_tree::tree::build_tree;
use cost_tree::view::{render_outline, visible_rows, ExpansionState};

#[test]
fn test_toggle_does_not_change_figures() {
    let records = vec![
        CostRecord::new(1, 100.0, "a"),
        CostRecord::new(2, 40.0, "b").with_parent(1),
        CostRecord::new(3, 10.0, "c").with_parent(2),
    ];
    let mut forest = build_tree(&records);
    annotate(&mut forest.roots);
    let before = forest.roots.clone();

    let mut state = ExpansionState::with_roots_expanded(&forest.roots);
    assert_eq!(visible_rows(&forest.roots, &state).len(), 2);

    state.toggle(&RecordId::Int(2));
    assert_eq!(visible_rows(&forest.roots, &state).len(), 3);

    state.collapse_all();
    assert_eq!(visible_rows(&forest.roots, &state).len(), 1);

    assert_eq!(before, forest.roots);
}

#[test]
fn test_outline_for_empty_forest() {
    let text = render_outline(&[], &ExpansionState::new());
    assert!(text.contains("Total"));
}
