//! Build a rooted forest from flat cost records.
//!
//! Records point at their parent by id. Building never fails: broken
//! references and cycles are repaired by rooting the offending record and
//! reported through [`BuildError`] next to the forest.

use super::node::TreeNode;
use crate::parser::schema::{CostRecord, RecordId};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Non-fatal issue found while building a forest
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BuildError {
    #[error("record {id} references missing parent {parent_id}")]
    DanglingParent { id: RecordId, parent_id: RecordId },

    #[error("record {id} is part of a parent cycle (parent {parent_id})")]
    CycleDetected { id: RecordId, parent_id: RecordId },

    #[error("duplicate record id {id}")]
    DuplicateId { id: RecordId },
}

impl BuildError {
    /// Id of the record the issue was reported on
    pub fn record_id(&self) -> &RecordId {
        match self {
            BuildError::DanglingParent { id, .. } => id,
            BuildError::CycleDetected { id, .. } => id,
            BuildError::DuplicateId { id } => id,
        }
    }
}

/// Best-effort forest plus the issues found while building it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forest {
    /// Root nodes in the input order of their records
    pub roots: Vec<TreeNode>,

    /// Side channel of repaired problems
    pub errors: Vec<BuildError>,
}

impl Forest {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Total number of nodes across all roots
    pub fn node_count(&self) -> usize {
        self.roots.iter().map(TreeNode::subtree_size).sum()
    }
}

/// Visit state used by cycle detection
#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    New,
    OnPath,
    Done,
}

/// Build a forest from a snapshot of records
///
/// **Public** - main entry point for tree construction
///
/// # Arguments
/// * `records` - Flat records in display order
///
/// # Returns
/// A forest whose roots and children keep input order, and the list of
/// repaired issues:
/// * `DanglingParent` - parent id not in the snapshot, record rooted
/// * `CycleDetected` - record is its own ancestor, record rooted
/// * `DuplicateId` - id seen before, later record rooted
///
/// Every record of the input appears exactly once in the forest.
pub fn build_tree(records: &[CostRecord]) -> Forest {
    debug!("Building forest from {} records", records.len());

    let mut errors = Vec::new();

    // The first record carrying an id owns it
    let mut index: HashMap<&RecordId, usize> = HashMap::with_capacity(records.len());
    let mut duplicate = vec![false; records.len()];
    for (position, record) in records.iter().enumerate() {
        if index.contains_key(&record.id) {
            warn!("Duplicate record id {}, keeping it as a root", record.id);
            duplicate[position] = true;
            errors.push(BuildError::DuplicateId {
                id: record.id.clone(),
            });
        } else {
            index.insert(&record.id, position);
        }
    }

    // Resolve parent references to positions
    let mut parent_of: Vec<Option<usize>> = Vec::with_capacity(records.len());
    for (position, record) in records.iter().enumerate() {
        let parent = match (&record.parent_id, duplicate[position]) {
            (None, _) | (_, true) => None,
            (Some(parent_id), false) => match resolve(&index, parent_id) {
                Some(parent) => Some(parent),
                None => {
                    warn!(
                        "Record {} references missing parent {}, treating it as a root",
                        record.id, parent_id
                    );
                    errors.push(BuildError::DanglingParent {
                        id: record.id.clone(),
                        parent_id: parent_id.clone(),
                    });
                    None
                }
            },
        };
        parent_of.push(parent);
    }

    // Root every record that is its own ancestor
    let on_cycle = find_cycle_members(&parent_of);
    for (position, record) in records.iter().enumerate() {
        if !on_cycle[position] {
            continue;
        }
        let parent_id = record.parent_id.clone().unwrap_or_else(|| record.id.clone());
        warn!(
            "Cycle detected at record {} (parent {}), treating it as a root",
            record.id, parent_id
        );
        errors.push(BuildError::CycleDetected {
            id: record.id.clone(),
            parent_id,
        });
        parent_of[position] = None;
    }

    // Group children under their parent, preserving input order
    let mut children_of: Vec<Vec<usize>> = vec![Vec::new(); records.len()];
    let mut root_positions = Vec::new();
    for (position, parent) in parent_of.iter().enumerate() {
        match parent {
            Some(parent) => children_of[*parent].push(position),
            None => root_positions.push(position),
        }
    }

    let roots = assemble(&root_positions, records, &children_of);

    debug!(
        "Built forest: {} roots from {} records ({} issues)",
        roots.len(),
        records.len(),
        errors.len()
    );

    Forest { roots, errors }
}

/// Mark every position that lies on a cycle of parent links
///
/// **Private** - each position is walked once, so this is linear in the
/// number of records
fn find_cycle_members(parent_of: &[Option<usize>]) -> Vec<bool> {
    let mut state = vec![Visit::New; parent_of.len()];
    let mut on_cycle = vec![false; parent_of.len()];
    let mut path = Vec::new();

    for start in 0..parent_of.len() {
        if state[start] != Visit::New {
            continue;
        }

        path.clear();
        let mut current = Some(start);

        while let Some(position) = current {
            match state[position] {
                Visit::New => {
                    state[position] = Visit::OnPath;
                    path.push(position);
                    current = parent_of[position];
                }
                Visit::OnPath => {
                    // The walk came back to itself: everything from here on is the loop
                    if let Some(loop_start) = path.iter().position(|&p| p == position) {
                        for &member in &path[loop_start..] {
                            on_cycle[member] = true;
                        }
                    }
                    break;
                }
                Visit::Done => break,
            }
        }

        for &position in &path {
            state[position] = Visit::Done;
        }
    }

    on_cycle
}

/// Look up a parent position, falling back to the other id type
///
/// **Private** - a backend may send `"id": 12` on one record and
/// `"parent_id": "12"` on another; both name the same record
fn resolve(index: &HashMap<&RecordId, usize>, parent_id: &RecordId) -> Option<usize> {
    index.get(parent_id).copied().or_else(|| {
        parent_id
            .alternate()
            .and_then(|other| index.get(&other).copied())
    })
}

/// Materialise the nodes under `root_positions` without recursion
///
/// **Private** - positions are listed in pre-order first, then built in
/// reverse so every child exists before its parent needs it
fn assemble(
    root_positions: &[usize],
    records: &[CostRecord],
    children_of: &[Vec<usize>],
) -> Vec<TreeNode> {
    let mut order: Vec<(usize, usize)> = Vec::with_capacity(records.len());
    let mut stack: Vec<(usize, usize)> = root_positions.iter().rev().map(|&p| (p, 0)).collect();
    while let Some((position, depth)) = stack.pop() {
        order.push((position, depth));
        stack.extend(children_of[position].iter().rev().map(|&child| (child, depth + 1)));
    }

    let mut built: Vec<Option<TreeNode>> = (0..records.len()).map(|_| None).collect();
    for &(position, depth) in order.iter().rev() {
        let mut node = TreeNode::new(records[position].clone(), depth);
        node.children = children_of[position]
            .iter()
            .filter_map(|&child| built[child].take())
            .collect();
        built[position] = Some(node);
    }

    root_positions
        .iter()
        .filter_map(|&position| built[position].take())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(nodes: &[TreeNode]) -> Vec<String> {
        nodes.iter().map(|n| n.id().to_string()).collect()
    }

    #[test]
    fn test_children_keep_input_order() {
        let records = vec![
            CostRecord::new(1, 10.0, "root"),
            CostRecord::new(3, 3.0, "b").with_parent(1),
            CostRecord::new(2, 2.0, "a").with_parent(1),
            CostRecord::new(4, 4.0, "other root"),
        ];

        let forest = build_tree(&records);
        assert!(!forest.has_errors());
        assert_eq!(ids(&forest.roots), vec!["1", "4"]);
        assert_eq!(ids(&forest.roots[0].children), vec!["3", "2"]);
        assert_eq!(forest.roots[0].children[0].depth, 1);
        assert_eq!(forest.node_count(), 4);
    }

    #[test]
    fn test_child_before_parent() {
        let records = vec![
            CostRecord::new(2, 2.0, "child").with_parent(1),
            CostRecord::new(1, 10.0, "parent"),
        ];

        let forest = build_tree(&records);
        assert_eq!(ids(&forest.roots), vec!["1"]);
        assert_eq!(ids(&forest.roots[0].children), vec!["2"]);
    }

    #[test]
    fn test_self_parent_is_cycle() {
        let records = vec![CostRecord::new(1, 10.0, "loop").with_parent(1)];

        let forest = build_tree(&records);
        assert_eq!(ids(&forest.roots), vec!["1"]);
        assert_eq!(
            forest.errors,
            vec![BuildError::CycleDetected {
                id: RecordId::Int(1),
                parent_id: RecordId::Int(1),
            }]
        );
    }

    #[test]
    fn test_tail_hanging_off_cycle_attaches() {
        let records = vec![
            CostRecord::new(1, 1.0, "a").with_parent(2),
            CostRecord::new(2, 1.0, "b").with_parent(3),
            CostRecord::new(3, 1.0, "c").with_parent(1),
            CostRecord::new(4, 1.0, "tail").with_parent(1),
        ];

        let forest = build_tree(&records);
        assert_eq!(ids(&forest.roots), vec!["1", "2", "3"]);
        assert_eq!(ids(&forest.roots[0].children), vec!["4"]);
        assert_eq!(forest.errors.len(), 3);
        assert!(forest
            .errors
            .iter()
            .all(|e| matches!(e, BuildError::CycleDetected { .. })));
    }

    #[test]
    fn test_duplicate_id_rooted() {
        let records = vec![
            CostRecord::new(1, 1.0, "first"),
            CostRecord::new(2, 1.0, "child").with_parent(1),
            CostRecord::new(1, 1.0, "second").with_parent(2),
        ];

        let forest = build_tree(&records);
        assert_eq!(forest.roots.len(), 2);
        assert_eq!(forest.roots[0].children[0].label(), "child");
        assert_eq!(forest.roots[1].label(), "second");
        assert_eq!(
            forest.errors,
            vec![BuildError::DuplicateId { id: RecordId::Int(1) }]
        );
    }

    #[test]
    fn test_empty_input() {
        let forest = build_tree(&[]);
        assert!(forest.roots.is_empty());
        assert!(forest.errors.is_empty());
    }

    #[test]
    fn test_error_json_shape() {
        let error = BuildError::DanglingParent {
            id: RecordId::Int(5),
            parent_id: RecordId::from("x"),
        };
        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json["kind"], "dangling_parent");
        assert_eq!(json["id"], 5);
        assert_eq!(json["parent_id"], "x");
        assert_eq!(error.to_string(), "record 5 references missing parent x");
    }

    #[test]
    fn test_parent_id_of_other_type_resolves() {
        let records = vec![
            CostRecord::new(1, 10.0, "int id"),
            CostRecord::new(2, 5.0, "text parent").with_parent("1"),
            CostRecord::new("7", 3.0, "text id"),
            CostRecord::new(8, 1.0, "int parent").with_parent(7),
        ];

        let forest = build_tree(&records);
        assert!(!forest.has_errors());
        assert_eq!(ids(&forest.roots), vec!["1", "7"]);
        assert_eq!(ids(&forest.roots[0].children), vec!["2"]);
        assert_eq!(ids(&forest.roots[1].children), vec!["8"]);
    }

    #[test]
    fn test_exact_id_wins_over_other_type() {
        let records = vec![
            CostRecord::new(1, 1.0, "int"),
            CostRecord::new("1", 1.0, "text"),
            CostRecord::new(2, 1.0, "child").with_parent("1"),
        ];

        let forest = build_tree(&records);
        assert_eq!(forest.roots[1].label(), "text");
        assert_eq!(ids(&forest.roots[1].children), vec!["2"]);
    }

    #[test]
    fn test_deep_chain_builds() {
        let depth: i64 = 100_000;
        let records: Vec<CostRecord> = (0..depth)
            .map(|i| {
                let record = CostRecord::new(i, 1.0, "n");
                if i == 0 { record } else { record.with_parent(i - 1) }
            })
            .collect();

        let forest = build_tree(&records);
        assert!(!forest.has_errors());
        assert_eq!(forest.roots.len(), 1);
        assert_eq!(forest.node_count(), depth as usize);

        let deepest = forest.roots[0].iter().last().unwrap();
        assert_eq!(deepest.depth, depth as usize - 1);
        assert!(deepest.is_leaf());
    }
}
