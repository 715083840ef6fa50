//! Tree node wrapping one cost record.
//!
//! Nodes are created fresh by every [`super::build_tree`] call and thrown
//! away once the render or export pass is done. Derived figures start empty
//! and are filled in by [`crate::aggregator::annotate`].

use crate::parser::schema::{CostRecord, RecordId};

/// A cost record placed in the forest, plus its derived figures
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    /// The record this node wraps
    pub record: CostRecord,

    /// Children in input order
    pub children: Vec<TreeNode>,

    /// Nesting depth, 0 for roots
    pub depth: usize,

    /// Own amount plus the amounts of every descendant
    pub descendant_total: f64,

    /// Share of the sum of root-level amounts (or the stored ratio)
    pub root_percentage: Option<f64>,

    /// Share of the parent's own amount; always `None` on roots
    pub parent_percentage: Option<f64>,

    /// Sum of direct children's amounts relative to this node's amount
    pub children_total_percentage: Option<f64>,
}

impl TreeNode {
    /// Create an unannotated node without children
    pub fn new(record: CostRecord, depth: usize) -> Self {
        Self {
            descendant_total: record.amount,
            record,
            children: Vec::new(),
            depth,
            root_percentage: None,
            parent_percentage: None,
            children_total_percentage: None,
        }
    }

    pub fn id(&self) -> &RecordId {
        &self.record.id
    }

    pub fn amount(&self) -> f64 {
        self.record.amount
    }

    pub fn label(&self) -> &str {
        &self.record.label
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Pre-order walk over this node and all of its descendants
    pub fn iter(&self) -> PreOrderIter<'_> {
        PreOrderIter { stack: vec![self] }
    }

    /// Number of nodes in this subtree, including this one
    pub fn subtree_size(&self) -> usize {
        self.iter().count()
    }
}

impl Drop for TreeNode {
    fn drop(&mut self) {
        // Unlink descendants one level at a time so long chains never
        // recurse through the compiler's drop glue
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Depth-first, pre-order iterator over a subtree or a whole forest
pub struct PreOrderIter<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> PreOrderIter<'a> {
    /// Iterate every node of a forest, roots in order
    pub fn forest(roots: &'a [TreeNode]) -> Self {
        Self {
            stack: roots.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Push children in reverse order for left-to-right traversal
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: i64, children: Vec<TreeNode>) -> TreeNode {
        let mut n = TreeNode::new(CostRecord::new(id, 1.0, format!("n{}", id)), 0);
        n.children = children;
        n
    }

    #[test]
    fn test_pre_order() {
        let roots = vec![
            node(1, vec![node(2, vec![node(3, vec![])]), node(4, vec![])]),
            node(5, vec![]),
        ];

        let ids: Vec<String> = PreOrderIter::forest(&roots)
            .map(|n| n.id().to_string())
            .collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
        assert_eq!(roots[0].subtree_size(), 4);
        assert!(roots[1].is_leaf());
    }

    #[test]
    fn test_deep_chain_drops() {
        let mut chain = node(0, vec![]);
        for id in 1..200_000 {
            chain = node(id, vec![chain]);
        }
        assert_eq!(chain.iter().count(), 200_000);
        drop(chain);
    }
}
