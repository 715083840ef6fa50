//! Roll-up totals and percentage shares for every node.
//!
//! Percentages are computed against two references:
//! - the sum of root-level amounts (not descendant totals, which would count
//!   nested costs twice)
//! - the parent's own amount
//!
//! A stored ratio from upstream wins over the computed root share and is
//! passed through verbatim. Negative amounts are credits and flow through
//! the arithmetic as-is, so shares may go negative or exceed 100%.

use crate::tree::{PreOrderIter, TreeNode};
use log::debug;

/// Annotate a freshly built forest in place
///
/// **Public** - main entry point for aggregation
///
/// # Arguments
/// * `roots` - Roots of a forest from [`crate::tree::build_tree`]
///
/// # Returns
/// The same roots, for chaining into the flattener
///
/// Each node gets:
/// * `descendant_total` - own amount plus all descendants
/// * `root_percentage` - stored ratio, else share of the root total, else `None`
/// * `parent_percentage` - share of the parent's amount, `None` on roots
/// * `children_total_percentage` - direct children's amounts over own amount
pub fn annotate(roots: &mut [TreeNode]) -> &mut [TreeNode] {
    let root_total = root_total(roots);
    debug!(
        "Annotating {} roots against root total {}",
        roots.len(),
        root_total
    );

    let totals = descendant_totals(roots);

    {
        // Same pre-order as PreOrderIter, so `totals` lines up with the visit order
        let mut stack: Vec<(&mut TreeNode, Option<f64>)> =
            roots.iter_mut().rev().map(|root| (root, None)).collect();
        let mut visited = 0;

        while let Some((node, parent_amount)) = stack.pop() {
            let amount = node.amount();

            node.descendant_total = totals[visited];
            visited += 1;

            node.root_percentage = match node.record.stored_ratio {
                Some(ratio) => Some(ratio),
                None => percentage_of(amount, root_total),
            };

            node.parent_percentage = parent_amount.and_then(|parent| percentage_of(amount, parent));

            node.children_total_percentage = if node.children.is_empty() {
                None
            } else {
                let children_amount: f64 = node.children.iter().map(TreeNode::amount).sum();
                percentage_of(children_amount, amount)
            };

            stack.extend(
                node.children
                    .iter_mut()
                    .rev()
                    .map(|child| (child, Some(amount))),
            );
        }
    }

    roots
}

/// Sum of root-level amounts, the reference for root percentages
///
/// **Public** - also the amount of the total row
pub fn root_total(roots: &[TreeNode]) -> f64 {
    roots.iter().map(TreeNode::amount).sum()
}

/// Share of `part` in `whole`, `None` unless `whole` is positive
///
/// **Public** - shared by the aggregator and the summary statistics
pub fn percentage_of(part: f64, whole: f64) -> Option<f64> {
    (whole > 0.0).then(|| (part / whole) * 100.0)
}

/// Subtree totals for every node, in pre-order
///
/// **Private** - walks the pre-order backwards so each node's children are
/// finished before the node itself, keeping finished totals on a stack
fn descendant_totals(roots: &[TreeNode]) -> Vec<f64> {
    let order: Vec<&TreeNode> = PreOrderIter::forest(roots).collect();
    let mut totals = vec![0.0; order.len()];
    let mut finished: Vec<f64> = Vec::new();

    for (position, node) in order.iter().enumerate().rev() {
        let split = finished.len().saturating_sub(node.children.len());
        let children_total: f64 = finished.drain(split..).sum();
        totals[position] = node.amount() + children_total;
        finished.push(totals[position]);
    }

    totals
}
