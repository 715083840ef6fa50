//! Rows a tree widget should draw for the current expansion state.

use super::expansion::ExpansionState;
use crate::tree::TreeNode;

/// One drawable row of the interactive tree
#[derive(Debug, Clone, Copy)]
pub struct VisibleRow<'a> {
    pub node: &'a TreeNode,

    /// Whether the node has children to reveal
    pub has_children: bool,

    /// Whether those children are currently shown
    pub expanded: bool,
}

impl VisibleRow<'_> {
    pub fn depth(&self) -> usize {
        self.node.depth
    }
}

/// Re-derive the visible rows after a toggle
///
/// **Public** - walks the forest in pre-order, descending only into
/// expanded nodes
pub fn visible_rows<'a>(roots: &'a [TreeNode], state: &ExpansionState) -> Vec<VisibleRow<'a>> {
    let mut rows = Vec::new();
    let mut stack: Vec<&TreeNode> = roots.iter().rev().collect();

    while let Some(node) = stack.pop() {
        let has_children = !node.is_leaf();
        let expanded = has_children && state.is_expanded(node.id());

        rows.push(VisibleRow {
            node,
            has_children,
            expanded,
        });

        if expanded {
            stack.extend(node.children.iter().rev());
        }
    }

    rows
}
