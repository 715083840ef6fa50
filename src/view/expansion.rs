//! Expanded/collapsed state for interactive tree display.
//!
//! Pure presentation state keyed by record id. It never feeds back into
//! totals or percentages; the caller owns it and passes it to
//! [`super::visible_rows`] on every redraw.

use crate::parser::schema::RecordId;
use crate::tree::TreeNode;
use log::debug;
use std::collections::HashSet;

/// Set of record ids whose children are currently shown
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: HashSet<RecordId>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial state after loading: every root expanded, deeper levels collapsed
    pub fn with_roots_expanded(roots: &[TreeNode]) -> Self {
        let mut state = Self::new();
        state.expand_all(roots.iter().map(|root| root.id().clone()));
        state
    }

    /// Flip one id, returning whether it is now expanded
    pub fn toggle(&mut self, id: &RecordId) -> bool {
        let expanded = if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.clone());
            true
        };
        debug!("Toggled {} -> expanded={}", id, expanded);
        expanded
    }

    pub fn expand(&mut self, id: RecordId) {
        self.expanded.insert(id);
    }

    pub fn collapse(&mut self, id: &RecordId) {
        self.expanded.remove(id);
    }

    pub fn expand_all(&mut self, ids: impl IntoIterator<Item = RecordId>) {
        self.expanded.extend(ids);
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    pub fn is_expanded(&self, id: &RecordId) -> bool {
        self.expanded.contains(id)
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }
}
