//! Forest construction from flat cost records.
//!
//! Records reference their parent by id; this module turns a snapshot of
//! them into owned nodes, repairing and reporting broken references and
//! cycles instead of failing.

pub mod builder;
pub mod node;

// Re-export main types and functions
pub use builder::{build_tree, BuildError, Forest};
pub use node::{PreOrderIter, TreeNode};
