//! Interactive presentation helpers layered on top of the tree.
//!
//! Nothing here changes computed figures; it only decides what is shown.

pub mod expansion;
pub mod outline;
pub mod visible;

pub use expansion::ExpansionState;
pub use outline::render_outline;
pub use visible::{visible_rows, VisibleRow};
