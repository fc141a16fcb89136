//! Game rules for the Tower of Hanoi.
//!
//! Pure functions over board state. Rules are separated from board storage
//! so the controller, contracts, and tests all consult the same checks.

pub mod goal;
pub mod placement;

pub use goal::{is_goal, minimum_moves};
pub use placement::can_place;
