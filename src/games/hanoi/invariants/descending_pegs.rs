//! Descending pegs: no disk rests on a smaller one.

use super::super::Board;
use super::Invariant;

/// Invariant: on every peg, ranks strictly decrease from bottom to top.
pub struct DescendingPegsInvariant;

impl Invariant<Board> for DescendingPegsInvariant {
    fn holds(board: &Board) -> bool {
        board
            .pegs()
            .iter()
            .all(|peg| peg.disks().windows(2).all(|pair| pair[0] > pair[1]))
    }

    fn description() -> &'static str {
        "Disk ranks strictly decrease bottom-to-top on every peg"
    }
}
