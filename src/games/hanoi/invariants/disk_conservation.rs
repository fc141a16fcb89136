//! Disk conservation: every rank appears exactly once across the pegs.

use super::super::Board;
use super::Invariant;

/// Invariant: the pegs hold `{0, …, N-1}`, each rank exactly once.
///
/// Disks are only ever moved, never created or destroyed.
pub struct DiskConservationInvariant;

impl Invariant<Board> for DiskConservationInvariant {
    fn holds(board: &Board) -> bool {
        let mut seen = vec![false; board.disk_count()];
        let mut total = 0;

        for disk in board.pegs().iter().flat_map(|p| p.disks()) {
            total += 1;
            match seen.get_mut(disk.rank()) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
        }

        total == board.disk_count()
    }

    fn description() -> &'static str {
        "Every disk rank appears exactly once"
    }
}
