//! The size rule: no disk may rest on a smaller one.

use super::super::{Disk, Peg};
use tracing::instrument;

/// Checks whether `disk` may be placed on `target`.
///
/// Legal iff the peg is empty or its top disk has a strictly larger rank.
#[instrument]
pub fn can_place(disk: Disk, target: &Peg) -> bool {
    target.top().is_none_or(|top| top > disk)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peg(ranks: &[usize]) -> Peg {
        Peg::from_disks(ranks.iter().copied().map(Disk::from).collect())
    }

    #[test]
    fn test_empty_peg_accepts_any_disk() {
        for rank in 0..8 {
            assert!(can_place(Disk::from(rank), &peg(&[])));
        }
    }

    #[test]
    fn test_smaller_on_larger_allowed() {
        assert!(can_place(Disk::from(0), &peg(&[4, 1])));
    }

    #[test]
    fn test_larger_on_smaller_rejected() {
        assert!(!can_place(Disk::from(3), &peg(&[4, 2])));
    }

    #[test]
    fn test_equal_rank_rejected() {
        assert!(!can_place(Disk::from(2), &peg(&[2])));
    }
}
