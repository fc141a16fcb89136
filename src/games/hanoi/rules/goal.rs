//! Goal detection for the Tower of Hanoi.

use super::super::{Board, PegId};
use tracing::instrument;

/// Checks whether every disk sits on the target peg in canonical order.
#[instrument(skip(board))]
pub fn is_goal(board: &Board) -> bool {
    let target = board.peg(PegId::TARGET);
    target.len() == board.disk_count() && target.disks() == Board::full_stack(board.disk_count())
}

/// Fewest legal moves that solve a tower of `disk_count` disks: `2^N - 1`.
///
/// Saturates at `u64::MAX` for towers of 64 disks or more.
#[instrument]
pub fn minimum_moves(disk_count: usize) -> u64 {
    u32::try_from(disk_count)
        .ok()
        .and_then(|n| 1u64.checked_shl(n))
        .map_or(u64::MAX, |pow| pow - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_board_not_goal() {
        assert!(!is_goal(&Board::new(5)));
    }

    #[test]
    fn test_full_stack_on_target_is_goal() {
        let board = Board::from_ranks([vec![], vec![], vec![4, 3, 2, 1, 0]]).expect("valid board");
        assert!(is_goal(&board));
    }

    #[test]
    fn test_full_stack_on_middle_not_goal() {
        let board = Board::from_ranks([vec![], vec![2, 1, 0], vec![]]).expect("valid board");
        assert!(!is_goal(&board));
    }

    #[test]
    fn test_partial_stack_on_target_not_goal() {
        let board = Board::from_ranks([vec![0], vec![], vec![2, 1]]).expect("valid board");
        assert!(!is_goal(&board));
    }

    #[test]
    fn test_minimum_moves() {
        assert_eq!(minimum_moves(0), 0);
        assert_eq!(minimum_moves(1), 1);
        assert_eq!(minimum_moves(3), 7);
        assert_eq!(minimum_moves(5), 31);
        assert_eq!(minimum_moves(63), (1u64 << 63) - 1);
        assert_eq!(minimum_moves(64), u64::MAX);
    }
}
