//! Contract-based validation for moves.
//!
//! Contracts define correctness through preconditions and postconditions:
//! {P} action {Q}. Click and drag interactions both reach the board through
//! [`MoveContract`], so they share a single legality rule.

use super::action::{Move, MoveError};
use super::invariants::{HanoiInvariants, InvariantSet, describe_violations};
use super::rules::can_place;
use super::Board;
use tracing::{debug, instrument};

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

/// Precondition: source and destination differ.
pub struct DistinctPegs;

impl DistinctPegs {
    /// Checks the move's pegs differ.
    #[instrument]
    pub fn check(mov: &Move) -> Result<(), MoveError> {
        if mov.from() == mov.to() {
            Err(MoveError::SamePeg(mov.from()))
        } else {
            Ok(())
        }
    }
}

/// Precondition: the source peg has a disk to lift.
pub struct SourceHasDisk;

impl SourceHasDisk {
    /// Checks the source peg is non-empty.
    #[instrument(skip(board))]
    pub fn check(mov: &Move, board: &Board) -> Result<(), MoveError> {
        if board.peg(mov.from()).is_empty() {
            Err(MoveError::EmptySource(mov.from()))
        } else {
            Ok(())
        }
    }
}

/// Precondition: the lifted disk fits on the destination peg.
pub struct FitsOnTarget;

impl FitsOnTarget {
    /// Checks the size rule for the disk that would move.
    #[instrument(skip(board))]
    pub fn check(mov: &Move, board: &Board) -> Result<(), MoveError> {
        let Some(disk) = board.peg(mov.from()).top() else {
            return Err(MoveError::EmptySource(mov.from()));
        };
        let target = board.peg(mov.to());

        if can_place(disk, target) {
            return Ok(());
        }

        match target.top() {
            Some(onto) => {
                debug!(disk = %disk, onto = %onto, "Placement rejected");
                Err(MoveError::LargerOnSmaller {
                    disk,
                    onto,
                    target: mov.to(),
                })
            }
            None => Ok(()),
        }
    }
}

/// Composite precondition: distinct pegs, a disk to lift, and room for it.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(board))]
    pub fn check(mov: &Move, board: &Board) -> Result<(), MoveError> {
        DistinctPegs::check(mov)?;
        SourceHasDisk::check(mov, board)?;
        FitsOnTarget::check(mov, board)?;
        Ok(())
    }
}

/// Contract for move actions.
///
/// Preconditions:
/// - Pegs differ
/// - Source has a disk
/// - Disk is smaller than the destination's top
///
/// Postconditions:
/// - Disk count unchanged
/// - All board invariants hold
pub struct MoveContract;

impl Contract<Board, Move> for MoveContract {
    fn pre(board: &Board, action: &Move) -> Result<(), MoveError> {
        LegalMove::check(action, board)
    }

    fn post(before: &Board, after: &Board) -> Result<(), MoveError> {
        if before.disk_count() != after.disk_count() {
            return Err(MoveError::InvariantViolation(format!(
                "Disk count changed from {} to {}",
                before.disk_count(),
                after.disk_count()
            )));
        }

        HanoiInvariants::check_all(after).map_err(|violations| {
            MoveError::InvariantViolation(format!(
                "Postcondition failed: {}",
                describe_violations(&violations)
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::hanoi::PegId;

    #[test]
    fn test_precondition_legal_move() {
        let board = Board::new(3);
        let action = Move::new(PegId::Left, PegId::Middle);
        assert!(MoveContract::pre(&board, &action).is_ok());
    }

    #[test]
    fn test_precondition_same_peg() {
        let board = Board::new(3);
        let action = Move::new(PegId::Left, PegId::Left);
        assert_eq!(
            MoveContract::pre(&board, &action),
            Err(MoveError::SamePeg(PegId::Left))
        );
    }

    #[test]
    fn test_precondition_empty_source() {
        let board = Board::new(3);
        let action = Move::new(PegId::Middle, PegId::Right);
        assert_eq!(
            MoveContract::pre(&board, &action),
            Err(MoveError::EmptySource(PegId::Middle))
        );
    }

    #[test]
    fn test_precondition_larger_on_smaller() {
        let board = Board::from_ranks([vec![3], vec![4, 2], vec![1, 0]]).expect("valid board");
        let action = Move::new(PegId::Left, PegId::Middle);
        assert!(matches!(
            MoveContract::pre(&board, &action),
            Err(MoveError::LargerOnSmaller { target: PegId::Middle, .. })
        ));
    }

    #[test]
    fn test_postcondition_holds_after_move() {
        let before = Board::new(3);
        let after = before.move_top(PegId::Left, PegId::Right);
        assert!(MoveContract::post(&before, &after).is_ok());
    }

    #[test]
    fn test_postcondition_detects_lost_disk() {
        let before = Board::new(3);
        let after = Board::new(2);
        assert!(matches!(
            MoveContract::post(&before, &after),
            Err(MoveError::InvariantViolation(_))
        ));
    }
}
