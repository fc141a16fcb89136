//! First-class move types for the Tower of Hanoi.
//!
//! A move names the peg to lift from and the peg to drop onto. It can be
//! validated against a board before anything is mutated.

use super::{Disk, PegId};
use derive_new::new;

/// Relocation of the top disk of `from` onto `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, new)]
pub struct Move {
    from: PegId,
    to: PegId,
}

impl Move {
    /// The peg the disk is lifted from.
    pub fn from(&self) -> PegId {
        self.from
    }

    /// The peg the disk is placed on.
    pub fn to(&self) -> PegId {
        self.to
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from.label(), self.to.label())
    }
}

/// Why a move was not applied.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// Source and destination are the same peg.
    #[display("Cannot move a disk onto its own peg ({})", _0)]
    SamePeg(PegId),

    /// There is no disk to lift.
    #[display("Peg {} has no disk to lift", _0)]
    EmptySource(PegId),

    /// The lifted disk is larger than the disk it would rest on.
    #[display("Disk {} cannot rest on smaller disk {} on peg {}", disk, onto, target)]
    LargerOnSmaller {
        /// Disk being moved.
        disk: Disk,
        /// Disk currently on top of the target peg.
        onto: Disk,
        /// Target peg.
        target: PegId,
    },

    /// The session is completed; only a restart can change the board.
    #[display("Game is already completed")]
    SessionCompleted,

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}
