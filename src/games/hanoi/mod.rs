//! Tower of Hanoi: board model, placement rules, and contract checks.

mod action;
mod contracts;
mod invariants;
mod rules;
mod types;

pub use action::{Move, MoveError};
pub use contracts::{Contract, LegalMove, MoveContract};
pub use invariants::{
    DescendingPegsInvariant, DiskConservationInvariant, HanoiInvariants, Invariant,
    InvariantSet, InvariantViolation,
};
pub use rules::{can_place, is_goal, minimum_moves};
pub use types::{Board, BoardError, DEFAULT_DISKS, Disk, Peg, PegId};
