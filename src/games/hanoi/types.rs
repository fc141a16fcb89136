//! Core domain types for the Tower of Hanoi.

use super::action::{Move, MoveError};
use super::contracts::{Contract, MoveContract};
use super::invariants::{HanoiInvariants, InvariantSet, InvariantViolation, describe_violations};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

/// Number of disks on the shipped board.
pub const DEFAULT_DISKS: usize = 5;

/// A disk, identified by its rank.
///
/// Rank `0` is the smallest disk; rank `N-1` is the largest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display,
    derive_more::From,
)]
pub struct Disk(usize);

impl Disk {
    /// Returns the rank of this disk.
    pub fn rank(self) -> usize {
        self.0
    }
}

/// One of the three pegs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum PegId {
    /// Peg 0, where the tower starts.
    Left,
    /// Peg 1, the spare.
    Middle,
    /// Peg 2, where the tower must end.
    Right,
}

impl PegId {
    /// The starting peg.
    pub const SOURCE: PegId = PegId::Left;
    /// The destination peg.
    pub const TARGET: PegId = PegId::Right;

    /// Converts to a board index (0-2).
    pub fn index(self) -> usize {
        match self {
            PegId::Left => 0,
            PegId::Middle => 1,
            PegId::Right => 2,
        }
    }

    /// Creates a peg id from a board index.
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(PegId::Left),
            1 => Some(PegId::Middle),
            2 => Some(PegId::Right),
            _ => None,
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            PegId::Left => "Left",
            PegId::Middle => "Middle",
            PegId::Right => "Right",
        }
    }

    /// Peg to the left, wrapping around.
    pub fn prev(self) -> Self {
        match self {
            PegId::Left => PegId::Right,
            PegId::Middle => PegId::Left,
            PegId::Right => PegId::Middle,
        }
    }

    /// Peg to the right, wrapping around.
    pub fn next(self) -> Self {
        match self {
            PegId::Left => PegId::Middle,
            PegId::Middle => PegId::Right,
            PegId::Right => PegId::Left,
        }
    }
}

impl std::fmt::Display for PegId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A stack of disks, stored bottom-to-top.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Peg {
    disks: Vec<Disk>,
}

impl Peg {
    /// Creates a peg holding the given disks, bottom first.
    pub fn from_disks(disks: Vec<Disk>) -> Self {
        Self { disks }
    }

    /// The disk on top, if any.
    pub fn top(&self) -> Option<Disk> {
        self.disks.last().copied()
    }

    /// Disks bottom-to-top.
    pub fn disks(&self) -> &[Disk] {
        &self.disks
    }

    /// Number of disks on this peg.
    pub fn len(&self) -> usize {
        self.disks.len()
    }

    /// True if the peg holds no disks.
    pub fn is_empty(&self) -> bool {
        self.disks.is_empty()
    }

    /// Ranks bottom-to-top.
    pub fn ranks(&self) -> Vec<usize> {
        self.disks.iter().map(|d| d.rank()).collect()
    }

    fn push(&mut self, disk: Disk) {
        self.disks.push(disk);
    }

    fn pop(&mut self) -> Option<Disk> {
        self.disks.pop()
    }
}

/// Error building a board from external data.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum BoardError {
    /// The board must hold at least one disk.
    #[display("A board needs at least one disk")]
    NoDisks,

    /// The supplied pegs break one or more board invariants.
    #[display("Invalid board: {}", describe_violations(_0))]
    Invalid(Vec<InvariantViolation>),
}

impl std::error::Error for BoardError {}

/// Three pegs holding `disk_count` disks between them.
///
/// Serialized as the raw rank layout; deserializing goes through
/// [`Board::from_ranks`] so a malformed layout is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[Vec<usize>; 3]", into = "[Vec<usize>; 3]")]
pub struct Board {
    pegs: [Peg; 3],
    disk_count: usize,
}

impl Board {
    /// Creates the initial board: every disk on the left peg, largest at the bottom.
    ///
    /// A `disk_count` of zero is raised to one.
    #[instrument]
    pub fn new(disk_count: usize) -> Self {
        let disk_count = disk_count.max(1);
        Self {
            pegs: [
                Peg::from_disks(Self::full_stack(disk_count)),
                Peg::default(),
                Peg::default(),
            ],
            disk_count,
        }
    }

    /// Builds a board from raw ranks (bottom-to-top per peg), checking invariants.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError`] if no disks are present, a disk is missing or
    /// duplicated, or a peg is not strictly decreasing.
    #[instrument]
    pub fn from_ranks(pegs: [Vec<usize>; 3]) -> Result<Self, BoardError> {
        let disk_count = pegs.iter().map(Vec::len).sum::<usize>();
        if disk_count == 0 {
            return Err(BoardError::NoDisks);
        }

        let board = Self {
            pegs: pegs.map(|ranks| Peg::from_disks(ranks.into_iter().map(Disk::from).collect())),
            disk_count,
        };

        HanoiInvariants::check_all(&board).map_err(BoardError::Invalid)?;
        Ok(board)
    }

    /// The canonical full stack for `disk_count` disks, bottom-to-top.
    pub fn full_stack(disk_count: usize) -> Vec<Disk> {
        (0..disk_count).rev().map(Disk::from).collect()
    }

    /// Number of disks on the board.
    pub fn disk_count(&self) -> usize {
        self.disk_count
    }

    /// Returns the peg with the given id.
    pub fn peg(&self, id: PegId) -> &Peg {
        &self.pegs[id.index()]
    }

    /// All pegs in index order.
    pub fn pegs(&self) -> &[Peg; 3] {
        &self.pegs
    }

    /// Ranks of every peg, bottom-to-top. This is the persisted layout.
    pub fn to_ranks(&self) -> [Vec<usize>; 3] {
        [
            self.pegs[0].ranks(),
            self.pegs[1].ranks(),
            self.pegs[2].ranks(),
        ]
    }

    /// True once every disk rests on the right peg in order.
    pub fn is_goal(&self) -> bool {
        super::rules::is_goal(self)
    }

    /// Moves the top disk of `from` onto `to`, returning the disk moved.
    ///
    /// The board is untouched when the move is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] if the pegs are the same, `from` is empty, or the
    /// moved disk would rest on a smaller one.
    #[instrument(skip(self), fields(from = %mov.from(), to = %mov.to()))]
    pub fn try_move(&mut self, mov: Move) -> Result<Disk, MoveError> {
        MoveContract::pre(self, &mov)?;

        let mut next = self.clone();
        let disk = next.pegs[mov.from().index()]
            .pop()
            .ok_or(MoveError::EmptySource(mov.from()))?;
        next.pegs[mov.to().index()].push(disk);

        #[cfg(debug_assertions)]
        MoveContract::post(self, &next)?;

        *self = next;
        debug!(disk = %disk, "Disk moved");
        Ok(disk)
    }

    /// Returns the board after moving the top disk of `from` onto `to`.
    ///
    /// An empty source or an illegal placement yields an unchanged copy.
    #[instrument(skip(self))]
    pub fn move_top(&self, from: PegId, to: PegId) -> Board {
        let mut next = self.clone();
        match next.try_move(Move::new(from, to)) {
            Ok(_) => next,
            Err(e) => {
                debug!(error = %e, "Move rejected, board unchanged");
                self.clone()
            }
        }
    }

    /// Formats the board as text, one peg per line.
    pub fn display(&self) -> String {
        PegId::iter()
            .map(|id| format!("{:>6}: {:?}", id.label(), self.peg(id).ranks()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl TryFrom<[Vec<usize>; 3]> for Board {
    type Error = BoardError;

    fn try_from(pegs: [Vec<usize>; 3]) -> Result<Self, Self::Error> {
        Self::from_ranks(pegs)
    }
}

impl From<Board> for [Vec<usize>; 3] {
    fn from(board: Board) -> Self {
        board.to_ranks()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_DISKS)
    }
}
