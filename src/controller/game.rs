//! Game controller: routes user actions through the rules and the session store.

use super::clock::Clock;
use super::view::{CompletionView, PlayView, Route, format_hms};
use crate::games::hanoi::{Board, Disk, Move, MoveError, PegId, minimum_moves};
use crate::session::{KeyValueStore, SessionRecord, SessionStatus, SessionStore};
use tracing::{debug, info, instrument, warn};

/// Result of applying a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The disk moved and the game continues.
    Moved {
        /// Disk that moved.
        disk: Disk,
        /// Move count after this move.
        moves: u32,
    },
    /// The disk moved and the tower is complete.
    Solved {
        /// Final move count.
        moves: u32,
    },
    /// The placement broke the size rule; nothing changed.
    Rejected {
        /// Peg that refused the disk.
        target: PegId,
    },
    /// Nothing to do.
    Ignored,
}

/// Result of selecting a peg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The peg's top disk was lifted.
    Selected(PegId),
    /// The lifted disk was put back.
    Deselected,
    /// A move was attempted from the selected peg.
    Move(MoveOutcome),
    /// Nothing to do.
    Ignored,
}

/// Drives one session of the puzzle against a session store.
///
/// Each call runs to completion before the next is accepted; timers live at
/// the boundary and only read the derived views.
#[derive(Debug)]
pub struct GameController<K, C> {
    store: SessionStore<K>,
    clock: C,
    disk_count: usize,
    board: Board,
    record: Option<SessionRecord>,
    selected: Option<PegId>,
    restart_pending: bool,
}

impl<K: KeyValueStore, C: Clock> GameController<K, C> {
    /// Creates a controller. Nothing is read until [`start`](Self::start) or
    /// [`begin`](Self::begin).
    #[instrument(skip(store, clock))]
    pub fn new(store: SessionStore<K>, clock: C, disk_count: usize) -> Self {
        let board = Board::new(disk_count);
        Self {
            store,
            clock,
            disk_count: board.disk_count(),
            board,
            record: None,
            selected: None,
            restart_pending: false,
        }
    }

    /// Where the entry surface should send the player.
    #[instrument(skip(self))]
    pub fn entry_route(&self) -> Route {
        match self.store.load() {
            Some(record) if record.is_completed() => Route::Completed,
            _ => Route::Entry,
        }
    }

    /// "Begin" from the entry surface: writes a fresh attempt unless the
    /// stored one is already completed.
    #[instrument(skip(self))]
    pub fn begin(&mut self) -> Route {
        if let Some(record) = self.store.load().filter(SessionRecord::is_completed) {
            info!("Completed session found, redirecting to completion");
            self.adopt_completed(record);
            return Route::Completed;
        }
        self.reset_attempt();
        info!(start_time = self.start_time(), "Session begun");
        Route::Play
    }

    /// Enters the play surface: resumes, creates, or redirects.
    #[instrument(skip(self))]
    pub fn start(&mut self) -> Route {
        match self.store.load() {
            None => {
                self.reset_attempt();
                info!(start_time = self.start_time(), "No session found, created a new one");
                Route::Play
            }
            Some(record) if record.is_completed() => {
                info!("Session already completed, redirecting away from play");
                self.adopt_completed(record);
                Route::Completed
            }
            Some(mut record) => {
                let board = self.restore_board(&record);
                if board.is_goal() {
                    warn!(moves = record.moves(), "Stored board is already solved, completing session");
                    record.complete(self.clock.now_ms());
                    self.adopt_completed(record);
                    self.persist();
                    return Route::Completed;
                }
                self.board = board;
                info!(moves = record.moves(), start_time = record.start_time(), "Session resumed");
                self.record = Some(record);
                self.selected = None;
                self.restart_pending = false;
                Route::Play
            }
        }
    }

    /// Selects a peg: lifts its disk, puts it back, or moves onto it.
    #[instrument(skip(self))]
    pub fn select_peg(&mut self, peg: PegId) -> SelectOutcome {
        if !self.is_playing() {
            debug!("Selection ignored, no game in play");
            return SelectOutcome::Ignored;
        }

        match self.selected {
            None if self.board.peg(peg).is_empty() => {
                debug!("Selection ignored, peg is empty");
                SelectOutcome::Ignored
            }
            None => {
                self.selected = Some(peg);
                debug!("Peg selected");
                SelectOutcome::Selected(peg)
            }
            Some(current) if current == peg => {
                self.selected = None;
                debug!("Peg deselected");
                SelectOutcome::Deselected
            }
            Some(current) => SelectOutcome::Move(self.apply_move(current, peg)),
        }
    }

    /// Starts dragging the top disk of `peg`. Returns false for an empty peg.
    #[instrument(skip(self))]
    pub fn drag_start(&mut self, peg: PegId) -> bool {
        if !self.is_playing() || self.board.peg(peg).is_empty() {
            return false;
        }
        self.selected = Some(peg);
        true
    }

    /// Drops the dragged disk on `peg`, sharing the click path.
    #[instrument(skip(self))]
    pub fn drop_on(&mut self, peg: PegId) -> SelectOutcome {
        if self.selected.is_none() {
            return SelectOutcome::Ignored;
        }
        self.select_peg(peg)
    }

    /// Moves the top disk of `from` onto `to`, persisting a legal move.
    ///
    /// A rejected placement keeps the current selection so the player can
    /// pick another target.
    #[instrument(skip(self))]
    pub fn apply_move(&mut self, from: PegId, to: PegId) -> MoveOutcome {
        if !self.is_playing() {
            debug!("Move ignored, session not in play");
            return MoveOutcome::Ignored;
        }
        if from == to {
            self.selected = None;
            return MoveOutcome::Ignored;
        }

        let disk = match self.board.try_move(Move::new(from, to)) {
            Ok(disk) => disk,
            Err(MoveError::LargerOnSmaller { target, .. }) => {
                debug!(target = %target, "Illegal placement rejected");
                return MoveOutcome::Rejected { target };
            }
            Err(MoveError::EmptySource(_)) => {
                self.selected = None;
                return MoveOutcome::Ignored;
            }
            Err(e) => {
                warn!(error = %e, "Move failed");
                return MoveOutcome::Ignored;
            }
        };

        self.selected = None;
        let ranks = self.board.to_ranks();
        let Some(record) = self.record.as_mut() else {
            return MoveOutcome::Ignored;
        };
        record.record_move(ranks);
        let moves = *record.moves();

        let solved = self.board.is_goal();
        if solved {
            record.complete(self.clock.now_ms());
        }
        self.persist();

        if solved {
            info!(moves, "Tower completed");
            MoveOutcome::Solved { moves }
        } else {
            MoveOutcome::Moved { disk, moves }
        }
    }

    /// Asks for a restart. Returns false when there is nothing to restart.
    #[instrument(skip(self))]
    pub fn request_restart(&mut self) -> bool {
        if self.record.is_none() {
            return false;
        }
        self.restart_pending = true;
        true
    }

    /// Dismisses a pending restart request.
    #[instrument(skip(self))]
    pub fn cancel_restart(&mut self) {
        self.restart_pending = false;
    }

    /// Confirms a pending restart, discarding all progress.
    ///
    /// Returns false if no restart was requested.
    #[instrument(skip(self))]
    pub fn confirm_restart(&mut self) -> bool {
        if !self.restart_pending {
            debug!("Restart confirmation without request ignored");
            return false;
        }
        self.reset_attempt();
        info!(start_time = self.start_time(), "Session restarted");
        true
    }

    /// Snapshot for the play surface.
    #[instrument(skip(self))]
    pub fn play_view(&self) -> PlayView {
        let elapsed = match &self.record {
            Some(record) if record.is_completed() => record.duration_ms().unwrap_or(0),
            Some(record) => record.elapsed_ms(self.clock.now_ms()),
            None => 0,
        };
        PlayView::new(
            self.board.clone(),
            self.selected,
            self.moves(),
            format_hms(elapsed),
            self.restart_pending,
        )
    }

    /// Snapshot for the completion surface, read from the store.
    ///
    /// `None` means the stored session is not completed and the caller should
    /// send the player back to the entry surface.
    #[instrument(skip(self))]
    pub fn completion_view(&self) -> Option<CompletionView> {
        let record = self.store.load().filter(SessionRecord::is_completed)?;
        Some(CompletionView::new(
            *record.moves(),
            record.duration_ms().map(format_hms),
            minimum_moves(self.disk_count),
        ))
    }

    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Peg holding the lifted disk.
    pub fn selected(&self) -> Option<PegId> {
        self.selected
    }

    /// The in-memory session record, once started.
    pub fn record(&self) -> Option<&SessionRecord> {
        self.record.as_ref()
    }

    /// Current session status, once started.
    pub fn status(&self) -> Option<SessionStatus> {
        self.record.as_ref().map(|r| *r.status())
    }

    /// Legal moves in the current attempt.
    pub fn moves(&self) -> u32 {
        self.record.as_ref().map_or(0, |r| *r.moves())
    }

    /// Whether a restart awaits confirmation.
    pub fn restart_pending(&self) -> bool {
        self.restart_pending
    }

    /// The session store.
    pub fn store(&self) -> &SessionStore<K> {
        &self.store
    }

    fn is_playing(&self) -> bool {
        self.record.as_ref().is_some_and(SessionRecord::is_playing)
    }

    fn start_time(&self) -> i64 {
        self.record.as_ref().map_or(0, |r| *r.start_time())
    }

    fn reset_attempt(&mut self) {
        self.board = Board::new(self.disk_count);
        self.record = Some(SessionRecord::begin(self.clock.now_ms()));
        self.selected = None;
        self.restart_pending = false;
        self.persist();
    }

    fn adopt_completed(&mut self, record: SessionRecord) {
        self.board = self.restore_board(&record);
        self.record = Some(record);
        self.selected = None;
        self.restart_pending = false;
    }

    fn restore_board(&self, record: &SessionRecord) -> Board {
        let Some(pegs) = record.pegs().clone() else {
            return Board::new(self.disk_count);
        };
        match Board::from_ranks(pegs) {
            Ok(board) if board.disk_count() == self.disk_count => board,
            Ok(board) => {
                warn!(
                    stored = board.disk_count(),
                    expected = self.disk_count,
                    "Stored board has wrong disk count, using initial board"
                );
                Board::new(self.disk_count)
            }
            Err(e) => {
                warn!(error = %e, "Stored board is invalid, using initial board");
                Board::new(self.disk_count)
            }
        }
    }

    fn persist(&self) {
        let Some(record) = &self.record else {
            return;
        };
        if let Err(e) = self.store.save(record) {
            warn!(error = %e, "Failed to persist session record");
        }
    }
}
