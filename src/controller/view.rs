//! Derived views and navigation routes.

use crate::games::hanoi::{Board, PegId};
use derive_getters::Getters;
use derive_new::new;
use tracing::instrument;

/// Which surface the player should be looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Entry screen with the rules and a "Begin" action.
    Entry,
    /// The play surface.
    Play,
    /// The completion summary.
    Completed,
}

/// Formats milliseconds as `HH:MM:SS`, truncating partial seconds.
///
/// Negative inputs clamp to zero. Hours keep growing past 99.
#[instrument]
pub fn format_hms(ms: i64) -> String {
    let total_seconds = ms.max(0) / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Snapshot of the play surface.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct PlayView {
    /// Current board.
    board: Board,
    /// Peg holding the lifted disk.
    selected: Option<PegId>,
    /// Legal moves so far.
    moves: u32,
    /// Elapsed time as `HH:MM:SS`.
    elapsed: String,
    /// Whether a restart is awaiting confirmation.
    restart_pending: bool,
}

/// Snapshot of the completion surface.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct CompletionView {
    /// Final move count.
    moves: u32,
    /// Final duration as `HH:MM:SS`, or `None` if no completion time was stored.
    duration: Option<String>,
    /// Fewest moves that solve this tower.
    minimum_moves: u64,
}

impl CompletionView {
    /// Duration text, falling back to "Just now" when unknown.
    pub fn duration_label(&self) -> &str {
        self.duration.as_deref().unwrap_or("Just now")
    }
}
