//! The persisted session record and its transitions.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Lifecycle status stored in the session record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// An attempt is underway.
    Playing,
    /// The tower reached the target peg.
    Completed,
}

/// The single persisted session token.
///
/// Field names follow the stored JSON shape (`startTime`, `completedAt`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// Current status.
    status: SessionStatus,
    /// When this attempt began (ms since epoch).
    start_time: i64,
    /// Legal moves made in this attempt.
    #[serde(default)]
    moves: u32,
    /// When the tower was completed (ms since epoch).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    completed_at: Option<i64>,
    /// Board layout, bottom-to-top per peg.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pegs: Option<[Vec<usize>; 3]>,
}

impl SessionRecord {
    /// Creates a fresh playing record starting at `now`.
    #[instrument]
    pub fn begin(now: i64) -> Self {
        Self {
            status: SessionStatus::Playing,
            start_time: now,
            moves: 0,
            completed_at: None,
            pegs: None,
        }
    }

    /// True while the attempt is still being played.
    pub fn is_playing(&self) -> bool {
        self.status == SessionStatus::Playing
    }

    /// True once the attempt has been completed.
    pub fn is_completed(&self) -> bool {
        self.status == SessionStatus::Completed
    }

    /// Counts one legal move and stores the resulting layout.
    #[instrument(skip(self, pegs), fields(moves = self.moves))]
    pub fn record_move(&mut self, pegs: [Vec<usize>; 3]) {
        self.moves = self.moves.saturating_add(1);
        self.pegs = Some(pegs);
        debug!(moves = self.moves, "Move recorded");
    }

    /// Marks the attempt completed at `now`.
    ///
    /// `completedAt` never precedes `startTime`.
    #[instrument(skip(self), fields(start_time = self.start_time))]
    pub fn complete(&mut self, now: i64) {
        self.status = SessionStatus::Completed;
        self.completed_at = Some(now.max(self.start_time));
    }

    /// Milliseconds elapsed between `startTime` and `now`, never negative.
    pub fn elapsed_ms(&self, now: i64) -> i64 {
        now.saturating_sub(self.start_time).max(0)
    }

    /// Final duration of a completed attempt, clamped to zero.
    ///
    /// Returns `None` when no completion time was stored.
    pub fn duration_ms(&self) -> Option<i64> {
        self.completed_at
            .map(|done| done.saturating_sub(self.start_time).max(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_is_playing_with_zero_moves() {
        let record = SessionRecord::begin(1_000);
        assert!(record.is_playing());
        assert_eq!(*record.moves(), 0);
        assert_eq!(*record.start_time(), 1_000);
        assert_eq!(*record.completed_at(), None);
    }

    #[test]
    fn test_serializes_original_shape() {
        let record = SessionRecord::begin(1_700_000_000_000);
        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"status": "playing", "startTime": 1_700_000_000_000i64, "moves": 0})
        );
    }

    #[test]
    fn test_moves_defaults_to_zero() {
        let record: SessionRecord =
            serde_json::from_str(r#"{"status":"playing","startTime":5}"#).expect("parse");
        assert_eq!(*record.moves(), 0);
        assert_eq!(*record.pegs(), None);
    }

    #[test]
    fn test_unknown_status_rejected() {
        let result = serde_json::from_str::<SessionRecord>(r#"{"status":"paused","startTime":5}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_complete_stamps_time() {
        let mut record = SessionRecord::begin(1_000);
        record.record_move([vec![], vec![], vec![0]]);
        record.complete(4_500);
        assert!(record.is_completed());
        assert_eq!(*record.completed_at(), Some(4_500));
        assert_eq!(record.duration_ms(), Some(3_500));
        assert_eq!(*record.moves(), 1);
    }

    #[test]
    fn test_complete_never_precedes_start() {
        let mut record = SessionRecord::begin(1_000);
        record.complete(900);
        assert_eq!(*record.completed_at(), Some(1_000));
        assert_eq!(record.duration_ms(), Some(0));
    }

    #[test]
    fn test_stored_duration_clamped_to_zero() {
        let record: SessionRecord = serde_json::from_str(
            r#"{"status":"completed","startTime":5000,"completedAt":4000,"moves":31}"#,
        )
        .expect("parse");
        assert_eq!(record.duration_ms(), Some(0));
    }

    #[test]
    fn test_elapsed_never_negative() {
        let record = SessionRecord::begin(10_000);
        assert_eq!(record.elapsed_ms(9_000), 0);
        assert_eq!(record.elapsed_ms(12_500), 2_500);
    }
}
