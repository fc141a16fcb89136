//! Strictly Hanoi library - a type-safe Tower of Hanoi with persisted sessions
//!
//! The board rejects illegal placements before anything mutates, and a
//! session record survives restarts through a key-value store.
//!
//! # Architecture
//!
//! - **Games**: Board model, placement rules, invariants, and move contracts
//! - **Session**: The persisted session record and its key-value store
//! - **Controller**: Session lifecycle, selection, and derived views
//! - **Timers**: Cancellable ticker and one-shot timers for the front-end
//!
//! # Example
//!
//! ```
//! use strictly_hanoi::{GameController, ManualClock, MemoryKv, PegId, Route, SessionStore};
//!
//! let store = SessionStore::new(MemoryKv::new());
//! let mut game = GameController::new(store, ManualClock::new(0), 3);
//! assert_eq!(game.start(), Route::Play);
//!
//! game.select_peg(PegId::Left);
//! game.select_peg(PegId::Right);
//! assert_eq!(game.moves(), 1);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod controller;
mod games;
mod session;
mod timers;

// Crate-level exports - Configuration
pub use config::{ConfigError, HanoiConfig};

// Crate-level exports - Game types
pub use games::hanoi::{
    Board, BoardError, Contract, DEFAULT_DISKS, DescendingPegsInvariant, Disk,
    DiskConservationInvariant, HanoiInvariants, Invariant, InvariantSet, InvariantViolation,
    LegalMove, Move, MoveContract, MoveError, Peg, PegId, can_place, is_goal, minimum_moves,
};

// Crate-level exports - Session persistence
pub use session::{
    FileKv, KeyValueStore, MemoryKv, SESSION_KEY, SessionRecord, SessionStatus, SessionStore,
    StoreError,
};

// Crate-level exports - Controller
pub use controller::{
    Clock, CompletionView, GameController, ManualClock, MoveOutcome, PlayView, Route,
    SelectOutcome, SystemClock, format_hms,
};

// Crate-level exports - Timers
pub use timers::{
    COMPLETION_DELAY, Deferred, INVALID_FLASH, TICK_PERIOD, Ticker, TimerEvent, TimerSet,
};
