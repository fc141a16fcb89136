//! Game controller: session lifecycle, selection, and derived views.

mod clock;
mod game;
mod view;

pub use clock::{Clock, ManualClock, SystemClock};
pub use game::{GameController, MoveOutcome, SelectOutcome};
pub use view::{CompletionView, PlayView, Route, format_hms};
