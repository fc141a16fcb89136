//! Application state and logic.

use super::input::Action;
use strictly_hanoi::{
    Clock, CompletionView, GameController, KeyValueStore, MoveOutcome, PegId, PlayView, Route,
    SelectOutcome, TimerEvent, TimerSet,
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, instrument};

const ENTRY_HINT: &str = "Press Enter to begin, 'q' to quit.";
const PLAY_HINT: &str = "1-3 or ←/→ + Enter to pick a peg, 'r' to restart, 'q' to quit.";

/// Main application state.
#[derive(Debug)]
pub struct App<K, C> {
    controller: GameController<K, C>,
    route: Route,
    cursor: PegId,
    invalid_peg: Option<PegId>,
    drag_from: Option<PegId>,
    pressed: Option<PegId>,
    timers: TimerSet,
    play: PlayView,
    completion: Option<CompletionView>,
    status_message: String,
    quit: bool,
}

impl<K: KeyValueStore, C: Clock> App<K, C> {
    /// Creates the application and routes to the first screen.
    ///
    /// A stored game in progress resumes straight into play; a completed one
    /// is loaded so it can be restarted from the summary.
    #[instrument(skip_all)]
    pub fn new(controller: GameController<K, C>, timer_tx: UnboundedSender<TimerEvent>) -> Self {
        let play = controller.play_view();
        let mut app = Self {
            controller,
            route: Route::Entry,
            cursor: PegId::SOURCE,
            invalid_peg: None,
            drag_from: None,
            pressed: None,
            timers: TimerSet::new(timer_tx),
            play,
            completion: None,
            status_message: ENTRY_HINT.to_string(),
            quit: false,
        };

        let route = if app.controller.store().load().is_some() {
            app.controller.start()
        } else {
            Route::Entry
        };
        app.navigate(route);
        app
    }

    /// Current screen.
    pub fn route(&self) -> Route {
        self.route
    }

    /// Peg under the keyboard cursor.
    pub fn cursor(&self) -> PegId {
        self.cursor
    }

    /// Peg currently flashing as an invalid target.
    pub fn invalid_peg(&self) -> Option<PegId> {
        self.invalid_peg
    }

    /// Peg a drag started from.
    pub fn drag_from(&self) -> Option<PegId> {
        self.drag_from
    }

    /// Latest play-surface snapshot.
    pub fn play(&self) -> &PlayView {
        &self.play
    }

    /// Completion summary, once shown.
    pub fn completion(&self) -> Option<&CompletionView> {
        self.completion.as_ref()
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Whether the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Whether a restart awaits confirmation.
    pub fn restart_pending(&self) -> bool {
        self.controller.restart_pending()
    }

    /// Handles a decoded user action.
    #[instrument(skip(self))]
    pub fn handle_action(&mut self, action: Action) {
        debug!(?action, "Handling action");

        match action {
            Action::Quit => {
                info!("User quit");
                self.quit = true;
            }
            Action::Begin => {
                let route = self.controller.begin();
                self.navigate(route);
            }
            Action::SelectPeg(peg) => {
                self.cursor = peg;
                let outcome = self.controller.select_peg(peg);
                self.on_select(outcome);
            }
            Action::SelectCursor => {
                let outcome = self.controller.select_peg(self.cursor);
                self.on_select(outcome);
            }
            Action::CursorLeft => self.cursor = self.cursor.prev(),
            Action::CursorRight => self.cursor = self.cursor.next(),
            Action::RequestRestart => {
                if self.controller.request_restart() {
                    self.status_message = "Restart and lose all progress? (y/n)".to_string();
                }
            }
            Action::ConfirmRestart => {
                if self.controller.confirm_restart() {
                    self.drag_from = None;
                    self.pressed = None;
                    self.completion = None;
                    self.navigate(Route::Play);
                }
            }
            Action::CancelRestart => {
                self.controller.cancel_restart();
                self.status_message = self.hint().to_string();
            }
            Action::Press(peg) => {
                self.cursor = peg;
                if self.controller.selected().is_some() {
                    self.pressed = Some(peg);
                } else if self.controller.drag_start(peg) {
                    self.drag_from = Some(peg);
                }
            }
            Action::Release(peg) => {
                if let Some(from) = self.drag_from.take() {
                    if from != peg {
                        let outcome = self.controller.drop_on(peg);
                        self.on_select(outcome);
                    }
                } else if self.pressed.take() == Some(peg) {
                    let outcome = self.controller.select_peg(peg);
                    self.on_select(outcome);
                }
            }
        }

        self.refresh();
    }

    /// Handles an event delivered by a timer.
    #[instrument(skip(self))]
    pub fn handle_timer(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::Tick => {}
            TimerEvent::ClearInvalid(peg) => {
                if self.invalid_peg == Some(peg) {
                    self.invalid_peg = None;
                }
            }
            TimerEvent::ShowCompletion => self.navigate(Route::Completed),
        }
        self.refresh();
    }

    fn on_select(&mut self, outcome: SelectOutcome) {
        match outcome {
            SelectOutcome::Selected(peg) => {
                self.status_message = format!("Lifted the top disk of the {} peg.", peg);
            }
            SelectOutcome::Deselected => {
                self.status_message = "Disk put back.".to_string();
            }
            SelectOutcome::Move(outcome) => self.on_move(outcome),
            SelectOutcome::Ignored => {}
        }
    }

    fn on_move(&mut self, outcome: MoveOutcome) {
        match outcome {
            MoveOutcome::Moved { disk, moves } => {
                self.invalid_peg = None;
                self.status_message = format!("Disk {} moved. {} moves so far.", disk.rank() + 1, moves);
            }
            MoveOutcome::Solved { moves } => {
                self.invalid_peg = None;
                self.timers.stop_ticker();
                self.timers.schedule_completion();
                self.status_message = format!("Solved in {} moves!", moves);
            }
            MoveOutcome::Rejected { target } => {
                self.invalid_peg = Some(target);
                self.timers.flash_invalid(target);
                self.status_message = "A larger disk cannot sit on a smaller one.".to_string();
            }
            MoveOutcome::Ignored => {}
        }
    }

    fn navigate(&mut self, route: Route) {
        self.timers.clear();
        self.invalid_peg = None;

        match route {
            Route::Entry => {
                self.route = Route::Entry;
                self.status_message = ENTRY_HINT.to_string();
            }
            Route::Play => {
                self.route = Route::Play;
                self.timers.restart_ticker();
                self.status_message = PLAY_HINT.to_string();
            }
            Route::Completed => match self.controller.completion_view() {
                Some(view) => {
                    self.route = Route::Completed;
                    self.completion = Some(view);
                    self.status_message = "'r' to play again, 'q' to quit.".to_string();
                }
                None => {
                    debug!("No completed session, back to entry");
                    self.route = Route::Entry;
                    self.completion = None;
                    self.status_message = ENTRY_HINT.to_string();
                }
            },
        }
        info!(route = ?self.route, "Navigated");
        self.refresh();
    }

    fn hint(&self) -> &'static str {
        match self.route {
            Route::Play => PLAY_HINT,
            _ => ENTRY_HINT,
        }
    }

    fn refresh(&mut self) {
        self.play = self.controller.play_view();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_hanoi::{KeyValueStore, ManualClock, MemoryKv, SESSION_KEY, SessionStore};
    use tokio::sync::mpsc;

    fn app(disks: usize) -> (App<MemoryKv, ManualClock>, mpsc::UnboundedReceiver<TimerEvent>) {
        app_with(MemoryKv::new(), disks)
    }

    fn app_with(
        kv: MemoryKv,
        disks: usize,
    ) -> (App<MemoryKv, ManualClock>, mpsc::UnboundedReceiver<TimerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let controller =
            GameController::new(SessionStore::new(kv), ManualClock::new(1_000), disks);
        (App::new(controller, tx), rx)
    }

    async fn next_non_tick(rx: &mut mpsc::UnboundedReceiver<TimerEvent>) -> Option<TimerEvent> {
        while let Some(event) = rx.recv().await {
            if event != TimerEvent::Tick {
                return Some(event);
            }
        }
        None
    }

    #[tokio::test(start_paused = true)]
    async fn test_starts_on_entry() {
        let (app, _rx) = app(3);
        assert_eq!(app.route(), Route::Entry);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_target_flashes_then_clears() {
        let (mut app, mut rx) = app(3);
        app.handle_action(Action::Begin);
        app.handle_action(Action::SelectPeg(PegId::Left));
        app.handle_action(Action::SelectPeg(PegId::Right));
        app.handle_action(Action::SelectPeg(PegId::Left));
        app.handle_action(Action::SelectPeg(PegId::Right));
        assert_eq!(app.invalid_peg(), Some(PegId::Right));

        let event = next_non_tick(&mut rx).await.expect("flash event");
        app.handle_timer(event);
        assert_eq!(app.invalid_peg(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_solve_shows_completion_after_delay() {
        let (mut app, mut rx) = app(1);
        app.handle_action(Action::Begin);
        app.handle_action(Action::SelectPeg(PegId::Left));
        app.handle_action(Action::SelectPeg(PegId::Right));
        assert_eq!(app.route(), Route::Play);

        let event = next_non_tick(&mut rx).await.expect("completion event");
        assert_eq!(event, TimerEvent::ShowCompletion);
        app.handle_timer(event);
        assert_eq!(app.route(), Route::Completed);
        assert_eq!(app.completion().map(|v| *v.moves()), Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drag_between_pegs_moves() {
        let (mut app, _rx) = app(3);
        app.handle_action(Action::Begin);
        app.handle_action(Action::Press(PegId::Left));
        assert_eq!(app.drag_from(), Some(PegId::Left));
        app.handle_action(Action::Release(PegId::Middle));
        assert_eq!(*app.play().moves(), 1);
        assert_eq!(app.drag_from(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_requires_confirmation() {
        let (mut app, _rx) = app(3);
        app.handle_action(Action::Begin);
        app.handle_action(Action::SelectPeg(PegId::Left));
        app.handle_action(Action::SelectPeg(PegId::Middle));
        app.handle_action(Action::RequestRestart);
        assert!(app.restart_pending());
        app.handle_action(Action::CancelRestart);
        assert_eq!(*app.play().moves(), 1);

        app.handle_action(Action::RequestRestart);
        app.handle_action(Action::ConfirmRestart);
        assert_eq!(*app.play().moves(), 0);
        assert_eq!(app.route(), Route::Play);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_after_relaunch_on_completed_session() {
        let kv = MemoryKv::new();
        kv.set(
            SESSION_KEY,
            r#"{"status":"completed","startTime":100,"completedAt":900,"moves":9}"#,
        )
        .expect("seed");
        let (mut app, _rx) = app_with(kv.clone(), 3);
        assert_eq!(app.route(), Route::Completed);

        app.handle_action(Action::RequestRestart);
        assert!(app.restart_pending());
        app.handle_action(Action::ConfirmRestart);

        assert_eq!(app.route(), Route::Play);
        assert_eq!(*app.play().moves(), 0);
        let raw = kv.get(SESSION_KEY).expect("get").expect("stored");
        assert!(raw.contains("\"playing\""));
    }

    #[tokio::test(start_paused = true)]
    async fn test_relaunch_resumes_game_in_progress() {
        let kv = MemoryKv::new();
        kv.set(
            SESSION_KEY,
            r#"{"status":"playing","startTime":100,"moves":1,"pegs":[[2,1],[0],[]]}"#,
        )
        .expect("seed");
        let (app, _rx) = app_with(kv, 3);

        assert_eq!(app.route(), Route::Play);
        assert_eq!(*app.play().moves(), 1);
    }
}
