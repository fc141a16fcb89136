//! Cancellable timers for the play surface.
//!
//! Every timer is a tokio task owned by a guard; dropping the guard aborts
//! the task, so replacing or clearing a timer can never leave one behind.

use crate::games::hanoi::PegId;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant};
use tracing::{debug, instrument};

/// Refresh cadence of the elapsed-time display.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// How long a rejected peg stays flagged as invalid.
pub const INVALID_FLASH: Duration = Duration::from_millis(300);

/// Pause between the winning move and the completion surface.
pub const COMPLETION_DELAY: Duration = Duration::from_millis(350);

/// Events delivered by timers to the UI loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Recompute the elapsed-time display.
    Tick,
    /// Stop flagging this peg as invalid.
    ClearInvalid(PegId),
    /// Show the completion surface.
    ShowCompletion,
}

/// Aborts the owned task when dropped.
#[derive(Debug)]
struct TaskGuard(JoinHandle<()>);

impl Drop for TaskGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Periodic task sending [`TimerEvent::Tick`].
#[derive(Debug)]
pub struct Ticker {
    _task: TaskGuard,
}

impl Ticker {
    /// Spawns a ticker; the first tick arrives one `period` from now.
    #[instrument(skip(tx))]
    pub fn spawn(period: Duration, tx: UnboundedSender<TimerEvent>) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                if tx.send(TimerEvent::Tick).is_err() {
                    break;
                }
            }
        });
        Self {
            _task: TaskGuard(handle),
        }
    }
}

/// One-shot task sending a single event after a delay.
#[derive(Debug)]
pub struct Deferred {
    task: TaskGuard,
}

impl Deferred {
    /// Spawns a one-shot timer.
    #[instrument(skip(tx))]
    pub fn spawn(delay: Duration, event: TimerEvent, tx: UnboundedSender<TimerEvent>) -> Self {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(event);
        });
        Self {
            task: TaskGuard(handle),
        }
    }

    /// True once the event was sent or the task was aborted.
    pub fn is_finished(&self) -> bool {
        self.task.0.is_finished()
    }
}

/// All timers owned by the play surface.
#[derive(Debug)]
pub struct TimerSet {
    tx: UnboundedSender<TimerEvent>,
    ticker: Option<Ticker>,
    flash: Option<Deferred>,
    completion: Option<Deferred>,
}

impl TimerSet {
    /// Creates an empty set sending on `tx`.
    pub fn new(tx: UnboundedSender<TimerEvent>) -> Self {
        Self {
            tx,
            ticker: None,
            flash: None,
            completion: None,
        }
    }

    /// Replaces the ticker; call whenever the start time changes.
    #[instrument(skip(self))]
    pub fn restart_ticker(&mut self) {
        self.ticker = Some(Ticker::spawn(TICK_PERIOD, self.tx.clone()));
        debug!("Ticker (re)started");
    }

    /// Cancels the ticker.
    #[instrument(skip(self))]
    pub fn stop_ticker(&mut self) {
        self.ticker = None;
    }

    /// Whether a ticker is running.
    pub fn ticking(&self) -> bool {
        self.ticker.is_some()
    }

    /// Flags `peg` for [`INVALID_FLASH`], cancelling any earlier flash.
    #[instrument(skip(self))]
    pub fn flash_invalid(&mut self, peg: PegId) {
        self.flash = Some(Deferred::spawn(
            INVALID_FLASH,
            TimerEvent::ClearInvalid(peg),
            self.tx.clone(),
        ));
    }

    /// Schedules the completion transition. Returns false if one is already
    /// scheduled for this completion.
    #[instrument(skip(self))]
    pub fn schedule_completion(&mut self) -> bool {
        if self.completion.is_some() {
            debug!("Completion already scheduled");
            return false;
        }
        self.completion = Some(Deferred::spawn(
            COMPLETION_DELAY,
            TimerEvent::ShowCompletion,
            self.tx.clone(),
        ));
        true
    }

    /// Cancels every timer.
    #[instrument(skip(self))]
    pub fn clear(&mut self) {
        self.ticker = None;
        self.flash = None;
        self.completion = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;
    use tokio::time::timeout;

    #[tokio::test(start_paused = true)]
    async fn test_ticker_ticks_each_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _ticker = Ticker::spawn(TICK_PERIOD, tx);
        let start = Instant::now();

        assert_eq!(rx.recv().await, Some(TimerEvent::Tick));
        assert_eq!(rx.recv().await, Some(TimerEvent::Tick));
        assert!(start.elapsed() >= TICK_PERIOD * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_ticker_stops() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let ticker = Ticker::spawn(TICK_PERIOD, tx.clone());
        drop(ticker);

        assert!(timeout(Duration::from_secs(5), rx.recv()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_deferred_fires_once() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _keep = tx.clone();
        let deferred = Deferred::spawn(COMPLETION_DELAY, TimerEvent::ShowCompletion, tx);

        assert_eq!(rx.recv().await, Some(TimerEvent::ShowCompletion));
        assert!(timeout(Duration::from_secs(5), rx.recv()).await.is_err());
        assert!(deferred.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_deferred_never_fires() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let deferred = Deferred::spawn(INVALID_FLASH, TimerEvent::ClearInvalid(PegId::Left), tx.clone());
        drop(deferred);

        assert!(timeout(Duration::from_secs(5), rx.recv()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_flash_replaces_old() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timers = TimerSet::new(tx);

        timers.flash_invalid(PegId::Middle);
        timers.flash_invalid(PegId::Right);

        assert_eq!(rx.recv().await, Some(TimerEvent::ClearInvalid(PegId::Right)));
        assert!(timeout(Duration::from_secs(5), rx.recv()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_completion_scheduled_once() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timers = TimerSet::new(tx);

        assert!(timers.schedule_completion());
        assert!(!timers.schedule_completion());

        assert_eq!(rx.recv().await, Some(TimerEvent::ShowCompletion));
        assert!(timeout(Duration::from_secs(5), rx.recv()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_cancels_everything() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timers = TimerSet::new(tx);
        timers.restart_ticker();
        timers.flash_invalid(PegId::Left);
        timers.schedule_completion();
        assert!(timers.ticking());

        timers.clear();

        assert!(!timers.ticking());
        assert!(timeout(Duration::from_secs(5), rx.recv()).await.is_err());
    }
}
