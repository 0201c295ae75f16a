use crate::core::{TickFlow, TickHandle, TickScheduler};
use crate::utils::error::{EnrollError, Result};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Sent exactly once each time a countdown reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerCompleted;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    /// No duration configured yet.
    Idle,
    /// Configured and ready to start.
    Armed,
    /// Counting down, one decrement per second.
    Running,
    /// Reached zero by natural countdown; start requires a fresh configure.
    Completed,
}

#[derive(Debug)]
struct TimerInner {
    configured_seconds: u64,
    remaining_seconds: u64,
    running: bool,
    phase: TimerPhase,
}

/// Countdown state machine driven by an injected tick scheduler.
///
/// At most one tick loop is active per timer: `configure` cancels any
/// in-flight loop before re-arming, `start` refuses to double-schedule, and
/// dropping the timer cancels the loop via the handle. There is no
/// pause/resume; the only way out of Running besides completion is a fresh
/// `configure`.
pub struct SessionTimer<S: TickScheduler> {
    scheduler: S,
    inner: Arc<Mutex<TimerInner>>,
    handle: Option<TickHandle>,
    completion_tx: UnboundedSender<TimerCompleted>,
}

impl<S: TickScheduler> SessionTimer<S> {
    /// Returns the timer and the receiver on which completions are signaled.
    pub fn new(scheduler: S) -> (Self, UnboundedReceiver<TimerCompleted>) {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        let timer = Self {
            scheduler,
            inner: Arc::new(Mutex::new(TimerInner {
                configured_seconds: 0,
                remaining_seconds: 0,
                running: false,
                phase: TimerPhase::Idle,
            })),
            handle: None,
            completion_tx,
        };
        (timer, completion_rx)
    }

    /// Arms the timer with `minutes * 60 + seconds`. Rejects a non-positive
    /// total with the timer state untouched; otherwise any in-flight tick
    /// loop is cancelled before re-arming.
    pub fn configure(&mut self, minutes: u64, seconds: u64) -> Result<()> {
        let total = minutes * 60 + seconds;
        if total == 0 {
            return Err(EnrollError::validation(
                "duration",
                "must be greater than zero",
            ));
        }

        if let Some(handle) = self.handle.take() {
            handle.cancel();
        }

        let mut timer = self.lock();
        timer.configured_seconds = total;
        timer.remaining_seconds = total;
        timer.running = false;
        timer.phase = TimerPhase::Armed;
        tracing::debug!("timer armed for {}s", total);
        Ok(())
    }

    /// Begins the countdown. Rejects if nothing remains to count down or a
    /// countdown is already running (a second loop would silently double the
    /// tick rate).
    pub fn start(&mut self) -> Result<()> {
        {
            let mut timer = self.lock();
            if timer.running {
                return Err(EnrollError::validation(
                    "timer",
                    "countdown is already running",
                ));
            }
            if timer.remaining_seconds == 0 {
                return Err(EnrollError::validation(
                    "timer",
                    "no time remaining; set the timer first",
                ));
            }
            timer.running = true;
            timer.phase = TimerPhase::Running;
        }

        let inner = Arc::clone(&self.inner);
        let completion_tx = self.completion_tx.clone();
        self.handle = Some(self.scheduler.every_second(Box::new(move || {
            let mut timer = match inner.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            if !timer.running {
                // Stale loop: the timer was reconfigured underneath it.
                return TickFlow::Stop;
            }
            timer.remaining_seconds -= 1;
            if timer.remaining_seconds == 0 {
                timer.running = false;
                timer.phase = TimerPhase::Completed;
                let _ = completion_tx.send(TimerCompleted);
                return TickFlow::Stop;
            }
            TickFlow::Continue
        })));

        tracing::debug!("countdown started");
        Ok(())
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.lock().remaining_seconds
    }

    pub fn configured_seconds(&self) -> u64 {
        self.lock().configured_seconds
    }

    pub fn is_running(&self) -> bool {
        self.lock().running
    }

    pub fn phase(&self) -> TimerPhase {
        self.lock().phase
    }

    fn lock(&self) -> MutexGuard<'_, TimerInner> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// Renders a second count as `mm:ss` for display.
pub fn format_mm_ss(total_seconds: u64) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}
