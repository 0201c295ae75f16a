use crate::core::{TickAction, TickFlow, TickHandle, TickScheduler};
use std::time::Duration;
use tokio::time::MissedTickBehavior;

/// Tick scheduler backed by a spawned tokio interval task. Cancelling the
/// handle aborts the task.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTicker;

impl TickScheduler for TokioTicker {
    fn every_second(&self, mut action: TickAction) -> TickHandle {
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first interval tick completes immediately; consume it so
            // the first decrement lands a full second after start.
            interval.tick().await;
            loop {
                interval.tick().await;
                if let TickFlow::Stop = action() {
                    break;
                }
            }
        });

        TickHandle::new(move || task.abort())
    }
}
