use crate::utils::error::Result;
use async_trait::async_trait;

/// Durable key-value storage for the enrollment collection. Injected rather
/// than reached for globally so tests can substitute an in-memory fake.
pub trait Repository: Send + Sync {
    fn read(&self, key: &str)
        -> impl std::future::Future<Output = Result<Option<Vec<u8>>>> + Send;
    fn write(
        &self,
        key: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn remove(&self, key: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn data_path(&self) -> &str;
    fn ledger_endpoint(&self) -> Option<&str>;
}

/// External attestation service. Submissions are out-of-band and
/// fire-and-forget: callers must never let a failure touch local state.
#[async_trait]
pub trait Ledger: Send + Sync {
    async fn submit_participant(&self, name: &str) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickFlow {
    Continue,
    Stop,
}

pub type TickAction = Box<dyn FnMut() -> TickFlow + Send>;

/// Cancellation token for a scheduled repeating action. Cancels on drop, so
/// tearing down the owner also tears down the tick loop.
pub struct TickHandle {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl TickHandle {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

/// Scheduling capability for the countdown: schedules `action` once per
/// second until it reports [`TickFlow::Stop`] or the handle is cancelled.
pub trait TickScheduler: Send + Sync {
    fn every_second(&self, action: TickAction) -> TickHandle;
}
