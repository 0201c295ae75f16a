use crate::core::assigner::GroupAssigner;
use crate::core::store::EnrollmentStore;
use crate::core::timer::SessionTimer;
use crate::core::{
    EnrollmentInput, EnrollmentRecord, GroupAssignment, Repository, TickScheduler,
};
use crate::utils::error::Result;
use rand::Rng;

/// Outcome of a randomization request. An empty roster is informational,
/// not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RandomizeOutcome {
    NothingToAssign,
    Assigned { group_a: usize, group_b: usize },
}

/// The session screen's state: roster access, the current (ephemeral)
/// grouping, and the countdown timer, with all capabilities injected.
pub struct SessionManager<R: Repository, G: Rng, S: TickScheduler> {
    store: EnrollmentStore<R>,
    assigner: GroupAssigner<G>,
    timer: SessionTimer<S>,
    groups: GroupAssignment,
}

impl<R: Repository, G: Rng, S: TickScheduler> SessionManager<R, G, S> {
    pub fn new(
        store: EnrollmentStore<R>,
        assigner: GroupAssigner<G>,
        timer: SessionTimer<S>,
    ) -> Self {
        Self {
            store,
            assigner,
            timer,
            groups: GroupAssignment::default(),
        }
    }

    pub async fn enroll(&self, input: EnrollmentInput) -> Result<EnrollmentRecord> {
        self.store.append(input).await
    }

    pub async fn roster(&self) -> Result<Vec<EnrollmentRecord>> {
        self.store.load().await
    }

    /// Loads a fresh snapshot and partitions it. The grouping is held in
    /// memory only and replaced wholesale on every run.
    pub async fn randomize(&mut self) -> Result<RandomizeOutcome> {
        let snapshot = self.store.load().await?;
        if snapshot.is_empty() {
            self.groups = GroupAssignment::default();
            return Ok(RandomizeOutcome::NothingToAssign);
        }

        self.groups = self.assigner.run(&snapshot);
        Ok(RandomizeOutcome::Assigned {
            group_a: self.groups.group_a.len(),
            group_b: self.groups.group_b.len(),
        })
    }

    /// Removes all enrollment data. The grouping is derived from the cleared
    /// records, so it is dropped with them.
    pub async fn reset(&mut self) -> Result<()> {
        self.store.clear().await?;
        self.groups = GroupAssignment::default();
        Ok(())
    }

    pub fn groups(&self) -> &GroupAssignment {
        &self.groups
    }

    pub fn set_timer(&mut self, minutes: u64, seconds: u64) -> Result<()> {
        self.timer.configure(minutes, seconds)
    }

    pub fn start_timer(&mut self) -> Result<()> {
        self.timer.start()
    }

    pub fn timer(&self) -> &SessionTimer<S> {
        &self.timer
    }
}
