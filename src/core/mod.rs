pub mod assigner;
pub mod session;
pub mod store;
pub mod timer;

pub use crate::domain::model::{
    EnrollmentInput, EnrollmentRecord, Gender, Group, GroupAssignment,
};
pub use crate::domain::ports::{
    ConfigProvider, Ledger, Repository, TickAction, TickFlow, TickHandle, TickScheduler,
};
pub use crate::utils::error::Result;
