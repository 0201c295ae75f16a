pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{HttpLedger, LocalStorage, TokioTicker};
pub use config::CliConfig;
pub use core::assigner::GroupAssigner;
pub use core::session::SessionManager;
pub use core::store::EnrollmentStore;
pub use core::timer::SessionTimer;
pub use utils::error::{EnrollError, Result};
