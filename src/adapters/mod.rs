// Adapters layer: concrete implementations of the domain ports (filesystem
// storage, tokio tick scheduling, HTTP ledger).

pub mod ledger;
pub mod local_storage;
pub mod ticker;

pub use ledger::HttpLedger;
pub use local_storage::LocalStorage;
pub use ticker::TokioTicker;
