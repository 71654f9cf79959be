pub mod persistable;
pub use persistable::*;

pub mod holding_ledger;
pub use holding_ledger::*;

pub mod event_log;
pub use event_log::*;

pub mod summary_store;
pub use summary_store::*;

pub mod portfolio_manager;
pub use portfolio_manager::*;
