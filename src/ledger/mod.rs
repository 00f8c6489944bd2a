//! Ledger access and the account dashboard
//!
//! The ledger client is injected into the dashboard; nothing here holds
//! process-wide state.

mod dashboard;
mod memory;
mod record;

pub use dashboard::{
    format_cooldown, is_account_address, Dashboard, DashboardError, LogSink, Status, StatusKind,
    StatusSink, ZombieCard,
};
pub use memory::{MemoryLedger, COOLDOWN_SECS};
pub use record::{LedgerError, ZombieId, ZombieLedger, ZombieRecord};
