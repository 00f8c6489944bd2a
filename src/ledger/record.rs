//! Ledger records and the contract client interface
//!
//! The ledger program owns all game rules. This crate only reads zombie
//! records and forwards actions through `ZombieLedger`, which callers
//! implement on top of whatever wallet/contract client they use.

use crate::dna::Dna;
use serde::{Deserialize, Serialize};

/// Zombie identifier on the ledger
pub type ZombieId = u64;

/// A zombie as reported by the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZombieRecord {
    pub id: ZombieId,
    pub name: String,
    pub dna: Dna,
    /// On-ledger level (authoritative, unlike the DNA level estimate)
    pub level: u32,
    /// Unix timestamp (seconds) after which the zombie may act again
    pub ready_time: i64,
    pub win_count: u32,
    pub loss_count: u32,
}

impl ZombieRecord {
    pub fn is_ready(&self, now: i64) -> bool {
        self.ready_time <= now
    }

    /// Seconds left on the cooldown, zero when ready
    pub fn cooldown_remaining(&self, now: i64) -> i64 {
        (self.ready_time - now).max(0)
    }
}

/// Errors reported by a ledger client
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("Zombie {0} not found")]
    NotFound(ZombieId),

    #[error("Account {account} does not own zombie {id}")]
    NotOwner { account: String, id: ZombieId },

    #[error("Zombie {0} is still cooling down")]
    NotReady(ZombieId),

    #[error("Transaction rejected: {0}")]
    Rejected(String),
}

/// Contract client for the zombie ledger program
pub trait ZombieLedger {
    /// Ids of all zombies owned by `owner`
    fn owner_zombies(&self, owner: &str) -> Result<Vec<ZombieId>, LedgerError>;

    fn zombie(&self, id: ZombieId) -> Result<ZombieRecord, LedgerError>;

    /// Mint a zombie with ledger-chosen DNA; returns its id
    fn create_random_zombie(&mut self, owner: &str, name: &str) -> Result<ZombieId, LedgerError>;

    fn level_up(&mut self, owner: &str, id: ZombieId) -> Result<(), LedgerError>;

    fn feed_on_kitty(
        &mut self,
        owner: &str,
        id: ZombieId,
        kitty_id: u64,
    ) -> Result<(), LedgerError>;

    fn attack(&mut self, owner: &str, id: ZombieId, target: ZombieId) -> Result<(), LedgerError>;

    fn transfer(&mut self, owner: &str, to: &str, id: ZombieId) -> Result<(), LedgerError>;

    fn change_name(&mut self, owner: &str, id: ZombieId, name: &str) -> Result<(), LedgerError>;
}
