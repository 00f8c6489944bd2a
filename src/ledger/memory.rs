//! MemoryLedger — in-process stand-in for the ledger program
//!
//! Used by tests and the CLI demo. It enforces ownership and cooldowns and
//! makes up its own DNA and combat outcomes; it is not the real contract.

use super::record::{LedgerError, ZombieId, ZombieLedger, ZombieRecord};
use crate::dna::Dna;
use chrono::Utc;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Seconds a zombie rests after feeding or attacking
pub const COOLDOWN_SECS: i64 = 24 * 60 * 60;

const ATTACK_WIN_PERCENT: u32 = 70;
const RENAME_MIN_LEVEL: u32 = 2;

/// In-memory zombie ledger
pub struct MemoryLedger {
    zombies: Vec<ZombieRecord>,
    owners: HashMap<ZombieId, String>,
    rng: StdRng,
    frozen_time: Option<i64>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Ledger with reproducible combat outcomes
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            zombies: Vec::new(),
            owners: HashMap::new(),
            rng,
            frozen_time: None,
        }
    }

    /// Pin the ledger clock (unix seconds); `None` follows wall time
    pub fn set_time(&mut self, now: Option<i64>) {
        self.frozen_time = now;
    }

    pub fn now(&self) -> i64 {
        self.frozen_time.unwrap_or_else(|| Utc::now().timestamp())
    }

    pub fn count(&self) -> usize {
        self.zombies.len()
    }

    pub fn owner_of(&self, id: ZombieId) -> Option<&str> {
        self.owners.get(&id).map(String::as_str)
    }

    /// DNA derived from a name, as the ledger would generate it
    pub fn dna_for_name(name: &str) -> Dna {
        Self::hash_to_dna(name.as_bytes())
    }

    fn hash_to_dna(data: &[u8]) -> Dna {
        let digest = Sha256::digest(data);
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest[..8]);
        Dna::from_u64_wrapping(u64::from_be_bytes(bytes))
    }

    fn mint(&mut self, owner: &str, name: &str, dna: Dna) -> ZombieId {
        let id = self.zombies.len() as ZombieId;
        self.zombies.push(ZombieRecord {
            id,
            name: name.to_string(),
            dna,
            level: 1,
            ready_time: self.now(),
            win_count: 0,
            loss_count: 0,
        });
        self.owners.insert(id, owner.to_string());
        info!("Minted zombie {} '{}' for {}", id, name, owner);
        id
    }

    fn owned_mut(&mut self, owner: &str, id: ZombieId) -> Result<&mut ZombieRecord, LedgerError> {
        match self.owners.get(&id) {
            None => return Err(LedgerError::NotFound(id)),
            Some(o) if o != owner => {
                return Err(LedgerError::NotOwner {
                    account: owner.to_string(),
                    id,
                })
            }
            Some(_) => {}
        }
        self.zombies
            .get_mut(id as usize)
            .ok_or(LedgerError::NotFound(id))
    }

    fn ready_mut(&mut self, owner: &str, id: ZombieId) -> Result<&mut ZombieRecord, LedgerError> {
        let now = self.now();
        let zombie = self.owned_mut(owner, id)?;
        if !zombie.is_ready(now) {
            return Err(LedgerError::NotReady(id));
        }
        Ok(zombie)
    }
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl ZombieLedger for MemoryLedger {
    fn owner_zombies(&self, owner: &str) -> Result<Vec<ZombieId>, LedgerError> {
        let mut ids: Vec<ZombieId> = self
            .owners
            .iter()
            .filter(|(_, o)| o.as_str() == owner)
            .map(|(id, _)| *id)
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }

    fn zombie(&self, id: ZombieId) -> Result<ZombieRecord, LedgerError> {
        self.zombies
            .get(id as usize)
            .cloned()
            .ok_or(LedgerError::NotFound(id))
    }

    fn create_random_zombie(&mut self, owner: &str, name: &str) -> Result<ZombieId, LedgerError> {
        if self.owners.values().any(|o| o == owner) {
            return Err(LedgerError::Rejected(format!("{owner} already owns a zombie")));
        }
        let dna = Self::dna_for_name(name);
        Ok(self.mint(owner, name, dna))
    }

    fn level_up(&mut self, owner: &str, id: ZombieId) -> Result<(), LedgerError> {
        let zombie = self.owned_mut(owner, id)?;
        zombie.level += 1;
        info!("Zombie {} reached level {}", id, zombie.level);
        Ok(())
    }

    fn feed_on_kitty(
        &mut self,
        owner: &str,
        id: ZombieId,
        kitty_id: u64,
    ) -> Result<(), LedgerError> {
        let now = self.now();
        let zombie = self.ready_mut(owner, id)?;
        zombie.ready_time = now + COOLDOWN_SECS;
        let parent = zombie.dna.value();

        let kitty = Self::hash_to_dna(format!("kitty:{kitty_id}").as_bytes()).value();
        let mixed = (parent + kitty) / 2;
        // kitty-born zombies end in 99
        let child = Dna::from_u64_wrapping(mixed - mixed % 100 + 99);
        self.mint(owner, "NoName", child);
        Ok(())
    }

    fn attack(&mut self, owner: &str, id: ZombieId, target: ZombieId) -> Result<(), LedgerError> {
        if id == target {
            return Err(LedgerError::Rejected("a zombie cannot attack itself".into()));
        }
        if target as usize >= self.zombies.len() {
            return Err(LedgerError::NotFound(target));
        }
        let now = self.now();
        self.ready_mut(owner, id)?;
        // rejected attacks must not consume randomness
        let won = self.rng.gen_range(0..100) < ATTACK_WIN_PERCENT;

        let attacker = &mut self.zombies[id as usize];
        attacker.ready_time = now + COOLDOWN_SECS;
        if won {
            attacker.win_count += 1;
            attacker.level += 1;
        } else {
            attacker.loss_count += 1;
        }
        let attacker_dna = attacker.dna.value();

        let defender = &mut self.zombies[target as usize];
        if won {
            defender.loss_count += 1;
            let mixed = (attacker_dna + defender.dna.value()) / 2;
            let spawn = Dna::from_u64_wrapping(mixed);
            self.mint(owner, "NoName", spawn);
        } else {
            defender.win_count += 1;
        }
        info!("Zombie {} attacked {}: {}", id, target, if won { "won" } else { "lost" });
        Ok(())
    }

    fn transfer(&mut self, owner: &str, to: &str, id: ZombieId) -> Result<(), LedgerError> {
        self.owned_mut(owner, id)?;
        self.owners.insert(id, to.to_string());
        info!("Zombie {} transferred from {} to {}", id, owner, to);
        Ok(())
    }

    fn change_name(&mut self, owner: &str, id: ZombieId, name: &str) -> Result<(), LedgerError> {
        let zombie = self.owned_mut(owner, id)?;
        if zombie.level < RENAME_MIN_LEVEL {
            return Err(LedgerError::Rejected(format!(
                "renaming requires level {RENAME_MIN_LEVEL}"
            )));
        }
        zombie.name = name.to_string();
        Ok(())
    }
}
