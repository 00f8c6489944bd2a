//! Dashboard — the front-end controller for a connected account
//!
//! Owns an injected ledger client and a status sink, validates user input
//! before anything is sent to the ledger, and turns ledger records into
//! presentation cards (avatar, rarity, cooldown text).

use super::record::{LedgerError, ZombieId, ZombieLedger, ZombieRecord};
use crate::dna::Rarity;
use crate::render::{zombie_emoji, AvatarRenderer};
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Severity of a status message shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
}

/// Receives status updates, e.g. a toast area in the page
pub trait StatusSink {
    fn show_status(&mut self, status: Status);
}

impl StatusSink for Vec<Status> {
    fn show_status(&mut self, status: Status) {
        self.push(status);
    }
}

/// Sink that only writes to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl StatusSink for LogSink {
    fn show_status(&mut self, status: Status) {
        match status.kind {
            StatusKind::Success => info!("{}", status.message),
            StatusKind::Warning => warn!("{}", status.message),
            StatusKind::Error => log::error!("{}", status.message),
        }
    }
}

/// Dashboard action errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DashboardError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Everything a zombie card displays
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZombieCard {
    pub id: ZombieId,
    pub name: String,
    pub dna: String,
    pub level: u32,
    pub wins: u32,
    pub losses: u32,
    pub rarity: Rarity,
    pub ready: bool,
    /// "Ready for Action!" or "Cooldown: 1h 2m 3s"
    pub status: String,
    pub emoji: String,
    pub avatar_svg: String,
}

/// Human-readable duration: `1h 2m 3s`, `2m 3s` or `3s`
pub fn format_cooldown(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m {secs}s")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}

/// Whether `address` looks like a 20-byte hex account address
pub fn is_account_address(address: &str) -> bool {
    address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .map(|hex| hex.len() == 40 && hex.bytes().all(|b| b.is_ascii_hexdigit()))
        .unwrap_or(false)
}

/// Controller for one connected account
pub struct Dashboard<L: ZombieLedger, S: StatusSink> {
    ledger: L,
    sink: S,
    renderer: AvatarRenderer,
    account: String,
}

impl<L: ZombieLedger, S: StatusSink> Dashboard<L, S> {
    pub fn new(ledger: L, sink: S, renderer: AvatarRenderer, account: impl Into<String>) -> Self {
        Self {
            ledger,
            sink,
            renderer,
            account: account.into(),
        }
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Build a card for a single ledger record
    pub fn card(&self, zombie: &ZombieRecord, now: i64) -> ZombieCard {
        let features = self.renderer.features(&zombie.dna);
        let ready = zombie.is_ready(now);
        let status = if ready {
            "Ready for Action!".to_string()
        } else {
            format!("Cooldown: {}", format_cooldown(zombie.cooldown_remaining(now)))
        };
        ZombieCard {
            id: zombie.id,
            name: zombie.name.clone(),
            dna: zombie.dna.to_string(),
            level: zombie.level,
            wins: zombie.win_count,
            losses: zombie.loss_count,
            rarity: Rarity::classify(&zombie.dna),
            ready,
            status,
            emoji: zombie_emoji(&features),
            avatar_svg: self.renderer.render(&zombie.dna),
        }
    }

    /// Cards for every zombie owned by the connected account
    pub fn cards(&mut self, now: i64) -> Result<Vec<ZombieCard>, DashboardError> {
        let ids = match self.ledger.owner_zombies(&self.account) {
            Ok(ids) => ids,
            Err(e) => {
                self.sink.show_status(Status {
                    kind: StatusKind::Error,
                    message: "Error loading zombies.".to_string(),
                });
                return Err(e.into());
            }
        };
        let mut cards = Vec::with_capacity(ids.len());
        for id in ids {
            match self.ledger.zombie(id) {
                Ok(zombie) => cards.push(self.card(&zombie, now)),
                Err(e) => warn!("Skipping zombie {}: {}", id, e),
            }
        }
        info!("Loaded {} zombies for {}", cards.len(), self.account);
        Ok(cards)
    }

    pub fn create_zombie(&mut self, name: &str) -> Result<ZombieId, DashboardError> {
        let name = name.trim();
        if name.is_empty() {
            return self.reject("Please enter a zombie name.");
        }
        match self.ledger.owner_zombies(&self.account) {
            Ok(ids) if !ids.is_empty() => {
                return self.reject("You already have a zombie! You can only create one initially.");
            }
            Ok(_) => {}
            // the ledger enforces the one-zombie rule itself
            Err(e) => warn!("Could not check existing zombies for {}: {}", self.account, e),
        }
        let result = self.ledger.create_random_zombie(&self.account, name);
        self.report(result, &format!("Successfully created {name}!"), "Error creating zombie")
    }

    pub fn level_up(&mut self, id: ZombieId) -> Result<(), DashboardError> {
        let result = self.ledger.level_up(&self.account, id);
        self.report(result, "Zombie leveled up successfully!", "Error leveling up")
    }

    pub fn feed_on_kitty(&mut self, id: ZombieId, kitty_id: u64) -> Result<(), DashboardError> {
        let result = self.ledger.feed_on_kitty(&self.account, id, kitty_id);
        self.report(result, "Successfully fed on kitty!", "Error feeding on kitty")
    }

    pub fn attack(&mut self, id: ZombieId, target: ZombieId) -> Result<(), DashboardError> {
        let result = self.ledger.attack(&self.account, id, target);
        self.report(result, "Attack completed!", "Error attacking")
    }

    pub fn transfer(&mut self, id: ZombieId, to: &str) -> Result<(), DashboardError> {
        let to = to.trim();
        if !is_account_address(to) {
            return self.reject("Invalid recipient address.");
        }
        let result = self.ledger.transfer(&self.account, to, id);
        self.report(result, "Zombie transferred successfully!", "Error transferring")
    }

    pub fn rename(&mut self, id: ZombieId, name: &str) -> Result<(), DashboardError> {
        let name = name.trim();
        if name.is_empty() {
            return self.reject("Please select zombie and enter new name.");
        }
        let result = self.ledger.change_name(&self.account, id, name);
        self.report(result, "Zombie renamed successfully!", "Error changing name")
    }

    fn reject<T>(&mut self, message: &str) -> Result<T, DashboardError> {
        self.sink.show_status(Status {
            kind: StatusKind::Warning,
            message: message.to_string(),
        });
        Err(DashboardError::Validation(message.to_string()))
    }

    fn report<T>(
        &mut self,
        result: Result<T, LedgerError>,
        success: &str,
        failure: &str,
    ) -> Result<T, DashboardError> {
        match result {
            Ok(value) => {
                self.sink.show_status(Status {
                    kind: StatusKind::Success,
                    message: success.to_string(),
                });
                Ok(value)
            }
            Err(e) => {
                self.sink.show_status(Status {
                    kind: StatusKind::Error,
                    message: format!("{failure}: {e}"),
                });
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{MemoryLedger, COOLDOWN_SECS};
    use crate::render::{RenderConfig, ScarMode};

    const ALICE: &str = "0x00000000000000000000000000000000000a11ce";
    const BOB: &str = "0x0000000000000000000000000000000000000b0b";
    const NOW: i64 = 1_700_000_000;

    fn dashboard() -> Dashboard<MemoryLedger, Vec<Status>> {
        let mut ledger = MemoryLedger::seeded(1);
        ledger.set_time(Some(NOW));
        let renderer = AvatarRenderer::with_render_config(RenderConfig {
            scars: ScarMode::Stable,
            ..RenderConfig::default()
        });
        Dashboard::new(ledger, Vec::new(), renderer, ALICE)
    }

    #[test]
    fn test_format_cooldown() {
        assert_eq!(format_cooldown(0), "0s");
        assert_eq!(format_cooldown(59), "59s");
        assert_eq!(format_cooldown(61), "1m 1s");
        assert_eq!(format_cooldown(3600), "1h 0m 0s");
        assert_eq!(format_cooldown(86_399), "23h 59m 59s");
        assert_eq!(format_cooldown(-5), "0s");
    }

    #[test]
    fn test_account_address() {
        assert!(is_account_address(ALICE));
        assert!(is_account_address("0xABCDEFabcdef0123456789abcdefABCDEF012345"));
        assert!(!is_account_address("0x1234"));
        assert!(!is_account_address("00000000000000000000000000000000000a11ce00"));
        assert!(!is_account_address("0x00000000000000000000000000000000000a11cg"));
    }

    #[test]
    fn test_create_and_list_cards() {
        let mut dash = dashboard();
        let id = dash.create_zombie("  Shambles ").unwrap();
        let cards = dash.cards(NOW).unwrap();
        assert_eq!(cards.len(), 1);

        let card = &cards[0];
        assert_eq!(card.id, id);
        assert_eq!(card.name, "Shambles");
        assert!(card.ready);
        assert_eq!(card.status, "Ready for Action!");
        assert!(card.avatar_svg.starts_with("<svg"));
        assert!(card.emoji.starts_with('🧟'));
        assert_eq!(card.dna.len(), 16);
        assert_eq!(
            dash.sink().last(),
            Some(&Status {
                kind: StatusKind::Success,
                message: "Successfully created Shambles!".into()
            })
        );
    }

    #[test]
    fn test_create_validation() {
        let mut dash = dashboard();
        assert!(matches!(dash.create_zombie("   "), Err(DashboardError::Validation(_))));
        dash.create_zombie("Shambles").unwrap();
        assert!(matches!(dash.create_zombie("Again"), Err(DashboardError::Validation(_))));
        assert_eq!(dash.ledger().count(), 1);
        assert_eq!(dash.sink().last().map(|s| s.kind), Some(StatusKind::Warning));
    }

    #[test]
    fn test_cooldown_shows_on_card() {
        let mut dash = dashboard();
        let id = dash.create_zombie("Shambles").unwrap();
        dash.feed_on_kitty(id, 3).unwrap();

        let cards = dash.cards(NOW + 60).unwrap();
        assert_eq!(cards.len(), 2);
        let fed = cards.iter().find(|c| c.id == id).unwrap();
        assert!(!fed.ready);
        assert_eq!(fed.status, format!("Cooldown: {}", format_cooldown(COOLDOWN_SECS - 60)));
        assert_eq!(fed.status, "Cooldown: 23h 59m 0s");
    }

    #[test]
    fn test_ledger_errors_are_reported() {
        let mut dash = dashboard();
        let err = dash.level_up(9).unwrap_err();
        assert_eq!(err, DashboardError::Ledger(LedgerError::NotFound(9)));
        let last = dash.sink().last().unwrap();
        assert_eq!(last.kind, StatusKind::Error);
        assert_eq!(last.message, "Error leveling up: Zombie 9 not found");
    }

    #[test]
    fn test_transfer_moves_card() {
        let mut dash = dashboard();
        let id = dash.create_zombie("Shambles").unwrap();
        assert!(matches!(dash.transfer(id, "not-an-address"), Err(DashboardError::Validation(_))));
        dash.transfer(id, BOB).unwrap();
        assert!(dash.cards(NOW).unwrap().is_empty());
        assert_eq!(dash.ledger().owner_of(id), Some(BOB));
    }

    #[test]
    fn test_rename_after_level_up() {
        let mut dash = dashboard();
        let id = dash.create_zombie("Shambles").unwrap();
        assert!(dash.rename(id, "Lurch").is_err());
        dash.level_up(id).unwrap();
        dash.rename(id, "Lurch").unwrap();
        assert_eq!(dash.cards(NOW).unwrap()[0].name, "Lurch");
    }

    /// Ledger whose owner lookups always fail
    struct OfflineLedger {
        created: u32,
    }

    impl ZombieLedger for OfflineLedger {
        fn owner_zombies(&self, _owner: &str) -> Result<Vec<ZombieId>, LedgerError> {
            Err(LedgerError::Rejected("rpc down".into()))
        }

        fn zombie(&self, id: ZombieId) -> Result<ZombieRecord, LedgerError> {
            Err(LedgerError::NotFound(id))
        }

        fn create_random_zombie(
            &mut self,
            _owner: &str,
            _name: &str,
        ) -> Result<ZombieId, LedgerError> {
            self.created += 1;
            Ok(7)
        }

        fn level_up(&mut self, _owner: &str, id: ZombieId) -> Result<(), LedgerError> {
            Err(LedgerError::NotFound(id))
        }

        fn feed_on_kitty(
            &mut self,
            _owner: &str,
            id: ZombieId,
            _kitty_id: u64,
        ) -> Result<(), LedgerError> {
            Err(LedgerError::NotFound(id))
        }

        fn attack(
            &mut self,
            _owner: &str,
            id: ZombieId,
            _target: ZombieId,
        ) -> Result<(), LedgerError> {
            Err(LedgerError::NotFound(id))
        }

        fn transfer(&mut self, _owner: &str, _to: &str, id: ZombieId) -> Result<(), LedgerError> {
            Err(LedgerError::NotFound(id))
        }

        fn change_name(
            &mut self,
            _owner: &str,
            id: ZombieId,
            _name: &str,
        ) -> Result<(), LedgerError> {
            Err(LedgerError::NotFound(id))
        }
    }

    #[test]
    fn test_owner_lookup_failures_reach_the_sink() {
        let ledger = OfflineLedger { created: 0 };
        let mut dash = Dashboard::new(ledger, Vec::new(), AvatarRenderer::default(), ALICE);

        let err = dash.cards(NOW).unwrap_err();
        assert_eq!(err, DashboardError::Ledger(LedgerError::Rejected("rpc down".into())));
        assert_eq!(
            dash.sink().last(),
            Some(&Status {
                kind: StatusKind::Error,
                message: "Error loading zombies.".into()
            })
        );

        assert_eq!(dash.create_zombie("Shambles").unwrap(), 7);
        assert_eq!(dash.ledger().created, 1);
        assert_eq!(dash.sink().last().map(|s| s.kind), Some(StatusKind::Success));
    }
}
