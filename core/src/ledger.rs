use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Pool a hammer was drawn from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HammerSource {
    /// Per-level-attempt allowance, refunded by undo.
    LevelFree,
    /// Persistent purchased or bonus stock.
    Purchased,
}

impl fmt::Display for HammerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LevelFree => "level free",
            Self::Purchased => "purchased",
        })
    }
}

/// Consumable counters for undos and hammers.
///
/// Global undos and purchased hammers live for the whole campaign, the
/// level-free hammer pool is refilled on every level attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLedger {
    global_free_undos: u32,
    level_free_hammers: u32,
    purchased_hammers: u32,
    level_free_allowance: u32,
}

impl ResourceLedger {
    pub fn new(config: &EconomyConfig) -> Self {
        Self::with_counts(config, config.starting_global_undos, 0)
    }

    pub fn with_counts(
        config: &EconomyConfig,
        global_free_undos: u32,
        purchased_hammers: u32,
    ) -> Self {
        Self {
            global_free_undos,
            level_free_hammers: config.level_free_hammers,
            purchased_hammers,
            level_free_allowance: config.level_free_hammers,
        }
    }

    pub fn global_free_undos(&self) -> u32 {
        self.global_free_undos
    }

    pub fn level_free_hammers(&self) -> u32 {
        self.level_free_hammers
    }

    pub fn purchased_hammers(&self) -> u32 {
        self.purchased_hammers
    }

    pub fn total_hammers(&self) -> u32 {
        self.level_free_hammers.saturating_add(self.purchased_hammers)
    }

    pub fn consume_global_undo(&mut self) -> Result<()> {
        if self.global_free_undos == 0 {
            return Err(GameError::InsufficientGlobalUndos);
        }
        self.global_free_undos -= 1;
        Ok(())
    }

    pub fn grant_global_undos(&mut self, n: u32) {
        self.global_free_undos = self.global_free_undos.saturating_add(n);
        log::debug!("granted {} undos, now {}", n, self.global_free_undos);
    }

    /// Draws one hammer, preferring the level-free pool.
    pub fn consume_hammer(&mut self) -> Result<HammerSource> {
        if self.level_free_hammers > 0 {
            self.level_free_hammers -= 1;
            Ok(HammerSource::LevelFree)
        } else if self.purchased_hammers > 0 {
            self.purchased_hammers -= 1;
            Ok(HammerSource::Purchased)
        } else {
            Err(GameError::InsufficientHammers)
        }
    }

    pub fn restore_level_free_hammers(&mut self, value: u32) {
        self.level_free_hammers = value;
    }

    pub fn grant_hammers(&mut self, n: u32) {
        self.purchased_hammers = self.purchased_hammers.saturating_add(n);
        log::debug!("granted {} hammers, now {}", n, self.purchased_hammers);
    }

    pub fn reset_level_attempt(&mut self) {
        self.level_free_hammers = self.level_free_allowance;
    }
}

impl Default for ResourceLedger {
    fn default() -> Self {
        Self::new(&EconomyConfig::default())
    }
}
