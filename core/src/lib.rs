#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use campaign::*;
pub use cell::*;
pub use error::*;
pub use history::*;
pub use ledger::*;
pub use level::*;
pub use session::*;
pub use store::*;
pub use types::*;
pub use view::*;

mod board;
mod campaign;
mod cell;
mod error;
mod history;
mod ledger;
mod level;
mod session;
mod store;
mod types;
mod view;

/// Free hammers granted at the start of every level attempt.
pub const LEVEL_ATTEMPT_FREE_HAMMERS: u32 = 3;

/// Global free undos a fresh campaign starts with.
pub const DEFAULT_GLOBAL_FREE_UNDOS: u32 = 3;

/// Size of the resource packs handed out when a purchase prompt is confirmed.
pub const DEFAULT_PACK_SIZE: u32 = 3;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    pub starting_global_undos: u32,
    pub level_free_hammers: u32,
    pub undo_pack_size: u32,
    pub hammer_pack_size: u32,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            starting_global_undos: DEFAULT_GLOBAL_FREE_UNDOS,
            level_free_hammers: LEVEL_ATTEMPT_FREE_HAMMERS,
            undo_pack_size: DEFAULT_PACK_SIZE,
            hammer_pack_size: DEFAULT_PACK_SIZE,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ClickOutcome {
    NoChange,
    Selected,
    Jumped,
    Hammered,
}

impl ClickOutcome {
    pub const fn has_update(self) -> bool {
        use ClickOutcome::*;
        match self {
            NoChange => false,
            Selected => true,
            Jumped => true,
            Hammered => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ToggleOutcome {
    NoChange,
    Activated,
    Deactivated,
}

impl ToggleOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AdvanceOutcome {
    NotWon,
    Advanced(usize),
    CampaignComplete,
}

impl AdvanceOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NotWon)
    }
}
