use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

const BUILTIN_LEVELS: &str = include_str!("levels.json");

/// One puzzle of the campaign, as authored in the level catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelDefinition {
    /// Display number, not necessarily contiguous.
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub board_setup: Vec<Vec<Cell>>,
    pub target_pegs_remaining: CellCount,
}

impl LevelDefinition {
    pub fn title(&self) -> String {
        format!("Level {}: {}", self.id, self.name)
    }

    /// Text shown when an attempt starts.
    pub fn intro(&self) -> String {
        if self.description.is_empty() {
            format!(
                "Level {}: Try to leave {} peg(s).",
                self.id, self.target_pegs_remaining
            )
        } else {
            self.description.clone()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.target_pegs_remaining == 0 {
            return Err(GameError::InvalidTarget);
        }
        Board::initialize(&self.board_setup).map(|_| ())
    }
}

/// Ordered, validated list of levels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LevelDefinition>", into = "Vec<LevelDefinition>")]
pub struct Catalog {
    levels: Vec<LevelDefinition>,
}

impl Catalog {
    pub fn new(levels: Vec<LevelDefinition>) -> Result<Self> {
        if levels.is_empty() {
            return Err(GameError::EmptyCatalog);
        }
        for level in &levels {
            level.validate().inspect_err(|err| {
                log::warn!("level {} ({}) rejected: {}", level.id, level.name, err);
            })?;
        }
        Ok(Self { levels })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let levels: Vec<LevelDefinition> = serde_json::from_str(json).map_err(|err| {
            log::warn!("could not parse level catalog: {}", err);
            GameError::InvalidCatalog
        })?;
        Self::new(levels)
    }

    /// The levels shipped with the game.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_LEVELS)
    }

    pub fn get(&self, index: usize) -> Result<&LevelDefinition> {
        self.levels.get(index).ok_or(GameError::LevelNotFound)
    }

    pub fn contains_index(&self, index: usize) -> bool {
        index < self.levels.len()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelDefinition> {
        self.levels.iter()
    }
}

impl TryFrom<Vec<LevelDefinition>> for Catalog {
    type Error = GameError;

    fn try_from(levels: Vec<LevelDefinition>) -> Result<Self> {
        Self::new(levels)
    }
}

impl From<Catalog> for Vec<LevelDefinition> {
    fn from(catalog: Catalog) -> Self {
        catalog.levels
    }
}

/// Single-level catalog for tests.
#[cfg(test)]
pub(crate) fn test_level(rows: &[&[u8]], target: CellCount) -> LevelDefinition {
    LevelDefinition {
        id: 1,
        name: String::from("Test"),
        description: String::from("Test level."),
        board_setup: crate::board::template(rows),
        target_pegs_remaining: target,
    }
}
