use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Snapshot of a session taken right before a mutating action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub board: Board,
    pub peg_count: CellCount,
    pub move_count: u32,
    pub level_free_hammers: u32,
}

/// Unbounded undo stack for one level attempt.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MoveHistory {
    records: Vec<MoveRecord>,
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: MoveRecord) {
        self.records.push(record);
    }

    pub fn pop_last(&mut self) -> Result<MoveRecord> {
        self.records.pop().ok_or(GameError::EmptyHistory)
    }

    pub fn last(&self) -> Option<&MoveRecord> {
        self.records.last()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
