use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every failure the rules engine can report.
///
/// None of these are fatal: the session recovers locally and shows the
/// `Display` text to the player as feedback.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameError {
    #[error("Invalid jump distance.")]
    InvalidJumpGeometry,
    #[error("Invalid jump path.")]
    NoPegToJumpOver,
    #[error("Select a peg first.")]
    NoSelection,
    #[error("No moves to undo.")]
    EmptyHistory,
    #[error("Out of global free undos!")]
    InsufficientGlobalUndos,
    #[error("No hammers left. Try buying some!")]
    InsufficientHammers,
    #[error("Level not found")]
    LevelNotFound,
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Select a peg to hammer.")]
    NotAPeg,
    #[error("Jump target is not an empty hole")]
    TargetNotEmpty,
    #[error("Board template has no cells")]
    EmptyBoard,
    #[error("Board shape does not fit the coordinate range")]
    InvalidBoardShape,
    #[error("Cell value must be 0, 1 or 2")]
    InvalidCellValue,
    #[error("Target peg count must be at least one")]
    InvalidTarget,
    #[error("Level catalog is empty")]
    EmptyCatalog,
    #[error("Level catalog could not be parsed")]
    InvalidCatalog,
}

impl GameError {
    /// Whether the player should be offered a purchase to get past this error.
    pub const fn wants_purchase(self) -> bool {
        matches!(
            self,
            Self::InsufficientGlobalUndos | Self::InsufficientHammers
        )
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
