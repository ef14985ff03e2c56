use alloc::string::String;
use core::cmp::Ordering;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossReason {
    /// Fewer pegs than the target are left.
    TooFewPegs,
    /// More pegs than the target are left and none can jump.
    NoMovesLeft,
}

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
/// - Won | Lost -> InProgress, only through undo or a new attempt
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    InProgress,
    Won,
    Lost(LossReason),
}

impl SessionState {
    pub const fn is_in_progress(self) -> bool {
        matches!(self, Self::InProgress)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost(_))
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::InProgress
    }
}

/// Purchase dialog the host should show.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PurchasePrompt {
    Undos,
    Hammers,
}

/// Message for the player describing the result of the last action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Feedback {
    Intro(String),
    PegSelected,
    Jumped,
    HammerModeOn { level_free: u32, purchased: u32 },
    HammerModeOff,
    Hammered(HammerSource),
    Undone,
    LevelComplete(u32),
    TooFewPegs,
    NoMovesLeft,
    AllLevelsComplete,
    Error(GameError),
}

impl Feedback {
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_) | Self::TooFewPegs | Self::NoMovesLeft)
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Feedback::*;
        match self {
            Intro(text) => f.write_str(text),
            PegSelected => f.write_str("Peg selected. Click an empty hole."),
            Jumped => f.write_str("Nice jump!"),
            HammerModeOn {
                level_free,
                purchased,
            } => write!(
                f,
                "Hammer mode on! Click a peg. (Free: {}, Purchased: {})",
                level_free, purchased
            ),
            HammerModeOff => f.write_str("Hammer mode off."),
            Hammered(source) => write!(f, "Peg hammered using a {} hammer!", source),
            Undone => f.write_str("Last move undone."),
            LevelComplete(id) => write!(f, "Level {} Complete!", id),
            TooFewPegs => f.write_str("Too few pegs left."),
            NoMovesLeft => f.write_str("No more moves."),
            AllLevelsComplete => f.write_str("Congratulations! You've completed all levels!"),
            Error(err) => write!(f, "{}", err),
        }
    }
}

/// One attempt at one level.
///
/// The session owns the board and its history. The resource ledger belongs to
/// the campaign and is lent to every action that needs it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelSession {
    level: LevelDefinition,
    board: Board,
    peg_count: CellCount,
    move_count: u32,
    selected: Option<Position>,
    history: MoveHistory,
    hammer_mode: bool,
    state: SessionState,
    feedback: Feedback,
    prompt: Option<PurchasePrompt>,
}

impl LevelSession {
    /// Starts a fresh attempt, refilling the level-free hammer pool.
    pub fn new(level: LevelDefinition, ledger: &mut ResourceLedger) -> Result<Self> {
        let (board, peg_count) = Board::initialize(&level.board_setup)?;
        ledger.reset_level_attempt();
        log::debug!(
            "starting level {} with {} pegs, target {}",
            level.id,
            peg_count,
            level.target_pegs_remaining
        );

        let mut session = Self {
            feedback: Feedback::Intro(level.intro()),
            level,
            board,
            peg_count,
            move_count: 0,
            selected: None,
            history: MoveHistory::new(),
            hammer_mode: false,
            state: SessionState::InProgress,
            prompt: None,
        };
        session.evaluate_terminal();
        Ok(session)
    }

    pub fn level(&self) -> &LevelDefinition {
        &self.level
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn peg_count(&self) -> CellCount {
        self.peg_count
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    pub fn is_hammer_mode(&self) -> bool {
        self.hammer_mode
    }

    pub fn pending_prompt(&self) -> Option<PurchasePrompt> {
        self.prompt
    }

    pub fn take_prompt(&mut self) -> Option<PurchasePrompt> {
        self.prompt.take()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub(crate) fn set_feedback(&mut self, feedback: Feedback) {
        self.feedback = feedback;
    }

    /// Throws away this attempt and starts the same level over.
    pub fn reset(&mut self, ledger: &mut ResourceLedger) -> Result<()> {
        log::debug!("resetting level {}", self.level.id);
        *self = Self::new(self.level.clone(), ledger)?;
        Ok(())
    }

    pub fn on_cell_click(
        &mut self,
        pos: Position,
        ledger: &mut ResourceLedger,
    ) -> Result<ClickOutcome> {
        if !self.state.is_in_progress() {
            return Ok(ClickOutcome::NoChange);
        }
        let Some(cell) = self.board.cell_at(pos) else {
            return Ok(ClickOutcome::NoChange);
        };
        if !cell.is_playable() {
            return Ok(ClickOutcome::NoChange);
        }

        if self.hammer_mode {
            return self.hammer_at(pos, ledger);
        }

        match (cell, self.selected) {
            (Cell::Occupied, _) => {
                log::trace!("select peg {:?}", pos);
                self.selected = Some(pos);
                self.feedback = Feedback::PegSelected;
                Ok(ClickOutcome::Selected)
            }
            (Cell::Empty, Some(from)) => self.jump(from, pos, ledger),
            _ => {
                self.selected = None;
                Err(self.reject(GameError::NoSelection))
            }
        }
    }

    pub fn toggle_hammer_mode(&mut self, ledger: &ResourceLedger) -> Result<ToggleOutcome> {
        if !self.state.is_in_progress() {
            return Ok(ToggleOutcome::NoChange);
        }
        if !self.hammer_mode && ledger.total_hammers() == 0 {
            return Err(self.reject(GameError::InsufficientHammers));
        }

        self.hammer_mode = !self.hammer_mode;
        self.selected = None;
        if self.hammer_mode {
            self.feedback = Feedback::HammerModeOn {
                level_free: ledger.level_free_hammers(),
                purchased: ledger.purchased_hammers(),
            };
            Ok(ToggleOutcome::Activated)
        } else {
            self.feedback = Feedback::HammerModeOff;
            Ok(ToggleOutcome::Deactivated)
        }
    }

    /// Reverts the last jump or hammer, spending one global undo.
    pub fn undo(&mut self, ledger: &mut ResourceLedger) -> Result<()> {
        self.hammer_mode = false;
        if self.history.is_empty() {
            return Err(self.reject(GameError::EmptyHistory));
        }
        ledger
            .consume_global_undo()
            .map_err(|err| self.reject(err))?;

        let record = self.history.pop_last()?;
        log::debug!(
            "undo to move {} ({} pegs), {} undos left",
            record.move_count,
            record.peg_count,
            ledger.global_free_undos()
        );
        self.board = record.board;
        self.peg_count = record.peg_count;
        self.move_count = record.move_count;
        ledger.restore_level_free_hammers(record.level_free_hammers);
        self.selected = None;
        self.state = SessionState::InProgress;
        self.feedback = Feedback::Undone;
        self.evaluate_terminal();
        Ok(())
    }

    fn jump(
        &mut self,
        from: Position,
        to: Position,
        ledger: &ResourceLedger,
    ) -> Result<ClickOutcome> {
        self.selected = None;
        let next = self
            .board
            .apply_jump(from, to)
            .map_err(|err| self.reject(err))?;

        log::debug!("jump {:?} -> {:?}", from, to);
        self.push_snapshot(ledger.level_free_hammers());
        self.board = next;
        self.peg_count -= 1;
        self.move_count += 1;
        self.feedback = Feedback::Jumped;
        self.evaluate_terminal();
        Ok(ClickOutcome::Jumped)
    }

    fn hammer_at(&mut self, pos: Position, ledger: &mut ResourceLedger) -> Result<ClickOutcome> {
        let next = self
            .board
            .apply_hammer(pos)
            .map_err(|err| self.reject(err))?;

        let level_free_before = ledger.level_free_hammers();
        let source = match ledger.consume_hammer() {
            Ok(source) => source,
            Err(err) => {
                self.hammer_mode = false;
                return Err(self.reject(err));
            }
        };

        log::debug!("hammer {:?} using {} hammer", pos, source);
        self.push_snapshot(level_free_before);
        self.board = next;
        self.peg_count -= 1;
        self.hammer_mode = false;
        self.selected = None;
        self.feedback = Feedback::Hammered(source);
        self.evaluate_terminal();
        Ok(ClickOutcome::Hammered)
    }

    fn push_snapshot(&mut self, level_free_hammers: u32) {
        self.history.push(MoveRecord {
            board: self.board.clone(),
            peg_count: self.peg_count,
            move_count: self.move_count,
            level_free_hammers,
        });
    }

    /// Records a recoverable error as feedback and hands it back.
    fn reject(&mut self, err: GameError) -> GameError {
        log::debug!("rejected: {:?}", err);
        match err {
            GameError::InsufficientGlobalUndos => self.prompt = Some(PurchasePrompt::Undos),
            GameError::InsufficientHammers => self.prompt = Some(PurchasePrompt::Hammers),
            _ => {}
        }
        self.feedback = Feedback::Error(err);
        err
    }

    fn evaluate_terminal(&mut self) {
        if self.state.is_finished() || self.board.has_any_legal_jump() {
            return;
        }

        let target = self.level.target_pegs_remaining;
        let (state, feedback) = match self.peg_count.cmp(&target) {
            Ordering::Equal => (SessionState::Won, Feedback::LevelComplete(self.level.id)),
            Ordering::Less => (
                SessionState::Lost(LossReason::TooFewPegs),
                Feedback::TooFewPegs,
            ),
            Ordering::Greater => (
                SessionState::Lost(LossReason::NoMovesLeft),
                Feedback::NoMovesLeft,
            ),
        };
        log::debug!(
            "level {} finished: {:?} with {} pegs after {} moves",
            self.level.id,
            state,
            self.peg_count,
            self.move_count
        );
        self.state = state;
        self.feedback = feedback;
    }
}
