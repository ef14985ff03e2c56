use alloc::string::{String, ToString};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Everything a renderer needs to draw the game after an action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionView {
    pub level_index: usize,
    pub level_count: usize,
    pub level_id: u32,
    pub level_title: String,
    pub board: Board,
    pub selected: Option<Position>,
    pub legal_targets: SmallVec<[Position; 4]>,
    pub peg_count: CellCount,
    pub target_pegs: CellCount,
    pub move_count: u32,
    pub state: SessionState,
    pub feedback: String,
    pub feedback_is_error: bool,
    pub hammer_mode: bool,
    pub global_free_undos: u32,
    pub level_free_hammers: u32,
    pub purchased_hammers: u32,
    pub can_undo: bool,
    pub prompt: Option<PurchasePrompt>,
    pub all_levels_complete: bool,
}

impl SessionView {
    pub fn from_campaign<S: ProgressStore>(campaign: &Campaign<S>) -> Self {
        let session = campaign.session();
        let ledger = campaign.ledger();
        let level = session.level();
        let legal_targets = session
            .selected()
            .map(|from| session.board().legal_targets(from))
            .unwrap_or_default();

        Self {
            level_index: campaign.current_index(),
            level_count: campaign.catalog().len(),
            level_id: level.id,
            level_title: level.title(),
            board: session.board().clone(),
            selected: session.selected(),
            legal_targets,
            peg_count: session.peg_count(),
            target_pegs: level.target_pegs_remaining,
            move_count: session.move_count(),
            state: session.state(),
            feedback: session.feedback().to_string(),
            feedback_is_error: session.feedback().is_error(),
            hammer_mode: session.is_hammer_mode(),
            global_free_undos: ledger.global_free_undos(),
            level_free_hammers: ledger.level_free_hammers(),
            purchased_hammers: ledger.purchased_hammers(),
            can_undo: session.can_undo(),
            prompt: session.pending_prompt(),
            all_levels_complete: campaign.is_complete(),
        }
    }

    pub fn total_hammers(&self) -> u32 {
        self.level_free_hammers.saturating_add(self.purchased_hammers)
    }

    pub fn can_advance(&self) -> bool {
        self.state == SessionState::Won && !self.all_levels_complete
    }

    pub fn is_last_level(&self) -> bool {
        self.level_index + 1 >= self.level_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_reflects_selection_and_resources() {
        let mut campaign = Campaign::load(
            Catalog::builtin().unwrap(),
            EconomyConfig::default(),
            MemoryStore::new(),
        )
        .unwrap();
        campaign.purchase_hammers(2);
        campaign.cell_clicked((0, 1)).unwrap();

        let view = campaign.view();

        assert_eq!(view.level_title, "Level 1: First Jump");
        assert_eq!(view.level_count, 6);
        assert_eq!(view.selected, Some((0, 1)));
        assert_eq!(view.legal_targets.as_slice(), &[(2, 1)]);
        assert_eq!(view.peg_count, 2);
        assert_eq!(view.feedback, "Peg selected. Click an empty hole.");
        assert!(!view.feedback_is_error);
        assert_eq!(view.total_hammers(), 5);
        assert!(!view.can_undo);
        assert!(!view.can_advance());
    }

    #[test]
    fn view_after_win_allows_advance() {
        let mut campaign = Campaign::load(
            Catalog::builtin().unwrap(),
            EconomyConfig::default(),
            MemoryStore::new(),
        )
        .unwrap();
        campaign.cell_clicked((0, 1)).unwrap();
        campaign.cell_clicked((2, 1)).unwrap();

        let view = campaign.view();

        assert_eq!(view.state, SessionState::Won);
        assert_eq!(view.feedback, "Level 1 Complete!");
        assert!(view.can_undo);
        assert!(view.can_advance());
        assert!(view.legal_targets.is_empty());
        assert!(!view.is_last_level());
    }
}
