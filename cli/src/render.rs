use pegjump_core::{
    Catalog, Cell, LossReason, Position, PurchasePrompt, SessionState, SessionView,
};

const VOID: char = ' ';
const HOLE: char = '.';
const PEG: char = 'o';
const SELECTED: char = '@';
const TARGET: char = '*';

fn glyph(view: &SessionView, pos: Position) -> char {
    match view.board.cell_at(pos) {
        None | Some(Cell::Void) => VOID,
        Some(Cell::Occupied) if view.selected == Some(pos) => SELECTED,
        Some(Cell::Occupied) => PEG,
        Some(Cell::Empty) if view.legal_targets.contains(&pos) => TARGET,
        Some(Cell::Empty) => HOLE,
    }
}

fn status(view: &SessionView) -> &'static str {
    match view.state {
        _ if view.all_levels_complete => "campaign complete",
        SessionState::InProgress if view.hammer_mode => "hammer mode",
        SessionState::InProgress => "playing",
        SessionState::Won => "won",
        SessionState::Lost(LossReason::TooFewPegs) => "lost (too few pegs)",
        SessionState::Lost(LossReason::NoMovesLeft) => "lost (stuck)",
    }
}

pub fn render_board(view: &SessionView) -> String {
    let (rows, cols) = view.board.size();
    let mut out = String::from("   ");
    for col in 0..cols {
        out.push_str(&format!("{:>2}", col));
    }
    out.push('\n');
    for row in 0..rows {
        out.push_str(&format!("{:>2} ", row));
        for col in 0..cols {
            out.push(' ');
            out.push(glyph(view, (row, col)));
        }
        out.push('\n');
    }
    out
}

/// Full screen for one turn: header, board, counters and feedback.
pub fn render(view: &SessionView) -> String {
    let mut out = format!(
        "== {} ({}/{}) ==\n",
        view.level_title,
        view.level_index + 1,
        view.level_count
    );
    out.push_str(&render_board(view));
    out.push_str(&format!(
        "pegs {} (target {})  moves {}  [{}]\n",
        view.peg_count,
        view.target_pegs,
        view.move_count,
        status(view)
    ));
    out.push_str(&format!(
        "undos {}  hammers {} free + {} purchased\n",
        view.global_free_undos, view.level_free_hammers, view.purchased_hammers
    ));

    let marker = if view.feedback_is_error { "!" } else { ">" };
    out.push_str(&format!("{} {}\n", marker, view.feedback));

    match view.prompt {
        Some(PurchasePrompt::Undos) => {
            out.push_str("? Buy more undos? (confirm / dismiss)\n");
        }
        Some(PurchasePrompt::Hammers) => {
            out.push_str("? Buy more hammers? (confirm / dismiss)\n");
        }
        None if view.all_levels_complete => out.push_str("? Type `restart` to play again\n"),
        None if view.can_advance() => out.push_str("? Type `next` for the next level\n"),
        None => {}
    }
    out
}

/// Numbered level list for `level <n>`, with the current one marked.
pub fn render_levels(catalog: &Catalog, current: usize) -> String {
    catalog
        .iter()
        .enumerate()
        .map(|(index, level)| {
            let marker = if index == current { '*' } else { ' ' };
            format!("{} {:>2}. {}\n", marker, index + 1, level.title())
        })
        .collect()
}
