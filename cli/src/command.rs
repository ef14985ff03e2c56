use std::str::FromStr;

use pegjump_core::{Campaign, Coord, Position, ProgressStore};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  click <row> <col>   select a peg, jump to a hole, or hammer a peg
  hammer              toggle hammer mode
  undo                undo the last move (costs one global undo)
  reset               restart the current level
  next                go to the next level after a win
  levels              list all levels
  level <n>           jump to level n (1-based)
  buy-undos <n>       buy n global undos
  buy-hammers <n>     buy n hammers
  confirm | dismiss   answer a purchase prompt
  restart             play again from the first level
  show | help | quit";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Click(Position),
    Hammer,
    Undo,
    Reset,
    Next,
    Level(usize),
    Levels,
    BuyUndos(u32),
    BuyHammers(u32),
    Confirm,
    Dismiss,
    Restart,
    Show,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),
    #[error("`{0}` needs {1}")]
    MissingArgument(&'static str, &'static str),
    #[error("`{0}` is not a valid number")]
    InvalidNumber(String),
    #[error("`{0}` takes no more arguments")]
    TrailingInput(&'static str),
}

fn number<T: FromStr>(
    word: Option<&str>,
    command: &'static str,
    what: &'static str,
) -> Result<T, ParseCommandError> {
    let word = word.ok_or(ParseCommandError::MissingArgument(command, what))?;
    word.parse()
        .map_err(|_| ParseCommandError::InvalidNumber(word.to_string()))
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(ParseCommandError::Empty)?;
        let lowered = name.to_ascii_lowercase();

        let (command, keyword) = match lowered.as_str() {
            "click" | "c" => {
                let row: Coord = number(words.next(), "click", "a row and a column")?;
                let col: Coord = number(words.next(), "click", "a row and a column")?;
                (Self::Click((row, col)), "click")
            }
            "hammer" | "h" => (Self::Hammer, "hammer"),
            "undo" | "u" => (Self::Undo, "undo"),
            "reset" => (Self::Reset, "reset"),
            "next" | "n" => (Self::Next, "next"),
            "level" => {
                let n: usize = number(words.next(), "level", "a level number")?;
                let index = n
                    .checked_sub(1)
                    .ok_or_else(|| ParseCommandError::InvalidNumber(n.to_string()))?;
                (Self::Level(index), "level")
            }
            "levels" | "l" => (Self::Levels, "levels"),
            "buy-undos" => (
                Self::BuyUndos(number(words.next(), "buy-undos", "an amount")?),
                "buy-undos",
            ),
            "buy-hammers" => (
                Self::BuyHammers(number(words.next(), "buy-hammers", "an amount")?),
                "buy-hammers",
            ),
            "confirm" | "y" => (Self::Confirm, "confirm"),
            "dismiss" => (Self::Dismiss, "dismiss"),
            "restart" => (Self::Restart, "restart"),
            "show" | "s" => (Self::Show, "show"),
            "help" | "?" => (Self::Help, "help"),
            "quit" | "q" | "exit" => (Self::Quit, "quit"),
            _ => return Err(ParseCommandError::Unknown(name.to_string())),
        };

        if words.next().is_some() {
            return Err(ParseCommandError::TrailingInput(keyword));
        }
        Ok(command)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Redraw,
    Unchanged,
    Quit,
}

impl Step {
    fn from_update(has_update: bool) -> Self {
        if has_update { Self::Redraw } else { Self::Unchanged }
    }
}

impl Command {
    /// Feeds the command to the campaign as the matching event.
    pub fn apply<S: ProgressStore>(
        self,
        campaign: &mut Campaign<S>,
    ) -> pegjump_core::Result<Step> {
        let step = match self {
            Self::Click(pos) => {
                let outcome = campaign.cell_clicked(pos)?;
                log::debug!("click {:?}: {:?}", pos, outcome);
                Step::from_update(outcome.has_update())
            }
            Self::Hammer => {
                let outcome = campaign.toggle_hammer()?;
                log::debug!("hammer toggle: {:?}", outcome);
                Step::from_update(outcome.has_update())
            }
            Self::Undo => {
                campaign.undo()?;
                Step::Redraw
            }
            Self::Reset => {
                campaign.reset_level()?;
                Step::Redraw
            }
            Self::Next => {
                let outcome = campaign.next_level()?;
                log::debug!("advance: {:?}", outcome);
                Step::from_update(outcome.has_update())
            }
            Self::Level(index) => {
                campaign.select_level(index)?;
                Step::Redraw
            }
            Self::BuyUndos(n) => {
                campaign.purchase_undos(n);
                Step::Redraw
            }
            Self::BuyHammers(n) => {
                campaign.purchase_hammers(n);
                Step::Redraw
            }
            Self::Confirm => Step::from_update(campaign.confirm_purchase().is_some()),
            Self::Dismiss => Step::from_update(campaign.dismiss_purchase().is_some()),
            Self::Restart => {
                campaign.restart()?;
                Step::Redraw
            }
            Self::Show | Self::Help | Self::Levels => Step::Redraw,
            Self::Quit => Step::Quit,
        };
        Ok(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pegjump_core::{Catalog, EconomyConfig, GameError, MemoryStore, SessionState};

    fn campaign() -> Campaign<MemoryStore> {
        Campaign::load(
            Catalog::builtin().unwrap(),
            EconomyConfig::default(),
            MemoryStore::new(),
        )
        .unwrap()
    }

    #[test]
    fn parses_commands() {
        assert_eq!("click 2 1".parse(), Ok(Command::Click((2, 1))));
        assert_eq!("  C 0 3 ".parse(), Ok(Command::Click((0, 3))));
        assert_eq!("hammer".parse(), Ok(Command::Hammer));
        assert_eq!("level 5".parse(), Ok(Command::Level(4)));
        assert_eq!("levels".parse(), Ok(Command::Levels));
        assert_eq!("buy-hammers 10".parse(), Ok(Command::BuyHammers(10)));
        assert_eq!("q".parse(), Ok(Command::Quit));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!("".parse::<Command>(), Err(ParseCommandError::Empty));
        assert_eq!(
            "jump 1 2".parse::<Command>(),
            Err(ParseCommandError::Unknown("jump".into()))
        );
        assert_eq!(
            "click 1".parse::<Command>(),
            Err(ParseCommandError::MissingArgument(
                "click",
                "a row and a column"
            ))
        );
        assert_eq!(
            "click -1 2".parse::<Command>(),
            Err(ParseCommandError::InvalidNumber("-1".into()))
        );
        assert_eq!(
            "level 0".parse::<Command>(),
            Err(ParseCommandError::InvalidNumber("0".into()))
        );
        assert_eq!(
            "undo now".parse::<Command>(),
            Err(ParseCommandError::TrailingInput("undo"))
        );
    }

    #[test]
    fn plays_first_level_and_advances() {
        let mut campaign = campaign();
        for line in ["click 0 1", "click 2 1", "next"] {
            let command: Command = line.parse().unwrap();
            assert_eq!(command.apply(&mut campaign), Ok(Step::Redraw));
        }
        assert_eq!(campaign.current_index(), 1);
        assert_eq!(campaign.session().state(), SessionState::InProgress);
    }

    #[test]
    fn game_errors_surface_to_the_caller() {
        let mut campaign = campaign();
        assert_eq!(
            Command::Undo.apply(&mut campaign),
            Err(GameError::EmptyHistory)
        );
        assert_eq!(
            Command::Level(42).apply(&mut campaign),
            Err(GameError::LevelNotFound)
        );
        assert_eq!(campaign.current_index(), 0);
    }

    #[test]
    fn no_op_actions_report_unchanged() {
        let mut campaign = campaign();
        // (0, 0) is outside the first level's shape
        assert_eq!(
            Command::Click((0, 0)).apply(&mut campaign),
            Ok(Step::Unchanged)
        );
        assert_eq!(Command::Next.apply(&mut campaign), Ok(Step::Unchanged));
        assert_eq!(Command::Confirm.apply(&mut campaign), Ok(Step::Unchanged));
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut campaign = campaign();
        assert_eq!(Command::Quit.apply(&mut campaign), Ok(Step::Quit));
    }
}
