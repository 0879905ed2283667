//! Line commands typed into the `crawl play` shell.

use game_core::{Action, DifficultyTier, Direction, GameMode};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Act(Action),
    DrawMap,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  w/a/s/d, up/left/down/right   move one cell
  status                        health, attack, key, round
  look                          what lies around you
  map                           overview and fogged map
  next                          continue to the next survival round
  restart                       new dungeon in the current mode
  difficulty                    leave the current run and pick a mode
  start <easy|normal|hard|adventurer|survival>
  help, quit";

pub fn parse_mode(word: &str) -> Option<GameMode> {
    let tier = match word {
        "survival" => return Some(GameMode::Survival),
        "easy" => DifficultyTier::Easy,
        "normal" => DifficultyTier::Normal,
        "hard" => DifficultyTier::Hard,
        "adventurer" => DifficultyTier::Adventurer,
        _ => return None,
    };
    Some(GameMode::Classic(tier))
}

fn parse_direction(word: &str) -> Option<Direction> {
    match word {
        "w" | "up" | "north" => Some(Direction::Up),
        "d" | "right" | "east" => Some(Direction::Right),
        "s" | "down" | "south" => Some(Direction::Down),
        "a" | "left" | "west" => Some(Direction::Left),
        _ => None,
    }
}

/// `Ok(None)` for a blank line.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let lowered = line.trim().to_ascii_lowercase();
    let mut words = lowered.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    if let Some(direction) = parse_direction(head) {
        return Ok(Some(Command::Act(Action::Move(direction))));
    }
    let command = match head {
        "status" => Command::Act(Action::StatusQuery),
        "look" => Command::Act(Action::LocationQuery),
        "map" => Command::DrawMap,
        "next" => Command::Act(Action::AcknowledgeNextRound),
        "restart" => Command::Act(Action::Restart),
        "difficulty" => Command::Act(Action::ChangeDifficulty),
        "start" => {
            let word = words.next().ok_or("start needs a mode")?;
            let mode = parse_mode(word).ok_or_else(|| format!("unknown mode '{word}'"))?;
            Command::Act(Action::StartGame(mode))
        }
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command '{other}' (try 'help')")),
    };
    Ok(Some(command))
}
