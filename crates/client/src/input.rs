//! Line commands typed at the prompt.
use std::str::FromStr;

use game_content::Prototype;
use game_core::{CardinalDirection, Position};
use runtime::Command;
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  n / s / e / w          step (bump to open or attack)
  wait                   pass the turn
  get                    pick up an item underfoot
  drop <item>            drop a carried item
  equip <item>           wield or wear a carried item
  throw <item> <x> <y>   throw a carried item at a tile
  use <slot>             use a learned skill (see `skills`)
  look                   list what you can see
  stats                  show your stats
  skills                 list your skills
  snapshot               print the world as JSON
  quit                   leave the dungeon";

/// What the player asked for.
#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    /// A command that runs through the session and may spend the turn.
    Play(Command),
    Look,
    Stats,
    Skills,
    Snapshot,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown command `{0}`, try `help`")]
    UnknownVerb(String),

    #[error("`{verb}` needs {expected}")]
    MissingArgument {
        verb: &'static str,
        expected: &'static str,
    },

    #[error("`{0}` is not {1}")]
    BadArgument(String, &'static str),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
enum Verb {
    #[strum(serialize = "n", serialize = "north")]
    North,
    #[strum(serialize = "s", serialize = "south")]
    South,
    #[strum(serialize = "e", serialize = "east")]
    East,
    #[strum(serialize = "w", serialize = "west")]
    West,
    #[strum(serialize = "wait", serialize = ".")]
    Wait,
    #[strum(serialize = "get", serialize = "g", serialize = "pickup")]
    PickUp,
    Drop,
    Equip,
    #[strum(serialize = "throw", serialize = "t")]
    Throw,
    #[strum(serialize = "use", serialize = "u")]
    Use,
    #[strum(serialize = "look", serialize = "l")]
    Look,
    Stats,
    Skills,
    Snapshot,
    #[strum(serialize = "help", serialize = "?")]
    Help,
    #[strum(serialize = "quit", serialize = "q", serialize = "exit")]
    Quit,
}

pub fn parse(line: &str) -> Result<Input, InputError> {
    let mut words = line.split_whitespace();
    let Some(first) = words.next() else {
        return Ok(Input::Play(Command::Wait));
    };
    let verb = Verb::from_str(first).map_err(|_| InputError::UnknownVerb(first.to_string()))?;

    let input = match verb {
        Verb::North => step(CardinalDirection::North),
        Verb::South => step(CardinalDirection::South),
        Verb::East => step(CardinalDirection::East),
        Verb::West => step(CardinalDirection::West),
        Verb::Wait => Input::Play(Command::Wait),
        Verb::PickUp => Input::Play(Command::PickUp),
        Verb::Drop => Input::Play(Command::Drop(item(words.next(), "drop")?)),
        Verb::Equip => Input::Play(Command::Equip(item(words.next(), "equip")?)),
        Verb::Throw => {
            let item = item(words.next(), "throw")?;
            let x = coordinate(words.next())?;
            let y = coordinate(words.next())?;
            Input::Play(Command::Throw {
                item,
                target: Position::new(x, y),
            })
        }
        Verb::Use => Input::Play(Command::UseSkill(slot(words.next())?)),
        Verb::Look => Input::Look,
        Verb::Stats => Input::Stats,
        Verb::Skills => Input::Skills,
        Verb::Snapshot => Input::Snapshot,
        Verb::Help => Input::Help,
        Verb::Quit => Input::Quit,
    };
    Ok(input)
}

fn step(direction: CardinalDirection) -> Input {
    Input::Play(Command::Move(direction))
}

/// Item names are prototype names, matched case-insensitively.
fn item(word: Option<&str>, verb: &'static str) -> Result<String, InputError> {
    let word = word.ok_or(InputError::MissingArgument {
        verb,
        expected: "an item name",
    })?;
    let prototype = Prototype::from_str(word)
        .map_err(|_| InputError::BadArgument(word.to_string(), "an item name"))?;
    Ok(prototype.as_ref().to_string())
}

fn coordinate(word: Option<&str>) -> Result<i32, InputError> {
    let word = word.ok_or(InputError::MissingArgument {
        verb: "throw",
        expected: "a target x and y",
    })?;
    word.parse()
        .map_err(|_| InputError::BadArgument(word.to_string(), "a coordinate"))
}

/// Slots are shown starting at 1.
fn slot(word: Option<&str>) -> Result<usize, InputError> {
    let word = word.ok_or(InputError::MissingArgument {
        verb: "use",
        expected: "a skill slot",
    })?;
    match word.parse::<usize>() {
        Ok(shown) if shown > 0 => Ok(shown - 1),
        _ => Err(InputError::BadArgument(word.to_string(), "a skill slot")),
    }
}
