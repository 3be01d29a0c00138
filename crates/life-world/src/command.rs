//! Driver commands and their textual form.

use life_core::{Error, Position, Species};
use std::fmt;
use std::str::FromStr;

/// An edit or control request from whatever is driving the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Replace the grid with a fresh random one
    Randomize,
    /// Replace the grid with an empty one
    Clear,
    /// Pause or resume ticking
    TogglePause,
    /// Choose the species used by `Place`
    Select(Species),
    /// Toggle the selected species at a cell
    Place(Position),
    /// Advance one generation, even while paused
    Advance,
}

impl FromStr for Command {
    type Err = Error;

    /// Parses `r`, `c`, `p`, a placement code `1`-`7`, `select <species>`,
    /// `place <x> <y>` and `n`/`step`, with long aliases for each.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let verb = words
            .next()
            .ok_or_else(|| Error::InvalidCommand("empty command".to_string()))?
            .to_ascii_lowercase();

        let command = match verb.as_str() {
            "r" | "randomize" | "reset" => Command::Randomize,
            "c" | "clear" => Command::Clear,
            "p" | "pause" | "resume" => Command::TogglePause,
            "n" | "step" | "advance" => Command::Advance,
            "s" | "select" => {
                let arg = words
                    .next()
                    .ok_or_else(|| Error::InvalidCommand("select needs a species".to_string()))?;
                select(arg.parse()?)?
            }
            "place" | "click" => {
                let x = parse_coord(words.next(), "x")?;
                let y = parse_coord(words.next(), "y")?;
                Command::Place(Position::new(x, y))
            }
            code if code.len() == 1 && code.as_bytes()[0].is_ascii_digit() => select(code.parse()?)?,
            other => return Err(Error::InvalidCommand(format!("unknown command '{}'", other))),
        };

        if let Some(extra) = words.next() {
            return Err(Error::InvalidCommand(format!("unexpected argument '{}'", extra)));
        }

        Ok(command)
    }
}

fn select(species: Species) -> Result<Command, Error> {
    if species == Species::Empty {
        return Err(Error::InvalidCommand("cannot place the empty species".to_string()));
    }
    Ok(Command::Select(species))
}

fn parse_coord(word: Option<&str>, axis: &str) -> Result<i32, Error> {
    let word = word.ok_or_else(|| Error::InvalidCommand(format!("place needs a {} coordinate", axis)))?;
    word.parse()
        .map_err(|_| Error::InvalidCommand(format!("bad {} coordinate '{}'", axis, word)))
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Randomize => write!(f, "randomize"),
            Command::Clear => write!(f, "clear"),
            Command::TogglePause => write!(f, "pause"),
            Command::Select(species) => write!(f, "select {}", species),
            Command::Place(pos) => write!(f, "place {} {}", pos.x, pos.y),
            Command::Advance => write!(f, "step"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_forms() {
        assert_eq!("r".parse::<Command>().unwrap(), Command::Randomize);
        assert_eq!("c".parse::<Command>().unwrap(), Command::Clear);
        assert_eq!("p".parse::<Command>().unwrap(), Command::TogglePause);
        assert_eq!("n".parse::<Command>().unwrap(), Command::Advance);
        assert_eq!("5".parse::<Command>().unwrap(), Command::Select(Species::Shrinker));
    }

    #[test]
    fn test_parse_long_forms() {
        assert_eq!(
            "  SELECT viral ".parse::<Command>().unwrap(),
            Command::Select(Species::Viral)
        );
        assert_eq!(
            "place -3 12".parse::<Command>().unwrap(),
            Command::Place(Position::new(-3, 12))
        );
        assert_eq!(
            "click 4 5".parse::<Command>().unwrap(),
            Command::Place(Position::new(4, 5))
        );
    }

    #[test]
    fn test_parse_errors() {
        for bad in ["", "   ", "0", "8", "select empty", "select", "place 1", "place x 2", "jump", "r now"] {
            assert!(
                matches!(bad.parse::<Command>(), Err(Error::InvalidCommand(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_display_parses_back() {
        let commands = [
            Command::Randomize,
            Command::Clear,
            Command::TogglePause,
            Command::Select(Species::Blinker),
            Command::Place(Position::new(7, -1)),
            Command::Advance,
        ];
        for command in commands {
            assert_eq!(command.to_string().parse::<Command>().unwrap(), command);
        }
    }
}
