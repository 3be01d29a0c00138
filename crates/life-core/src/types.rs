//! Core type definitions for the simulation.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Relative offsets of the Moore neighborhood, row-major from (-1, -1) to (1, 1).
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Largest number of cells a grid may hold
pub const MAX_CELLS: usize = i32::MAX as usize;

/// 2D position in the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn add(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Apply toroidal wrapping for given world dimensions
    pub fn wrap(&self, width: i32, height: i32) -> Self {
        Self {
            x: self.x.rem_euclid(width),
            y: self.y.rem_euclid(height),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The behavior class occupying a cell.
///
/// The set is closed: every rule in the transition engine is an exhaustive
/// match over these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    #[default]
    Empty,
    /// Classic B3/S23 cell.
    Normal,
    /// Keeps itself alive unconditionally.
    Immortal,
    /// Lives for exactly one generation.
    Ephemeral,
    /// Persists and infects one random empty neighbor per generation.
    Viral,
    /// Clears its whole neighborhood, then vanishes.
    Shrinker,
    /// Grows into every empty neighbor, then vanishes.
    Spreader,
    /// Restored after every generation, so it never disappears.
    Blinker,
}

impl Species {
    pub const ALL: [Species; 8] = [
        Species::Empty,
        Species::Normal,
        Species::Immortal,
        Species::Ephemeral,
        Species::Viral,
        Species::Shrinker,
        Species::Spreader,
        Species::Blinker,
    ];

    /// Species a user can place, in placement-code order (1..=7).
    pub const PLACEABLE: [Species; 7] = [
        Species::Normal,
        Species::Immortal,
        Species::Ephemeral,
        Species::Viral,
        Species::Shrinker,
        Species::Spreader,
        Species::Blinker,
    ];

    /// Numeric code, 0 for Empty and 1..=7 for the placeable species
    pub fn code(&self) -> u8 {
        match self {
            Species::Empty => 0,
            Species::Normal => 1,
            Species::Immortal => 2,
            Species::Ephemeral => 3,
            Species::Viral => 4,
            Species::Shrinker => 5,
            Species::Spreader => 6,
            Species::Blinker => 7,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Species::Empty => "empty",
            Species::Normal => "normal",
            Species::Immortal => "immortal",
            Species::Ephemeral => "ephemeral",
            Species::Viral => "viral",
            Species::Shrinker => "shrinker",
            Species::Spreader => "spreader",
            Species::Blinker => "blinker",
        }
    }

    /// Any occupant counts as alive for the classic survival rule
    pub fn is_alive(&self) -> bool {
        *self != Species::Empty
    }

    /// Species that count toward the three parents an empty cell needs to be born
    pub fn seeds_birth(&self) -> bool {
        matches!(self, Species::Normal | Species::Immortal)
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Species {
    type Err = Error;

    /// Accepts either the numeric code or the lowercase name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<u8>() {
            return Species::from_code(code)
                .ok_or_else(|| Error::InvalidCommand(format!("unknown species code {}", code)));
        }

        Species::ALL
            .iter()
            .copied()
            .find(|species| species.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidCommand(format!("unknown species '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_wrap() {
        let pos = Position::new(5, 5);
        let wrapped = pos.wrap(10, 10);
        assert_eq!(wrapped, Position::new(5, 5));

        let pos = Position::new(-1, -1);
        let wrapped = pos.wrap(10, 10);
        assert_eq!(wrapped, Position::new(9, 9));

        let pos = Position::new(10, 10);
        let wrapped = pos.wrap(10, 10);
        assert_eq!(wrapped, Position::new(0, 0));

        let pos = Position::new(-23, 47);
        let wrapped = pos.wrap(10, 7);
        assert_eq!(wrapped, Position::new(7, 5));
    }

    #[test]
    fn test_neighbor_offsets_are_the_moore_ring() {
        assert!(!NEIGHBOR_OFFSETS.contains(&(0, 0)));
        for (dx, dy) in NEIGHBOR_OFFSETS {
            assert_eq!(dx.abs().max(dy.abs()), 1);
        }
    }

    #[test]
    fn test_species_codes() {
        for species in Species::ALL {
            assert_eq!(Species::from_code(species.code()), Some(species));
        }
        assert_eq!(Species::from_code(8), None);
        assert_eq!(Species::PLACEABLE.len(), 7);
        assert!(!Species::PLACEABLE.contains(&Species::Empty));
    }

    #[test]
    fn test_species_parse() {
        assert_eq!("4".parse::<Species>().unwrap(), Species::Viral);
        assert_eq!("Spreader".parse::<Species>().unwrap(), Species::Spreader);
        assert_eq!(" blinker ".parse::<Species>().unwrap(), Species::Blinker);
        assert!("9".parse::<Species>().is_err());
        assert!("zombie".parse::<Species>().is_err());
    }

    #[test]
    fn test_birth_and_alive_classes() {
        assert!(!Species::Empty.is_alive());
        assert!(Species::Blinker.is_alive());
        assert!(Species::Normal.seeds_birth());
        assert!(Species::Immortal.seeds_birth());
        assert!(!Species::Viral.seeds_birth());
    }
}
