//! Board coordinates and disk colours

use anyhow::{anyhow, Result};

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::{COLUMNS, ROWS};

/// The owner of a cell, or of the turn
///
/// `None` marks an empty cell, and is also the current player once the game is over.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Player {
    None,
    Black,
    White,
}

impl Player {
    /// Returns the other side. `None` has no opponent and maps to itself.
    pub fn opponent(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
            Player::None => Player::None,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Player::None => 0,
            Player::Black => 1,
            Player::White => 2,
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Player::None
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Player::None => "nobody",
            Player::Black => "Black",
            Player::White => "White",
        };
        write!(f, "{}", name)
    }
}

/// An immutable (row, column) coordinate on the board
///
/// Rows and columns are zero-indexed from the top-left corner. In text form
/// a position is written as a column letter followed by a row number, so
/// `Position::new(2, 3)` is `d3`.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Position {
    row: usize,
    col: usize,
}

impl Position {
    /// Creates a position, panicking if it is not on the board
    pub const fn new(row: usize, col: usize) -> Self {
        assert!(row < ROWS && col < COLUMNS, "position off the board");
        Self { row, col }
    }

    /// Creates a position if the coordinates are on the board
    pub fn try_new(row: isize, col: isize) -> Option<Self> {
        if row >= 0 && (row as usize) < ROWS && col >= 0 && (col as usize) < COLUMNS {
            Some(Self {
                row: row as usize,
                col: col as usize,
            })
        } else {
            None
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    /// Packs the position into a single byte, `COLUMNS * row + col`
    ///
    /// This is only a valid encoding for the fixed board width, it is not a
    /// general purpose hash.
    pub fn code(&self) -> u8 {
        (COLUMNS * self.row + self.col) as u8
    }

    /// Inverse of [`Position::code`]
    pub fn from_code(code: u8) -> Option<Self> {
        let code = code as usize;
        if code < ROWS * COLUMNS {
            Some(Self {
                row: code / COLUMNS,
                col: code % COLUMNS,
            })
        } else {
            None
        }
    }

    /// True for the four corner cells
    pub fn is_corner(&self) -> bool {
        (self.row == 0 || self.row == ROWS - 1) && (self.col == 0 || self.col == COLUMNS - 1)
    }

    /// True for any cell on the outer ring, corners included
    pub fn is_edge(&self) -> bool {
        self.row == 0 || self.row == ROWS - 1 || self.col == 0 || self.col == COLUMNS - 1
    }

    /// Iterates over every cell in row-major order
    pub fn all() -> impl Iterator<Item = Position> {
        (0..ROWS).flat_map(|row| (0..COLUMNS).map(move |col| Position { row, col }))
    }

    /// The four corners, clockwise from the top-left
    pub const CORNERS: [Position; 4] = [
        Position { row: 0, col: 0 },
        Position { row: 0, col: COLUMNS - 1 },
        Position { row: ROWS - 1, col: COLUMNS - 1 },
        Position { row: ROWS - 1, col: 0 },
    ];
}

impl Hash for Position {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u8(self.code());
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.col as u8) as char, self.row + 1)
    }
}

impl FromStr for Position {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.trim().chars();
        let col = match chars.next().map(|c| c.to_ascii_lowercase()) {
            Some(letter @ 'a'..='z') => letter as usize - 'a' as usize,
            _ => return Err(anyhow!("could not parse '{}' as a position", s.trim())),
        };
        let row = match chars.as_str().parse::<usize>() {
            Ok(row @ 1..=ROWS) => row - 1,
            _ => return Err(anyhow!("could not parse '{}' as a position", s.trim())),
        };
        if col >= COLUMNS {
            return Err(anyhow!(
                "column '{}' out of range, columns run from a to {}",
                (b'a' + col as u8) as char,
                (b'a' + (COLUMNS - 1) as u8) as char
            ));
        }
        Ok(Self { row, col })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn equality_is_structural() {
        assert_eq!(Position::new(3, 4), Position::new(3, 4));
        assert_ne!(Position::new(3, 4), Position::new(4, 3));

        let set: HashSet<Position> = [Position::new(0, 0), Position::new(0, 0), Position::new(7, 7)]
            .iter()
            .copied()
            .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn code_is_row_major() {
        assert_eq!(Position::new(0, 0).code(), 0);
        assert_eq!(Position::new(1, 0).code(), 8);
        assert_eq!(Position::new(7, 7).code(), 63);
        assert_eq!(Position::from_code(27), Some(Position::new(3, 3)));
        assert_eq!(Position::from_code(64), None);
    }

    #[test]
    fn notation() -> Result<()> {
        assert_eq!(Position::new(2, 3).to_string(), "d3");
        assert_eq!("d3".parse::<Position>()?, Position::new(2, 3));
        assert_eq!(" H8 ".parse::<Position>()?, Position::new(7, 7));
        assert!("i1".parse::<Position>().is_err());
        assert!("a9".parse::<Position>().is_err());
        assert!("a0".parse::<Position>().is_err());
        assert!("".parse::<Position>().is_err());
        Ok(())
    }

    #[test]
    fn edges_and_corners() {
        assert!(Position::new(0, 7).is_corner());
        assert!(Position::new(0, 7).is_edge());
        assert!(Position::new(0, 3).is_edge());
        assert!(!Position::new(0, 3).is_corner());
        assert!(!Position::new(3, 3).is_edge());
        assert_eq!(Position::all().count(), ROWS * COLUMNS);
        assert!(Position::CORNERS.iter().all(Position::is_corner));
    }

    #[test]
    fn off_board() {
        assert_eq!(Position::try_new(-1, 0), None);
        assert_eq!(Position::try_new(0, 8), None);
        assert_eq!(Position::try_new(7, 0), Some(Position::new(7, 0)));
    }

    #[test]
    fn opponents() {
        assert_eq!(Player::Black.opponent(), Player::White);
        assert_eq!(Player::White.opponent(), Player::Black);
        assert_eq!(Player::None.opponent(), Player::None);
    }
}
